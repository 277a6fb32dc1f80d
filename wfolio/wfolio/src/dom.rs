//! Narrow seams over the parts of the DOM the page features touch.
//!
//! Every feature is written against these traits rather than `web_sys`
//! directly, so the browser bindings live in `web` and the behaviour can be
//! driven from plain Rust in tests.

use crate::Result;

/// An element handle: class list, attributes, text and inline style.
///
/// Handles are cheap clones of a shared node, so every method takes `&self`.
pub trait PageElement {
    fn has_class(&self, name: &str) -> bool;
    fn add_class(&self, name: &str) -> Result<()>;
    fn remove_class(&self, name: &str) -> Result<()>;
    /// Flips `name` and returns whether it is now present.
    fn toggle_class(&self, name: &str) -> Result<bool>;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str) -> Result<()>;
    fn set_text(&self, text: &str);
    fn set_style(&self, property: &str, value: &str) -> Result<()>;
}

/// Durable string key-value storage (the browser's `localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// The document as seen by in-page anchors: id lookup plus scroll-into-view.
pub trait FragmentHost {
    fn contains_id(&self, id: &str) -> bool;
    /// Smoothly scrolls `#id` to the top of the viewport.
    fn smooth_scroll_to(&self, id: &str) -> Result<()>;
}
