//! Browser side: `web_sys` implementations of the DOM seams and the start-up
//! wiring that binds every feature to the live page.

mod animation;
mod features;
mod hero;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, ScrollIntoViewOptions, Storage, Window};

use crate::config::PageConfig;
use crate::dom::{FragmentHost, KeyValueStore, PageElement};
use crate::{PageError, Result};

pub use animation::AnimationLoop;

thread_local! {
    static HERO_LOOP: RefCell<Option<AnimationLoop>> = const { RefCell::new(None) };
}

/// Wires every page feature. Each one initialises on its own: a missing
/// element or a failing call only disables that feature.
pub fn boot(config: &PageConfig) -> Result<()> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| PageError::MissingElement("document".to_string()))?;

    report("theme", features::init_theme(&window, &document, config));
    report("navigation", features::init_navigation(&document, config));
    report("scroll spy", features::init_scroll_spy(&document, config));
    report("anchor scrolling", features::init_anchor_scrolling(&document, config));
    report("hero tilt", features::init_hero_tilt(&document, config));
    report("hero canvas", hero::init_hero_canvas(&document, config));

    Ok(())
}

fn report(feature: &str, result: Result<bool>) {
    match result {
        Ok(true) => log::info!("{} initialised", feature),
        Ok(false) => log::info!("{} skipped: element not on page", feature),
        Err(e) => log::warn!("{} disabled: {}", feature, e),
    }
}

/// Stops the hero animation loop, including one whose renderer is still
/// being set up. Returns `false` if there was nothing left to stop.
#[wasm_bindgen(js_name = stopHeroAnimation)]
pub fn stop_hero_animation() -> bool {
    HERO_LOOP.with(|slot| match slot.borrow().as_ref() {
        Some(hero_loop) if !hero_loop.is_halted() => {
            hero_loop.stop();
            log::info!("Hero animation stopped after {} frames", hero_loop.frames());
            true
        }
        _ => false,
    })
}

#[wasm_bindgen(js_name = heroAnimationRunning)]
pub fn hero_animation_running() -> bool {
    HERO_LOOP.with(|slot| slot.borrow().as_ref().is_some_and(|hero_loop| hero_loop.is_running()))
}

pub(crate) fn install_hero_loop(hero_loop: AnimationLoop) {
    HERO_LOOP.with(|slot| {
        if let Some(previous) = slot.borrow_mut().replace(hero_loop) {
            previous.stop();
        }
    });
}

// === Helpers ===

pub(crate) fn dom_err(context: &str, err: JsValue) -> PageError {
    PageError::Dom(format!("{}: {:?}", context, err))
}

pub(crate) fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| PageError::MissingElement("window".to_string()))
}

pub(crate) fn query(document: &Document, selector: &str) -> Result<Option<Element>> {
    document
        .query_selector(selector)
        .map_err(|e| dom_err(selector, e))
}

pub(crate) fn require(document: &Document, selector: &str) -> Result<Element> {
    query(document, selector)?.ok_or_else(|| PageError::MissingElement(selector.to_string()))
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| dom_err(selector, e))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Binds `handler` for the lifetime of the page.
pub(crate) fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<()> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| dom_err(event, e))?;
    closure.forget();
    Ok(())
}

// === DOM seams ===

impl PageElement for Element {
    fn has_class(&self, name: &str) -> bool {
        self.class_list().contains(name)
    }

    fn add_class(&self, name: &str) -> Result<()> {
        self.class_list()
            .add_1(name)
            .map_err(|e| dom_err("classList.add", e))
    }

    fn remove_class(&self, name: &str) -> Result<()> {
        self.class_list()
            .remove_1(name)
            .map_err(|e| dom_err("classList.remove", e))
    }

    fn toggle_class(&self, name: &str) -> Result<bool> {
        self.class_list()
            .toggle(name)
            .map_err(|e| dom_err("classList.toggle", e))
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        Element::set_attribute(self, name, value).map_err(|e| dom_err(name, e))
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) -> Result<()> {
        let element = self
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| PageError::Dom(format!("<{}> has no inline style", self.tag_name())))?;
        element
            .style()
            .set_property(property, value)
            .map_err(|e| dom_err(property, e))
    }
}

impl KeyValueStore for Storage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_item(key)
            .map_err(|e| PageError::Storage(format!("getItem({}): {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_item(key, value)
            .map_err(|e| PageError::Storage(format!("setItem({}): {:?}", key, e)))
    }
}

impl FragmentHost for Document {
    fn contains_id(&self, id: &str) -> bool {
        self.get_element_by_id(id).is_some()
    }

    fn smooth_scroll_to(&self, id: &str) -> Result<()> {
        let target = self
            .get_element_by_id(id)
            .ok_or_else(|| PageError::MissingElement(format!("#{}", id)))?;

        let js_options = ScrollIntoViewOptions::new();
        js_options.set_behavior(web_sys::ScrollBehavior::Smooth);
        js_options.set_block(web_sys::ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&js_options);
        Ok(())
    }
}
