//! Page behaviour for a single-page portfolio: persisted theme, mobile
//! navigation, scroll spy, smooth anchor scrolling, hero image tilt and the
//! animated hero canvas.
//!
//! Page logic is written against the small traits in [`dom`] so it can be
//! tested natively; the browser bindings live in `web` and only build for
//! `wasm32`.

pub mod anchor;
pub mod config;
pub mod dom;
mod error;
pub mod frame;
pub mod nav;
pub mod random;
pub mod scene;
pub mod scroll_spy;
pub mod theme;
pub mod tilt;

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod testing;

pub use error::{PageError, Result};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// Multi-platform entry point
#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn run() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if let Err(e) = console_log::init_with_level(log::Level::Info) {
                web_sys::console::error_1(&format!("Couldn't initialize logger: {}", e).into());
            }

            if let Err(e) = web::boot(&config::PageConfig::default()) {
                log::error!("Page behaviour unavailable: {}", e);
            }
        } else {
            env_logger::init();
            log::info!("Starting hero preview");

            if let Err(e) = native::run_preview() {
                log::error!("Hero preview failed: {}", e);
            }
        }
    }
}
