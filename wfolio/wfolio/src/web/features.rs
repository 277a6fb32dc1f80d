use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    MouseEvent, Window,
};

use super::{dom_err, listen, query, query_all, require};
use crate::anchor::handle_anchor_click;
use crate::config::PageConfig;
use crate::nav::NavController;
use crate::scroll_spy::{ScrollSpy, SectionEntry};
use crate::theme::ThemeManager;
use crate::tilt::{HeroTilt, Rect};
use crate::{PageError, Result};

pub fn init_theme(window: &Window, document: &Document, config: &PageConfig) -> Result<bool> {
    let body: Element = document
        .body()
        .ok_or_else(|| PageError::MissingElement("body".to_string()))?
        .into();
    let storage = window
        .local_storage()
        .map_err(|e| PageError::Storage(format!("{:?}", e)))?
        .ok_or_else(|| PageError::Storage("localStorage unavailable".to_string()))?;

    let toggle = query(document, &config.theme_toggle)?;
    let label = query(document, &config.mode_label)?;
    let manager = Rc::new(ThemeManager::init(
        body,
        storage,
        toggle.clone(),
        label,
        &config.theme_storage_key,
    ));

    if let Some(toggle) = toggle {
        listen(&toggle, "click", move |_| match manager.toggle() {
            Ok(theme) => log::info!("Theme switched to {}", theme.as_str()),
            Err(e) => log::warn!("Theme toggle failed: {}", e),
        })?;
    }

    Ok(true)
}

pub fn init_navigation(document: &Document, config: &PageConfig) -> Result<bool> {
    let toggle = require(document, &config.menu_toggle)?;
    let nav = require(document, &config.site_nav)?;
    let links = query_all(document, &config.nav_links)?;
    let controller = Rc::new(NavController::new(toggle.clone(), nav));

    {
        let controller = controller.clone();
        listen(&toggle, "click", move |_| {
            if let Err(e) = controller.toggle_menu() {
                log::warn!("Menu toggle failed: {}", e);
            }
        })?;
    }

    for link in &links {
        let controller = controller.clone();
        listen(link, "click", move |_| {
            if let Err(e) = controller.close() {
                log::warn!("Menu close failed: {}", e);
            }
        })?;
    }

    Ok(true)
}

pub fn init_scroll_spy(document: &Document, config: &PageConfig) -> Result<bool> {
    let sections = query_all(document, &config.sections)?;
    if sections.is_empty() {
        return Ok(false);
    }
    let spy = ScrollSpy::new(query_all(document, &config.nav_links)?);

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let batch: Vec<SectionEntry> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| SectionEntry {
                    id: entry.target().id(),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect();

            if let Err(e) = spy.on_intersections(&batch) {
                log::warn!("Scroll spy update failed: {}", e);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(&config.spy.root_margin);
    options.set_threshold(&JsValue::from_f64(config.spy.threshold));

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        .map_err(|e| dom_err("IntersectionObserver", e))?;
    for section in &sections {
        observer.observe(section);
    }
    callback.forget();

    log::info!("Scroll spy watching {} sections", sections.len());
    Ok(true)
}

pub fn init_anchor_scrolling(document: &Document, config: &PageConfig) -> Result<bool> {
    let anchors = query_all(document, &config.anchors)?;

    for anchor in anchors {
        let document = document.clone();
        let target = anchor.clone();
        listen(&target, "click", move |event| {
            let href = anchor.get_attribute("href").unwrap_or_default();
            match handle_anchor_click(&document, &href) {
                Ok(outcome) if outcome.prevents_default() => event.prevent_default(),
                Ok(_) => {}
                Err(e) => log::warn!("Anchor scroll to {} failed: {}", href, e),
            }
        })?;
    }

    Ok(true)
}

pub fn init_hero_tilt(document: &Document, config: &PageConfig) -> Result<bool> {
    let Some(image) = query(document, &config.hero_image)? else {
        return Ok(false);
    };
    let tilt = Rc::new(HeroTilt::new(image.clone(), config.tilt_max_degrees));

    {
        let tilt = tilt.clone();
        let bounds_source = image.clone();
        listen(&image, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let bounds = bounds_source.get_bounding_client_rect();
            let rect = Rect {
                left: bounds.left(),
                top: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
            };
            if let Err(e) = tilt.on_pointer_move(event.client_x() as f64, event.client_y() as f64, &rect) {
                log::warn!("Hero tilt failed: {}", e);
            }
        })?;
    }

    listen(&image, "mouseleave", move |_| {
        if let Err(e) = tilt.on_pointer_leave() {
            log::warn!("Hero tilt reset failed: {}", e);
        }
    })?;

    Ok(true)
}
