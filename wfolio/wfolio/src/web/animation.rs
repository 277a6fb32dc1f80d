use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{dom_err, listen, window};
use crate::frame::{FrameDecision, LoopGate};
use crate::Result;

struct LoopShared {
    gate: RefCell<LoopGate>,
    request_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

/// Self-rescheduling `requestAnimationFrame` loop that can be stopped.
///
/// Handles are shared: the page keeps one while the renderer is still being
/// set up, so a stop issued before `start` sticks. The frame closure only
/// holds a weak reference back to the loop.
#[derive(Clone)]
pub struct AnimationLoop {
    shared: Rc<LoopShared>,
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationLoop {
    /// An idle loop. Nothing is scheduled until `start`.
    pub fn new() -> Self {
        Self {
            shared: Rc::new(LoopShared {
                gate: RefCell::new(LoopGate::idle()),
                request_id: Cell::new(None),
                callback: RefCell::new(None),
            }),
        }
    }

    /// Starts calling `on_frame` once per display frame. Returning `false`
    /// from `on_frame` halts the loop.
    ///
    /// Returns `Ok(false)` without scheduling anything if the loop was
    /// stopped first.
    pub fn start(&self, mut on_frame: impl FnMut() -> bool + 'static) -> Result<bool> {
        if !self.shared.gate.borrow_mut().start() {
            return Ok(false);
        }
        let shared = &self.shared;

        let weak = Rc::downgrade(shared);
        let callback = Closure::<dyn FnMut()>::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared.request_id.set(None);

            let decision = shared.gate.borrow_mut().on_frame(page_hidden());
            match decision {
                FrameDecision::Render => {
                    if !on_frame() {
                        shared.gate.borrow_mut().stop();
                        return;
                    }
                    if let Err(e) = schedule(&shared) {
                        log::error!("Couldn't schedule next frame: {}", e);
                    }
                }
                FrameDecision::Suspend => log::debug!("Page hidden, animation suspended"),
                FrameDecision::Halt => {}
            }
        });
        *shared.callback.borrow_mut() = Some(callback);

        let document = window()?
            .document()
            .ok_or_else(|| crate::PageError::MissingElement("document".to_string()))?;
        let weak: Weak<LoopShared> = Rc::downgrade(shared);
        listen(&document, "visibilitychange", move |_| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let resume = shared.gate.borrow_mut().on_visibility(page_hidden());
            if resume {
                log::debug!("Page visible, animation resumed");
                if let Err(e) = schedule(&shared) {
                    log::error!("Couldn't resume animation: {}", e);
                }
            }
        })?;

        schedule(shared)?;
        Ok(true)
    }

    /// Cancels the pending frame and releases the frame closure.
    pub fn stop(&self) {
        let pending = self.shared.gate.borrow_mut().stop();
        if let Some(id) = self.shared.request_id.take() {
            if pending {
                if let Ok(window) = window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
        self.shared.callback.borrow_mut().take();
    }

    pub fn is_halted(&self) -> bool {
        self.shared.gate.borrow().is_halted()
    }

    pub fn is_running(&self) -> bool {
        self.shared.gate.borrow().is_running()
    }

    pub fn frames(&self) -> u64 {
        self.shared.gate.borrow().frames()
    }
}

fn schedule(shared: &LoopShared) -> Result<()> {
    let callback = shared.callback.borrow();
    let Some(callback) = callback.as_ref() else {
        return Ok(());
    };

    let id = window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|e| dom_err("requestAnimationFrame", e))?;
    shared.request_id.set(Some(id));
    shared.gate.borrow_mut().mark_scheduled();
    Ok(())
}

fn page_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .is_some_and(|d| d.hidden())
}
