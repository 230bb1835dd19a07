use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::dom;
use crate::error::SiteError;

/// What a frame step wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Done,
}

/// A `requestAnimationFrame` loop that can be cancelled from outside.
///
/// The loop keeps itself alive until its step returns [`Tick::Done`] or
/// [`FrameLoop::cancel`] is called; dropping the handle does not stop it.
#[derive(Clone)]
pub struct FrameLoop {
    state: Rc<LoopState>,
}

struct LoopState {
    request_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopState {
    fn schedule(&self) -> Result<(), SiteError> {
        let callback = self.callback.borrow();
        if let Some(callback) = callback.as_ref() {
            let id = dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.request_id.set(Some(id));
        }
        Ok(())
    }

    fn release(&self) {
        if let Some(id) = self.request_id.take() {
            if let Ok(window) = dom::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Breaks the state -> closure -> state cycle.
        let callback = self.callback.borrow_mut().take();
        drop(callback);
    }
}

impl FrameLoop {
    /// Runs `step` right away, then once per animation frame until it
    /// returns [`Tick::Done`].
    pub fn start<F>(mut step: F) -> Result<FrameLoop, SiteError>
    where
        F: FnMut() -> Tick + 'static,
    {
        let state = Rc::new(LoopState {
            request_id: Cell::new(None),
            callback: RefCell::new(None),
        });
        if step() == Tick::Done {
            return Ok(FrameLoop { state });
        }

        let looped = state.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |_: f64| {
            looped.request_id.set(None);
            match step() {
                Tick::Continue => {
                    if let Err(err) = looped.schedule() {
                        log::warn!("frame loop stopped: {}", err);
                        looped.release();
                    }
                }
                Tick::Done => looped.release(),
            }
        });
        *state.callback.borrow_mut() = Some(callback);

        if let Err(err) = state.schedule() {
            state.release();
            return Err(err);
        }
        Ok(FrameLoop { state })
    }

    /// Cancels the pending frame, if any. Idempotent.
    pub fn cancel(&self) {
        self.state.release();
    }

    pub fn is_running(&self) -> bool {
        self.state.callback.borrow().is_some()
    }
}

/// Collapses bursts of events into at most one pending frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the caller should request a frame.
    pub fn arm(&self) -> bool {
        !self.pending.replace(true)
    }

    /// Called from the frame callback before doing the work.
    pub fn disarm(&self) {
        self.pending.set(false);
    }
}

/// Requests a single frame for an already-built callback.
pub fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, SiteError> {
    Ok(dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_runs_before_any_frame() {
        let calls = Rc::new(Cell::new(0));
        let counted = calls.clone();
        let handle = FrameLoop::start(move || {
            counted.set(counted.get() + 1);
            Tick::Done
        })
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(!handle.is_running());
        handle.cancel();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn gate_admits_one_request_until_disarmed() {
        let gate = FrameGate::new();
        assert!(gate.arm());
        assert!(!gate.arm());
        assert!(!gate.arm());
        gate.disarm();
        assert!(gate.arm());
    }

    #[test]
    fn disarm_without_arm_is_harmless() {
        let gate = FrameGate::new();
        gate.disarm();
        assert!(gate.arm());
    }
}
