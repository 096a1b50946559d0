use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::error::{Error, Result};

/// Handle to a running `requestAnimationFrame` loop.
///
/// The loop keeps itself alive, so dropping the handle leaves it running;
/// call [`AnimationLoop::cancel`] to stop it.
#[derive(Clone)]
pub struct AnimationLoop {
    state: Rc<LoopState>,
    window: Window,
}

#[derive(Default)]
struct LoopState {
    cancelled: Cell<bool>,
    running: Cell<bool>,
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopState {
    fn request(&self, window: &Window) -> Result<()> {
        let callback = self.callback.borrow();
        let Some(cb) = callback.as_ref() else {
            return Ok(());
        };
        let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        self.pending.set(Some(id));
        Ok(())
    }

    // A closure cannot drop itself mid-call; hand the drop to a timer.
    fn release_later(self: &Rc<Self>, window: &Window) {
        let state = Rc::clone(self);
        let release = Closure::once_into_js(move || {
            state.callback.borrow_mut().take();
        });
        if window.set_timeout_with_callback(release.unchecked_ref()).is_err() {
            log::warn!("could not schedule release of a cancelled animation loop");
        }
    }
}

impl AnimationLoop {
    /// Call `frame` with the frame timestamp (ms, same clock as
    /// `performance.now()`) once per display refresh.
    pub fn start<F>(mut frame: F) -> Result<Self>
    where
        F: FnMut(f64) + 'static,
    {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let state = Rc::new(LoopState::default());

        let inner = Rc::clone(&state);
        let win = window.clone();
        *state.callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            inner.pending.set(None);
            if inner.cancelled.get() {
                return;
            }
            inner.running.set(true);
            frame(ts);
            inner.running.set(false);

            if inner.cancelled.get() {
                inner.release_later(&win);
                return;
            }
            // schedule next
            if let Err(e) = inner.request(&win) {
                log::error!("animation loop stopped: {e}");
            }
        }) as Box<dyn FnMut(f64)>));

        state.request(&window)?;
        Ok(Self { state, window })
    }

    /// Stop the loop: the pending frame is cancelled and no further frames
    /// are requested. Safe to call from inside the frame callback.
    pub fn cancel(&self) {
        let state = &self.state;
        if state.cancelled.replace(true) {
            return;
        }
        if let Some(id) = state.pending.take() {
            if self.window.cancel_animation_frame(id).is_err() {
                log::warn!("cancelAnimationFrame({id}) failed");
            }
        }
        if !state.running.get() {
            state.callback.borrow_mut().take();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }
}
