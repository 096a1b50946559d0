pub mod color;
pub mod column;
pub mod config;
pub mod error;
pub mod field;
pub mod particle;
pub mod raster;
pub mod throttle;

pub use error::{Error, Result};

// Only compile the browser glue when targeting wasm32; everything above is
// plain Rust and tests on the host.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::{LEFT_COLUMN_ID, PARTICLE_CANVAS_ID, RIGHT_COLUMN_ID};

    mod column;
    mod dom;
    mod frame;
    mod text;

    pub use dom::{rasterize, RasterizedText};
    pub use frame::AnimationLoop;

    thread_local! {
        static RUNNING: RefCell<Vec<AnimationLoop>> = const { RefCell::new(Vec::new()) };
    }

    fn keep(frames: AnimationLoop) {
        RUNNING.with(|running| running.borrow_mut().push(frames));
    }

    /// Cancel every animation started by [`main`]. Returns how many loops
    /// were stopped.
    #[wasm_bindgen(js_name = stopAnimations)]
    pub fn stop_animations() -> usize {
        let stopped = RUNNING.with(|running| std::mem::take(&mut *running.borrow_mut()));
        for frames in &stopped {
            frames.cancel();
        }
        log::info!("stopped {} animation loops", stopped.len());
        stopped.len()
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        // Each subsystem fails on its own; a missing canvas only turns that
        // one animation off.
        match text::start(PARTICLE_CANVAS_ID) {
            Ok(frames) => {
                keep(frames);
                log::info!("particle text started on #{PARTICLE_CANVAS_ID}");
            }
            Err(e) => log::error!("particle text disabled: {e}"),
        }
        for id in [LEFT_COLUMN_ID, RIGHT_COLUMN_ID] {
            match column::start(id) {
                Ok(frames) => {
                    keep(frames);
                    log::info!("side column started on #{id}");
                }
                Err(e) => log::error!("side column disabled: {e}"),
            }
        }
        Ok(())
    }
}
