use crate::transmit::FrameScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Schedules work with `requestAnimationFrame`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationFrameScheduler;

impl FrameScheduler for AnimationFrameScheduler {
    fn schedule_once(&self, task: Box<dyn FnOnce()>) -> bool {
        let Some(w) = web::window() else {
            log::warn!("[panel] no window; frame task dropped");
            return false;
        };
        let callback = Closure::once_into_js(move || task());
        match w.request_animation_frame(callback.unchecked_ref()) {
            Ok(_) => true,
            Err(e) => {
                log::error!("[panel] requestAnimationFrame failed: {:?}", e);
                false
            }
        }
    }
}
