use inkcanv_renderer::{FrameHandle, FrameScheduler};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

/// Schedules frames with `window.requestAnimationFrame`.
///
/// The callback is registered once with [`set_callback`][Self::set_callback] and reused for every
/// request, so no closure is allocated per frame.
pub struct AnimationFrameScheduler {
   window: web_sys::Window,
   callback: Option<Closure<dyn FnMut(f64)>>,
}

impl AnimationFrameScheduler {
   pub fn new() -> anyhow::Result<Self> {
      let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no global window"))?;
      Ok(Self { window, callback: None })
   }

   /// Sets the function run when a requested frame fires. It receives the frame timestamp.
   pub fn set_callback(&mut self, callback: impl FnMut(f64) + 'static) {
      self.callback = Some(Closure::wrap(Box::new(callback) as Box<dyn FnMut(f64)>));
   }
}

impl FrameScheduler for AnimationFrameScheduler {
   fn request_frame(&mut self) -> Option<FrameHandle> {
      let callback = match &self.callback {
         Some(callback) => callback,
         None => {
            log::error!("frame requested before a frame callback was set");
            return None;
         }
      };
      match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
         Ok(id) => Some(FrameHandle(id as u64)),
         Err(error) => {
            log::error!("requestAnimationFrame failed: {:?}", error);
            None
         }
      }
   }

   fn cancel_frame(&mut self, handle: FrameHandle) {
      if let Err(error) = self.window.cancel_animation_frame(handle.0 as i32) {
         log::warn!("cancelAnimationFrame failed: {:?}", error);
      }
   }
}
