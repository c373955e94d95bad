use inkcanv_renderer::paws;

use wasm_bindgen::JsValue;

pub fn color_to_jsvalue(color: paws::Color) -> JsValue {
   JsValue::from_str(&format!(
      "rgba({}, {}, {}, {})",
      color.r,
      color.g,
      color.b,
      color.a as f32 / 255.0
   ))
}

/// Returns the inner size of the browser window, in CSS pixels.
pub fn get_window_size() -> anyhow::Result<(u32, u32)> {
   let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no global window"))?;
   let dimension = |value: Result<JsValue, JsValue>| {
      value
         .ok()
         .and_then(|value| value.as_f64())
         .ok_or_else(|| anyhow::anyhow!("cannot read the window size"))
   };
   let width = dimension(window.inner_width())?;
   let height = dimension(window.inner_height())?;
   Ok((width as u32, height as u32))
}
