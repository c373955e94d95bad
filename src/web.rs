//! The browser entry point.

use std::cell::RefCell;
use std::rc::Rc;

use inkcanv_renderer::paws::point;
use inkcanv_renderer_canvas::{get_window_size, AnimationFrameScheduler, CanvasSurface};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::input::{offset_is_consistent, InputEvent, PointerEvent, PointerType};
use crate::{InkConfig, RenderLoop};

type WebRenderLoop = RenderLoop<CanvasSurface, AnimationFrameScheduler>;

fn find_canvas(document: &web_sys::Document, selector: &str) -> anyhow::Result<HtmlCanvasElement> {
   document
      .query_selector(selector)
      .map_err(|error| anyhow::anyhow!("invalid selector {}: {:?}", selector, error))?
      .ok_or_else(|| anyhow::anyhow!("no element matches {}", selector))?
      .dyn_into::<HtmlCanvasElement>()
      .map_err(|_| anyhow::anyhow!("{} is not a canvas", selector))
}

fn to_pointer_event(event: &web_sys::PointerEvent) -> PointerEvent {
   PointerEvent {
      // Unknown devices are treated like mice, which pen-only input ignores.
      pointer_type: event.pointer_type().parse().unwrap_or(PointerType::Mouse),
      buttons: event.buttons(),
      position: point(event.offset_x() as f32, event.offset_y() as f32),
      pressure: event.pressure(),
   }
}

fn check_offset(canvas: &HtmlCanvasElement, event: &web_sys::PointerEvent) {
   let rect = canvas.get_bounding_client_rect();
   if !offset_is_consistent(event.offset_x() as f32, event.client_x() as f32, rect.left() as f32)
   {
      log::warn!(
         "pointer offset {} does not match client position {} minus canvas left {}",
         event.offset_x(),
         event.client_x(),
         rect.left()
      );
   }
}

fn listen(
   canvas: &HtmlCanvasElement,
   event_name: &str,
   render_loop: &Rc<RefCell<WebRenderLoop>>,
   make_event: fn(PointerEvent) -> InputEvent,
) -> anyhow::Result<()> {
   let render_loop = Rc::clone(render_loop);
   let target = canvas.clone();
   let is_down = event_name == "pointerdown";
   let closure = Closure::wrap(Box::new(move |event: web_sys::PointerEvent| {
      if is_down {
         check_offset(&target, &event);
      }
      let input = make_event(to_pointer_event(&event));
      let accepted = render_loop.borrow_mut().handle(input);
      if accepted {
         event.prevent_default();
      }
   }) as Box<dyn FnMut(web_sys::PointerEvent)>);
   canvas
      .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
      .map_err(|error| anyhow::anyhow!("cannot listen to {}: {:?}", event_name, error))?;
   // The listeners live as long as the page does.
   closure.forget();
   Ok(())
}

fn setup() -> anyhow::Result<()> {
   let config = InkConfig::load_or_create()?;

   let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no global window"))?;
   let document = window.document().ok_or_else(|| anyhow::anyhow!("no document"))?;
   let ink_canvas = find_canvas(&document, "canvas.ink-layer")?;
   let marker_canvas = find_canvas(&document, "canvas.marker-layer")?;

   let mut ink = CanvasSurface::new(ink_canvas.clone())?;
   let mut marker = CanvasSurface::new(marker_canvas)?;
   let (width, height) = get_window_size()?;
   ink.resize(width, height);
   marker.resize(width, height);

   let render_loop = Rc::new(RefCell::new(RenderLoop::new(
      ink,
      marker,
      AnimationFrameScheduler::new()?,
      &config,
   )));
   {
      let weak = Rc::downgrade(&render_loop);
      render_loop.borrow_mut().scheduler_mut().set_callback(move |_timestamp| {
         if let Some(render_loop) = weak.upgrade() {
            render_loop.borrow_mut().frame();
         }
      });
   }

   listen(&ink_canvas, "pointerdown", &render_loop, InputEvent::Down)?;
   listen(&ink_canvas, "pointermove", &render_loop, InputEvent::Move)?;
   listen(&ink_canvas, "pointerup", &render_loop, InputEvent::Up)?;
   listen(&ink_canvas, "pointerleave", &render_loop, InputEvent::Leave)?;

   log::info!("ink surface ready ({}x{})", width, height);
   Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
   console_error_panic_hook::set_once();
   let _ = console_log::init_with_level(log::Level::Info);

   setup().map_err(|error| {
      log::error!("{:#}", error);
      JsValue::from_str(&error.to_string())
   })
}
