use inkcanv_renderer::paws::{self, Point, Vector};
use inkcanv_renderer::{line_cap_name, RasterSurface, StrokeStyle};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::common::*;

/// A raster surface drawing into an HTML `<canvas>` through its 2D context.
pub struct CanvasSurface {
   canvas: HtmlCanvasElement,
   context: CanvasRenderingContext2d,
}

impl CanvasSurface {
   /// Acquires the 2D context of `canvas`.
   ///
   /// Fails if the canvas can't provide a 2D context, e.g. because another context type was
   /// already requested on it.
   pub fn new(canvas: HtmlCanvasElement) -> anyhow::Result<Self> {
      let context = canvas
         .get_context("2d")
         .map_err(|error| anyhow::anyhow!("cannot get the 2D context: {:?}", error))?
         .ok_or_else(|| anyhow::anyhow!("the canvas has no 2D context"))?
         .dyn_into::<CanvasRenderingContext2d>()
         .map_err(|_| anyhow::anyhow!("the 2D context has an unexpected type"))?;
      Ok(Self { canvas, context })
   }

   pub fn canvas(&self) -> &HtmlCanvasElement {
      &self.canvas
   }

   /// Resizes the backing canvas. This wipes its contents, as browsers do.
   pub fn resize(&mut self, width: u32, height: u32) {
      self.canvas.set_width(width);
      self.canvas.set_height(height);
   }

   fn apply_stroke_style(&self, style: &StrokeStyle) {
      self.context.set_stroke_style(&color_to_jsvalue(style.color));
      self.context.set_line_width(style.width as _);
      self.context.set_line_cap(line_cap_name(style.cap));
      let segments = js_sys::Array::new();
      for &length in style.dash.iter().flatten() {
         segments.push(&JsValue::from_f64(length as _));
      }
      if let Err(error) = self.context.set_line_dash(&segments) {
         log::warn!("cannot set the line dash: {:?}", error);
      }
   }

   fn trace_ellipse(&self, center: Point, radii: Vector) -> bool {
      self.context.begin_path();
      match self.context.ellipse(
         center.x as _,
         center.y as _,
         radii.x as _,
         radii.y as _,
         0.0,
         0.0,
         std::f64::consts::TAU,
      ) {
         Ok(()) => true,
         Err(error) => {
            // Negative radii end up here.
            log::debug!("skipping ellipse: {:?}", error);
            false
         }
      }
   }
}

impl RasterSurface for CanvasSurface {
   fn size(&self) -> (u32, u32) {
      (self.canvas.width(), self.canvas.height())
   }

   fn clear(&mut self, color: paws::Color) {
      let (width, height) = self.size();
      self.context.clear_rect(0.0, 0.0, width as _, height as _);
      if color.a > 0 {
         self.context.save();
         self.context.set_fill_style(&color_to_jsvalue(color));
         self.context.fill_rect(0.0, 0.0, width as _, height as _);
         self.context.restore();
      }
   }

   fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) {
      let (first, rest) = match points.split_first() {
         Some(split) => split,
         None => return,
      };
      self.context.save();
      self.apply_stroke_style(style);
      self.context.begin_path();
      self.context.move_to(first.x as _, first.y as _);
      for point in rest {
         self.context.line_to(point.x as _, point.y as _);
      }
      self.context.stroke();
      self.context.restore();
   }

   fn fill_ellipse(&mut self, center: Point, radii: Vector, color: paws::Color) {
      self.context.save();
      self.context.set_fill_style(&color_to_jsvalue(color));
      if self.trace_ellipse(center, radii) {
         self.context.fill();
      }
      self.context.restore();
   }

   fn stroke_ellipse(&mut self, center: Point, radii: Vector, style: &StrokeStyle) {
      self.context.save();
      self.apply_stroke_style(style);
      if self.trace_ellipse(center, radii) {
         self.context.stroke();
      }
      self.context.restore();
   }

   fn download_rgba(&self, dest: &mut [u8]) {
      let (width, height) = self.size();
      assert!(
         dest.len() == width as usize * height as usize * 4,
         "destination size does not match the canvas dimensions"
      );
      match self.context.get_image_data(0.0, 0.0, width as _, height as _) {
         Ok(image_data) => dest.copy_from_slice(&image_data.data().0),
         Err(error) => log::error!("cannot read back canvas pixels: {:?}", error),
      }
   }
}
