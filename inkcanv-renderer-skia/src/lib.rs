//! A CPU raster backend built on `tiny-skia`.
//!
//! Used for headless replays and for tests that need to look at real pixels.

use inkcanv_renderer::paws::{self, Point, Vector};
use inkcanv_renderer::{RasterSurface, StrokeStyle};
use tiny_skia::{
   FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};

/// A raster surface backed by an in-memory pixmap.
pub struct SkiaSurface {
   pixmap: Pixmap,
}

impl SkiaSurface {
   /// Creates a new, fully transparent surface.
   pub fn new(width: u32, height: u32) -> anyhow::Result<Self> {
      let pixmap = Pixmap::new(width, height)
         .ok_or_else(|| anyhow::anyhow!("cannot create a {}x{} surface", width, height))?;
      Ok(Self { pixmap })
   }

   /// Returns the underlying pixmap.
   pub fn pixmap(&self) -> &Pixmap {
      &self.pixmap
   }

   /// Returns the non-premultiplied color of a single pixel, or `None` if it's out of bounds.
   pub fn pixel(&self, x: u32, y: u32) -> Option<paws::Color> {
      let color = self.pixmap.pixel(x, y)?.demultiply();
      Some(paws::Color {
         r: color.red(),
         g: color.green(),
         b: color.blue(),
         a: color.alpha(),
      })
   }
}

fn to_paint(color: paws::Color) -> Paint<'static> {
   let mut paint = Paint::default();
   paint.set_color_rgba8(color.r, color.g, color.b, color.a);
   paint.anti_alias = true;
   paint
}

fn to_stroke(style: &StrokeStyle) -> Stroke {
   let mut stroke = Stroke {
      width: style.width,
      line_cap: match style.cap {
         paws::LineCap::Butt => LineCap::Butt,
         paws::LineCap::Round => LineCap::Round,
         paws::LineCap::Square => LineCap::Square,
      },
      ..Default::default()
   };
   if let Some(dash) = &style.dash {
      stroke.dash = StrokeDash::new(dash.clone(), 0.0);
      if stroke.dash.is_none() {
         log::warn!("ignoring invalid dash pattern {:?}", dash);
      }
   }
   stroke
}

fn ellipse_path(center: Point, radii: Vector) -> Option<Path> {
   let oval = Rect::from_xywh(
      center.x - radii.x,
      center.y - radii.y,
      radii.x * 2.0,
      radii.y * 2.0,
   )?;
   PathBuilder::from_oval(oval)
}

impl RasterSurface for SkiaSurface {
   fn size(&self) -> (u32, u32) {
      (self.pixmap.width(), self.pixmap.height())
   }

   fn clear(&mut self, color: paws::Color) {
      self.pixmap.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
   }

   fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) {
      let (first, rest) = match points.split_first() {
         Some(split) => split,
         None => return,
      };
      let mut builder = PathBuilder::new();
      builder.move_to(first.x, first.y);
      for point in rest {
         builder.line_to(point.x, point.y);
      }
      // A lone move-to has no segments to stroke.
      if let Some(path) = builder.finish() {
         self.pixmap.stroke_path(
            &path,
            &to_paint(style.color),
            &to_stroke(style),
            Transform::identity(),
            None,
         );
      }
   }

   fn fill_ellipse(&mut self, center: Point, radii: Vector, color: paws::Color) {
      if let Some(path) = ellipse_path(center, radii) {
         self.pixmap.fill_path(
            &path,
            &to_paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
         );
      }
   }

   fn stroke_ellipse(&mut self, center: Point, radii: Vector, style: &StrokeStyle) {
      if let Some(path) = ellipse_path(center, radii) {
         self.pixmap.stroke_path(
            &path,
            &to_paint(style.color),
            &to_stroke(style),
            Transform::identity(),
            None,
         );
      }
   }

   fn download_rgba(&self, dest: &mut [u8]) {
      assert!(
         dest.len() == self.pixmap.pixels().len() * 4,
         "destination size does not match the surface's dimensions"
      );
      for (pixel, out) in self.pixmap.pixels().iter().zip(dest.chunks_exact_mut(4)) {
         let color = pixel.demultiply();
         out.copy_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use inkcanv_renderer::paws::{point, vector, LineCap};

   const INK: paws::Color = paws::Color { r: 0, g: 17, b: 40, a: 255 };
   const WHITE: paws::Color = paws::Color { r: 255, g: 255, b: 255, a: 255 };

   #[test]
   fn zero_sized_surface_is_an_error() {
      assert!(SkiaSurface::new(0, 10).is_err());
   }

   #[test]
   fn clear_fills_every_pixel() {
      let mut surface = SkiaSurface::new(4, 4).unwrap();
      surface.clear(WHITE);
      let mut pixels = vec![0; 4 * 4 * 4];
      surface.download_rgba(&mut pixels);
      assert!(pixels.iter().all(|&channel| channel == 255));
   }

   #[test]
   fn polyline_covers_its_segment_only() {
      let mut surface = SkiaSurface::new(32, 32).unwrap();
      let style = StrokeStyle::solid(INK, 4.0, LineCap::Round);
      surface.stroke_polyline(&[point(4.0, 16.0), point(28.0, 16.0)], &style);

      let center = surface.pixel(16, 16).unwrap();
      assert_eq!((center.r, center.g, center.b, center.a), (0, 17, 40, 255));
      assert_eq!(surface.pixel(16, 4).unwrap().a, 0);
   }

   #[test]
   fn lone_point_draws_nothing() {
      let mut surface = SkiaSurface::new(8, 8).unwrap();
      let style = StrokeStyle::solid(INK, 4.0, LineCap::Round);
      surface.stroke_polyline(&[point(4.0, 4.0)], &style);
      assert_eq!(surface.pixel(4, 4).unwrap().a, 0);
   }

   #[test]
   fn filled_ellipse_covers_its_center() {
      let mut surface = SkiaSurface::new(32, 32).unwrap();
      surface.fill_ellipse(point(16.0, 16.0), vector(6.0, 6.0), WHITE);
      assert_eq!(surface.pixel(16, 16).unwrap().a, 255);
      assert_eq!(surface.pixel(1, 1).unwrap().a, 0);
   }

   #[test]
   fn degenerate_ellipse_is_skipped() {
      let mut surface = SkiaSurface::new(8, 8).unwrap();
      surface.fill_ellipse(point(4.0, 4.0), vector(0.0, 0.0), WHITE);
      assert_eq!(surface.pixel(4, 4).unwrap().a, 0);
   }

   #[test]
   fn outlined_ellipse_leaves_its_center_empty() {
      let mut surface = SkiaSurface::new(64, 64).unwrap();
      let style = StrokeStyle::dashed(INK, 2.0, vec![4.0, 4.0]);
      surface.stroke_ellipse(point(32.0, 32.0), vector(20.0, 20.0), &style);
      assert_eq!(surface.pixel(32, 32).unwrap().a, 0);
      let mut pixels = vec![0; 64 * 64 * 4];
      surface.download_rgba(&mut pixels);
      assert!(pixels.chunks_exact(4).any(|pixel| pixel[3] > 0));
   }
}
