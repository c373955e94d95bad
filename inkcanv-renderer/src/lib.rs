//! Host capabilities the ink pipeline draws and schedules through.
//!
//! Backends implement [`RasterSurface`] for their pixel storage and [`FrameScheduler`] for their
//! repaint clock. The pipeline itself never touches a window, a DOM, or a GPU.

pub use paws;

use std::fmt;

use paws::{Color, LineCap, Point, Vector};

/// A fully transparent color, used to wipe overlay layers.
pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

/// Returns the name of a line cap. `LineCap` has no `Debug` of its own.
pub fn line_cap_name(cap: LineCap) -> &'static str {
   match cap {
      LineCap::Butt => "butt",
      LineCap::Round => "round",
      LineCap::Square => "square",
   }
}

/// How an outline is stroked.
#[derive(Clone)]
pub struct StrokeStyle {
   pub color: Color,
   pub width: f32,
   pub cap: LineCap,
   /// Alternating on/off dash lengths. `None` strokes a solid line.
   pub dash: Option<Vec<f32>>,
}

impl StrokeStyle {
   /// Creates a solid stroke style.
   pub fn solid(color: Color, width: f32, cap: LineCap) -> Self {
      Self { color, width, cap, dash: None }
   }

   /// Creates a dashed stroke style with butt caps.
   pub fn dashed(color: Color, width: f32, dash: Vec<f32>) -> Self {
      Self { color, width, cap: LineCap::Butt, dash: Some(dash) }
   }
}

impl fmt::Debug for StrokeStyle {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("StrokeStyle")
         .field("color", &self.color)
         .field("width", &self.width)
         .field("cap", &line_cap_name(self.cap))
         .field("dash", &self.dash)
         .finish()
   }
}

/// A mutable 2D raster that the pipeline paints into.
///
/// Surfaces keep their pixels between calls; nothing is presented or flushed implicitly.
pub trait RasterSurface {
   /// Returns the size of the surface, in pixels.
   fn size(&self) -> (u32, u32);

   /// Replaces every pixel with the given color. Transparent clears the surface.
   fn clear(&mut self, color: Color);

   /// Strokes a single connected polyline through `points`.
   fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle);

   /// Fills an axis-aligned ellipse.
   fn fill_ellipse(&mut self, center: Point, radii: Vector, color: Color);

   /// Strokes the outline of an axis-aligned ellipse.
   fn stroke_ellipse(&mut self, center: Point, radii: Vector, style: &StrokeStyle);

   /// Copies the surface's non-premultiplied RGBA pixels into `dest`.
   ///
   /// `dest` must be exactly `width * height * 4` bytes long.
   fn download_rgba(&self, dest: &mut [u8]);
}

/// An opaque handle to a frame requested from a [`FrameScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's repaint clock.
///
/// A requested frame fires once, before the next repaint. The host then calls back into the
/// render loop; schedulers never call back on their own from inside `request_frame`.
pub trait FrameScheduler {
   /// Requests a single frame callback. Returns `None` if the host refused to schedule it.
   fn request_frame(&mut self) -> Option<FrameHandle>;

   /// Cancels a previously requested frame. Cancelling a frame that already fired is a no-op.
   fn cancel_frame(&mut self, handle: FrameHandle);
}
