//! Turning batches of samples into pixels.

use inkcanv_renderer::paws::{vector, Color, LineCap, Point};
use inkcanv_renderer::{RasterSurface, StrokeStyle, TRANSPARENT};

use crate::config::InkConfig;
use crate::sample::{Mode, Sample};

/// Draws batches onto the ink layer and keeps the marker layer's eraser preview up to date.
#[derive(Clone, Debug)]
pub struct Rasterizer {
   pen_color: Color,
   pen_sensitivity: f32,
   eraser_color: Color,
   eraser_sensitivity: f32,
   marker_style: StrokeStyle,
}

impl Rasterizer {
   pub fn new(config: &InkConfig) -> Self {
      Self {
         pen_color: config.pen.color,
         pen_sensitivity: config.pen.pressure_sensitivity,
         eraser_color: config.eraser.color,
         eraser_sensitivity: config.eraser.pressure_sensitivity,
         marker_style: StrokeStyle::dashed(
            config.marker.color,
            config.marker.line_width,
            config.marker.dash.clone(),
         ),
      }
   }

   /// Draws one batch.
   ///
   /// The whole batch is drawn in the mode of its first sample, so a mode switch shows up one
   /// batch late: the carry-over point still has the old mode. Batches with fewer than two
   /// samples are ignored.
   pub fn draw(&self, batch: &[Sample], ink: &mut impl RasterSurface, marker: &mut impl RasterSurface) {
      let first = match batch {
         [first, _, ..] => first,
         _ => return,
      };
      match first.mode {
         Mode::Ink => self.draw_ink(first, batch, ink, marker),
         Mode::Eraser => self.draw_eraser(first, batch, ink, marker),
      }
   }

   fn draw_ink(
      &self,
      first: &Sample,
      batch: &[Sample],
      ink: &mut impl RasterSurface,
      marker: &mut impl RasterSurface,
   ) {
      let points: Vec<Point> = batch.iter().map(Sample::position).collect();
      let style =
         StrokeStyle::solid(self.pen_color, first.pressure * self.pen_sensitivity, LineCap::Round);
      ink.stroke_polyline(&points, &style);
      marker.clear(TRANSPARENT);
   }

   fn draw_eraser(
      &self,
      first: &Sample,
      batch: &[Sample],
      ink: &mut impl RasterSurface,
      marker: &mut impl RasterSurface,
   ) {
      // Dabs are independent stamps, so fast strokes leave gaps between them.
      for sample in batch {
         let radius = sample.pressure * self.eraser_sensitivity / 2.0;
         ink.fill_ellipse(sample.position(), vector(radius, radius), self.eraser_color);
      }

      let radius = first.pressure * self.eraser_sensitivity / 2.0;
      marker.clear(TRANSPARENT);
      marker.stroke_ellipse(first.position(), vector(radius, radius), &self.marker_style);
   }
}
