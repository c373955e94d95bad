//! Test doubles for the host capabilities.

use inkcanv_renderer::paws::{Color, LineCap, Point, Vector};
use inkcanv_renderer::{RasterSurface, StrokeStyle};

/// A draw call, with plain values so tests can compare them directly.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
   Clear([u8; 4]),
   Polyline { points: Vec<(f32, f32)>, color: [u8; 4], width: f32, round: bool },
   FillEllipse { center: (f32, f32), radii: (f32, f32), color: [u8; 4] },
   StrokeEllipse { center: (f32, f32), radii: (f32, f32), width: f32, dash: Option<Vec<f32>> },
}

pub fn rgba(color: Color) -> [u8; 4] {
   [color.r, color.g, color.b, color.a]
}

fn xy(point: Point) -> (f32, f32) {
   (point.x, point.y)
}

/// A surface that only records what was drawn on it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
   pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
   pub fn polylines(&self) -> Vec<&DrawCall> {
      self.calls.iter().filter(|call| matches!(call, DrawCall::Polyline { .. })).collect()
   }

   pub fn take(&mut self) -> Vec<DrawCall> {
      std::mem::take(&mut self.calls)
   }
}

impl RasterSurface for RecordingSurface {
   fn size(&self) -> (u32, u32) {
      (64, 64)
   }

   fn clear(&mut self, color: Color) {
      self.calls.push(DrawCall::Clear(rgba(color)));
   }

   fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) {
      self.calls.push(DrawCall::Polyline {
         points: points.iter().copied().map(xy).collect(),
         color: rgba(style.color),
         width: style.width,
         round: matches!(style.cap, LineCap::Round),
      });
   }

   fn fill_ellipse(&mut self, center: Point, radii: Vector, color: Color) {
      self.calls.push(DrawCall::FillEllipse {
         center: xy(center),
         radii: (radii.x, radii.y),
         color: rgba(color),
      });
   }

   fn stroke_ellipse(&mut self, center: Point, radii: Vector, style: &StrokeStyle) {
      self.calls.push(DrawCall::StrokeEllipse {
         center: xy(center),
         radii: (radii.x, radii.y),
         width: style.width,
         dash: style.dash.clone(),
      });
   }

   fn download_rgba(&self, dest: &mut [u8]) {
      dest.iter_mut().for_each(|byte| *byte = 0);
   }
}
