//! Stylus samples.

use inkcanv_renderer::paws::{point, Point};

/// What a sample does to the ink layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
   /// Lays down ink.
   Ink,
   /// Stamps out ink with dabs.
   Eraser,
}

/// One contact sample, relative to the drawing surface's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
   pub x: f32,
   pub y: f32,
   /// Contact pressure, in `[0, 1]`.
   pub pressure: f32,
   pub mode: Mode,
}

impl Sample {
   /// Creates a new sample. Pressure is clamped to `[0, 1]`.
   pub fn new(x: f32, y: f32, pressure: f32, mode: Mode) -> Self {
      Self { x, y, pressure: pressure.clamp(0.0, 1.0), mode }
   }

   pub fn position(&self) -> Point {
      point(self.x, self.y)
   }
}
