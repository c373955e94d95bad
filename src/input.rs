//! Pointer input and its classification into samples.

use std::str::FromStr;

use inkcanv_renderer::paws::Point;
use serde::{Deserialize, Serialize};

use crate::config::InkConfig;
use crate::sample::{Mode, Sample};
use crate::Error;

/// The kind of device a pointer event came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
   Mouse,
   Pen,
   Touch,
}

impl Default for PointerType {
   fn default() -> Self {
      Self::Pen
   }
}

impl FromStr for PointerType {
   type Err = Error;

   fn from_str(s: &str) -> Result<Self, Error> {
      match s {
         "mouse" => Ok(Self::Mouse),
         "pen" => Ok(Self::Pen),
         "touch" => Ok(Self::Touch),
         _ => Err(Error::UnknownPointerType(s.to_owned())),
      }
   }
}

/// A raw pointer event, as reported by the host.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
   pub pointer_type: PointerType,
   /// Bit mask of the buttons currently held.
   pub buttons: u16,
   /// Position relative to the drawing surface, in pixels.
   pub position: Point,
   /// Pressure in `[0, 1]`. Zero means the pointer is hovering.
   pub pressure: f32,
}

/// A pointer event together with what happened.
#[derive(Clone, Copy, Debug)]
pub enum InputEvent {
   Down(PointerEvent),
   Move(PointerEvent),
   Up(PointerEvent),
   Leave(PointerEvent),
}

/// A source of pointer events, drained by [`RenderLoop::pump`][crate::RenderLoop::pump].
pub trait InputSource {
   /// Returns the next pending event, or `None` if there's nothing to process right now.
   fn next_event(&mut self) -> Option<InputEvent>;
}

/// Decides which events are ink contact and in what mode.
#[derive(Clone, Copy, Debug)]
pub struct Classifier {
   eraser_button: u16,
   pen_only: bool,
}

impl Classifier {
   pub fn new(eraser_button: u16, pen_only: bool) -> Self {
      Self { eraser_button, pen_only }
   }

   pub fn from_config(config: &InkConfig) -> Self {
      Self::new(config.eraser.button, config.input.pen_only)
   }

   /// Returns whether events from this device are handled at all.
   pub fn accepts_device(&self, pointer_type: PointerType) -> bool {
      !self.pen_only || pointer_type == PointerType::Pen
   }

   /// Returns the mode for the given button mask.
   pub fn mode(&self, buttons: u16) -> Mode {
      if buttons & self.eraser_button != 0 {
         Mode::Eraser
      } else {
         Mode::Ink
      }
   }

   /// Turns a contact event into a sample. Hovering and filtered-out devices yield `None`.
   ///
   /// Only strictly positive pressure counts as contact; negative and NaN readings are hovering.
   pub fn classify(&self, event: &PointerEvent) -> Option<Sample> {
      let hovering = event.pressure.is_nan() || event.pressure <= 0.0;
      if !self.accepts_device(event.pointer_type) || hovering {
         return None;
      }
      Some(Sample::new(
         event.position.x,
         event.position.y,
         event.pressure,
         self.mode(event.buttons),
      ))
   }
}

/// Checks that a surface-relative offset agrees with the client position of the event and the
/// surface's origin, within a pixel.
///
/// Hosts report offsets rounded to whole pixels, hence the tolerance.
pub fn offset_is_consistent(offset: f32, client: f32, origin: f32) -> bool {
   (offset - (client - origin)).abs() <= 1.0
}
