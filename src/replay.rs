//! Recorded pointer input, played back at display rate.
//!
//! A recording is a TOML file:
//!
//! ```toml
//! width = 640
//! height = 480
//!
//! [[events]]
//! time = 0.0      # milliseconds since the recording started
//! kind = "down"   # down, move, up, or leave
//! x = 10.0
//! y = 20.0
//! pressure = 0.5
//! buttons = 1     # optional, defaults to 0
//! pointer = "pen" # optional, defaults to pen
//! ```

use inkcanv_renderer::paws::point;
use inkcanv_renderer::RasterSurface;
use serde::{Deserialize, Serialize};

use crate::input::{InputEvent, InputSource, PointerEvent, PointerType};
use crate::render_loop::RenderLoop;
use crate::scheduler::ManualScheduler;

fn default_frame_rate() -> f64 {
   60.0
}

/// What a recorded event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
   Down,
   Move,
   Up,
   Leave,
}

/// A single recorded pointer event.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RecordedEvent {
   /// Milliseconds since the start of the recording.
   pub time: f64,
   pub kind: EventKind,
   #[serde(default)]
   pub pointer: PointerType,
   #[serde(default)]
   pub buttons: u16,
   pub x: f32,
   pub y: f32,
   #[serde(default)]
   pub pressure: f32,
}

impl RecordedEvent {
   pub fn to_input_event(&self) -> InputEvent {
      let event = PointerEvent {
         pointer_type: self.pointer,
         buttons: self.buttons,
         position: point(self.x, self.y),
         pressure: self.pressure,
      };
      match self.kind {
         EventKind::Down => InputEvent::Down(event),
         EventKind::Move => InputEvent::Move(event),
         EventKind::Up => InputEvent::Up(event),
         EventKind::Leave => InputEvent::Leave(event),
      }
   }
}

/// A recorded drawing session.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Recording {
   pub width: u32,
   pub height: u32,
   /// Display refresh rate the recording is played back at, in frames per second.
   #[serde(default = "default_frame_rate")]
   pub frame_rate: f64,
   #[serde(default)]
   pub events: Vec<RecordedEvent>,
}

impl Recording {
   pub fn from_toml(text: &str) -> crate::Result<Self> {
      let mut recording: Self = toml::from_str(text)?;
      if !(recording.frame_rate > 0.0) {
         log::warn!(
            "invalid frame rate {}, falling back to {}",
            recording.frame_rate,
            default_frame_rate()
         );
         recording.frame_rate = default_frame_rate();
      }
      // Events are played back in time order; ties keep their recorded order.
      recording.events.sort_by(|a, b| a.time.total_cmp(&b.time));
      Ok(recording)
   }

   pub fn load(path: &std::path::Path) -> crate::Result<Self> {
      Self::from_toml(&std::fs::read_to_string(path)?)
   }

   /// Returns the time between two frames, in milliseconds.
   pub fn frame_interval(&self) -> f64 {
      1000.0 / self.frame_rate
   }
}

/// Releases the events of a recording as virtual time advances.
pub struct RecordingSource<'a> {
   events: &'a [RecordedEvent],
   now: f64,
}

impl<'a> RecordingSource<'a> {
   pub fn new(recording: &'a Recording) -> Self {
      Self { events: &recording.events, now: f64::NEG_INFINITY }
   }

   /// Moves virtual time forward, making every event up to `time` available.
   pub fn advance_to(&mut self, time: f64) {
      self.now = self.now.max(time);
   }

   /// Returns the time of the next event that hasn't been handed out yet.
   pub fn next_time(&self) -> Option<f64> {
      self.events.first().map(|event| event.time)
   }

   /// Returns whether every event has been handed out.
   pub fn is_exhausted(&self) -> bool {
      self.events.is_empty()
   }
}

impl InputSource for RecordingSource<'_> {
   fn next_event(&mut self) -> Option<InputEvent> {
      let (event, rest) = self.events.split_first()?;
      if event.time > self.now {
         return None;
      }
      self.events = rest;
      Some(event.to_input_event())
   }
}

/// Plays a recording back through a render loop.
///
/// Virtual time advances one frame interval at a time. At each step, the events that happened
/// up to that point are handled first, then the pending frame (if any) is run, just like a browser
/// delivers input before the animation frame.
///
/// Frames with nothing new to draw are skipped, jumping straight to the first step at or after the
/// next event, so long pauses in a recording cost nothing.
pub fn replay<S: RasterSurface>(
   render_loop: &mut RenderLoop<S, ManualScheduler>,
   recording: &Recording,
) {
   let interval = recording.frame_interval();
   let mut source = RecordingSource::new(recording);
   let mut time = 0.0;
   let mut frames = 0_u64;
   while !source.is_exhausted() {
      source.advance_to(time);
      render_loop.pump(&mut source);
      if render_loop.scheduler_mut().take_pending().is_some() {
         render_loop.frame();
         frames += 1;
      }

      let next_step = time + interval;
      time = match source.next_time() {
         // Until the next event arrives, frames only ever see the carry-over point.
         Some(next) if next > next_step && render_loop.buffered_samples() <= 1 => {
            let aligned = (next / interval).ceil() * interval;
            // Rounding may land just short of the event; never step without releasing it.
            if aligned >= next {
               aligned
            } else {
               next
            }
         }
         _ => next_step,
      };
   }
   log::debug!("replayed {} events over {} frames", recording.events.len(), frames);
   if render_loop.is_drawing() {
      log::warn!("recording ends in the middle of a stroke; its last samples may be missing");
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::config::InkConfig;
   use crate::testing::{DrawCall, RecordingSurface};

   const RECORDING: &str = r#"
      width = 64
      height = 64

      [[events]]
      time = 0.0
      kind = "down"
      x = 0.0
      y = 0.0
      pressure = 0.5
      buttons = 1

      [[events]]
      time = 5.0
      kind = "move"
      x = 10.0
      y = 0.0
      pressure = 0.5
      buttons = 1

      [[events]]
      time = 20.0
      kind = "move"
      x = 20.0
      y = 0.0
      pressure = 0.5
      buttons = 1

      [[events]]
      time = 25.0
      kind = "up"
      x = 20.0
      y = 0.0
   "#;

   #[test]
   fn parses_with_defaults() {
      let recording = Recording::from_toml(RECORDING).unwrap();
      assert_eq!(recording.frame_rate, 60.0);
      assert_eq!(recording.events.len(), 4);
      assert_eq!(recording.events[3].kind, EventKind::Up);
      assert_eq!(recording.events[3].pointer, PointerType::Pen);
      assert_eq!(recording.events[3].pressure, 0.0);
   }

   #[test]
   fn rejects_garbage() {
      assert!(Recording::from_toml("width = \"wide\"").is_err());
   }

   #[test]
   fn source_respects_virtual_time() {
      let recording = Recording::from_toml(RECORDING).unwrap();
      let mut source = RecordingSource::new(&recording);
      assert!(source.next_event().is_none());

      source.advance_to(5.0);
      assert!(matches!(source.next_event(), Some(InputEvent::Down(_))));
      assert!(matches!(source.next_event(), Some(InputEvent::Move(_))));
      assert!(source.next_event().is_none());
      assert!(!source.is_exhausted());

      source.advance_to(100.0);
      assert!(matches!(source.next_event(), Some(InputEvent::Move(_))));
      assert!(matches!(source.next_event(), Some(InputEvent::Up(_))));
      assert!(source.is_exhausted());
   }

   #[test]
   fn replay_batches_by_frame() {
      let recording = Recording::from_toml(RECORDING).unwrap();
      let mut render_loop = RenderLoop::new(
         RecordingSurface::default(),
         RecordingSurface::default(),
         ManualScheduler::new(),
         &InkConfig::default(),
      );
      replay(&mut render_loop, &recording);

      // Steps happen at 0, 16.7 and 33.3 ms. The frame at 0 ms only has the down sample, the one
      // at 16.7 ms draws the samples from 0 and 5 ms. The sample from 20 ms is still buffered
      // when the up at 25 ms ends the stroke, so it's discarded.
      let (ink, _) = render_loop.into_layers();
      assert_eq!(ink.polylines().len(), 1);
      assert!(matches!(
         &ink.calls[0],
         DrawCall::Polyline { points, .. } if points == &[(0.0, 0.0), (10.0, 0.0)]
      ));
   }

   #[test]
   fn long_pauses_are_skipped() {
      let mut recording = Recording::from_toml(RECORDING).unwrap();
      let pause = 1e15;
      let second_stroke: Vec<RecordedEvent> = recording
         .events
         .iter()
         .map(|event| RecordedEvent { time: event.time + pause, x: event.x + 100.0, ..*event })
         .collect();
      recording.events.extend(second_stroke);

      let mut render_loop = RenderLoop::new(
         RecordingSurface::default(),
         RecordingSurface::default(),
         ManualScheduler::new(),
         &InkConfig::default(),
      );
      replay(&mut render_loop, &recording);

      assert!(render_loop.scheduler().requested() < 20);
      assert!(!render_loop.is_drawing());
      // Where the frames fall after the pause depends on rounding, so only check that the second
      // stroke was drawn from its start.
      let (ink, _) = render_loop.into_layers();
      let starts: Vec<f32> = ink
         .polylines()
         .iter()
         .filter_map(|call| match call {
            DrawCall::Polyline { points, .. } => points.first().map(|&(x, _)| x),
            _ => None,
         })
         .collect();
      assert_eq!(starts[0], 0.0);
      assert!(starts.contains(&100.0));
   }
}
