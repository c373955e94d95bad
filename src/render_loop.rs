//! The frame-paced stroke pipeline.

use inkcanv_renderer::{FrameHandle, FrameScheduler, RasterSurface};

use crate::config::InkConfig;
use crate::input::{Classifier, InputEvent, InputSource, PointerEvent};
use crate::rasterizer::Rasterizer;
use crate::stroke_buffer::StrokeBuffer;

/// Batch size counters of a single stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
   /// New samples drawn, not counting carry-over points.
   pub samples: u64,
   /// Frames that drew anything.
   pub frames: u64,
}

impl FrameStats {
   /// Returns the average number of new samples per drawing frame.
   pub fn average_batch_size(&self) -> Option<f64> {
      (self.frames > 0).then(|| self.samples as f64 / self.frames as f64)
   }
}

/// Everything that lives only as long as one stroke.
#[derive(Debug, Default)]
struct StrokeSession {
   buffer: StrokeBuffer,
   frame: Option<FrameHandle>,
   stats: FrameStats,
}

/// Owns the ink and marker layers and paints buffered samples onto them once per frame.
///
/// Every method takes `&mut self`, so input handling and frames can never interleave; the host is
/// expected to call them from a single thread as events and frames arrive.
pub struct RenderLoop<S, F> {
   ink: S,
   marker: S,
   scheduler: F,
   classifier: Classifier,
   rasterizer: Rasterizer,
   session: StrokeSession,
}

impl<S, F> RenderLoop<S, F>
where
   S: RasterSurface,
   F: FrameScheduler,
{
   pub fn new(ink: S, marker: S, scheduler: F, config: &InkConfig) -> Self {
      Self {
         ink,
         marker,
         scheduler,
         classifier: Classifier::from_config(config),
         rasterizer: Rasterizer::new(config),
         session: Default::default(),
      }
   }

   /// Dispatches a single event to its handler, returning whether it was accepted.
   pub fn handle(&mut self, event: InputEvent) -> bool {
      let accepted = match event {
         InputEvent::Down(event) => self.pointer_down(&event),
         InputEvent::Move(event) => self.pointer_move(&event),
         InputEvent::Up(event) => self.pointer_up(&event),
         InputEvent::Leave(event) => self.pointer_leave(&event),
      };
      if !accepted {
         log::trace!("ignored {:?}", event);
      }
      accepted
   }

   /// Handles every event the source currently has.
   pub fn pump(&mut self, source: &mut impl InputSource) {
      while let Some(event) = source.next_event() {
         self.handle(event);
      }
   }

   /// Starts a stroke and schedules the frame loop.
   ///
   /// Returns whether the event was accepted, so that hosts know whether to suppress the
   /// platform's default handling of it.
   pub fn pointer_down(&mut self, event: &PointerEvent) -> bool {
      let sample = match self.classifier.classify(event) {
         Some(sample) => sample,
         None => return false,
      };
      if self.session.buffer.is_active() {
         log::debug!("stroke restarted without ending the previous one");
         self.end_stroke();
      }
      self.session.buffer.start();
      self.session.buffer.append(sample);
      self.schedule_frame();
      true
   }

   /// Adds a sample to the current stroke.
   pub fn pointer_move(&mut self, event: &PointerEvent) -> bool {
      let sample = match self.classifier.classify(event) {
         Some(sample) => sample,
         None => return false,
      };
      let appended = self.session.buffer.append(sample);
      if !appended {
         log::trace!("ignoring contact outside of a stroke");
      }
      appended
   }

   /// Ends the current stroke.
   pub fn pointer_up(&mut self, event: &PointerEvent) -> bool {
      if !self.classifier.accepts_device(event.pointer_type) {
         return false;
      }
      self.end_stroke();
      true
   }

   /// Ends the current stroke because the pointer left the surface.
   pub fn pointer_leave(&mut self, event: &PointerEvent) -> bool {
      if !self.classifier.accepts_device(event.pointer_type) {
         return false;
      }
      self.end_stroke();
      true
   }

   /// Runs one frame: draws everything buffered since the last one and schedules the next.
   ///
   /// The host calls this when a frame requested from the scheduler fires.
   pub fn frame(&mut self) {
      // The frame we were waiting for has fired.
      self.session.frame = None;
      if !self.session.buffer.is_active() {
         log::trace!("frame fired after the stroke ended");
         return;
      }

      if self.session.buffer.len() > 1 {
         let batch = self.session.buffer.drain_for_frame();
         self.rasterizer.draw(&batch, &mut self.ink, &mut self.marker);
         self.session.stats.samples += batch.len() as u64 - 1;
         self.session.stats.frames += 1;
      }

      self.schedule_frame();
   }

   fn schedule_frame(&mut self) {
      self.session.frame = self.scheduler.request_frame();
      if self.session.frame.is_none() {
         log::error!("could not schedule a frame; the stroke will not be drawn");
      }
   }

   /// Cancels the frame loop and discards whatever wasn't drawn yet.
   ///
   /// Samples that arrived after the last frame are dropped rather than flushed. Ending twice is
   /// harmless.
   fn end_stroke(&mut self) {
      if let Some(frame) = self.session.frame.take() {
         self.scheduler.cancel_frame(frame);
      }
      let unflushed = self.session.buffer.len().saturating_sub(1);
      if unflushed > 0 {
         log::debug!("discarding {} samples that were not drawn yet", unflushed);
      }
      if let Some(average) = self.session.stats.average_batch_size() {
         log::info!("average samples per frame: {:.2}", average);
      }
      self.session.buffer.end();
      self.session.stats = Default::default();
   }

   /// Returns whether a stroke is in progress.
   pub fn is_drawing(&self) -> bool {
      self.session.buffer.is_active()
   }

   /// Returns whether a frame is currently scheduled.
   pub fn is_frame_pending(&self) -> bool {
      self.session.frame.is_some()
   }

   /// Returns the number of buffered samples, including the carry-over point.
   pub fn buffered_samples(&self) -> usize {
      self.session.buffer.len()
   }

   /// Returns the counters of the current stroke.
   pub fn stats(&self) -> FrameStats {
      self.session.stats
   }

   pub fn ink_layer(&self) -> &S {
      &self.ink
   }

   pub fn marker_layer(&self) -> &S {
      &self.marker
   }

   pub fn scheduler(&self) -> &F {
      &self.scheduler
   }

   pub fn scheduler_mut(&mut self) -> &mut F {
      &mut self.scheduler
   }

   /// Consumes the loop, returning the ink and marker layers.
   pub fn into_layers(self) -> (S, S) {
      (self.ink, self.marker)
   }
}
