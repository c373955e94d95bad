//! Samples collected between frames.

use crate::sample::Sample;

/// The samples of the current stroke that haven't been rasterized yet, plus the carry-over point.
///
/// After every drain the last sample stays behind, so the next batch's polyline starts exactly
/// where the previous one ended without repainting anything.
#[derive(Debug, Default)]
pub struct StrokeBuffer {
   samples: Vec<Sample>,
   active: bool,
}

impl StrokeBuffer {
   pub fn new() -> Self {
      Self::default()
   }

   /// Starts a new stroke, discarding anything left over from the previous one.
   pub fn start(&mut self) {
      self.samples.clear();
      self.active = true;
   }

   /// Appends a sample to the active stroke. Returns `false` and drops the sample if no stroke
   /// is active.
   pub fn append(&mut self, sample: Sample) -> bool {
      if self.active {
         self.samples.push(sample);
      }
      self.active
   }

   /// Takes everything buffered so far, leaving only the last sample behind.
   pub fn drain_for_frame(&mut self) -> Vec<Sample> {
      match self.samples.last().copied() {
         Some(last) => {
            let batch = std::mem::take(&mut self.samples);
            self.samples.push(last);
            batch
         }
         None => Vec::new(),
      }
   }

   /// Ends the stroke, discarding all samples.
   pub fn end(&mut self) {
      self.samples.clear();
      self.active = false;
   }

   pub fn is_active(&self) -> bool {
      self.active
   }

   pub fn len(&self) -> usize {
      self.samples.len()
   }

   pub fn is_empty(&self) -> bool {
      self.samples.is_empty()
   }

   pub fn samples(&self) -> &[Sample] {
      &self.samples
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::sample::Mode;

   fn sample(x: f32) -> Sample {
      Sample::new(x, 0.0, 0.5, Mode::Ink)
   }

   #[test]
   fn drain_returns_everything_and_keeps_the_last_sample() {
      let mut buffer = StrokeBuffer::new();
      buffer.start();
      let appended: Vec<_> = (0..5).map(|i| sample(i as f32)).collect();
      for &s in &appended {
         assert!(buffer.append(s));
      }
      assert_eq!(buffer.drain_for_frame(), appended);
      assert_eq!(buffer.samples(), &[sample(4.0)]);
   }

   #[test]
   fn draining_small_buffers() {
      let mut buffer = StrokeBuffer::new();
      buffer.start();
      assert!(buffer.drain_for_frame().is_empty());
      assert!(buffer.is_empty());

      buffer.append(sample(1.0));
      assert_eq!(buffer.drain_for_frame(), vec![sample(1.0)]);
      assert_eq!(buffer.samples(), &[sample(1.0)]);
   }

   #[test]
   fn carry_over_starts_the_next_batch() {
      let mut buffer = StrokeBuffer::new();
      buffer.start();
      buffer.append(sample(0.0));
      buffer.append(sample(1.0));
      buffer.drain_for_frame();
      buffer.append(sample(2.0));
      assert_eq!(buffer.drain_for_frame(), vec![sample(1.0), sample(2.0)]);
   }

   #[test]
   fn append_needs_an_active_stroke() {
      let mut buffer = StrokeBuffer::new();
      assert!(!buffer.append(sample(0.0)));
      assert!(buffer.is_empty());

      buffer.start();
      buffer.append(sample(0.0));
      buffer.end();
      assert!(!buffer.append(sample(1.0)));
      assert!(buffer.is_empty());
      assert!(!buffer.is_active());
   }

   #[test]
   fn start_discards_leftovers() {
      let mut buffer = StrokeBuffer::new();
      buffer.start();
      buffer.append(sample(0.0));
      buffer.append(sample(1.0));
      buffer.start();
      assert!(buffer.is_empty());
      assert!(buffer.is_active());
   }
}
