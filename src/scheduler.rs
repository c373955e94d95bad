use inkcanv_renderer::{FrameHandle, FrameScheduler};

/// A frame scheduler driven by hand, for headless hosts.
///
/// Requests are only remembered. The host polls [`take_pending`][Self::take_pending] whenever it
/// wants a frame to happen, and runs the render loop's frame if there was one.
#[derive(Debug, Default)]
pub struct ManualScheduler {
   next_id: u64,
   pending: Option<FrameHandle>,
   requested: u64,
   cancelled: u64,
}

impl ManualScheduler {
   pub fn new() -> Self {
      Self::default()
   }

   /// Fires the pending frame, if any, returning its handle.
   pub fn take_pending(&mut self) -> Option<FrameHandle> {
      self.pending.take()
   }

   pub fn is_pending(&self) -> bool {
      self.pending.is_some()
   }

   /// Returns how many frames were requested in total.
   pub fn requested(&self) -> u64 {
      self.requested
   }

   /// Returns how many pending frames were cancelled in total.
   pub fn cancelled(&self) -> u64 {
      self.cancelled
   }
}

impl FrameScheduler for ManualScheduler {
   fn request_frame(&mut self) -> Option<FrameHandle> {
      self.next_id += 1;
      self.requested += 1;
      let handle = FrameHandle(self.next_id);
      self.pending = Some(handle);
      Some(handle)
   }

   fn cancel_frame(&mut self, handle: FrameHandle) {
      if self.pending == Some(handle) {
         self.pending = None;
         self.cancelled += 1;
      }
   }
}
