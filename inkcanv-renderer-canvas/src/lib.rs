//! A browser backend: `<canvas>` 2D contexts for drawing, `requestAnimationFrame` for timing.

mod common;
mod scheduler;
mod surface;

pub use crate::common::get_window_size;
pub use crate::scheduler::*;
pub use crate::surface::*;
