//! A pressure-sensitive ink surface.
//!
//! Stylus samples are buffered as they arrive and painted once per display frame: ink as one
//! variable-width polyline per frame, the eraser as a dab per sample, plus a preview of the
//! eraser's size on a separate overlay layer. Hosts plug in their own surfaces and frame clock
//! through the traits in [`inkcanv_renderer`].

pub mod config;
mod error;
pub mod image_coder;
pub mod input;
pub mod rasterizer;
pub mod render_loop;
pub mod replay;
pub mod sample;
pub mod scheduler;
pub mod stroke_buffer;

#[cfg(test)]
mod testing;

#[cfg(all(target_arch = "wasm32", feature = "renderer-canvas"))]
mod web;

pub use inkcanv_renderer as renderer;

pub use crate::config::InkConfig;
pub use crate::error::*;
pub use crate::input::{Classifier, InputEvent, InputSource, PointerEvent, PointerType};
pub use crate::rasterizer::Rasterizer;
pub use crate::render_loop::{FrameStats, RenderLoop};
pub use crate::sample::{Mode, Sample};
pub use crate::scheduler::ManualScheduler;
pub use crate::stroke_buffer::StrokeBuffer;
