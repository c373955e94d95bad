#![cfg(feature = "renderer-skia")]

use inkcanv::renderer::paws::{point, Color};
use inkcanv::renderer::RasterSurface;
use inkcanv::replay::{replay, Recording};
use inkcanv::{InkConfig, InputEvent, ManualScheduler, PointerEvent, PointerType, RenderLoop};
use inkcanv_renderer_skia::SkiaSurface;

type SkiaLoop = RenderLoop<SkiaSurface, ManualScheduler>;

const ERASER: u16 = 32;

fn new_loop(config: &InkConfig) -> SkiaLoop {
   let mut ink = SkiaSurface::new(100, 100).unwrap();
   ink.clear(config.paper);
   let marker = SkiaSurface::new(100, 100).unwrap();
   RenderLoop::new(ink, marker, ManualScheduler::new(), config)
}

fn pen(x: f32, y: f32, pressure: f32, buttons: u16) -> PointerEvent {
   PointerEvent { pointer_type: PointerType::Pen, buttons, position: point(x, y), pressure }
}

fn tick(render_loop: &mut SkiaLoop) {
   if render_loop.scheduler_mut().take_pending().is_some() {
      render_loop.frame();
   }
}

fn rgba(color: Color) -> (u8, u8, u8, u8) {
   (color.r, color.g, color.b, color.a)
}

#[test]
fn ink_then_eraser() {
   let config = InkConfig::default();
   let mut render_loop = new_loop(&config);

   render_loop.handle(InputEvent::Down(pen(10.0, 50.0, 1.0, 1)));
   render_loop.handle(InputEvent::Move(pen(50.0, 50.0, 1.0, 1)));
   tick(&mut render_loop);
   render_loop.handle(InputEvent::Move(pen(90.0, 50.0, 1.0, 1)));
   tick(&mut render_loop);
   render_loop.handle(InputEvent::Up(pen(90.0, 50.0, 0.0, 0)));

   // Both batches joined up through the carry-over point.
   for &x in &[20, 50, 80] {
      assert_eq!(rgba(render_loop.ink_layer().pixel(x, 50).unwrap()), (0x00, 0x11, 0x28, 0xff));
   }
   assert_eq!(rgba(render_loop.ink_layer().pixel(50, 20).unwrap()), (0xff, 0xff, 0xff, 0xff));

   // A 20px dab over the middle of the line.
   render_loop.handle(InputEvent::Down(pen(50.0, 50.0, 0.2, ERASER)));
   render_loop.handle(InputEvent::Move(pen(51.0, 50.0, 0.2, ERASER)));
   tick(&mut render_loop);

   assert_eq!(rgba(render_loop.ink_layer().pixel(50, 50).unwrap()), (0xff, 0xff, 0xff, 0xff));
   assert_eq!(rgba(render_loop.ink_layer().pixel(20, 50).unwrap()), (0x00, 0x11, 0x28, 0xff));
   // The preview outlines the dab but leaves its middle alone.
   assert_eq!(render_loop.marker_layer().pixel(50, 50).unwrap().a, 0);
   let mut marker = vec![0; 100 * 100 * 4];
   render_loop.marker_layer().download_rgba(&mut marker);
   assert!(marker.chunks_exact(4).any(|pixel| pixel[3] > 0));

   // Leaving the surface drops the buffered sample and keeps the preview as it was.
   render_loop.handle(InputEvent::Move(pen(10.0, 10.0, 1.0, ERASER)));
   render_loop.handle(InputEvent::Leave(pen(10.0, 10.0, 0.0, 0)));
   assert!(!render_loop.is_frame_pending());
   assert_eq!(rgba(render_loop.ink_layer().pixel(10, 10).unwrap()), (0xff, 0xff, 0xff, 0xff));
}

#[test]
fn recording_replays_onto_pixels() {
   let recording = Recording::from_toml(
      r#"
         width = 100
         height = 100

         [[events]]
         time = 0.0
         kind = "down"
         x = 10.0
         y = 30.0
         pressure = 1.0
         buttons = 1

         [[events]]
         time = 10.0
         kind = "move"
         x = 90.0
         y = 30.0
         pressure = 1.0
         buttons = 1

         [[events]]
         time = 40.0
         kind = "up"
         x = 90.0
         y = 30.0
      "#,
   )
   .unwrap();
   let config = InkConfig::default();
   let mut render_loop = new_loop(&config);
   replay(&mut render_loop, &recording);

   let (ink, _) = render_loop.into_layers();
   assert_eq!(ink.pixel(50, 30).unwrap().a, 255);
   assert_eq!(rgba(ink.pixel(50, 30).unwrap()), (0x00, 0x11, 0x28, 0xff));
   assert_eq!(rgba(ink.pixel(50, 60).unwrap()), (0xff, 0xff, 0xff, 0xff));
}
