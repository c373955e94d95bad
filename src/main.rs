#[cfg(all(not(target_arch = "wasm32"), feature = "renderer-skia"))]
mod cli {
   use std::path::PathBuf;

   use inkcanv::image_coder::ImageCoder;
   use inkcanv::renderer::RasterSurface;
   use inkcanv::replay::{replay, Recording};
   use inkcanv::{InkConfig, ManualScheduler, RenderLoop};
   use inkcanv_renderer_skia::SkiaSurface;
   use structopt::StructOpt;

   /// Replays a recorded stylus session and saves the resulting ink as a PNG.
   #[derive(StructOpt)]
   #[structopt(name = "inkcanv")]
   pub struct Options {
      /// The recording to replay, in TOML format.
      #[structopt(parse(from_os_str))]
      recording: PathBuf,

      /// Where to save the ink layer.
      #[structopt(short, long, default_value = "ink.png", parse(from_os_str))]
      output: PathBuf,

      /// Also save the eraser preview layer to this file.
      #[structopt(long, parse(from_os_str))]
      marker: Option<PathBuf>,

      /// Use this config file instead of the one in the user's config directory.
      #[structopt(long, parse(from_os_str))]
      config: Option<PathBuf>,

      /// Log debug messages.
      #[structopt(short, long)]
      pub verbose: bool,
   }

   pub fn run(options: Options) -> anyhow::Result<()> {
      let config = match &options.config {
         Some(path) => InkConfig::load_or_create_at(path)?,
         None => InkConfig::load_or_create()?,
      };
      let recording = Recording::load(&options.recording)?;
      log::info!(
         "replaying {} events onto a {}x{} surface",
         recording.events.len(),
         recording.width,
         recording.height
      );

      let mut ink = SkiaSurface::new(recording.width, recording.height)?;
      ink.clear(config.paper);
      let marker = SkiaSurface::new(recording.width, recording.height)?;

      let mut render_loop = RenderLoop::new(ink, marker, ManualScheduler::new(), &config);
      replay(&mut render_loop, &recording);

      let (ink, marker) = render_loop.into_layers();
      ImageCoder::save_png(&ink, &options.output)?;
      if let Some(path) = &options.marker {
         ImageCoder::save_png(&marker, path)?;
      }
      Ok(())
   }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "renderer-skia"))]
fn main() {
   use log::LevelFilter;
   use simple_logger::SimpleLogger;
   use structopt::StructOpt;

   let options = cli::Options::from_args();
   let level = if options.verbose { LevelFilter::Debug } else { LevelFilter::Info };
   let _ = SimpleLogger::new().with_level(level).init();

   if let Err(error) = cli::run(options) {
      log::error!("{:#}", error);
      std::process::exit(1);
   }
}

// The web build has no binary; its entry point lives in the library.
#[cfg(any(target_arch = "wasm32", not(feature = "renderer-skia")))]
fn main() {}
