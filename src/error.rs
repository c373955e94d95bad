use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
   #[error("invalid color {0:?}: expected #rgb, #rrggbb, or #rrggbbaa")]
   InvalidColor(String),
   #[error("unknown pointer type {0:?}")]
   UnknownPointerType(String),
   #[error("malformed recording: {0}")]
   MalformedRecording(#[from] toml::de::Error),
   #[error("surface pixels do not form a {width}x{height} image")]
   SnapshotSizeMismatch { width: u32, height: u32 },
   #[error("image error: {0}")]
   Image(#[from] image::ImageError),
   #[error("I/O error: {0}")]
   Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
