//! User configuration.
//!
//! ## Note for adding new keys
//!
//! New keys added to the config _must_ use `#[serde(default)]` to maintain compatibility with
//! older configs. These keys will be added to the user's configuration automatically.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use directories::ProjectDirs;
use inkcanv_renderer::paws::Color;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Parses a `#rgb`, `#rrggbb`, or `#rrggbbaa` color.
pub fn parse_hex_color(text: &str) -> Result<Color> {
   let invalid = || Error::InvalidColor(text.to_owned());
   let digits = text.strip_prefix('#').ok_or_else(invalid)?;
   if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(invalid());
   }
   let channel = |i: usize, width: usize| {
      let value = u8::from_str_radix(&digits[i * width..(i + 1) * width], 16).map_err(|_| invalid())?;
      // Short colors repeat each digit: #f80 is #ff8800.
      Ok::<_, Error>(if width == 1 { value * 17 } else { value })
   };
   match digits.len() {
      3 => Ok(Color { r: channel(0, 1)?, g: channel(1, 1)?, b: channel(2, 1)?, a: 255 }),
      6 => Ok(Color { r: channel(0, 2)?, g: channel(1, 2)?, b: channel(2, 2)?, a: 255 }),
      8 => Ok(Color { r: channel(0, 2)?, g: channel(1, 2)?, b: channel(2, 2)?, a: channel(3, 2)? }),
      _ => Err(invalid()),
   }
}

/// Formats a color as `#rrggbb`, or `#rrggbbaa` if it's not opaque.
pub fn format_hex_color(color: Color) -> String {
   if color.a == 255 {
      format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
   } else {
      format!("#{:02x}{:02x}{:02x}{:02x}", color.r, color.g, color.b, color.a)
   }
}

/// (De)serializes colors as hex strings.
mod hex_color {
   use inkcanv_renderer::paws::Color;
   use serde::{de, Deserialize, Deserializer, Serializer};

   pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
      serializer.serialize_str(&super::format_hex_color(*color))
   }

   pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
      let text = String::deserialize(deserializer)?;
      super::parse_hex_color(&text).map_err(de::Error::custom)
   }
}

/// Ink stroke settings.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PenConfig {
   #[serde(with = "hex_color")]
   pub color: Color,
   /// Line width at full pressure, in pixels.
   pub pressure_sensitivity: f32,
}

impl Default for PenConfig {
   fn default() -> Self {
      Self {
         // Blue-black fountain pen ink.
         color: Color { r: 0x00, g: 0x11, b: 0x28, a: 0xff },
         pressure_sensitivity: 5.0,
      }
   }
}

/// Eraser settings.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct EraserConfig {
   /// The color dabs are filled with. This should match the paper.
   #[serde(with = "hex_color")]
   pub color: Color,
   /// Dab diameter at full pressure, in pixels.
   pub pressure_sensitivity: f32,
   /// The button mask bit that switches the pen into eraser mode.
   pub button: u16,
}

impl Default for EraserConfig {
   fn default() -> Self {
      Self {
         color: Color { r: 0xff, g: 0xff, b: 0xff, a: 0xff },
         pressure_sensitivity: 100.0,
         // The 6th button, which is what pens report for their eraser end.
         button: 32,
      }
   }
}

/// Settings of the eraser size preview.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerConfig {
   #[serde(with = "hex_color")]
   pub color: Color,
   pub line_width: f32,
   pub dash: Vec<f32>,
}

impl Default for MarkerConfig {
   fn default() -> Self {
      Self {
         color: Color { r: 0x88, g: 0x88, b: 0x88, a: 0xff },
         line_width: 2.0,
         dash: vec![4.0, 4.0],
      }
   }
}

/// Input filtering settings.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
   /// Only accept input from pens, ignoring mice and touch.
   pub pen_only: bool,
}

impl Default for InputConfig {
   fn default() -> Self {
      Self { pen_only: true }
   }
}

/// A user `config.toml` file.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct InkConfig {
   /// The background the ink layer starts out with when rendered headlessly.
   #[serde(with = "hex_color")]
   pub paper: Color,
   pub pen: PenConfig,
   pub eraser: EraserConfig,
   pub marker: MarkerConfig,
   pub input: InputConfig,
}

impl Default for InkConfig {
   fn default() -> Self {
      Self {
         paper: Color { r: 0xff, g: 0xff, b: 0xff, a: 0xff },
         pen: Default::default(),
         eraser: Default::default(),
         marker: Default::default(),
         input: Default::default(),
      }
   }
}

impl InkConfig {
   /// Parses a config from TOML text. Missing keys take their default values.
   pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
      toml::from_str(text)
   }

   /// Returns the platform-specific configuration directory.
   #[cfg(not(target_arch = "wasm32"))]
   pub fn config_dir() -> anyhow::Result<PathBuf> {
      let project_dirs = ProjectDirs::from("", "", "InkCanv")
         .ok_or_else(|| anyhow::anyhow!("cannot determine config directories"))?;
      Ok(project_dirs.config_dir().to_owned())
   }

   /// Returns the path to the `config.toml` file.
   #[cfg(not(target_arch = "wasm32"))]
   pub fn path() -> anyhow::Result<PathBuf> {
      Ok(Self::config_dir()?.join("config.toml"))
   }

   /// Loads the `config.toml` file.
   ///
   /// If the `config.toml` doesn't exist, it's created with values inherited from
   /// `InkConfig::default`.
   #[cfg(not(target_arch = "wasm32"))]
   pub fn load_or_create() -> anyhow::Result<Self> {
      Self::load_or_create_at(&Self::path()?)
   }

   /// Loads the config file at `path`, creating it (and its parent directories) if it's missing.
   #[cfg(not(target_arch = "wasm32"))]
   pub fn load_or_create_at(path: &Path) -> anyhow::Result<Self> {
      if let Some(config_dir) = path.parent() {
         std::fs::create_dir_all(config_dir)?;
      }
      if !path.is_file() {
         let config = Self::default();
         config.save_to(path)?;
         Ok(config)
      } else {
         let file = std::fs::read_to_string(path)?;
         let config = match Self::from_toml(&file) {
            Ok(config) => config,
            Err(error) => {
               log::error!("error while deserializing config file: {}", error);
               log::error!("falling back to default config");
               return Ok(Self::default());
            }
         };
         // Preemptively save the config to the disk if any new keys have been added.
         config.save_to(path)?;
         Ok(config)
      }
   }

   /// Saves the user configuration to the `config.toml` file.
   #[cfg(not(target_arch = "wasm32"))]
   pub fn save(&self) -> anyhow::Result<()> {
      self.save_to(&Self::path()?)
   }

   #[cfg(not(target_arch = "wasm32"))]
   fn save_to(&self, path: &Path) -> anyhow::Result<()> {
      std::fs::write(path, toml::to_string(self)?)?;
      Ok(())
   }

   #[cfg(target_arch = "wasm32")]
   const STORAGE_KEY: &'static str = "inkcanv.config";

   #[cfg(target_arch = "wasm32")]
   pub fn load_or_create() -> anyhow::Result<Self> {
      use gloo_storage::{LocalStorage, Storage};

      match LocalStorage::get::<Self>(Self::STORAGE_KEY) {
         Ok(config) => Ok(config),
         Err(error) => {
            log::info!("no usable stored config ({}), using defaults", error);
            let config = Self::default();
            config.save()?;
            Ok(config)
         }
      }
   }

   #[cfg(target_arch = "wasm32")]
   pub fn save(&self) -> anyhow::Result<()> {
      use gloo_storage::{LocalStorage, Storage};

      LocalStorage::set(Self::STORAGE_KEY, self)?;
      Ok(())
   }
}
