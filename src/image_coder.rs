use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use inkcanv_renderer::RasterSurface;

use crate::Error;

pub struct ImageCoder;

impl ImageCoder {
   /// Copies the pixels of a surface into an image. The surface itself is left untouched.
   pub fn snapshot(surface: &impl RasterSurface) -> crate::Result<RgbaImage> {
      let (width, height) = surface.size();
      let mut pixels = vec![0; width as usize * height as usize * 4];
      surface.download_rgba(&mut pixels);
      RgbaImage::from_raw(width, height, pixels)
         .ok_or(Error::SnapshotSizeMismatch { width, height })
   }

   /// Encodes an image to PNG data.
   pub fn encode_png_data(image: &RgbaImage) -> crate::Result<Vec<u8>> {
      let mut bytes: Vec<u8> = Vec::new();
      match PngEncoder::new(Cursor::new(&mut bytes)).write_image(
         image,
         image.width(),
         image.height(),
         ColorType::Rgba8,
      ) {
         Ok(()) => (),
         Err(error) => {
            log::error!("error while encoding: {}", error);
            return Err(error.into());
         }
      }
      Ok(bytes)
   }

   /// Snapshots a surface and writes it to a PNG file.
   pub fn save_png(surface: &impl RasterSurface, path: &std::path::Path) -> crate::Result<()> {
      let image = Self::snapshot(surface)?;
      let data = Self::encode_png_data(&image)?;
      std::fs::write(path, data)?;
      log::info!("saved {}x{} image to {}", image.width(), image.height(), path.display());
      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::testing::RecordingSurface;

   #[test]
   fn snapshot_matches_the_surface_size() {
      let image = ImageCoder::snapshot(&RecordingSurface::default()).unwrap();
      assert_eq!(image.dimensions(), (64, 64));
   }

   #[test]
   fn png_has_a_png_signature() {
      let image = RgbaImage::from_pixel(2, 2, image::Rgba([0, 17, 40, 255]));
      let data = ImageCoder::encode_png_data(&image).unwrap();
      assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n");
   }
}
