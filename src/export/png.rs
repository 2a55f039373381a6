//! Grayscale PNG output

use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::errors::{AccessError, AccessResult};
use crate::export::encoder::RescaledImage;

/// Write an 8- or 16-bit grayscale PNG
pub fn encode<W: Write>(image: &RescaledImage, out: &mut W) -> AccessResult<()> {
    let width = image.width as u32;
    let height = image.height as u32;
    let encoder = PngEncoder::new(out);

    match image.depth {
        8 => {
            let bytes: Vec<u8> = image.samples.iter().map(|&s| s as u8).collect();
            encoder.write_image(&bytes, width, height, ExtendedColorType::L8)?;
        }
        16 => {
            // The encoder expects native-endian 16-bit samples
            let bytes: Vec<u8> = image.samples.iter()
                .flat_map(|&s| (s as u16).to_ne_bytes())
                .collect();
            encoder.write_image(&bytes, width, height, ExtendedColorType::L16)?;
        }
        depth => return Err(AccessError::UnsupportedPixelDepth { depth, format: "PNG" }),
    }
    Ok(())
}
