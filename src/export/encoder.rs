//! Encoder dispatch over output formats

use std::io::Write;

use log::debug;

use crate::errors::AccessResult;
use crate::export::settings::ExportType;
use crate::export::{fits, pds3, png, vicar};

/// A band after rescaling, ready for encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescaledImage {
    pub width: usize,
    pub height: usize,
    /// Bits per pixel: 8, 16 or 32
    pub depth: u32,
    /// Row-major samples, each within `[0, 2^depth - 1]`
    pub samples: Vec<u32>,
}

impl RescaledImage {
    pub fn bytes_per_sample(&self) -> usize {
        (self.depth / 8) as usize
    }

    /// Samples as big-endian unsigned integers of `depth` bits
    pub fn big_endian_bytes(&self) -> Vec<u8> {
        let n = self.bytes_per_sample();
        let mut out = Vec::with_capacity(self.samples.len() * n);
        for &s in &self.samples {
            out.extend_from_slice(&s.to_be_bytes()[4 - n..]);
        }
        out
    }
}

impl ExportType {
    /// Encode an image in this format
    ///
    /// Unsupported depths fail before anything is written.
    pub fn encode<W: Write>(&self, image: &RescaledImage, out: &mut W) -> AccessResult<()> {
        self.check_depth(image.depth)?;
        debug!("Encoding {}x{} {}-bit image as {}", image.width, image.height, image.depth, self.name());
        match self {
            ExportType::Png => png::encode(image, out),
            ExportType::Vicar => vicar::encode(image, out),
            ExportType::Pds3 => pds3::encode(image, out),
            ExportType::Fits => fits::encode(image, out),
        }
    }
}
