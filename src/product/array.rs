//! Image array descriptors and band extraction
//!
//! An array is a `width` x `height` x `bands` block of fixed-size binary
//! samples at some offset in the product data. Band extraction flattens
//! one band into row-major `f64` samples, whatever the band storage.

use std::fmt;
use std::str::FromStr;

use crate::errors::{AccessError, AccessResult};
use crate::field::data_type::DataType;
use crate::field::descriptor::FieldKind;
use crate::io::byte_order::ByteOrder;

/// Numeric interpretation of array samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Unsigned,
    Signed,
    Real,
}

impl SampleKind {
    pub fn name(&self) -> &'static str {
        match self {
            SampleKind::Unsigned => "unsigned integer",
            SampleKind::Signed => "signed integer",
            SampleKind::Real => "real",
        }
    }
}

/// Ordering of bands within the array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandStorage {
    /// All of band 0, then all of band 1, ...
    #[default]
    BandSequential,
    /// Each line holds one row of every band in turn
    LineInterleaved,
    /// Each sample position holds every band in turn
    SampleInterleaved,
}

impl BandStorage {
    pub fn name(&self) -> &'static str {
        match self {
            BandStorage::BandSequential => "band_sequential",
            BandStorage::LineInterleaved => "line_interleaved",
            BandStorage::SampleInterleaved => "sample_interleaved",
        }
    }
}

impl FromStr for BandStorage {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "band_sequential" | "bsq" => Ok(BandStorage::BandSequential),
            "line_interleaved" | "bil" => Ok(BandStorage::LineInterleaved),
            "sample_interleaved" | "bip" => Ok(BandStorage::SampleInterleaved),
            other => Err(AccessError::InvalidDescriptor(format!("unknown band storage '{}'", other))),
        }
    }
}

/// Layout and sample encoding of one image array
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDescriptor {
    pub name: String,
    /// Samples per line
    pub width: usize,
    /// Number of lines
    pub height: usize,
    pub bands: usize,
    pub sample_kind: SampleKind,
    pub bits_per_sample: u32,
    pub band_storage: BandStorage,
    pub byte_order: ByteOrder,
    /// Byte offset of the first sample in the product data
    pub offset: usize,
}

impl ArrayDescriptor {
    /// Creates a single-band, band-sequential, big-endian array descriptor
    pub fn new(name: &str, width: usize, height: usize, sample_kind: SampleKind, bits_per_sample: u32) -> Self {
        ArrayDescriptor {
            name: name.to_string(),
            width,
            height,
            bands: 1,
            sample_kind,
            bits_per_sample,
            band_storage: BandStorage::BandSequential,
            byte_order: ByteOrder::BigEndian,
            offset: 0,
        }
    }

    /// Creates a descriptor whose samples use a named data type
    pub fn with_data_type(name: &str, width: usize, height: usize, data_type: &DataType) -> AccessResult<Self> {
        let sample_kind = match data_type.kind {
            FieldKind::UnsignedInteger => SampleKind::Unsigned,
            FieldKind::SignedInteger => SampleKind::Signed,
            FieldKind::Real => SampleKind::Real,
            other => {
                return Err(AccessError::InvalidDescriptor(format!(
                    "array samples cannot be {}", other.name()
                )))
            }
        };
        let bytes = data_type.width.ok_or_else(|| AccessError::InvalidDescriptor(
            "array samples need a fixed-width data type".to_string()
        ))?;
        let mut array = ArrayDescriptor::new(name, width, height, sample_kind, (bytes * 8) as u32);
        array.byte_order = data_type.byte_order;
        Ok(array)
    }

    pub fn with_bands(mut self, bands: usize, band_storage: BandStorage) -> Self {
        self.bands = bands;
        self.band_storage = band_storage;
        self
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample / 8) as usize
    }

    /// Samples in one band
    pub fn band_len(&self) -> AccessResult<usize> {
        self.width.checked_mul(self.height).ok_or_else(|| self.too_large())
    }

    /// Total bytes covered by the array
    pub fn data_len(&self) -> AccessResult<usize> {
        self.band_len()?
            .checked_mul(self.bands)
            .and_then(|n| n.checked_mul(self.bytes_per_sample()))
            .ok_or_else(|| self.too_large())
    }

    fn too_large(&self) -> AccessError {
        AccessError::InvalidDescriptor(format!(
            "array '{}' is too large to address ({}x{}x{} of {} bits)",
            self.name, self.width, self.height, self.bands, self.bits_per_sample
        ))
    }

    pub fn validate(&self) -> AccessResult<()> {
        if self.width == 0 || self.height == 0 || self.bands == 0 {
            return Err(AccessError::InvalidDescriptor(format!(
                "array '{}' has an empty dimension ({}x{}x{})",
                self.name, self.width, self.height, self.bands
            )));
        }
        let valid_bits = match self.sample_kind {
            SampleKind::Real => matches!(self.bits_per_sample, 32 | 64),
            _ => matches!(self.bits_per_sample, 8 | 16 | 32 | 64),
        };
        if !valid_bits {
            return Err(AccessError::InvalidDescriptor(format!(
                "{}-bit {} samples are not supported", self.bits_per_sample, self.sample_kind.name()
            )));
        }
        // Every sample position stays below this once it fits
        self.data_len()?;
        Ok(())
    }

    /// Byte offset of a sample relative to the array start
    fn sample_position(&self, band: usize, line: usize, sample: usize) -> usize {
        let index = match self.band_storage {
            BandStorage::BandSequential => (band * self.height + line) * self.width + sample,
            BandStorage::LineInterleaved => (line * self.bands + band) * self.width + sample,
            BandStorage::SampleInterleaved => (line * self.width + sample) * self.bands + band,
        };
        index * self.bytes_per_sample()
    }

    /// Reads one band as row-major samples
    ///
    /// # Arguments
    /// * `data` - The product data the array lives in
    /// * `band` - Zero-based band index
    ///
    /// # Returns
    /// `width * height` samples, or `BandNotFound` for a bad index
    pub fn read_band(&self, data: &[u8], band: usize) -> AccessResult<Vec<f64>> {
        self.validate()?;
        if band >= self.bands {
            return Err(AccessError::BandNotFound { index: band, count: self.bands });
        }
        let needed = self.data_len()?;
        if self.offset.checked_add(needed).map_or(true, |end| end > data.len()) {
            return Err(AccessError::FieldOutOfBounds {
                offset: self.offset,
                length: needed,
                buffer_len: data.len(),
            });
        }

        let array = &data[self.offset..self.offset + needed];
        let handler = self.byte_order.handler();
        let nbytes = self.bytes_per_sample();
        let mut samples = Vec::with_capacity(self.band_len()?);

        for line in 0..self.height {
            for sample in 0..self.width {
                let bytes = &array[self.sample_position(band, line, sample)..];
                let value = match self.sample_kind {
                    SampleKind::Unsigned => handler.read_uint(bytes, nbytes) as f64,
                    SampleKind::Signed => {
                        let raw = handler.read_uint(bytes, nbytes);
                        let shift = 64 - self.bits_per_sample;
                        (((raw << shift) as i64) >> shift) as f64
                    }
                    SampleKind::Real if nbytes == 4 => handler.read_f32(bytes) as f64,
                    SampleKind::Real => handler.read_f64(bytes),
                };
                samples.push(value);
            }
        }
        Ok(samples)
    }
}

impl fmt::Display for ArrayDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}x{}x{} {}-bit {} ({}, {})",
               self.name, self.width, self.height, self.bands, self.bits_per_sample,
               self.sample_kind.name(), self.band_storage.name(), self.byte_order.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_storage_orders() {
        // Two bands, 2x1 pixels: band 0 = [1, 2], band 1 = [10, 20]
        let bsq = [1u8, 2, 10, 20];
        let bil = [1u8, 2, 10, 20];
        let bip = [1u8, 10, 2, 20];

        for (storage, data) in [
            (BandStorage::BandSequential, bsq),
            (BandStorage::LineInterleaved, bil),
            (BandStorage::SampleInterleaved, bip),
        ] {
            let array = ArrayDescriptor::new("img", 2, 1, SampleKind::Unsigned, 8).with_bands(2, storage);
            assert_eq!(array.read_band(&data, 0).unwrap(), vec![1.0, 2.0]);
            assert_eq!(array.read_band(&data, 1).unwrap(), vec![10.0, 20.0]);
        }
    }

    #[test]
    fn test_line_interleaved_multiline() {
        // 2 lines of 2 samples, 2 bands
        let data = [1u8, 2, 10, 20, 3, 4, 30, 40];
        let array = ArrayDescriptor::new("img", 2, 2, SampleKind::Unsigned, 8)
            .with_bands(2, BandStorage::LineInterleaved);
        assert_eq!(array.read_band(&data, 0).unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(array.read_band(&data, 1).unwrap(), vec![10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_signed_and_real_samples() {
        let signed = ArrayDescriptor::new("s", 2, 1, SampleKind::Signed, 16)
            .with_byte_order(ByteOrder::LittleEndian);
        assert_eq!(signed.read_band(&[0xFE, 0xFF, 0x05, 0x00], 0).unwrap(), vec![-2.0, 5.0]);

        let mut data = Vec::new();
        data.extend_from_slice(&0.5f32.to_be_bytes());
        let real = ArrayDescriptor::new("r", 1, 1, SampleKind::Real, 32);
        assert_eq!(real.read_band(&data, 0).unwrap(), vec![0.5]);
    }

    #[test]
    fn test_band_and_bounds_errors() {
        let array = ArrayDescriptor::new("img", 2, 2, SampleKind::Unsigned, 8).with_offset(2);
        assert!(matches!(array.read_band(&[0u8; 6], 1), Err(AccessError::BandNotFound { index: 1, count: 1 })));
        assert!(matches!(array.read_band(&[0u8; 5], 0), Err(AccessError::FieldOutOfBounds { .. })));
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        let wide = ArrayDescriptor::new("big", usize::MAX / 2, 4, SampleKind::Unsigned, 8);
        assert!(matches!(wide.validate(), Err(AccessError::InvalidDescriptor(_))));
        assert!(matches!(wide.read_band(&[0u8; 16], 0), Err(AccessError::InvalidDescriptor(_))));

        // Fits as samples, overflows once bands and sample width are applied
        let deep = ArrayDescriptor::new("deep", usize::MAX / 4, 1, SampleKind::Unsigned, 64)
            .with_bands(2, BandStorage::BandSequential);
        assert!(deep.band_len().is_ok());
        assert!(matches!(deep.data_len(), Err(AccessError::InvalidDescriptor(_))));
    }
}
