//! Source to target sample scaling
//!
//! Direct mapping keeps sample values as they are, except that unsigned
//! sources wider than the target keep only their high-order bits. Dynamic
//! range mapping stretches the band's observed minimum and maximum over
//! the whole target range.

use std::fmt;

use crate::export::settings::ExportSettings;
use crate::product::array::{ArrayDescriptor, SampleKind};

/// How samples are brought into the target range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescaleMode {
    /// Truncate toward zero, then clamp
    Direct,
    /// Round half away from zero, then clamp
    DynamicRange,
}

/// Scaling derived for one export
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescaleParameters {
    pub source_min: f64,
    pub source_max: f64,
    pub target_min: f64,
    pub target_max: f64,
    /// Multiplier applied after subtracting `offset`
    pub scale: f64,
    /// Subtracted from each sample before scaling
    pub offset: f64,
    pub mode: RescaleMode,
}

impl fmt::Display for RescaleParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} [{}, {}] -> [{}, {}] scale {} offset {}",
               self.mode, self.source_min, self.source_max,
               self.target_min, self.target_max, self.scale, self.offset)
    }
}

/// Computes and applies rescale parameters
pub struct SampleRangeMapper;

impl SampleRangeMapper {
    /// Target range `[0, 2^depth - 1]`
    pub fn target_range(depth: u32) -> (f64, f64) {
        (0.0, ((1u64 << depth) - 1) as f64)
    }

    /// Minimum and maximum of the samples, ignoring NaN
    ///
    /// Returns `None` when there is no non-NaN sample.
    pub fn scan(samples: &[f64]) -> Option<(f64, f64)> {
        samples.iter()
            .filter(|s| !s.is_nan())
            .fold(None, |acc, &s| match acc {
                None => Some((s, s)),
                Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
            })
    }

    /// Derive the parameters for one band
    ///
    /// `samples` is only scanned when the dynamic range is maximized.
    pub fn compute(array: &ArrayDescriptor, settings: &ExportSettings, samples: &[f64]) -> RescaleParameters {
        let depth = settings.target_pixel_depth;
        let (target_min, target_max) = Self::target_range(depth);

        if settings.maximize_dynamic_range {
            let (source_min, source_max) = Self::scan(samples).unwrap_or((0.0, 0.0));
            let scale = if source_max > source_min {
                (target_max - target_min) / (source_max - source_min)
            } else {
                0.0
            };
            return RescaleParameters {
                source_min,
                source_max,
                target_min,
                target_max,
                scale,
                offset: source_min,
                mode: RescaleMode::DynamicRange,
            };
        }

        let (source_min, source_max) = Self::declared_range(array);
        // Wider integer sources keep their high-order bits; negatives clamp to 0
        let integer = matches!(array.sample_kind, SampleKind::Unsigned | SampleKind::Signed);
        let scale = if integer && array.bits_per_sample > depth {
            1.0 / (1u64 << (array.bits_per_sample - depth)) as f64
        } else {
            1.0
        };
        RescaleParameters {
            source_min,
            source_max,
            target_min,
            target_max,
            scale,
            offset: 0.0,
            mode: RescaleMode::Direct,
        }
    }

    /// Value range the array's sample type can hold
    fn declared_range(array: &ArrayDescriptor) -> (f64, f64) {
        let bits = array.bits_per_sample;
        match array.sample_kind {
            SampleKind::Unsigned => (0.0, (2f64).powi(bits as i32) - 1.0),
            SampleKind::Signed => {
                let half = (2f64).powi(bits as i32 - 1);
                (-half, half - 1.0)
            }
            SampleKind::Real if bits == 32 => (f32::MIN as f64, f32::MAX as f64),
            SampleKind::Real => (f64::MIN, f64::MAX),
        }
    }

    /// Map one sample into the target range
    pub fn map(params: &RescaleParameters, sample: f64) -> u32 {
        if sample.is_nan() {
            return params.target_min as u32;
        }
        let scaled = (sample - params.offset) * params.scale;
        let value = match params.mode {
            RescaleMode::Direct => scaled.trunc(),
            RescaleMode::DynamicRange => scaled.round() + params.target_min,
        };
        value.clamp(params.target_min, params.target_max) as u32
    }

    /// Map every sample of a band
    pub fn rescale(params: &RescaleParameters, samples: &[f64]) -> Vec<u32> {
        samples.iter().map(|&s| Self::map(params, s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(depth: u32, maximize: bool) -> ExportSettings {
        ExportSettings { target_pixel_depth: depth, maximize_dynamic_range: maximize, ..ExportSettings::default() }
    }

    #[test]
    fn test_dynamic_range_stretch() {
        let array = ArrayDescriptor::new("img", 4, 1, SampleKind::Unsigned, 8);
        let samples = [10.0, 200.0, 104.0, 57.0];
        let params = SampleRangeMapper::compute(&array, &settings(8, true), &samples);

        assert_eq!((params.source_min, params.source_max), (10.0, 200.0));
        let expected: Vec<u32> = samples.iter()
            .map(|s| ((s - 10.0) * 255.0 / 190.0_f64).round() as u32)
            .collect();
        assert_eq!(SampleRangeMapper::rescale(&params, &samples), expected);
        assert_eq!(expected, vec![0, 255, 126, 63]);
    }

    #[test]
    fn test_flat_band_maps_to_minimum() {
        let array = ArrayDescriptor::new("img", 3, 1, SampleKind::Signed, 16);
        let samples = [-5.0, -5.0, f64::NAN];
        let params = SampleRangeMapper::compute(&array, &settings(16, true), &samples);
        assert_eq!(params.scale, 0.0);
        assert_eq!(SampleRangeMapper::rescale(&params, &samples), vec![0, 0, 0]);
    }

    #[test]
    fn test_direct_keeps_high_bits() {
        let array = ArrayDescriptor::new("img", 4, 1, SampleKind::Unsigned, 16);
        let params = SampleRangeMapper::compute(&array, &settings(8, false), &[]);
        let samples = [0.0, 255.0, 256.0, 65535.0];
        assert_eq!(SampleRangeMapper::rescale(&params, &samples), vec![0, 0, 1, 255]);
    }

    #[test]
    fn test_direct_shifts_signed_sources() {
        let array = ArrayDescriptor::new("img", 5, 1, SampleKind::Signed, 16);
        let params = SampleRangeMapper::compute(&array, &settings(8, false), &[]);
        let samples = [-32768.0, -1.0, 255.0, 4660.0, 32767.0];
        assert_eq!(SampleRangeMapper::rescale(&params, &samples), vec![0, 0, 0, 18, 127]);

        // Already fits: plain clamp
        let narrow = ArrayDescriptor::new("img", 3, 1, SampleKind::Signed, 8);
        let params = SampleRangeMapper::compute(&narrow, &settings(16, false), &[]);
        assert_eq!(SampleRangeMapper::rescale(&params, &[-5.0, 0.0, 127.0]), vec![0, 0, 127]);
    }

    #[test]
    fn test_direct_truncates_and_clamps() {
        let array = ArrayDescriptor::new("img", 5, 1, SampleKind::Real, 32);
        let params = SampleRangeMapper::compute(&array, &settings(8, false), &[]);
        let samples = [-3.7, 12.9, 254.99, 300.0, f64::NAN];
        assert_eq!(SampleRangeMapper::rescale(&params, &samples), vec![0, 12, 254, 255, 0]);
    }

    #[test]
    fn test_dynamic_range_ignores_nan() {
        let samples = [f64::NAN, 4.0, 2.0];
        assert_eq!(SampleRangeMapper::scan(&samples), Some((2.0, 4.0)));
        assert_eq!(SampleRangeMapper::scan(&[f64::NAN]), None);
    }

    #[test]
    fn test_target_range() {
        assert_eq!(SampleRangeMapper::target_range(8), (0.0, 255.0));
        assert_eq!(SampleRangeMapper::target_range(32), (0.0, 4294967295.0));
    }
}
