//! Two-dimensional image export
//!
//! This module drives the export pipeline for one array: band extraction,
//! rescaling and encoding into the selected output format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, info};

use crate::errors::AccessResult;
use crate::export::encoder::RescaledImage;
use crate::export::range_mapper::SampleRangeMapper;
use crate::export::settings::{ExportSettings, ExportType};
use crate::product::array::ArrayDescriptor;

/// Exports bands of one image array
///
/// Settings change through `&mut self` while `convert` only borrows, so
/// settings cannot change during a conversion.
pub struct TwoDImageExporter {
    settings: ExportSettings,
    array: ArrayDescriptor,
    data: Arc<[u8]>,
}

impl TwoDImageExporter {
    /// Create an exporter with default settings (PNG, 8-bit, direct mapping)
    ///
    /// # Arguments
    /// * `array` - Descriptor of the array to export
    /// * `data` - Shared product data holding the array
    pub fn new(array: ArrayDescriptor, data: Arc<[u8]>) -> Self {
        TwoDImageExporter {
            settings: ExportSettings::default(),
            array,
            data,
        }
    }

    /// Replace all settings at once
    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn array(&self) -> &ArrayDescriptor {
        &self.array
    }

    /// Select the output format by name, case-insensitive
    pub fn set_export_type(&mut self, name: &str) -> AccessResult<()> {
        self.settings.export_type = ExportType::from_str(name)?;
        Ok(())
    }

    /// Select the output depth: 8, 16 or 32 bits
    pub fn set_target_pixel_depth(&mut self, depth: u32) -> AccessResult<()> {
        ExportSettings::check_requested_depth(depth)?;
        self.settings.target_pixel_depth = depth;
        Ok(())
    }

    pub fn maximize_dynamic_range(&mut self, enabled: bool) {
        self.settings.maximize_dynamic_range = enabled;
    }

    /// Export one band to a writer
    ///
    /// # Arguments
    /// * `out` - Destination for the encoded image
    /// * `band` - Zero-based band index
    ///
    /// # Returns
    /// Nothing is written if any step fails before encoding
    pub fn convert<W: Write>(&self, out: &mut W, band: usize) -> AccessResult<()> {
        let settings = self.settings;
        info!("Exporting band {} of '{}' as {}-bit {}",
              band, self.array.name, settings.target_pixel_depth, settings.export_type);

        let samples = self.array.read_band(&self.data, band)?;
        settings.export_type.check_depth(settings.target_pixel_depth)?;

        let params = SampleRangeMapper::compute(&self.array, &settings, &samples);
        debug!("Rescale: {}", params);

        let image = RescaledImage {
            width: self.array.width,
            height: self.array.height,
            depth: settings.target_pixel_depth,
            samples: SampleRangeMapper::rescale(&params, &samples),
        };
        settings.export_type.encode(&image, out)
    }

    /// Export one band into a new buffer
    pub fn convert_to_vec(&self, band: usize) -> AccessResult<Vec<u8>> {
        let mut out = Vec::new();
        self.convert(&mut out, band)?;
        Ok(out)
    }

    /// Export one band to a file
    pub fn convert_to_file(&self, path: &str, band: usize) -> AccessResult<()> {
        // Encode first so a failed export leaves no file behind
        let encoded = self.convert_to_vec(band)?;
        let mut writer = BufWriter::new(File::create(Path::new(path))?);
        writer.write_all(&encoded)?;
        writer.flush()?;
        info!("Wrote {} bytes to {}", encoded.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AccessError;
    use crate::product::array::SampleKind;

    fn exporter() -> TwoDImageExporter {
        let array = ArrayDescriptor::new("img", 2, 2, SampleKind::Unsigned, 8);
        TwoDImageExporter::new(array, Arc::from(vec![1u8, 2, 3, 4]))
    }

    #[test]
    fn test_setters() {
        let mut exporter = exporter();
        exporter.set_export_type("fits").unwrap();
        exporter.set_target_pixel_depth(32).unwrap();
        exporter.maximize_dynamic_range(true);
        assert_eq!(exporter.settings().export_type, ExportType::Fits);
        assert_eq!(exporter.settings().target_pixel_depth, 32);
        assert!(exporter.settings().maximize_dynamic_range);

        assert!(matches!(exporter.set_export_type("jpeg"), Err(AccessError::UnsupportedExportType(_))));
        assert!(matches!(
            exporter.set_target_pixel_depth(24),
            Err(AccessError::UnsupportedPixelDepth { depth: 24, .. })
        ));
        assert_eq!(exporter.settings().target_pixel_depth, 32);
    }

    #[test]
    fn test_png_rejects_32_bit() {
        let mut exporter = exporter();
        exporter.set_target_pixel_depth(32).unwrap();
        let mut out = Vec::new();
        assert!(matches!(
            exporter.convert(&mut out, 0),
            Err(AccessError::UnsupportedPixelDepth { depth: 32, format: "PNG" })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_band() {
        assert!(matches!(exporter().convert_to_vec(1), Err(AccessError::BandNotFound { index: 1, count: 1 })));
    }
}
