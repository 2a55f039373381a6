//! Export settings and output format names

use std::fmt;
use std::str::FromStr;

use crate::errors::{AccessError, AccessResult};

/// Depths a caller may request, before any per-format check
pub const SUPPORTED_DEPTHS: [u32; 3] = [8, 16, 32];

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportType {
    #[default]
    Png,
    Vicar,
    Pds3,
    Fits,
}

impl ExportType {
    pub fn name(&self) -> &'static str {
        match self {
            ExportType::Png => "PNG",
            ExportType::Vicar => "VICAR",
            ExportType::Pds3 => "PDS3",
            ExportType::Fits => "FITS",
        }
    }

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportType::Png => "png",
            ExportType::Vicar => "vic",
            ExportType::Pds3 => "img",
            ExportType::Fits => "fits",
        }
    }

    /// Pixel depths this format can store
    pub fn supported_depths(&self) -> &'static [u32] {
        match self {
            ExportType::Png => &[8, 16],
            ExportType::Vicar | ExportType::Pds3 | ExportType::Fits => &SUPPORTED_DEPTHS,
        }
    }

    /// Fails with `UnsupportedPixelDepth` if this format cannot store `depth`
    pub fn check_depth(&self, depth: u32) -> AccessResult<()> {
        if self.supported_depths().contains(&depth) {
            Ok(())
        } else {
            Err(AccessError::UnsupportedPixelDepth { depth, format: self.name() })
        }
    }
}

impl FromStr for ExportType {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PNG" => Ok(ExportType::Png),
            "VICAR" => Ok(ExportType::Vicar),
            "PDS3" => Ok(ExportType::Pds3),
            "FITS" => Ok(ExportType::Fits),
            _ => Err(AccessError::UnsupportedExportType(s.to_string())),
        }
    }
}

impl fmt::Display for ExportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Caller-chosen options for one image export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    /// Bits per output pixel: 8, 16 or 32
    pub target_pixel_depth: u32,
    /// Stretch the band's actual value range over the full target range
    pub maximize_dynamic_range: bool,
    pub export_type: ExportType,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            target_pixel_depth: 8,
            maximize_dynamic_range: false,
            export_type: ExportType::Png,
        }
    }
}

impl ExportSettings {
    /// Fails with `UnsupportedPixelDepth` outside {8, 16, 32}
    pub fn check_requested_depth(depth: u32) -> AccessResult<()> {
        if SUPPORTED_DEPTHS.contains(&depth) {
            Ok(())
        } else {
            Err(AccessError::UnsupportedPixelDepth { depth, format: "export" })
        }
    }
}
