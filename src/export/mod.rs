//! Image export
//!
//! Converts one band of an image array into PNG, VICAR, PDS3 or FITS,
//! rescaling samples to the requested pixel depth on the way.

pub mod encoder;
pub mod exporter;
pub mod factory;
pub mod fits;
pub mod pds3;
pub mod png;
pub mod range_mapper;
pub mod settings;
pub mod vicar;

pub use encoder::RescaledImage;
pub use exporter::TwoDImageExporter;
pub use factory::ExporterFactory;
pub use range_mapper::{RescaleMode, RescaleParameters, SampleRangeMapper};
pub use settings::{ExportSettings, ExportType};
