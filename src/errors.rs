//! Custom error types for field decoding and image export

use std::fmt;
use std::io;

/// Errors raised by the field codec and the export pipeline
#[derive(Debug)]
pub enum AccessError {
    /// I/O error
    IoError(io::Error),
    /// Raster encoder failure
    ImageError(image::ImageError),
    /// A fixed-width integer was requested from a field wider than 64 bits
    FieldTooNarrow { width: u32 },
    /// A value does not fit into the bit width of its field
    ValueOverflow { value: String, width: u32 },
    /// A value does not fit into the requested representation
    PrecisionLoss { value: String, target: &'static str },
    /// The requested representation cannot be produced from this value
    UnsupportedConversion { from: &'static str, to: &'static str },
    /// The field encoding does not support the requested operation
    UnsupportedOperation(String),
    /// Encoded representation is longer than the field
    ValueTooLong { length: usize, max: usize },
    /// Pixel depth not supported by the chosen output format
    UnsupportedPixelDepth { depth: u32, format: &'static str },
    /// Unknown export format name
    UnsupportedExportType(String),
    /// Band or array index out of range
    BandNotFound { index: usize, count: usize },
    /// Table index out of range
    TableNotFound { index: usize, count: usize },
    /// Field byte range falls outside the buffer
    FieldOutOfBounds { offset: usize, length: usize, buffer_len: usize },
    /// Descriptor is internally inconsistent
    InvalidDescriptor(String),
    /// Numeric text could not be parsed
    InvalidNumber(String),
    /// Record is missing a value for a field
    MissingField(String),
    /// Product description could not be loaded
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::IoError(e) => write!(f, "I/O error: {}", e),
            AccessError::ImageError(e) => write!(f, "Image encoding error: {}", e),
            AccessError::FieldTooNarrow { width } =>
                write!(f, "Field is {} bits wide, too wide for a 64-bit integer", width),
            AccessError::ValueOverflow { value, width } =>
                write!(f, "Value {} does not fit in {} bits", value, width),
            AccessError::PrecisionLoss { value, target } =>
                write!(f, "Value {} cannot be represented as {}", value, target),
            AccessError::UnsupportedConversion { from, to } =>
                write!(f, "Cannot convert {} to {}", from, to),
            AccessError::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {}", msg),
            AccessError::ValueTooLong { length, max } =>
                write!(f, "Encoded value is {} bytes, field holds {}", length, max),
            AccessError::UnsupportedPixelDepth { depth, format } =>
                write!(f, "{} output does not support {}-bit pixels", format, depth),
            AccessError::UnsupportedExportType(name) => write!(f, "Unsupported export type: {}", name),
            AccessError::BandNotFound { index, count } =>
                write!(f, "Band {} not found ({} available)", index, count),
            AccessError::TableNotFound { index, count } =>
                write!(f, "Table {} not found ({} available)", index, count),
            AccessError::FieldOutOfBounds { offset, length, buffer_len } =>
                write!(f, "Field at offset {} with length {} exceeds buffer of {} bytes",
                       offset, length, buffer_len),
            AccessError::InvalidDescriptor(msg) => write!(f, "Invalid descriptor: {}", msg),
            AccessError::InvalidNumber(text) => write!(f, "Invalid numeric text: '{}'", text),
            AccessError::MissingField(name) => write!(f, "Record has no value for field '{}'", name),
            AccessError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AccessError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccessError::IoError(e) => Some(e),
            AccessError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for AccessError {
    fn from(error: io::Error) -> Self {
        AccessError::IoError(error)
    }
}

impl From<image::ImageError> for AccessError {
    fn from(error: image::ImageError) -> Self {
        AccessError::ImageError(error)
    }
}

impl From<String> for AccessError {
    fn from(msg: String) -> Self {
        AccessError::GenericError(msg)
    }
}

/// Result type for field and export operations
pub type AccessResult<T> = Result<T, AccessError>;
