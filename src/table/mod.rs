//! Fixed-length table records

pub mod format;
pub mod reader;
pub mod record;

pub use reader::TableReader;
pub use record::{Record, TableField, TableRecordCodec};
