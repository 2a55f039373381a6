//! Product descriptions
//!
//! A product is a block of data bytes plus the array and table
//! descriptors that locate things inside it.

pub mod array;
pub mod loader;

use std::sync::Arc;

use crate::export::settings::ExportSettings;
use crate::table::record::TableRecordCodec;

pub use array::{ArrayDescriptor, BandStorage, SampleKind};
pub use loader::ProductLoader;

/// A table of fixed-length records inside a product
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    pub name: String,
    /// Byte offset of the first record
    pub offset: usize,
    /// Number of records
    pub records: usize,
    pub codec: TableRecordCodec,
}

/// Data bytes together with their array and table descriptors
#[derive(Debug, Clone)]
pub struct ProductDescriptor {
    /// Shared, immutable product data
    pub data: Arc<[u8]>,
    pub arrays: Vec<ArrayDescriptor>,
    pub tables: Vec<TableDescriptor>,
    /// Settings new exporters start from when driven by the CLI
    pub export_defaults: ExportSettings,
}

impl ProductDescriptor {
    pub fn new(data: Vec<u8>) -> Self {
        ProductDescriptor {
            data: Arc::from(data),
            arrays: Vec::new(),
            tables: Vec::new(),
            export_defaults: ExportSettings::default(),
        }
    }

    pub fn with_array(mut self, array: ArrayDescriptor) -> Self {
        self.arrays.push(array);
        self
    }

    pub fn with_table(mut self, table: TableDescriptor) -> Self {
        self.tables.push(table);
        self
    }
}
