//! Factory for exporters and table readers

use crate::errors::{AccessError, AccessResult};
use crate::export::exporter::TwoDImageExporter;
use crate::product::ProductDescriptor;
use crate::table::reader::TableReader;

/// Factory for product accessors
pub struct ExporterFactory;

impl ExporterFactory {
    /// Create an image exporter for the `index`-th array, with default settings
    pub fn get_2d_image_exporter(product: &ProductDescriptor, index: usize) -> AccessResult<TwoDImageExporter> {
        let array = product.arrays.get(index).ok_or(AccessError::BandNotFound {
            index,
            count: product.arrays.len(),
        })?;
        Ok(TwoDImageExporter::new(array.clone(), product.data.clone()))
    }

    /// Create a reader for the `index`-th table
    pub fn get_table_reader(product: &ProductDescriptor, index: usize) -> AccessResult<TableReader> {
        let table = product.tables.get(index).ok_or(AccessError::TableNotFound {
            index,
            count: product.tables.len(),
        })?;
        Ok(TableReader::new(table.clone(), product.data.clone()))
    }
}
