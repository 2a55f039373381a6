use std::fmt::Write as _;

use log::info;

use crate::errors::AccessResult;
use crate::export::{ExportSettings, ExporterFactory, TwoDImageExporter};
use crate::product::{ProductDescriptor, ProductLoader};
use crate::table::TableReader;

/// Main interface to the pdsaccess library
pub struct ObjectAccess {
    product: ProductDescriptor,
}

impl ObjectAccess {
    /// Open a product from its TOML description
    ///
    /// # Arguments
    /// * `path` - Path to the product description
    ///
    /// # Returns
    /// An ObjectAccess instance or an error if the description or data cannot be read
    pub fn open(path: &str) -> AccessResult<Self> {
        Ok(ObjectAccess { product: ProductLoader::load(path)? })
    }

    /// Wrap an already resolved product
    pub fn from_product(product: ProductDescriptor) -> Self {
        ObjectAccess { product }
    }

    pub fn product(&self) -> &ProductDescriptor {
        &self.product
    }

    pub fn array_count(&self) -> usize {
        self.product.arrays.len()
    }

    pub fn table_count(&self) -> usize {
        self.product.tables.len()
    }

    /// Exporter for one array, starting from the product's export defaults
    pub fn image_exporter(&self, index: usize) -> AccessResult<TwoDImageExporter> {
        Ok(ExporterFactory::get_2d_image_exporter(&self.product, index)?
            .with_settings(self.product.export_defaults))
    }

    /// Reader for one table
    pub fn table_reader(&self, index: usize) -> AccessResult<TableReader> {
        ExporterFactory::get_table_reader(&self.product, index)
    }

    /// Export one band of one array to a file
    ///
    /// # Arguments
    /// * `array` - Array index within the product
    /// * `band` - Band index within the array
    /// * `settings` - Output format, depth and scaling
    /// * `output_path` - Where to write the image
    pub fn export_image(&self, array: usize, band: usize, settings: ExportSettings,
                        output_path: &str) -> AccessResult<()> {
        let exporter = ExporterFactory::get_2d_image_exporter(&self.product, array)?
            .with_settings(settings);
        exporter.convert_to_file(output_path, band)?;
        info!("Exported array {} band {} to {}", array, band, output_path);
        Ok(())
    }

    /// Human-readable summary of the product's arrays and tables
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Product data: {} bytes", self.product.data.len());

        let _ = writeln!(out, "Arrays: {}", self.product.arrays.len());
        for (i, array) in self.product.arrays.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {} at offset {}", i, array, array.offset);
        }

        let _ = writeln!(out, "Tables: {}", self.product.tables.len());
        for (i, table) in self.product.tables.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}: {} records of {} bytes at offset {}",
                             i, table.name, table.records, table.codec.record_length(), table.offset);
            for field in table.codec.fields() {
                let _ = writeln!(out, "      {} ({})", field.name, field.descriptor);
            }
        }

        let defaults = &self.product.export_defaults;
        let _ = writeln!(out, "Export defaults: {} {}-bit{}", defaults.export_type,
                         defaults.target_pixel_depth,
                         if defaults.maximize_dynamic_range { ", maximized dynamic range" } else { "" });
        out
    }
}
