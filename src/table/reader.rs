//! Record access for tables inside a product

use std::sync::Arc;

use log::debug;

use crate::errors::{AccessError, AccessResult};
use crate::product::TableDescriptor;
use crate::table::record::{Record, TableRecordCodec};

/// Reads the fixed-length records of one table
pub struct TableReader {
    table: TableDescriptor,
    data: Arc<[u8]>,
}

impl TableReader {
    /// Create a new table reader
    ///
    /// # Arguments
    /// * `table` - Descriptor locating the table
    /// * `data` - Shared product data
    pub fn new(table: TableDescriptor, data: Arc<[u8]>) -> Self {
        debug!("Table reader for '{}': {} records of {} bytes at offset {}",
               table.name, table.records, table.codec.record_length(), table.offset);
        TableReader { table, data }
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn record_count(&self) -> usize {
        self.table.records
    }

    pub fn codec(&self) -> &TableRecordCodec {
        &self.table.codec
    }

    /// Raw bytes of one record
    pub fn record_bytes(&self, index: usize) -> AccessResult<&[u8]> {
        if index >= self.table.records {
            return Err(AccessError::GenericError(format!(
                "Record {} out of range for table '{}' ({} records)",
                index, self.table.name, self.table.records
            )));
        }
        let length = self.table.codec.record_length();
        let start = self.table.offset + index * length;
        self.data.get(start..start + length).ok_or(AccessError::FieldOutOfBounds {
            offset: start,
            length,
            buffer_len: self.data.len(),
        })
    }

    /// Decode one record
    pub fn read_record(&self, index: usize) -> AccessResult<Record> {
        self.table.codec.decode(self.record_bytes(index)?)
    }

    /// Iterate over all records in order
    pub fn records(&self) -> impl Iterator<Item = AccessResult<Record>> + '_ {
        (0..self.table.records).map(move |i| self.read_record(i))
    }
}
