//! Whole-record decode and encode

use log::trace;

use crate::errors::{AccessError, AccessResult};
use crate::field::codec::FieldCodec;
use crate::field::descriptor::FieldDescriptor;
use crate::field::value::{ScalarValue, ValueKind};

/// A named field within a table record
#[derive(Debug, Clone, PartialEq)]
pub struct TableField {
    pub name: String,
    pub descriptor: FieldDescriptor,
    /// Representation to decode into; `None` keeps the encoding's natural one
    pub representation: Option<ValueKind>,
}

impl TableField {
    pub fn new(name: &str, descriptor: FieldDescriptor) -> Self {
        TableField { name: name.to_string(), descriptor, representation: None }
    }

    pub fn with_representation(mut self, kind: ValueKind) -> Self {
        self.representation = Some(kind);
        self
    }
}

/// Decoded field values in descriptor order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    values: Vec<(String, ScalarValue)>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Sets a value, replacing any existing value with the same name
    pub fn insert(&mut self, name: &str, value: ScalarValue) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> Vec<&str> {
        self.values.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Decodes and encodes fixed-length records made of named fields
///
/// Field byte ranges may overlap (bit fields sharing a byte, for example).
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecordCodec {
    fields: Vec<TableField>,
    record_length: usize,
}

impl TableRecordCodec {
    pub fn new(fields: Vec<TableField>, record_length: usize) -> Self {
        TableRecordCodec { fields, record_length }
    }

    pub fn fields(&self) -> &[TableField] {
        &self.fields
    }

    pub fn record_length(&self) -> usize {
        self.record_length
    }

    /// Decodes one record
    pub fn decode(&self, record: &[u8]) -> AccessResult<Record> {
        let mut out = Record::new();
        for field in &self.fields {
            let value = match field.representation {
                Some(kind) => FieldCodec::get(record, &field.descriptor, kind)?,
                None => FieldCodec::get_natural(record, &field.descriptor)?,
            };
            trace!("{} = {}", field.name, value);
            out.insert(&field.name, value);
        }
        Ok(out)
    }

    /// Encodes a record into a new `record_length` buffer
    ///
    /// Text-only layouts start from spaces, all others from zeros.
    pub fn encode(&self, record: &Record) -> AccessResult<Vec<u8>> {
        let all_text = self.fields.iter().all(|f| f.descriptor.kind.is_textual());
        let mut buf = vec![if all_text { b' ' } else { 0u8 }; self.record_length];

        for field in &self.fields {
            let value = record.get(&field.name)
                .ok_or_else(|| AccessError::MissingField(field.name.clone()))?;
            FieldCodec::set(value, &mut buf, &field.descriptor, field.descriptor.justification)?;
        }
        Ok(buf)
    }
}
