//! Text output for decoded records
//!
//! Delimited output quotes values containing the delimiter, quotes or line
//! breaks. Fixed-width output right-justifies numbers, left-justifies text
//! and refuses to truncate.

use std::io::Write;

use crate::errors::{AccessError, AccessResult};
use crate::field::descriptor::FieldKind;
use crate::field::value::ScalarValue;
use crate::table::record::{Record, TableRecordCodec};

fn quote(value: &str, delimiter: &str) -> String {
    if value.contains(delimiter) || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write a header line of column names
pub fn write_header<W: Write>(names: &[&str], writer: &mut W, delimiter: &str) -> AccessResult<()> {
    let line: Vec<String> = names.iter().map(|n| quote(n, delimiter)).collect();
    writeln!(writer, "{}", line.join(delimiter))?;
    Ok(())
}

/// Write one record as a delimited line
pub fn write_delimited<W: Write>(record: &Record, writer: &mut W, delimiter: &str) -> AccessResult<()> {
    let line: Vec<String> = record.iter().map(|(_, v)| quote(&v.to_string(), delimiter)).collect();
    writeln!(writer, "{}", line.join(delimiter))?;
    Ok(())
}

/// Write one record as fixed-width columns separated by a space
pub fn write_fixed_width<W: Write>(record: &Record, widths: &[usize], writer: &mut W) -> AccessResult<()> {
    if widths.len() != record.len() {
        return Err(AccessError::GenericError(format!(
            "{} column widths given for {} fields", widths.len(), record.len()
        )));
    }

    let mut columns = Vec::with_capacity(widths.len());
    for ((_, value), &width) in record.iter().zip(widths) {
        let text = match value {
            // Fall back to scientific notation before giving up
            ScalarValue::Double(v) if v.to_string().len() > width => format!("{:e}", v),
            ScalarValue::Float(v) if v.to_string().len() > width => format!("{:e}", v),
            other => other.to_string(),
        };
        let length = text.chars().count();
        if length > width {
            return Err(AccessError::ValueTooLong { length, max: width });
        }
        let column = match value {
            ScalarValue::Text(_) => format!("{:<width$}", text, width = width),
            _ => format!("{:>width$}", text, width = width),
        };
        columns.push(column);
    }
    writeln!(writer, "{}", columns.join(" "))?;
    Ok(())
}

/// Column widths wide enough for any value of each field, and for its name
pub fn column_widths(codec: &TableRecordCodec) -> Vec<usize> {
    codec.fields().iter().map(|field| {
        let descriptor = &field.descriptor;
        let value_width = match descriptor.kind {
            FieldKind::Text | FieldKind::AsciiInteger | FieldKind::AsciiReal => descriptor.length,
            FieldKind::UnsignedInteger => decimal_digits(descriptor.bit_width()),
            FieldKind::SignedInteger => decimal_digits(descriptor.bit_width()) + 1,
            // Longest scientific form of an f64
            FieldKind::Real => 24,
        };
        value_width.max(field.name.chars().count())
    }).collect()
}

/// Digits needed to print any `bits`-wide unsigned value
fn decimal_digits(bits: u32) -> usize {
    ((bits as f64) * std::f64::consts::LOG10_2).ceil() as usize
}
