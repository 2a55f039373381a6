//! Adapter for IEEE-754 floating point fields

use crate::errors::{AccessError, AccessResult};
use crate::field::adapter::{reject_bit_range, FieldAdapter};
use crate::field::descriptor::{FieldDescriptor, Justification};
use crate::field::value::{ConversionPolicy, ScalarValue, ValueKind};

/// IEEE-754 single (4-byte) and double (8-byte) adapter
pub struct IeeeRealAdapter;

fn bad_length(length: usize) -> AccessError {
    AccessError::InvalidDescriptor(format!("real fields must be 4 or 8 bytes, got {}", length))
}

impl FieldAdapter for IeeeRealAdapter {
    fn read(&self, buf: &[u8], field: &FieldDescriptor) -> AccessResult<ScalarValue> {
        reject_bit_range(field, self.name())?;
        field.check_bounds(buf.len())?;
        let handler = field.byte_order.handler();
        let bytes = &buf[field.offset..field.end()];
        match field.length {
            4 => Ok(ScalarValue::Float(handler.read_f32(bytes))),
            8 => Ok(ScalarValue::Double(handler.read_f64(bytes))),
            other => Err(bad_length(other)),
        }
    }

    fn write(&self, value: &ScalarValue, buf: &mut [u8], field: &FieldDescriptor,
             _justification: Justification) -> AccessResult<()> {
        reject_bit_range(field, self.name())?;
        field.check_bounds(buf.len())?;
        if !value.kind().is_real() {
            return Err(AccessError::UnsupportedConversion { from: value.kind().name(), to: self.name() });
        }

        let handler = field.byte_order.handler();
        let end = field.end();
        let bytes = &mut buf[field.offset..end];
        match field.length {
            4 => {
                // Doubles outside the f32 range are rejected
                if let ScalarValue::Float(v) = value.clone().convert(ValueKind::Float, ConversionPolicy::Strict)? {
                    handler.write_f32(bytes, v);
                }
                Ok(())
            }
            8 => {
                if let ScalarValue::Double(v) = value.clone().convert(ValueKind::Double, ConversionPolicy::Strict)? {
                    handler.write_f64(bytes, v);
                }
                Ok(())
            }
            other => Err(bad_length(other)),
        }
    }

    fn name(&self) -> &'static str {
        "real"
    }
}
