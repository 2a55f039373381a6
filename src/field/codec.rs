//! Typed get/set over field descriptors
//!
//! `FieldCodec` chooses the adapter for the field's encoding, decodes the
//! natural value and converts it to the representation the caller asked
//! for. The set path runs the other way and never touches bytes outside
//! the field (or outside the bit range for bit fields).

use num_bigint::BigUint;

use crate::errors::{AccessError, AccessResult};
use crate::field::adapter::FieldAdapterFactory;
use crate::field::descriptor::{Charset, FieldDescriptor, FieldKind, Justification};
use crate::field::value::{ConversionPolicy, ScalarValue, ValueKind};

/// Entry point for reading and writing individual fields
pub struct FieldCodec;

impl FieldCodec {
    /// Decodes a field into the requested representation
    pub fn get(buf: &[u8], field: &FieldDescriptor, kind: ValueKind) -> AccessResult<ScalarValue> {
        Self::get_with_policy(buf, field, kind, ConversionPolicy::Strict)
    }

    /// Like [`FieldCodec::get`], but integer fields may be read as float or double
    pub fn get_widened(buf: &[u8], field: &FieldDescriptor, kind: ValueKind) -> AccessResult<ScalarValue> {
        Self::get_with_policy(buf, field, kind, ConversionPolicy::WidenIntegers)
    }

    pub fn get_with_policy(buf: &[u8], field: &FieldDescriptor, kind: ValueKind,
                           policy: ConversionPolicy) -> AccessResult<ScalarValue> {
        field.validate()?;

        if kind == ValueKind::Text && field.bits.is_some() {
            return Err(AccessError::UnsupportedOperation(
                "text cannot be read from a bit field".to_string()
            ));
        }
        let binary_integer = matches!(field.kind, FieldKind::SignedInteger | FieldKind::UnsignedInteger);
        if binary_integer && kind.is_fixed_integer() && field.bit_width() > 64 {
            return Err(AccessError::FieldTooNarrow { width: field.bit_width() });
        }

        let adapter = FieldAdapterFactory::adapter_for(field.kind);
        adapter.read(buf, field)?.convert(kind, policy)
    }

    /// Decodes a field in the representation its encoding produces
    pub fn get_natural(buf: &[u8], field: &FieldDescriptor) -> AccessResult<ScalarValue> {
        field.validate()?;
        FieldAdapterFactory::adapter_for(field.kind).read(buf, field)
    }

    /// Encodes a value into a field
    pub fn set(value: &ScalarValue, buf: &mut [u8], field: &FieldDescriptor,
               justification: Justification) -> AccessResult<()> {
        field.validate()?;
        FieldAdapterFactory::adapter_for(field.kind).write(value, buf, field, justification)
    }

    pub fn get_byte(buf: &[u8], field: &FieldDescriptor) -> AccessResult<i8> {
        match Self::get(buf, field, ValueKind::Byte)? {
            ScalarValue::Byte(v) => Ok(v),
            other => Err(mismatch(&other, ValueKind::Byte)),
        }
    }

    pub fn get_short(buf: &[u8], field: &FieldDescriptor) -> AccessResult<i16> {
        match Self::get(buf, field, ValueKind::Short)? {
            ScalarValue::Short(v) => Ok(v),
            other => Err(mismatch(&other, ValueKind::Short)),
        }
    }

    pub fn get_int(buf: &[u8], field: &FieldDescriptor) -> AccessResult<i32> {
        match Self::get(buf, field, ValueKind::Int)? {
            ScalarValue::Int(v) => Ok(v),
            other => Err(mismatch(&other, ValueKind::Int)),
        }
    }

    pub fn get_long(buf: &[u8], field: &FieldDescriptor) -> AccessResult<i64> {
        match Self::get(buf, field, ValueKind::Long)? {
            ScalarValue::Long(v) => Ok(v),
            other => Err(mismatch(&other, ValueKind::Long)),
        }
    }

    pub fn get_big_integer(buf: &[u8], field: &FieldDescriptor) -> AccessResult<BigUint> {
        match Self::get(buf, field, ValueKind::BigInteger)? {
            ScalarValue::BigInteger(v) => Ok(v),
            other => Err(mismatch(&other, ValueKind::BigInteger)),
        }
    }

    pub fn get_float(buf: &[u8], field: &FieldDescriptor) -> AccessResult<f32> {
        match Self::get(buf, field, ValueKind::Float)? {
            ScalarValue::Float(v) => Ok(v),
            other => Err(mismatch(&other, ValueKind::Float)),
        }
    }

    pub fn get_double(buf: &[u8], field: &FieldDescriptor) -> AccessResult<f64> {
        match Self::get(buf, field, ValueKind::Double)? {
            ScalarValue::Double(v) => Ok(v),
            other => Err(mismatch(&other, ValueKind::Double)),
        }
    }

    pub fn get_string(buf: &[u8], field: &FieldDescriptor) -> AccessResult<String> {
        match Self::get(buf, field, ValueKind::Text)? {
            ScalarValue::Text(v) => Ok(v),
            other => Err(mismatch(&other, ValueKind::Text)),
        }
    }

    /// Reads text decoding with `charset` instead of the descriptor's own
    pub fn get_string_with_charset(buf: &[u8], field: &FieldDescriptor, charset: Charset) -> AccessResult<String> {
        let field = field.clone().with_charset(charset);
        Self::get_string(buf, &field)
    }

    pub fn set_byte(value: i8, buf: &mut [u8], field: &FieldDescriptor) -> AccessResult<()> {
        Self::set(&ScalarValue::Byte(value), buf, field, field.justification)
    }

    pub fn set_short(value: i16, buf: &mut [u8], field: &FieldDescriptor) -> AccessResult<()> {
        Self::set(&ScalarValue::Short(value), buf, field, field.justification)
    }

    pub fn set_int(value: i32, buf: &mut [u8], field: &FieldDescriptor) -> AccessResult<()> {
        Self::set(&ScalarValue::Int(value), buf, field, field.justification)
    }

    pub fn set_long(value: i64, buf: &mut [u8], field: &FieldDescriptor) -> AccessResult<()> {
        Self::set(&ScalarValue::Long(value), buf, field, field.justification)
    }

    pub fn set_big_integer(value: &BigUint, buf: &mut [u8], field: &FieldDescriptor) -> AccessResult<()> {
        Self::set(&ScalarValue::BigInteger(value.clone()), buf, field, field.justification)
    }

    pub fn set_float(value: f32, buf: &mut [u8], field: &FieldDescriptor) -> AccessResult<()> {
        Self::set(&ScalarValue::Float(value), buf, field, field.justification)
    }

    pub fn set_double(value: f64, buf: &mut [u8], field: &FieldDescriptor) -> AccessResult<()> {
        Self::set(&ScalarValue::Double(value), buf, field, field.justification)
    }

    /// Writes text, padding with spaces on the left when `is_right_justified`
    pub fn set_string(value: &str, buf: &mut [u8], field: &FieldDescriptor,
                      is_right_justified: bool) -> AccessResult<()> {
        Self::set(&ScalarValue::from(value), buf, field, Justification::from_flag(is_right_justified))
    }

    pub fn set_string_with_charset(value: &str, buf: &mut [u8], field: &FieldDescriptor,
                                   is_right_justified: bool, charset: Charset) -> AccessResult<()> {
        let field = field.clone().with_charset(charset);
        Self::set_string(value, buf, &field, is_right_justified)
    }
}

fn mismatch(value: &ScalarValue, wanted: ValueKind) -> AccessError {
    AccessError::UnsupportedConversion { from: value.kind().name(), to: wanted.name() }
}
