//! Adapter for binary integer fields
//!
//! Handles signed (two's complement) and unsigned integers stored either as
//! whole bytes in the field's byte order or as an MSB-first bit string.
//! Unsigned fields may be any width; signed fields are limited to 64 bits.

use num_bigint::{BigUint, Sign};
use num_traits::ToPrimitive;

use crate::errors::{AccessError, AccessResult};
use crate::field::adapter::FieldAdapter;
use crate::field::bits;
use crate::field::descriptor::{FieldDescriptor, Justification};
use crate::field::value::{unsigned_value, ScalarValue};

/// Binary integer adapter
pub struct BinaryIntegerAdapter {
    pub signed: bool,
}

fn sign_extend(raw: u64, width: u32) -> i64 {
    if width >= 64 {
        raw as i64
    } else {
        let shift = 64 - width;
        ((raw << shift) as i64) >> shift
    }
}

fn low_mask(width: u32) -> u64 {
    if width >= 64 { u64::MAX } else { (1u64 << width) - 1 }
}

impl BinaryIntegerAdapter {
    fn too_wide(&self, width: u32) -> AccessError {
        AccessError::UnsupportedOperation(format!("signed integers wider than 64 bits ({} bits)", width))
    }

    fn read_raw_u64(&self, buf: &[u8], field: &FieldDescriptor) -> AccessResult<u64> {
        match field.bits {
            Some(range) => bits::extract_bits_u64(buf, field.offset, field.length,
                                                  range.start_bit, range.stop_bit),
            None => Ok(field.byte_order.handler().read_uint(&buf[field.offset..], field.length)),
        }
    }

    fn write_raw_u64(&self, raw: u64, buf: &mut [u8], field: &FieldDescriptor) -> AccessResult<()> {
        match field.bits {
            Some(range) => bits::inject_bits_u64(raw, buf, field.offset, field.length,
                                                 range.start_bit, range.stop_bit),
            None => {
                field.byte_order.handler().write_uint(&mut buf[field.offset..], raw, field.length);
                Ok(())
            }
        }
    }
}

impl FieldAdapter for BinaryIntegerAdapter {
    fn read(&self, buf: &[u8], field: &FieldDescriptor) -> AccessResult<ScalarValue> {
        field.check_bounds(buf.len())?;
        let width = field.bit_width();

        if width <= 64 {
            let raw = self.read_raw_u64(buf, field)?;
            return Ok(if self.signed {
                ScalarValue::Long(sign_extend(raw, width))
            } else {
                unsigned_value(BigUint::from(raw))
            });
        }

        if self.signed {
            return Err(self.too_wide(width));
        }
        let wide = match field.bits {
            Some(range) => bits::extract_bits(buf, field.offset, field.length,
                                              range.start_bit, range.stop_bit)?,
            None => field.byte_order.handler().read_big(&buf[field.offset..field.end()]),
        };
        Ok(unsigned_value(wide))
    }

    fn write(&self, value: &ScalarValue, buf: &mut [u8], field: &FieldDescriptor,
             _justification: Justification) -> AccessResult<()> {
        field.check_bounds(buf.len())?;
        let int = value.to_big_int().ok_or(AccessError::UnsupportedConversion {
            from: value.kind().name(),
            to: self.name(),
        })?;
        let width = field.bit_width();
        let overflow = || AccessError::ValueOverflow { value: int.to_string(), width };

        if self.signed {
            if width > 64 {
                return Err(self.too_wide(width));
            }
            let v = int.to_i64().ok_or_else(overflow)?;
            let (min, max) = if width == 64 {
                (i64::MIN, i64::MAX)
            } else {
                (-(1i64 << (width - 1)), (1i64 << (width - 1)) - 1)
            };
            if v < min || v > max {
                return Err(overflow());
            }
            return self.write_raw_u64(v as u64 & low_mask(width), buf, field);
        }

        if int.sign() == Sign::Minus {
            return Err(overflow());
        }
        let magnitude = int.magnitude();
        if magnitude.bits() > width as u64 {
            return Err(overflow());
        }
        if width <= 64 {
            let raw = magnitude.to_u64().ok_or_else(overflow)?;
            return self.write_raw_u64(raw, buf, field);
        }
        match field.bits {
            Some(range) => bits::inject_bits(magnitude, buf, field.offset, field.length,
                                             range.start_bit, range.stop_bit),
            None => {
                let end = field.end();
                field.byte_order.handler().write_big(&mut buf[field.offset..end], magnitude);
                Ok(())
            }
        }
    }

    fn name(&self) -> &'static str {
        if self.signed { "signed integer" } else { "unsigned integer" }
    }
}
