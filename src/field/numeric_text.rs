//! Adapter for numbers stored as ASCII text
//!
//! Reading trims surrounding blanks before parsing. Writing formats the
//! number, then pads it to the field width: right-justified values are
//! zero-filled after any sign, left-justified values are blank-filled.

use num_bigint::{BigInt, BigUint};

use crate::errors::{AccessError, AccessResult};
use crate::field::adapter::{justify, reject_bit_range, FieldAdapter};
use crate::field::descriptor::{FieldDescriptor, Justification};
use crate::field::value::{unsigned_value, ScalarValue};

/// ASCII integer or ASCII real adapter
pub struct NumericTextAdapter {
    pub real: bool,
}

/// Parses a real number, accepting a Fortran `D` exponent marker
fn parse_real(text: &str) -> Option<f64> {
    let normalized = text.replace(['D', 'd'], "E");
    normalized.parse::<f64>().ok()
}

fn parse_integer(text: &str) -> Option<ScalarValue> {
    if let Ok(v) = text.parse::<i64>() {
        return Some(ScalarValue::Long(v));
    }
    text.trim_start_matches('+').parse::<BigUint>().ok().map(unsigned_value)
}

/// Zero-fills between the sign and the digits
fn zero_fill(text: &str, length: usize) -> AccessResult<Vec<u8>> {
    let (sign, body) = match text.strip_prefix(['-', '+']) {
        Some(rest) => (&text[..1], rest),
        None => ("", text),
    };
    if text.len() > length {
        return Err(AccessError::ValueTooLong { length: text.len(), max: length });
    }
    if !body.starts_with(|c: char| c.is_ascii_digit()) {
        // "NaN" and "inf" cannot take leading zeros
        return justify(text.as_bytes(), length, b' ', Justification::Right);
    }
    let mut out = Vec::with_capacity(length);
    out.extend_from_slice(sign.as_bytes());
    out.resize(length - body.len(), b'0');
    out.extend_from_slice(body.as_bytes());
    Ok(out)
}

impl NumericTextAdapter {
    fn format(&self, value: &ScalarValue) -> AccessResult<String> {
        match value {
            ScalarValue::Text(s) => {
                let trimmed = s.trim();
                let valid = if self.real {
                    parse_real(trimmed).is_some()
                } else {
                    trimmed.parse::<BigInt>().is_ok()
                };
                if valid {
                    Ok(trimmed.to_string())
                } else {
                    Err(AccessError::InvalidNumber(s.clone()))
                }
            }
            ScalarValue::Float(_) | ScalarValue::Double(_) if !self.real => {
                Err(AccessError::UnsupportedConversion { from: value.kind().name(), to: self.name() })
            }
            other => Ok(other.to_string()),
        }
    }
}

impl FieldAdapter for NumericTextAdapter {
    fn read(&self, buf: &[u8], field: &FieldDescriptor) -> AccessResult<ScalarValue> {
        reject_bit_range(field, self.name())?;
        field.check_bounds(buf.len())?;
        let raw = field.charset.decode(&buf[field.offset..field.end()]);
        let text = raw.trim();
        let parsed = if self.real {
            parse_real(text).map(ScalarValue::Double)
        } else {
            parse_integer(text)
        };
        parsed.ok_or_else(|| AccessError::InvalidNumber(text.to_string()))
    }

    fn write(&self, value: &ScalarValue, buf: &mut [u8], field: &FieldDescriptor,
             justification: Justification) -> AccessResult<()> {
        reject_bit_range(field, self.name())?;
        field.check_bounds(buf.len())?;
        let text = self.format(value)?;
        let padded = match justification {
            Justification::Right => zero_fill(&text, field.length)?,
            Justification::Left => justify(text.as_bytes(), field.length, b' ', justification)?,
        };
        buf[field.offset..field.end()].copy_from_slice(&padded);
        Ok(())
    }

    fn name(&self) -> &'static str {
        if self.real { "ASCII real" } else { "ASCII integer" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_fill_keeps_sign_first() {
        assert_eq!(zero_fill("-42", 6).unwrap(), b"-00042".to_vec());
        assert_eq!(zero_fill("42", 4).unwrap(), b"0042".to_vec());
        assert_eq!(zero_fill("NaN", 5).unwrap(), b"  NaN".to_vec());
        assert!(matches!(zero_fill("12345", 4), Err(AccessError::ValueTooLong { length: 5, max: 4 })));
    }

    #[test]
    fn test_fortran_exponent() {
        assert_eq!(parse_real("1.5D2"), Some(150.0));
        assert_eq!(parse_real("abc"), None);
    }

    #[test]
    fn test_integer_parse_promotes_to_big() {
        assert_eq!(parse_integer("-7"), Some(ScalarValue::Long(-7)));
        assert!(matches!(parse_integer("18446744073709551616"), Some(ScalarValue::BigInteger(_))));
        assert_eq!(parse_integer("1.5"), None);
    }
}
