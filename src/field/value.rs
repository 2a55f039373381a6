//! Typed scalar values and representation conversion
//!
//! A decode produces one [`ScalarValue`] whose variant is chosen by the
//! caller's [`ValueKind`], not by the field's declared encoding. Widening
//! is always permitted; narrowing checks the actual value against the
//! target range.

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;

use crate::errors::{AccessError, AccessResult};

/// Representation requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Byte,
    Short,
    Int,
    Long,
    BigInteger,
    Float,
    Double,
    Text,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Byte => "byte",
            ValueKind::Short => "short",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::BigInteger => "big integer",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Text => "text",
        }
    }

    /// Whether this is one of the fixed-width integer representations
    pub fn is_fixed_integer(&self) -> bool {
        matches!(self, ValueKind::Byte | ValueKind::Short | ValueKind::Int | ValueKind::Long)
    }

    pub fn is_integer(&self) -> bool {
        self.is_fixed_integer() || *self == ValueKind::BigInteger
    }

    pub fn is_real(&self) -> bool {
        matches!(self, ValueKind::Float | ValueKind::Double)
    }
}

impl FromStr for ValueKind {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "byte" => Ok(ValueKind::Byte),
            "short" => Ok(ValueKind::Short),
            "int" => Ok(ValueKind::Int),
            "long" => Ok(ValueKind::Long),
            "biginteger" | "big_integer" => Ok(ValueKind::BigInteger),
            "float" => Ok(ValueKind::Float),
            "double" => Ok(ValueKind::Double),
            "text" | "string" => Ok(ValueKind::Text),
            _ => Err(AccessError::InvalidDescriptor(format!("unknown representation '{}'", s))),
        }
    }
}

/// Rules for integer to floating point conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionPolicy {
    /// Integers never become floats
    #[default]
    Strict,
    /// Integers may widen to float or double, possibly losing precision
    WidenIntegers,
}

/// A decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    BigInteger(BigUint),
    Float(f32),
    Double(f64),
    Text(String),
}

impl ScalarValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ScalarValue::Byte(_) => ValueKind::Byte,
            ScalarValue::Short(_) => ValueKind::Short,
            ScalarValue::Int(_) => ValueKind::Int,
            ScalarValue::Long(_) => ValueKind::Long,
            ScalarValue::BigInteger(_) => ValueKind::BigInteger,
            ScalarValue::Float(_) => ValueKind::Float,
            ScalarValue::Double(_) => ValueKind::Double,
            ScalarValue::Text(_) => ValueKind::Text,
        }
    }

    /// Integer value as a signed big integer, if this is an integer variant
    pub fn to_big_int(&self) -> Option<BigInt> {
        match self {
            ScalarValue::Byte(v) => Some(BigInt::from(*v)),
            ScalarValue::Short(v) => Some(BigInt::from(*v)),
            ScalarValue::Int(v) => Some(BigInt::from(*v)),
            ScalarValue::Long(v) => Some(BigInt::from(*v)),
            ScalarValue::BigInteger(v) => Some(BigInt::from_biguint(Sign::Plus, v.clone())),
            _ => None,
        }
    }

    /// Converts into the requested representation
    pub fn convert(self, target: ValueKind, policy: ConversionPolicy) -> AccessResult<ScalarValue> {
        if self.kind() == target {
            return Ok(self);
        }
        if target == ValueKind::Text {
            return Ok(ScalarValue::Text(self.to_string()));
        }

        if let Some(int) = self.to_big_int() {
            return if target.is_integer() {
                narrow_integer(int, target)
            } else if policy == ConversionPolicy::WidenIntegers {
                let wide = int.to_f64().unwrap_or(f64::NAN);
                Ok(match target {
                    ValueKind::Float => ScalarValue::Float(wide as f32),
                    _ => ScalarValue::Double(wide),
                })
            } else {
                Err(self.unsupported(target))
            };
        }

        match (&self, target) {
            (ScalarValue::Float(v), ValueKind::Double) => Ok(ScalarValue::Double(*v as f64)),
            (ScalarValue::Double(v), ValueKind::Float) => {
                // Range check only; rounding to the nearest f32 is accepted
                if v.is_finite() && v.abs() > f32::MAX as f64 {
                    Err(AccessError::PrecisionLoss { value: v.to_string(), target: target.name() })
                } else {
                    Ok(ScalarValue::Float(*v as f32))
                }
            }
            _ => Err(self.unsupported(target)),
        }
    }

    fn unsupported(&self, target: ValueKind) -> AccessError {
        AccessError::UnsupportedConversion { from: self.kind().name(), to: target.name() }
    }
}

fn narrow_integer(int: BigInt, target: ValueKind) -> AccessResult<ScalarValue> {
    let loss = |int: &BigInt| AccessError::PrecisionLoss { value: int.to_string(), target: target.name() };
    match target {
        ValueKind::Byte => int.to_i8().map(ScalarValue::Byte).ok_or_else(|| loss(&int)),
        ValueKind::Short => int.to_i16().map(ScalarValue::Short).ok_or_else(|| loss(&int)),
        ValueKind::Int => int.to_i32().map(ScalarValue::Int).ok_or_else(|| loss(&int)),
        ValueKind::Long => int.to_i64().map(ScalarValue::Long).ok_or_else(|| loss(&int)),
        ValueKind::BigInteger => match int.to_biguint() {
            Some(v) => Ok(ScalarValue::BigInteger(v)),
            None => Err(loss(&int)),
        },
        _ => Err(AccessError::UnsupportedConversion { from: "integer", to: target.name() }),
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Byte(v) => write!(f, "{}", v),
            ScalarValue::Short(v) => write!(f, "{}", v),
            ScalarValue::Int(v) => write!(f, "{}", v),
            ScalarValue::Long(v) => write!(f, "{}", v),
            ScalarValue::BigInteger(v) => write!(f, "{}", v),
            ScalarValue::Float(v) => write!(f, "{}", v),
            ScalarValue::Double(v) => write!(f, "{}", v),
            ScalarValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i8> for ScalarValue {
    fn from(v: i8) -> Self { ScalarValue::Byte(v) }
}

impl From<i16> for ScalarValue {
    fn from(v: i16) -> Self { ScalarValue::Short(v) }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self { ScalarValue::Int(v) }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self { ScalarValue::Long(v) }
}

impl From<BigUint> for ScalarValue {
    fn from(v: BigUint) -> Self { ScalarValue::BigInteger(v) }
}

impl From<f32> for ScalarValue {
    fn from(v: f32) -> Self { ScalarValue::Float(v) }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self { ScalarValue::Double(v) }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self { ScalarValue::Text(v.to_string()) }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self { ScalarValue::Text(v) }
}

/// Natural representation of an unsigned value: `Long` when it fits, else `BigInteger`
pub(crate) fn unsigned_value(value: BigUint) -> ScalarValue {
    match value.to_i64() {
        Some(v) => ScalarValue::Long(v),
        None => ScalarValue::BigInteger(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_checks_value() {
        let small = ScalarValue::Long(100);
        assert_eq!(small.clone().convert(ValueKind::Byte, ConversionPolicy::Strict).unwrap(), ScalarValue::Byte(100));

        let big = ScalarValue::Long(300);
        assert!(matches!(
            big.convert(ValueKind::Byte, ConversionPolicy::Strict),
            Err(AccessError::PrecisionLoss { .. })
        ));

        let negative = ScalarValue::Int(-1);
        assert!(matches!(
            negative.convert(ValueKind::BigInteger, ConversionPolicy::Strict),
            Err(AccessError::PrecisionLoss { .. })
        ));
    }

    #[test]
    fn test_integer_to_float_needs_widening() {
        let v = ScalarValue::Short(7);
        assert!(matches!(
            v.clone().convert(ValueKind::Double, ConversionPolicy::Strict),
            Err(AccessError::UnsupportedConversion { .. })
        ));
        assert_eq!(v.convert(ValueKind::Double, ConversionPolicy::WidenIntegers).unwrap(), ScalarValue::Double(7.0));
    }

    #[test]
    fn test_real_conversions() {
        assert_eq!(ScalarValue::Float(1.5).convert(ValueKind::Double, ConversionPolicy::Strict).unwrap(),
                   ScalarValue::Double(1.5));
        assert_eq!(ScalarValue::Double(0.25).convert(ValueKind::Float, ConversionPolicy::Strict).unwrap(),
                   ScalarValue::Float(0.25));
        assert_eq!(ScalarValue::Double(0.1).convert(ValueKind::Float, ConversionPolicy::Strict).unwrap(),
                   ScalarValue::Float(0.1));
        assert!(matches!(
            ScalarValue::Double(1e300).convert(ValueKind::Float, ConversionPolicy::Strict),
            Err(AccessError::PrecisionLoss { .. })
        ));
        assert!(matches!(
            ScalarValue::Double(f64::NEG_INFINITY).convert(ValueKind::Float, ConversionPolicy::Strict),
            Ok(ScalarValue::Float(v)) if v == f32::NEG_INFINITY
        ));
        assert!(matches!(
            ScalarValue::Double(2.0).convert(ValueKind::Long, ConversionPolicy::WidenIntegers),
            Err(AccessError::UnsupportedConversion { .. })
        ));
    }

    #[test]
    fn test_text_conversions() {
        assert_eq!(ScalarValue::Long(-12).convert(ValueKind::Text, ConversionPolicy::Strict).unwrap(),
                   ScalarValue::Text("-12".to_string()));
        assert!(matches!(
            ScalarValue::from("1.0").convert(ValueKind::Float, ConversionPolicy::WidenIntegers),
            Err(AccessError::UnsupportedConversion { from: "text", to: "float" })
        ));
    }
}
