//! Field adapter trait definition

use crate::errors::{AccessError, AccessResult};
use crate::field::character::CharacterAdapter;
use crate::field::descriptor::{FieldDescriptor, FieldKind, Justification};
use crate::field::integer::BinaryIntegerAdapter;
use crate::field::numeric_text::NumericTextAdapter;
use crate::field::real::IeeeRealAdapter;
use crate::field::value::ScalarValue;

/// Strategy trait for reading and writing one field encoding
///
/// Adapters hold no state and are shared between callers.
pub trait FieldAdapter: Send + Sync {
    /// Decode the field in its natural representation
    fn read(&self, buf: &[u8], field: &FieldDescriptor) -> AccessResult<ScalarValue>;

    /// Encode a value into the field's bytes
    fn write(&self, value: &ScalarValue, buf: &mut [u8], field: &FieldDescriptor,
             justification: Justification) -> AccessResult<()>;

    /// Get the name of this encoding
    fn name(&self) -> &'static str;
}

static SIGNED_INTEGER: BinaryIntegerAdapter = BinaryIntegerAdapter { signed: true };
static UNSIGNED_INTEGER: BinaryIntegerAdapter = BinaryIntegerAdapter { signed: false };
static IEEE_REAL: IeeeRealAdapter = IeeeRealAdapter;
static CHARACTER: CharacterAdapter = CharacterAdapter;
static ASCII_INTEGER: NumericTextAdapter = NumericTextAdapter { real: false };
static ASCII_REAL: NumericTextAdapter = NumericTextAdapter { real: true };

/// Factory for field adapters
pub struct FieldAdapterFactory;

impl FieldAdapterFactory {
    /// Get the shared adapter for a field encoding
    pub fn adapter_for(kind: FieldKind) -> &'static dyn FieldAdapter {
        match kind {
            FieldKind::SignedInteger => &SIGNED_INTEGER,
            FieldKind::UnsignedInteger => &UNSIGNED_INTEGER,
            FieldKind::Real => &IEEE_REAL,
            FieldKind::Text => &CHARACTER,
            FieldKind::AsciiInteger => &ASCII_INTEGER,
            FieldKind::AsciiReal => &ASCII_REAL,
        }
    }
}

/// Pads `bytes` with `fill` to exactly `length` bytes on the side given by `justification`
pub(crate) fn justify(bytes: &[u8], length: usize, fill: u8,
                      justification: Justification) -> AccessResult<Vec<u8>> {
    if bytes.len() > length {
        return Err(AccessError::ValueTooLong { length: bytes.len(), max: length });
    }
    let padding = vec![fill; length - bytes.len()];
    let mut out = Vec::with_capacity(length);
    match justification {
        Justification::Left => {
            out.extend_from_slice(bytes);
            out.extend_from_slice(&padding);
        }
        Justification::Right => {
            out.extend_from_slice(&padding);
            out.extend_from_slice(bytes);
        }
    }
    Ok(out)
}

/// Rejects bit ranges for encodings that are always byte-aligned
pub(crate) fn reject_bit_range(field: &FieldDescriptor, encoding: &str) -> AccessResult<()> {
    if field.bits.is_some() {
        return Err(AccessError::UnsupportedOperation(format!(
            "{} fields cannot be addressed by bit range", encoding
        )));
    }
    Ok(())
}
