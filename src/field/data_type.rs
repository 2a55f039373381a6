//! PDS4 data type names
//!
//! Maps the data type names used in PDS4 labels (`UnsignedMSB2`,
//! `IEEE754LSBDouble`, `ASCII_Integer`, ...) onto field kinds, byte orders
//! and fixed widths. Both table fields and array samples are described
//! with these names.

use std::collections::HashMap;
use lazy_static::lazy_static;

use crate::errors::{AccessError, AccessResult};
use crate::field::descriptor::{Charset, FieldKind};
use crate::io::byte_order::ByteOrder;

/// Encoding details for one named data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataType {
    pub kind: FieldKind,
    pub byte_order: ByteOrder,
    /// Fixed width in bytes, if the type name implies one
    pub width: Option<usize>,
    pub charset: Charset,
    /// Bit string types must be addressed with a bit range
    pub bit_string: bool,
}

impl DataType {
    const fn binary(kind: FieldKind, byte_order: ByteOrder, width: usize) -> Self {
        DataType { kind, byte_order, width: Some(width), charset: Charset::UsAscii, bit_string: false }
    }

    const fn text(kind: FieldKind, charset: Charset) -> Self {
        DataType { kind, byte_order: ByteOrder::BigEndian, width: None, charset, bit_string: false }
    }

    const fn bits(kind: FieldKind) -> Self {
        DataType { kind, byte_order: ByteOrder::BigEndian, width: None, charset: Charset::UsAscii, bit_string: true }
    }
}

lazy_static! {
    static ref DATA_TYPES: HashMap<&'static str, DataType> = {
        use ByteOrder::{BigEndian as Msb, LittleEndian as Lsb};
        use FieldKind::*;

        let mut m = HashMap::new();
        m.insert("signedbyte", DataType::binary(SignedInteger, Msb, 1));
        m.insert("unsignedbyte", DataType::binary(UnsignedInteger, Msb, 1));
        m.insert("signedmsb2", DataType::binary(SignedInteger, Msb, 2));
        m.insert("signedlsb2", DataType::binary(SignedInteger, Lsb, 2));
        m.insert("unsignedmsb2", DataType::binary(UnsignedInteger, Msb, 2));
        m.insert("unsignedlsb2", DataType::binary(UnsignedInteger, Lsb, 2));
        m.insert("signedmsb4", DataType::binary(SignedInteger, Msb, 4));
        m.insert("signedlsb4", DataType::binary(SignedInteger, Lsb, 4));
        m.insert("unsignedmsb4", DataType::binary(UnsignedInteger, Msb, 4));
        m.insert("unsignedlsb4", DataType::binary(UnsignedInteger, Lsb, 4));
        m.insert("signedmsb8", DataType::binary(SignedInteger, Msb, 8));
        m.insert("signedlsb8", DataType::binary(SignedInteger, Lsb, 8));
        m.insert("unsignedmsb8", DataType::binary(UnsignedInteger, Msb, 8));
        m.insert("unsignedlsb8", DataType::binary(UnsignedInteger, Lsb, 8));
        m.insert("ieee754msbsingle", DataType::binary(Real, Msb, 4));
        m.insert("ieee754msbdouble", DataType::binary(Real, Msb, 8));
        m.insert("ieee754lsbsingle", DataType::binary(Real, Lsb, 4));
        m.insert("ieee754lsbdouble", DataType::binary(Real, Lsb, 8));
        m.insert("ascii_integer", DataType::text(AsciiInteger, Charset::UsAscii));
        m.insert("ascii_nonnegative_integer", DataType::text(AsciiInteger, Charset::UsAscii));
        m.insert("ascii_real", DataType::text(AsciiReal, Charset::UsAscii));
        m.insert("ascii_string", DataType::text(Text, Charset::UsAscii));
        m.insert("utf8_string", DataType::text(Text, Charset::Utf8));
        m.insert("signedbitstring", DataType::bits(SignedInteger));
        m.insert("unsignedbitstring", DataType::bits(UnsignedInteger));
        m
    };
}

/// Looks up a PDS4 data type name, case-insensitive
pub fn lookup(name: &str) -> AccessResult<DataType> {
    DATA_TYPES
        .get(name.to_ascii_lowercase().as_str())
        .copied()
        .ok_or_else(|| AccessError::InvalidDescriptor(format!("unknown data type '{}'", name)))
}
