//! Tests for binary integer and real fields

use num_bigint::BigUint;

use super::test_utils::{binary_field, patterned_record};
use crate::errors::AccessError;
use crate::field::codec::FieldCodec;
use crate::field::descriptor::FieldKind;
use crate::field::value::{ScalarValue, ValueKind};
use crate::io::byte_order::ByteOrder;

#[test]
fn test_signed_integer_roundtrip_both_byte_orders() {
    for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
        let field = binary_field(3, 4, FieldKind::SignedInteger, order);
        let mut record = patterned_record(12);
        let before = record.clone();

        FieldCodec::set_int(-123_456, &mut record, &field).unwrap();
        assert_eq!(FieldCodec::get_int(&record, &field).unwrap(), -123_456);

        // Bytes outside the field are untouched
        assert_eq!(&record[..3], &before[..3]);
        assert_eq!(&record[7..], &before[7..]);
    }
}

#[test]
fn test_byte_layout() {
    let big = binary_field(0, 2, FieldKind::UnsignedInteger, ByteOrder::BigEndian);
    let little = binary_field(0, 2, FieldKind::UnsignedInteger, ByteOrder::LittleEndian);
    let record = [0x12u8, 0x34];

    assert_eq!(FieldCodec::get_long(&record, &big).unwrap(), 0x1234);
    assert_eq!(FieldCodec::get_long(&record, &little).unwrap(), 0x3412);
}

#[test]
fn test_unsigned_value_narrowing() {
    let field = binary_field(0, 2, FieldKind::UnsignedInteger, ByteOrder::BigEndian);
    let record = [0xFFu8, 0xFF];

    assert_eq!(FieldCodec::get_int(&record, &field).unwrap(), 65535);
    assert!(matches!(
        FieldCodec::get_short(&record, &field),
        Err(AccessError::PrecisionLoss { .. })
    ));

    let small = [0x00u8, 0x7F];
    assert_eq!(FieldCodec::get_byte(&small, &field).unwrap(), 127);
}

#[test]
fn test_signed_byte_sign_extension() {
    let field = binary_field(1, 1, FieldKind::SignedInteger, ByteOrder::BigEndian);
    let record = [0x00u8, 0xFE];
    assert_eq!(FieldCodec::get_long(&record, &field).unwrap(), -2);
    assert_eq!(FieldCodec::get_byte(&record, &field).unwrap(), -2);
}

#[test]
fn test_wide_unsigned_field() {
    let field = binary_field(0, 10, FieldKind::UnsignedInteger, ByteOrder::BigEndian);
    let record = [0x01u8, 0, 0, 0, 0, 0, 0, 0, 0, 0x02];

    assert!(matches!(
        FieldCodec::get_long(&record, &field),
        Err(AccessError::FieldTooNarrow { width: 80 })
    ));

    let expected = (BigUint::from(1u8) << 72u32) + BigUint::from(2u8);
    assert_eq!(FieldCodec::get_big_integer(&record, &field).unwrap(), expected);

    let mut out = [0u8; 10];
    FieldCodec::set_big_integer(&expected, &mut out, &field).unwrap();
    assert_eq!(out, record);
}

#[test]
fn test_wide_little_endian_field() {
    let field = binary_field(0, 9, FieldKind::UnsignedInteger, ByteOrder::LittleEndian);
    let value = BigUint::from(u64::MAX) + BigUint::from(1u8);
    let mut record = [0u8; 9];

    FieldCodec::set_big_integer(&value, &mut record, &field).unwrap();
    assert_eq!(record, [0, 0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(FieldCodec::get_big_integer(&record, &field).unwrap(), value);
}

#[test]
fn test_set_overflow() {
    let field = binary_field(0, 1, FieldKind::UnsignedInteger, ByteOrder::BigEndian);
    let mut record = [0u8; 1];
    assert!(matches!(
        FieldCodec::set_int(256, &mut record, &field),
        Err(AccessError::ValueOverflow { .. })
    ));
    assert!(matches!(
        FieldCodec::set_int(-1, &mut record, &field),
        Err(AccessError::ValueOverflow { .. })
    ));

    let signed = binary_field(0, 1, FieldKind::SignedInteger, ByteOrder::BigEndian);
    assert!(matches!(
        FieldCodec::set_int(128, &mut record, &signed),
        Err(AccessError::ValueOverflow { .. })
    ));
    FieldCodec::set_int(-128, &mut record, &signed).unwrap();
    assert_eq!(record, [0x80]);
}

#[test]
fn test_integer_field_widening() {
    let field = binary_field(0, 2, FieldKind::SignedInteger, ByteOrder::BigEndian);
    let record = [0xFFu8, 0xF6];

    assert!(matches!(
        FieldCodec::get(&record, &field, ValueKind::Double),
        Err(AccessError::UnsupportedConversion { .. })
    ));
    assert_eq!(
        FieldCodec::get_widened(&record, &field, ValueKind::Double).unwrap(),
        ScalarValue::Double(-10.0)
    );
}

#[test]
fn test_real_roundtrip() {
    for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
        let single = binary_field(0, 4, FieldKind::Real, order);
        let double = binary_field(4, 8, FieldKind::Real, order);
        let mut record = vec![0u8; 12];

        FieldCodec::set_float(-2.5, &mut record, &single).unwrap();
        FieldCodec::set_double(1.0e-300, &mut record, &double).unwrap();

        assert_eq!(FieldCodec::get_float(&record, &single).unwrap(), -2.5);
        assert_eq!(FieldCodec::get_double(&record, &single).unwrap(), -2.5);
        assert_eq!(FieldCodec::get_double(&record, &double).unwrap(), 1.0e-300);
    }
}

#[test]
fn test_real_field_rejects_out_of_range_values() {
    let single = binary_field(0, 4, FieldKind::Real, ByteOrder::BigEndian);
    let double = binary_field(0, 8, FieldKind::Real, ByteOrder::BigEndian);
    let mut record = vec![0u8; 8];

    assert!(matches!(
        FieldCodec::set_double(1e300, &mut record, &single),
        Err(AccessError::PrecisionLoss { .. })
    ));
    FieldCodec::set_double(0.1, &mut record, &single).unwrap();
    assert_eq!(FieldCodec::get_float(&record, &single).unwrap(), 0.1f32);

    FieldCodec::set_double(0.1, &mut record, &double).unwrap();
    assert_eq!(FieldCodec::get_float(&record, &double).unwrap(), 0.1f32);
    FieldCodec::set_double(1e300, &mut record, &double).unwrap();
    assert!(matches!(
        FieldCodec::get_float(&record, &double),
        Err(AccessError::PrecisionLoss { .. })
    ));
    assert!(matches!(
        FieldCodec::get_long(&record, &double),
        Err(AccessError::UnsupportedConversion { .. })
    ));
    assert!(matches!(
        FieldCodec::set_long(3, &mut record, &double),
        Err(AccessError::UnsupportedConversion { .. })
    ));
}

#[test]
fn test_out_of_bounds_field() {
    let field = binary_field(6, 4, FieldKind::SignedInteger, ByteOrder::BigEndian);
    let record = [0u8; 8];
    assert!(matches!(
        FieldCodec::get_int(&record, &field),
        Err(AccessError::FieldOutOfBounds { offset: 6, length: 4, buffer_len: 8 })
    ));
}

#[test]
fn test_numeric_field_as_text() {
    let field = binary_field(0, 2, FieldKind::SignedInteger, ByteOrder::BigEndian);
    let record = [0xFFu8, 0x85];
    assert_eq!(FieldCodec::get_string(&record, &field).unwrap(), "-123");
}
