//! Tests for character and numeric text fields

use crate::errors::AccessError;
use crate::field::codec::FieldCodec;
use crate::field::descriptor::{Charset, FieldDescriptor, FieldKind, Justification};
use crate::field::value::{ScalarValue, ValueKind};

#[test]
fn test_justification() {
    let field = FieldDescriptor::new(0, 5, FieldKind::Text);
    let mut record = [0u8; 5];

    FieldCodec::set_string("AB", &mut record, &field, true).unwrap();
    assert_eq!(&record, b"   AB");

    FieldCodec::set_string("AB", &mut record, &field, false).unwrap();
    assert_eq!(&record, b"AB   ");
    assert_eq!(FieldCodec::get_string(&record, &field).unwrap(), "AB");
}

#[test]
fn test_value_too_long() {
    let field = FieldDescriptor::new(2, 5, FieldKind::Text);
    let mut record = *b"xxyyyyyzz";
    assert!(matches!(
        FieldCodec::set_string("ABCDEF", &mut record, &field, false),
        Err(AccessError::ValueTooLong { length: 6, max: 5 })
    ));
    assert_eq!(&record, b"xxyyyyyzz");
}

#[test]
fn test_leading_spaces_survive() {
    let field = FieldDescriptor::new(0, 6, FieldKind::Text);
    let record = *b"  hi  ";
    assert_eq!(FieldCodec::get_string(&record, &field).unwrap(), "  hi");
}

#[test]
fn test_text_cannot_become_float() {
    let field = FieldDescriptor::new(0, 3, FieldKind::Text);
    let record = *b"1.0";
    assert!(matches!(
        FieldCodec::get_float(&record, &field),
        Err(AccessError::UnsupportedConversion { .. })
    ));
    assert!(matches!(
        FieldCodec::get_widened(&record, &field, ValueKind::Double),
        Err(AccessError::UnsupportedConversion { .. })
    ));
}

#[test]
fn test_charsets() {
    let field = FieldDescriptor::new(0, 4, FieldKind::Text);
    let latin = [0x63u8, 0x61, 0x66, 0xE9];
    assert_eq!(FieldCodec::get_string_with_charset(&latin, &field, Charset::Latin1).unwrap(), "caf\u{e9}");

    let mut record = [0u8; 4];
    assert!(matches!(
        FieldCodec::set_string_with_charset("caf\u{e9}", &mut record, &field, false, Charset::UsAscii),
        Err(AccessError::UnsupportedConversion { .. })
    ));

    let utf8 = FieldDescriptor::new(0, 6, FieldKind::Text).with_charset(Charset::Utf8);
    let mut record = [0u8; 6];
    FieldCodec::set_string("caf\u{e9}", &mut record, &utf8, false).unwrap();
    assert_eq!(&record, b"caf\xC3\xA9 ");
    assert_eq!(FieldCodec::get_string(&record, &utf8).unwrap(), "caf\u{e9}");
}

#[test]
fn test_ascii_integer_field() {
    let field = FieldDescriptor::new(0, 6, FieldKind::AsciiInteger);
    let mut record = [0u8; 6];

    FieldCodec::set_int(-42, &mut record, &field).unwrap();
    assert_eq!(&record, b"-00042");
    assert_eq!(FieldCodec::get_short(&record, &field).unwrap(), -42);

    let left = field.clone().with_justification(Justification::Left);
    FieldCodec::set_int(42, &mut record, &left).unwrap();
    assert_eq!(&record, b"42    ");
    assert_eq!(FieldCodec::get_long(&record, &left).unwrap(), 42);

    assert!(matches!(
        FieldCodec::set_long(1_234_567, &mut record, &field),
        Err(AccessError::ValueTooLong { .. })
    ));
    assert!(matches!(
        FieldCodec::set_double(1.5, &mut record, &field),
        Err(AccessError::UnsupportedConversion { .. })
    ));
}

#[test]
fn test_ascii_real_field() {
    let field = FieldDescriptor::new(0, 8, FieldKind::AsciiReal);
    let record = *b" 1.25E2 ";
    assert_eq!(FieldCodec::get_double(&record, &field).unwrap(), 125.0);
    assert_eq!(FieldCodec::get_float(&record, &field).unwrap(), 125.0);

    let mut out = [0u8; 8];
    FieldCodec::set_double(-0.5, &mut out, &field).unwrap();
    assert_eq!(&out, b"-00000.5");
    assert_eq!(FieldCodec::get_double(&out, &field).unwrap(), -0.5);
}

#[test]
fn test_numeric_text_rejects_garbage() {
    let field = FieldDescriptor::new(0, 4, FieldKind::AsciiInteger);
    let record = *b"12x4";
    assert!(matches!(
        FieldCodec::get_long(&record, &field),
        Err(AccessError::InvalidNumber(_))
    ));

    let mut out = [0u8; 4];
    assert!(matches!(
        FieldCodec::set(&ScalarValue::from("abc"), &mut out, &field, Justification::Right),
        Err(AccessError::InvalidNumber(_))
    ));
    FieldCodec::set(&ScalarValue::from(" 17 "), &mut out, &field, Justification::Right).unwrap();
    assert_eq!(&out, b"0017");
}

#[test]
fn test_ascii_real_float_round_trip() {
    let field = FieldDescriptor::new(0, 10, FieldKind::AsciiReal)
        .with_justification(Justification::Right);
    let mut record = [0u8; 10];

    FieldCodec::set_float(0.1, &mut record, &field).unwrap();
    assert_eq!(&record, b"00000000.1");
    assert_eq!(FieldCodec::get_float(&record, &field).unwrap(), 0.1f32);

    let padded = FieldDescriptor::new(0, 6, FieldKind::AsciiReal);
    assert_eq!(FieldCodec::get_float(b"  20.1", &padded).unwrap(), 20.1f32);

    let huge = FieldDescriptor::new(0, 6, FieldKind::AsciiReal);
    assert!(matches!(
        FieldCodec::get_float(b"1.0D99", &huge),
        Err(AccessError::PrecisionLoss { .. })
    ));
}
