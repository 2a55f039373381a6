//! Integration tests for product loading, table access and the library facade

use std::fs;
use std::path::PathBuf;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use pdsaccess::field::{FieldDescriptor, FieldKind, Justification};
use pdsaccess::table::format;
use pdsaccess::{AccessError, ExportType, FieldCodec, ObjectAccess, ProductLoader, ScalarValue};

const DESCRIPTION: &str = r#"
    data_file = "product.dat"

    [[array]]
    name = "FRAME"
    offset = 0
    width = 4
    height = 2
    data_type = "UnsignedLSB2"

    [[table]]
    name = "HOUSEKEEPING"
    offset = 16
    records = 3
    record_length = 12

    [[table.field]]
    name = "SCLK"
    offset = 0
    data_type = "UnsignedMSB4"

    [[table.field]]
    name = "TEMP"
    offset = 4
    data_type = "IEEE754MSBSingle"

    [[table.field]]
    name = "MODE"
    offset = 8
    length = 1
    data_type = "UnsignedBitString"
    start_bit = 4
    stop_bit = 7

    [[table.field]]
    name = "TAG"
    offset = 9
    length = 3
    data_type = "ASCII_String"

    [export]
    format = "vicar"
    depth = 8
    maximize_dynamic_range = true
"#;

fn product_bytes() -> Vec<u8> {
    let mut data = Vec::new();
    for v in [0u16, 100, 200, 300, 400, 500, 10, 510] {
        data.write_u16::<LittleEndian>(v).unwrap();
    }
    for (i, tag) in [b"AB ", b"CD ", b"EFG"].iter().enumerate() {
        data.write_u32::<BigEndian>(1000 + i as u32).unwrap();
        data.write_f32::<BigEndian>(20.5 + i as f32).unwrap();
        data.push(0xA0 | i as u8);
        data.extend_from_slice(*tag);
    }
    data
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pdsaccess_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_table_records_decode() {
    let product = ProductLoader::parse(DESCRIPTION, product_bytes()).unwrap();
    let access = ObjectAccess::from_product(product);
    assert_eq!(access.array_count(), 1);
    assert_eq!(access.table_count(), 1);

    let reader = access.table_reader(0).unwrap();
    assert_eq!(reader.name(), "HOUSEKEEPING");
    let records: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 3);

    let second = &records[1];
    assert_eq!(second.get("SCLK"), Some(&ScalarValue::Long(1001)));
    assert_eq!(second.get("TEMP"), Some(&ScalarValue::Float(21.5)));
    assert_eq!(second.get("MODE"), Some(&ScalarValue::Long(1)));
    assert_eq!(second.get("TAG"), Some(&ScalarValue::Text("CD".to_string())));

    let mut out = Vec::new();
    format::write_delimited(&records[2], &mut out, ",").unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "1002,22.5,2,EFG\n");
}

#[test]
fn test_table_record_reencodes() {
    let product = ProductLoader::parse(DESCRIPTION, product_bytes()).unwrap();
    let data = product.data.clone();
    let access = ObjectAccess::from_product(product);
    let reader = access.table_reader(0).unwrap();

    let record = reader.read_record(0).unwrap();
    let encoded = reader.codec().encode(&record).unwrap();
    // The high nibble of MODE lies outside the bit field
    let mut expected = data[16..28].to_vec();
    expected[8] &= 0x0F;
    assert_eq!(encoded, expected);
}

#[test]
fn test_out_of_range_record() {
    let product = ProductLoader::parse(DESCRIPTION, product_bytes()).unwrap();
    let access = ObjectAccess::from_product(product);
    let reader = access.table_reader(0).unwrap();
    assert!(reader.read_record(3).is_err());
    assert!(matches!(access.table_reader(1), Err(AccessError::TableNotFound { index: 1, count: 1 })));
}

#[test]
fn test_export_defaults_from_description() {
    let product = ProductLoader::parse(DESCRIPTION, product_bytes()).unwrap();
    let access = ObjectAccess::from_product(product);

    let exporter = access.image_exporter(0).unwrap();
    assert_eq!(exporter.settings().export_type, ExportType::Vicar);
    assert!(exporter.settings().maximize_dynamic_range);

    let bytes = exporter.convert_to_vec(0).unwrap();
    let image = &bytes[bytes.len() - 8..];
    assert_eq!(image, &[0, 50, 100, 150, 200, 250, 5, 255]);
}

#[test]
fn test_open_and_export_to_file() {
    let dir = temp_dir("export");
    fs::write(dir.join("product.dat"), product_bytes()).unwrap();
    let description = dir.join("product.toml");
    fs::write(&description, DESCRIPTION).unwrap();

    let access = ObjectAccess::open(description.to_str().unwrap()).unwrap();
    let summary = access.describe();
    assert!(summary.contains("FRAME"));
    assert!(summary.contains("HOUSEKEEPING"));

    let output = dir.join("frame.png");
    let exporter = access.image_exporter(0).unwrap();
    let mut settings = *exporter.settings();
    settings.export_type = ExportType::Png;
    access.export_image(0, 0, settings, output.to_str().unwrap()).unwrap();

    let decoded = image::open(&output).unwrap().to_luma8();
    assert_eq!(decoded.dimensions(), (4, 2));
    assert_eq!(decoded.get_pixel(3, 1)[0], 255);

    // A failed export leaves no file behind
    let missing = dir.join("bad.png");
    assert!(access.export_image(0, 2, settings, missing.to_str().unwrap()).is_err());
    assert!(!missing.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_codec_on_raw_buffer() {
    let mut buf = vec![b' '; 8];
    let field = FieldDescriptor::new(0, 8, FieldKind::AsciiReal)
        .with_justification(Justification::Right);

    FieldCodec::set_double(-2.5, &mut buf, &field).unwrap();
    assert_eq!(&buf, b"-00002.5");
    assert_eq!(FieldCodec::get_double(&buf, &field).unwrap(), -2.5);

    let left = field.with_justification(Justification::Left);
    FieldCodec::set_double(7.25, &mut buf, &left).unwrap();
    assert_eq!(&buf, b"7.25    ");
    assert_eq!(FieldCodec::get_double(&buf, &left).unwrap(), 7.25);
}
