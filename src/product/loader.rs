//! TOML product descriptions
//!
//! A product description names a data file and lists the arrays and
//! tables inside it:
//!
//! ```toml
//! data_file = "frame.dat"
//!
//! [[array]]
//! name = "IMAGE"
//! offset = 0
//! width = 512
//! height = 512
//! data_type = "UnsignedMSB2"
//!
//! [[table]]
//! name = "HOUSEKEEPING"
//! offset = 524288
//! records = 10
//! record_length = 16
//!
//! [[table.field]]
//! name = "TEMP"
//! offset = 0
//! length = 4
//! data_type = "IEEE754MSBSingle"
//!
//! [export]
//! format = "VICAR"
//! depth = 16
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use crate::errors::{AccessError, AccessResult};
use crate::export::settings::{ExportSettings, ExportType};
use crate::field::data_type;
use crate::field::descriptor::{Charset, FieldDescriptor, Justification};
use crate::field::value::ValueKind;
use crate::product::array::{ArrayDescriptor, BandStorage};
use crate::product::{ProductDescriptor, TableDescriptor};
use crate::table::record::{TableField, TableRecordCodec};

/// Loads product descriptions from TOML
pub struct ProductLoader;

fn config_error(context: &str, msg: impl std::fmt::Display) -> AccessError {
    AccessError::ConfigError(format!("{}: {}", context, msg))
}

fn required_usize(table: &toml::Value, key: &str, context: &str) -> AccessResult<usize> {
    let value = table.get(key)
        .ok_or_else(|| config_error(context, format!("missing '{}'", key)))?;
    optional_usize_value(value, key, context)
}

fn optional_usize(table: &toml::Value, key: &str, context: &str) -> AccessResult<Option<usize>> {
    table.get(key).map(|v| optional_usize_value(v, key, context)).transpose()
}

fn optional_usize_value(value: &toml::Value, key: &str, context: &str) -> AccessResult<usize> {
    value.as_integer()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| config_error(context, format!("'{}' must be a non-negative integer", key)))
}

fn optional_u32(table: &toml::Value, key: &str, context: &str) -> AccessResult<Option<u32>> {
    optional_usize(table, key, context)?
        .map(|v| u32::try_from(v)
            .map_err(|_| config_error(context, format!("'{}' is out of range: {}", key, v))))
        .transpose()
}

fn required_str<'a>(table: &'a toml::Value, key: &str, context: &str) -> AccessResult<&'a str> {
    table.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| config_error(context, format!("missing string '{}'", key)))
}

impl ProductLoader {
    /// Load a product description and its data file
    ///
    /// The data file path is resolved relative to the description.
    pub fn load(path: &str) -> AccessResult<ProductDescriptor> {
        info!("Loading product description {}", path);
        let contents = fs::read_to_string(path)?;
        let toml_value: toml::Value = contents.parse()
            .map_err(|e| config_error(path, format!("failed to parse TOML: {}", e)))?;

        let data_file = required_str(&toml_value, "data_file", path)?;
        let base = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
        let data_path = base.join(data_file);
        debug!("Reading product data from {}", data_path.display());
        let data = fs::read(&data_path)?;

        Self::from_value(&toml_value, data)
    }

    /// Parse a product description, using `data` as the product bytes
    pub fn parse(contents: &str, data: Vec<u8>) -> AccessResult<ProductDescriptor> {
        let toml_value: toml::Value = contents.parse()
            .map_err(|e| config_error("product", format!("failed to parse TOML: {}", e)))?;
        Self::from_value(&toml_value, data)
    }

    fn from_value(toml_value: &toml::Value, data: Vec<u8>) -> AccessResult<ProductDescriptor> {
        let mut product = ProductDescriptor::new(data);

        if let Some(arrays) = toml_value.get("array").and_then(|v| v.as_array()) {
            for (i, entry) in arrays.iter().enumerate() {
                product.arrays.push(Self::parse_array(entry, i)?);
            }
        }

        if let Some(tables) = toml_value.get("table").and_then(|v| v.as_array()) {
            for (i, entry) in tables.iter().enumerate() {
                product.tables.push(Self::parse_table(entry, i)?);
            }
        }

        if let Some(export) = toml_value.get("export") {
            product.export_defaults = Self::parse_export(export)?;
        }

        info!("Product has {} arrays and {} tables", product.arrays.len(), product.tables.len());
        Ok(product)
    }

    fn parse_array(entry: &toml::Value, index: usize) -> AccessResult<ArrayDescriptor> {
        let context = format!("array {}", index);
        let name = required_str(entry, "name", &context)?;
        let type_name = required_str(entry, "data_type", &context)?;
        let data_type = data_type::lookup(type_name)?;

        let width = required_usize(entry, "width", &context)?;
        let height = required_usize(entry, "height", &context)?;
        let bands = optional_usize(entry, "bands", &context)?.unwrap_or(1);
        let storage = match entry.get("band_storage").and_then(|v| v.as_str()) {
            Some(s) => BandStorage::from_str(s)?,
            None => BandStorage::default(),
        };

        let array = ArrayDescriptor::with_data_type(name, width, height, &data_type)?
            .with_bands(bands, storage)
            .with_offset(optional_usize(entry, "offset", &context)?.unwrap_or(0));
        array.validate()?;
        debug!("Array {}", array);
        Ok(array)
    }

    fn parse_table(entry: &toml::Value, index: usize) -> AccessResult<TableDescriptor> {
        let context = format!("table {}", index);
        let name = required_str(entry, "name", &context)?;
        let record_length = required_usize(entry, "record_length", &context)?;

        let mut fields = Vec::new();
        if let Some(entries) = entry.get("field").and_then(|v| v.as_array()) {
            for field in entries {
                fields.push(Self::parse_field(field, &context)?);
            }
        }
        if fields.is_empty() {
            return Err(config_error(&context, "no fields"));
        }
        for field in &fields {
            if field.descriptor.end() > record_length {
                return Err(config_error(&context, format!(
                    "field '{}' ends at byte {} past record length {}",
                    field.name, field.descriptor.end(), record_length
                )));
            }
        }

        debug!("Table '{}' with {} fields", name, fields.len());
        Ok(TableDescriptor {
            name: name.to_string(),
            offset: optional_usize(entry, "offset", &context)?.unwrap_or(0),
            records: required_usize(entry, "records", &context)?,
            codec: TableRecordCodec::new(fields, record_length),
        })
    }

    fn parse_field(entry: &toml::Value, table_context: &str) -> AccessResult<TableField> {
        let name = required_str(entry, "name", table_context)?;
        let context = format!("{} field '{}'", table_context, name);
        let data_type = data_type::lookup(required_str(entry, "data_type", &context)?)?;
        let offset = required_usize(entry, "offset", &context)?;
        let length = match (optional_usize(entry, "length", &context)?, data_type.width) {
            (Some(length), Some(width)) if length != width => {
                return Err(config_error(&context, format!(
                    "length {} does not match the {}-byte data type", length, width
                )));
            }
            (Some(length), _) => length,
            (None, Some(width)) => width,
            (None, None) => return Err(config_error(&context, "missing 'length'")),
        };

        let mut descriptor = FieldDescriptor::new(offset, length, data_type.kind)
            .with_byte_order(data_type.byte_order)
            .with_charset(data_type.charset);

        match (optional_u32(entry, "start_bit", &context)?, optional_u32(entry, "stop_bit", &context)?) {
            (Some(start), Some(stop)) if data_type.bit_string => {
                descriptor = descriptor.with_bits(start, stop);
            }
            (Some(_), Some(_)) => {
                return Err(config_error(&context, "start_bit and stop_bit need a bit string data type"));
            }
            (None, None) if data_type.bit_string => {
                return Err(config_error(&context, "bit string fields need start_bit and stop_bit"));
            }
            (None, None) => {}
            _ => return Err(config_error(&context, "start_bit and stop_bit must be given together")),
        }

        if let Some(charset) = entry.get("charset").and_then(|v| v.as_str()) {
            descriptor = descriptor.with_charset(Charset::from_str(charset)?);
        }
        if let Some(justification) = entry.get("justification").and_then(|v| v.as_str()) {
            let justification = match justification.to_ascii_lowercase().as_str() {
                "left" => Justification::Left,
                "right" => Justification::Right,
                other => return Err(config_error(&context, format!("unknown justification '{}'", other))),
            };
            descriptor = descriptor.with_justification(justification);
        }
        descriptor.validate()?;

        let mut field = TableField::new(name, descriptor);
        if let Some(representation) = entry.get("representation").and_then(|v| v.as_str()) {
            field = field.with_representation(ValueKind::from_str(representation)?);
        }
        Ok(field)
    }

    fn parse_export(entry: &toml::Value) -> AccessResult<ExportSettings> {
        let mut settings = ExportSettings::default();
        if let Some(format) = entry.get("format").and_then(|v| v.as_str()) {
            settings.export_type = ExportType::from_str(format)?;
        }
        if let Some(depth) = optional_u32(entry, "depth", "export")? {
            ExportSettings::check_requested_depth(depth)?;
            settings.target_pixel_depth = depth;
        }
        if let Some(maximize) = entry.get("maximize_dynamic_range").and_then(|v| v.as_bool()) {
            settings.maximize_dynamic_range = maximize;
        }
        Ok(settings)
    }
}
