pub mod errors;
pub mod io;
pub mod field;
pub mod table;
pub mod product;
pub mod export;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::ObjectAccess;
pub use crate::errors::{AccessError, AccessResult};

pub use field::{FieldCodec, FieldDescriptor, FieldKind, ScalarValue, ValueKind};
pub use table::{TableReader, TableRecordCodec};
pub use product::{ArrayDescriptor, ProductDescriptor, ProductLoader};
pub use export::{ExportSettings, ExportType, ExporterFactory, SampleRangeMapper, TwoDImageExporter};
