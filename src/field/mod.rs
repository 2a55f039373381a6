//! Binary field codec
//!
//! Decodes and encodes scalar fields inside fixed-length byte records:
//! binary integers of any width, IEEE reals, text and numbers written as
//! text, including fields addressed by bit range.

pub mod adapter;
pub mod bits;
pub mod character;
pub mod codec;
pub mod data_type;
pub mod descriptor;
pub mod integer;
pub mod numeric_text;
pub mod real;
pub mod value;

#[cfg(test)]
mod tests;

pub use adapter::{FieldAdapter, FieldAdapterFactory};
pub use codec::FieldCodec;
pub use data_type::DataType;
pub use descriptor::{BitRange, Charset, FieldDescriptor, FieldKind, Justification};
pub use value::{ConversionPolicy, ScalarValue, ValueKind};
