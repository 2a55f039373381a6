//! Adapter for fixed-width character fields

use crate::errors::AccessResult;
use crate::field::adapter::{justify, reject_bit_range, FieldAdapter};
use crate::field::descriptor::{FieldDescriptor, Justification};
use crate::field::value::ScalarValue;

/// Space-padded text adapter
pub struct CharacterAdapter;

impl FieldAdapter for CharacterAdapter {
    fn read(&self, buf: &[u8], field: &FieldDescriptor) -> AccessResult<ScalarValue> {
        reject_bit_range(field, self.name())?;
        field.check_bounds(buf.len())?;
        let text = field.charset.decode(&buf[field.offset..field.end()]);
        Ok(ScalarValue::Text(text.trim_end_matches(' ').to_string()))
    }

    fn write(&self, value: &ScalarValue, buf: &mut [u8], field: &FieldDescriptor,
             justification: Justification) -> AccessResult<()> {
        reject_bit_range(field, self.name())?;
        field.check_bounds(buf.len())?;
        let text = match value {
            ScalarValue::Text(s) => s.clone(),
            other => other.to_string(),
        };
        let bytes = field.charset.encode(&text)?;
        let padded = justify(&bytes, field.length, b' ', justification)?;
        buf[field.offset..field.end()].copy_from_slice(&padded);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "text"
    }
}
