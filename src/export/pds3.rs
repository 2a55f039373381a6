//! PDS3 attached-label image output

use std::io::Write;

use crate::errors::{AccessError, AccessResult};
use crate::export::encoder::RescaledImage;

const EOL: &str = "\r\n";

fn sample_type(depth: u32) -> AccessResult<&'static str> {
    match depth {
        8 => Ok("UNSIGNED_INTEGER"),
        16 | 32 => Ok("MSB_UNSIGNED_INTEGER"),
        depth => Err(AccessError::UnsupportedPixelDepth { depth, format: "PDS3" }),
    }
}

fn render_label(image: &RescaledImage, pointer: usize, sample_type: &str) -> String {
    let lines = [
        "PDS_VERSION_ID = PDS3".to_string(),
        "RECORD_TYPE = UNDEFINED".to_string(),
        format!("^IMAGE = {} <BYTES>", pointer),
        "OBJECT = IMAGE".to_string(),
        format!("  LINES = {}", image.height),
        format!("  LINE_SAMPLES = {}", image.width),
        format!("  SAMPLE_TYPE = {}", sample_type),
        format!("  SAMPLE_BITS = {}", image.depth),
        "  BANDS = 1".to_string(),
        "  BAND_STORAGE_TYPE = BAND_SEQUENTIAL".to_string(),
        "END_OBJECT = IMAGE".to_string(),
        "END".to_string(),
    ];
    let mut label = lines.join(EOL);
    label.push_str(EOL);
    label
}

/// Build the label; the `^IMAGE` pointer is the 1-based byte just past it
pub fn label(image: &RescaledImage) -> AccessResult<String> {
    let sample_type = sample_type(image.depth)?;
    let mut pointer = 1;
    loop {
        let text = render_label(image, pointer, sample_type);
        if text.len() + 1 == pointer {
            return Ok(text);
        }
        pointer = text.len() + 1;
    }
}

/// Write the label followed directly by big-endian samples
pub fn encode<W: Write>(image: &RescaledImage, out: &mut W) -> AccessResult<()> {
    let label = label(image)?;
    out.write_all(label.as_bytes())?;
    out.write_all(&image.big_endian_bytes())?;
    Ok(())
}
