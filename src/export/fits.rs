//! FITS primary HDU output
//!
//! Header cards are 80 bytes, blocked in 2880-byte records. FITS has no
//! unsigned 16- or 32-bit type, so those depths are stored signed with a
//! `BZERO` offset.

use std::io::Write;

use crate::errors::{AccessError, AccessResult};
use crate::export::encoder::RescaledImage;

pub const CARD_SIZE: usize = 80;
pub const BLOCK_SIZE: usize = 2880;

/// One header card: keyword, fixed-format value and optional comment
fn format_card(keyword: &str, value: &str, comment: Option<&str>) -> [u8; CARD_SIZE] {
    let mut card = [b' '; CARD_SIZE];
    card[..keyword.len()].copy_from_slice(keyword.as_bytes());
    card[8] = b'=';
    // Fixed format: value right-justified in columns 11-30
    let start = 30 - value.len();
    card[start..30].copy_from_slice(value.as_bytes());
    if let Some(comment) = comment {
        let text = format!(" / {}", comment);
        let len = text.len().min(CARD_SIZE - 30);
        card[30..30 + len].copy_from_slice(&text.as_bytes()[..len]);
    }
    card
}

fn bzero(depth: u32) -> AccessResult<Option<u64>> {
    match depth {
        8 => Ok(None),
        16 => Ok(Some(1 << 15)),
        32 => Ok(Some(1 << 31)),
        depth => Err(AccessError::UnsupportedPixelDepth { depth, format: "FITS" }),
    }
}

/// Build the padded primary header
pub fn header(image: &RescaledImage) -> AccessResult<Vec<u8>> {
    let offset = bzero(image.depth)?;

    let mut cards = vec![
        format_card("SIMPLE", "T", Some("conforms to FITS standard")),
        format_card("BITPIX", &image.depth.to_string(), Some("bits per data value")),
        format_card("NAXIS", "2", Some("number of axes")),
        format_card("NAXIS1", &image.width.to_string(), Some("samples per line")),
        format_card("NAXIS2", &image.height.to_string(), Some("number of lines")),
    ];
    if let Some(bzero) = offset {
        cards.push(format_card("BZERO", &bzero.to_string(), Some("offset for unsigned data")));
        cards.push(format_card("BSCALE", "1", None));
    }

    let mut end = [b' '; CARD_SIZE];
    end[..3].copy_from_slice(b"END");
    cards.push(end);

    let mut out: Vec<u8> = cards.concat();
    out.resize(out.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE, b' ');
    Ok(out)
}

/// Big-endian data, shifted by `BZERO`, zero-padded to a whole block
fn data_unit(image: &RescaledImage) -> AccessResult<Vec<u8>> {
    let mut out = match bzero(image.depth)? {
        None => image.big_endian_bytes(),
        Some(bzero) => {
            let n = image.bytes_per_sample();
            let mut out = Vec::with_capacity(image.samples.len() * n);
            for &s in &image.samples {
                let stored = (s as i64 - bzero as i64).to_be_bytes();
                out.extend_from_slice(&stored[8 - n..]);
            }
            out
        }
    };
    out.resize(out.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE, 0);
    Ok(out)
}

/// Write the header and data unit
pub fn encode<W: Write>(image: &RescaledImage, out: &mut W) -> AccessResult<()> {
    let header = header(image)?;
    let data = data_unit(image)?;
    out.write_all(&header)?;
    out.write_all(&data)?;
    Ok(())
}
