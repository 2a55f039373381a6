//! Bit-range extraction and injection
//!
//! Bits are numbered most-significant-bit first within the byte range
//! `[byte_offset, byte_offset + byte_length)`: bit 0 is the high bit of
//! the first byte. Byte boundaries are transparent to callers.

use num_bigint::BigUint;

use crate::errors::{AccessError, AccessResult};

/// Checks the byte range and bit range against the buffer and returns the bit width
fn check_range(
    buf_len: usize,
    byte_offset: usize,
    byte_length: usize,
    start_bit: u32,
    stop_bit: u32,
) -> AccessResult<u32> {
    let end = byte_offset.checked_add(byte_length).filter(|end| *end <= buf_len);
    if end.is_none() {
        return Err(AccessError::FieldOutOfBounds {
            offset: byte_offset,
            length: byte_length,
            buffer_len: buf_len,
        });
    }
    if start_bit > stop_bit || (stop_bit as usize) >= byte_length * 8 {
        return Err(AccessError::InvalidDescriptor(format!(
            "bit range {}..={} outside {}-byte field", start_bit, stop_bit, byte_length
        )));
    }
    Ok(stop_bit - start_bit + 1)
}

#[inline]
fn bit_at(buf: &[u8], byte_offset: usize, bit: usize) -> u8 {
    (buf[byte_offset + bit / 8] >> (7 - (bit % 8))) & 1
}

#[inline]
fn put_bit(buf: &mut [u8], byte_offset: usize, bit: usize, set: bool) {
    let mask = 1u8 << (7 - (bit % 8));
    let byte = &mut buf[byte_offset + bit / 8];
    if set {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}

/// Extracts bits `start_bit..=stop_bit` as an unsigned integer of up to 64 bits
///
/// Fails with `FieldTooNarrow` when the range is wider than 64 bits.
pub fn extract_bits_u64(
    buf: &[u8],
    byte_offset: usize,
    byte_length: usize,
    start_bit: u32,
    stop_bit: u32,
) -> AccessResult<u64> {
    let width = check_range(buf.len(), byte_offset, byte_length, start_bit, stop_bit)?;
    if width > 64 {
        return Err(AccessError::FieldTooNarrow { width });
    }

    let mut value = 0u64;
    for bit in start_bit as usize..=stop_bit as usize {
        value = (value << 1) | bit_at(buf, byte_offset, bit) as u64;
    }
    Ok(value)
}

/// Extracts bits `start_bit..=stop_bit` as an arbitrary-width unsigned integer
pub fn extract_bits(
    buf: &[u8],
    byte_offset: usize,
    byte_length: usize,
    start_bit: u32,
    stop_bit: u32,
) -> AccessResult<BigUint> {
    let width = check_range(buf.len(), byte_offset, byte_length, start_bit, stop_bit)? as usize;
    if width <= 64 {
        return extract_bits_u64(buf, byte_offset, byte_length, start_bit, stop_bit).map(BigUint::from);
    }

    // Right-align the bit string in a big-endian byte vector
    let out_len = width.div_ceil(8);
    let pad = out_len * 8 - width;
    let mut out = vec![0u8; out_len];
    for k in 0..width {
        if bit_at(buf, byte_offset, start_bit as usize + k) == 1 {
            put_bit(&mut out, 0, pad + k, true);
        }
    }
    Ok(BigUint::from_bytes_be(&out))
}

/// Writes the low-order bits of `value` into bits `start_bit..=stop_bit`
///
/// Bits outside the range are left untouched. Fails with `ValueOverflow`
/// if the value needs more bits than the range provides.
pub fn inject_bits_u64(
    value: u64,
    buf: &mut [u8],
    byte_offset: usize,
    byte_length: usize,
    start_bit: u32,
    stop_bit: u32,
) -> AccessResult<()> {
    let width = check_range(buf.len(), byte_offset, byte_length, start_bit, stop_bit)?;
    if width < 64 && value >> width != 0 {
        return Err(AccessError::ValueOverflow { value: value.to_string(), width });
    }

    for k in 0..width {
        let set = if width - 1 - k >= 64 {
            false
        } else {
            (value >> (width - 1 - k)) & 1 == 1
        };
        put_bit(buf, byte_offset, (start_bit + k) as usize, set);
    }
    Ok(())
}

/// Arbitrary-width counterpart of [`inject_bits_u64`]
pub fn inject_bits(
    value: &BigUint,
    buf: &mut [u8],
    byte_offset: usize,
    byte_length: usize,
    start_bit: u32,
    stop_bit: u32,
) -> AccessResult<()> {
    let width = check_range(buf.len(), byte_offset, byte_length, start_bit, stop_bit)?;
    if value.bits() > width as u64 {
        return Err(AccessError::ValueOverflow { value: value.to_string(), width });
    }

    for k in 0..width {
        let set = value.bit((width - 1 - k) as u64);
        put_bit(buf, byte_offset, (start_bit + k) as usize, set);
    }
    Ok(())
}
