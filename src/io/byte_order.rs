//! Byte order handling for binary fields and samples
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when reading and writing
//! fixed-position values inside a byte buffer.

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use num_bigint::BigUint;

/// Represents the byte order of a field or array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Little-endian byte order (LSB first)
    LittleEndian,
    /// Big-endian byte order (MSB first)
    #[default]
    BigEndian,
}

impl ByteOrder {
    /// Parses a byte order name ("msb", "big", "lsb", "little"), case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "msb" | "big" | "big_endian" | "bigendian" => Some(ByteOrder::BigEndian),
            "lsb" | "little" | "little_endian" | "littleendian" => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (LSB)",
            ByteOrder::BigEndian => "Big Endian (MSB)",
        }
    }

    /// Returns the handler for this byte order
    pub fn handler(&self) -> &'static dyn ByteOrderHandler {
        match self {
            ByteOrder::LittleEndian => &LittleEndianHandler,
            ByteOrder::BigEndian => &BigEndianHandler,
        }
    }
}

/// Trait for byte order handling strategies
///
/// All methods operate on the leading bytes of the given slice; callers
/// are responsible for bounds checking.
pub trait ByteOrderHandler: Send + Sync {
    /// Read an unsigned integer of `nbytes` bytes (1..=8)
    fn read_uint(&self, buf: &[u8], nbytes: usize) -> u64;

    /// Write the low `nbytes` bytes (1..=8) of an unsigned integer
    fn write_uint(&self, buf: &mut [u8], value: u64, nbytes: usize);

    /// Read an f32 value
    fn read_f32(&self, buf: &[u8]) -> f32;

    /// Read an f64 value
    fn read_f64(&self, buf: &[u8]) -> f64;

    /// Write an f32 value
    fn write_f32(&self, buf: &mut [u8], value: f32);

    /// Write an f64 value
    fn write_f64(&self, buf: &mut [u8], value: f64);

    /// Read an unsigned integer of any length
    fn read_big(&self, buf: &[u8]) -> BigUint;

    /// Write an unsigned integer into exactly `buf.len()` bytes.
    /// The value must already be known to fit.
    fn write_big(&self, buf: &mut [u8], value: &BigUint);
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_uint(&self, buf: &[u8], nbytes: usize) -> u64 {
        LittleEndian::read_uint(buf, nbytes)
    }

    fn write_uint(&self, buf: &mut [u8], value: u64, nbytes: usize) {
        LittleEndian::write_uint(buf, truncate_to(value, nbytes), nbytes)
    }

    fn read_f32(&self, buf: &[u8]) -> f32 {
        LittleEndian::read_f32(buf)
    }

    fn read_f64(&self, buf: &[u8]) -> f64 {
        LittleEndian::read_f64(buf)
    }

    fn write_f32(&self, buf: &mut [u8], value: f32) {
        LittleEndian::write_f32(buf, value)
    }

    fn write_f64(&self, buf: &mut [u8], value: f64) {
        LittleEndian::write_f64(buf, value)
    }

    fn read_big(&self, buf: &[u8]) -> BigUint {
        BigUint::from_bytes_le(buf)
    }

    fn write_big(&self, buf: &mut [u8], value: &BigUint) {
        buf.fill(0);
        let bytes = value.to_bytes_le();
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_uint(&self, buf: &[u8], nbytes: usize) -> u64 {
        BigEndian::read_uint(buf, nbytes)
    }

    fn write_uint(&self, buf: &mut [u8], value: u64, nbytes: usize) {
        BigEndian::write_uint(buf, truncate_to(value, nbytes), nbytes)
    }

    fn read_f32(&self, buf: &[u8]) -> f32 {
        BigEndian::read_f32(buf)
    }

    fn read_f64(&self, buf: &[u8]) -> f64 {
        BigEndian::read_f64(buf)
    }

    fn write_f32(&self, buf: &mut [u8], value: f32) {
        BigEndian::write_f32(buf, value)
    }

    fn write_f64(&self, buf: &mut [u8], value: f64) {
        BigEndian::write_f64(buf, value)
    }

    fn read_big(&self, buf: &[u8]) -> BigUint {
        BigUint::from_bytes_be(buf)
    }

    fn write_big(&self, buf: &mut [u8], value: &BigUint) {
        buf.fill(0);
        let bytes = value.to_bytes_be();
        let n = bytes.len().min(buf.len());
        let start = buf.len() - n;
        buf[start..].copy_from_slice(&bytes[bytes.len() - n..]);
    }
}

// byteorder panics when the value has bits above `nbytes`
fn truncate_to(value: u64, nbytes: usize) -> u64 {
    if nbytes >= 8 {
        value
    } else {
        value & ((1u64 << (nbytes * 8)) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_round_trip_both_orders() {
        let mut buf = [0u8; 4];
        BigEndianHandler.write_uint(&mut buf, 0x0102_0304, 4);
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(BigEndianHandler.read_uint(&buf, 4), 0x0102_0304);

        LittleEndianHandler.write_uint(&mut buf, 0x0102_0304, 4);
        assert_eq!(buf, [4, 3, 2, 1]);
        assert_eq!(LittleEndianHandler.read_uint(&buf, 4), 0x0102_0304);
    }

    #[test]
    fn test_three_byte_integer() {
        let buf = [0xAB, 0xCD, 0xEF];
        assert_eq!(BigEndianHandler.read_uint(&buf, 3), 0xABCDEF);
        assert_eq!(LittleEndianHandler.read_uint(&buf, 3), 0xEFCDAB);
    }

    #[test]
    fn test_big_values() {
        let mut buf = [0u8; 10];
        let value = BigUint::from(0x0102u32);
        BigEndianHandler.write_big(&mut buf, &value);
        assert_eq!(buf, [0, 0, 0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(BigEndianHandler.read_big(&buf), value);

        LittleEndianHandler.write_big(&mut buf, &value);
        assert_eq!(buf, [2, 1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(LittleEndianHandler.read_big(&buf), value);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ByteOrder::from_name("MSB"), Some(ByteOrder::BigEndian));
        assert_eq!(ByteOrder::from_name("little"), Some(ByteOrder::LittleEndian));
        assert_eq!(ByteOrder::from_name("middle"), None);
    }
}
