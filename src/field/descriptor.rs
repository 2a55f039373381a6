//! Field descriptors
//!
//! A descriptor tells the codec where a field lives inside a record and
//! how its bytes are encoded. Descriptors are supplied by the label
//! resolver and never modified by the codec.

use std::fmt;
use std::str::FromStr;

use crate::errors::{AccessError, AccessResult};
use crate::io::byte_order::ByteOrder;

/// Scalar encoding of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Two's complement binary integer
    SignedInteger,
    /// Unsigned binary integer, any width
    UnsignedInteger,
    /// IEEE-754 single (4 bytes) or double (8 bytes)
    Real,
    /// Character string
    Text,
    /// Integer written as decimal text
    AsciiInteger,
    /// Real number written as decimal text
    AsciiReal,
}

impl FieldKind {
    /// Whether values of this kind are stored as characters
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::AsciiInteger | FieldKind::AsciiReal)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::SignedInteger => "signed integer",
            FieldKind::UnsignedInteger => "unsigned integer",
            FieldKind::Real => "real",
            FieldKind::Text => "text",
            FieldKind::AsciiInteger => "ASCII integer",
            FieldKind::AsciiReal => "ASCII real",
        }
    }
}

/// Inclusive bit range within a field's bytes, MSB-first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub start_bit: u32,
    pub stop_bit: u32,
}

impl BitRange {
    pub fn new(start_bit: u32, stop_bit: u32) -> Self {
        BitRange { start_bit, stop_bit }
    }

    /// Number of bits covered by the range
    pub fn width(&self) -> u32 {
        self.stop_bit.saturating_sub(self.start_bit) + 1
    }
}

/// Character set used for text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    UsAscii,
    Latin1,
    Utf8,
}

impl Charset {
    /// Decodes bytes; characters not in the set become U+FFFD
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Charset::UsAscii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect(),
            Charset::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Encodes a string, failing on characters the set cannot represent
    pub fn encode(&self, text: &str) -> AccessResult<Vec<u8>> {
        match self {
            Charset::UsAscii => text
                .chars()
                .map(|c| if c.is_ascii() { Ok(c as u8) } else { Err(unmappable(self)) })
                .collect(),
            Charset::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c as u32).map_err(|_| unmappable(self)))
                .collect(),
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Charset::UsAscii => "US-ASCII",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Utf8 => "UTF-8",
        }
    }
}

fn unmappable(charset: &Charset) -> AccessError {
    AccessError::UnsupportedConversion { from: "text", to: charset.name() }
}

impl FromStr for Charset {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('_', "-").as_str() {
            "US-ASCII" | "ASCII" => Ok(Charset::UsAscii),
            "ISO-8859-1" | "LATIN1" | "LATIN-1" => Ok(Charset::Latin1),
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            _ => Err(AccessError::InvalidDescriptor(format!("unknown character set '{}'", s))),
        }
    }
}

/// Padding side used when a value is shorter than its field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    /// Value first, fill on the right
    #[default]
    Left,
    /// Fill first, value on the right
    Right,
}

impl Justification {
    pub fn from_flag(is_right_justified: bool) -> Self {
        if is_right_justified { Justification::Right } else { Justification::Left }
    }

    pub fn is_right(&self) -> bool {
        *self == Justification::Right
    }
}

/// Location and encoding of one field inside a record
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Byte offset of the field within the record
    pub offset: usize,
    /// Length of the field in bytes
    pub length: usize,
    /// Optional bit range for bit fields
    pub bits: Option<BitRange>,
    /// Scalar encoding
    pub kind: FieldKind,
    /// Byte order for binary numbers
    pub byte_order: ByteOrder,
    /// Character set for text
    pub charset: Charset,
    /// Justification applied by the record codec when encoding
    pub justification: Justification,
}

impl FieldDescriptor {
    /// Creates a big-endian descriptor with default text settings.
    /// Numeric text defaults to right justification.
    pub fn new(offset: usize, length: usize, kind: FieldKind) -> Self {
        let justification = match kind {
            FieldKind::AsciiInteger | FieldKind::AsciiReal => Justification::Right,
            _ => Justification::Left,
        };
        FieldDescriptor {
            offset,
            length,
            bits: None,
            kind,
            byte_order: ByteOrder::BigEndian,
            charset: Charset::default(),
            justification,
        }
    }

    pub fn with_bits(mut self, start_bit: u32, stop_bit: u32) -> Self {
        self.bits = Some(BitRange::new(start_bit, stop_bit));
        self
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    /// Number of value bits: the bit range width, or the whole byte range
    pub fn bit_width(&self) -> u32 {
        match self.bits {
            Some(range) => range.width(),
            None => (self.length * 8) as u32,
        }
    }

    /// One past the last byte of the field
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Checks the descriptor's own invariants
    pub fn validate(&self) -> AccessResult<()> {
        if self.length == 0 {
            return Err(AccessError::InvalidDescriptor("field length must be positive".to_string()));
        }
        if let Some(range) = self.bits {
            if range.start_bit > range.stop_bit || range.stop_bit as usize >= self.length * 8 {
                return Err(AccessError::InvalidDescriptor(format!(
                    "bit range {}..={} outside {}-byte field",
                    range.start_bit, range.stop_bit, self.length
                )));
            }
        }
        if self.kind == FieldKind::Real && self.length != 4 && self.length != 8 {
            return Err(AccessError::InvalidDescriptor(format!(
                "real fields must be 4 or 8 bytes, got {}", self.length
            )));
        }
        Ok(())
    }

    /// Checks that the field lies inside a buffer of `buffer_len` bytes
    pub fn check_bounds(&self, buffer_len: usize) -> AccessResult<()> {
        if self.offset.checked_add(self.length).map_or(true, |end| end > buffer_len) {
            return Err(AccessError::FieldOutOfBounds {
                offset: self.offset,
                length: self.length,
                buffer_len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}+{}", self.kind.name(), self.offset, self.length)?;
        if let Some(range) = self.bits {
            write!(f, " bits {}..={}", range.start_bit, range.stop_bit)?;
        }
        Ok(())
    }
}
