//! VICAR image output
//!
//! The file is a system label of `KEY=VALUE` items, NUL-padded to a whole
//! number of records, followed by the image lines. Samples are written
//! big-endian (`INTFMT='HIGH'`).

use std::io::Write;

use crate::errors::{AccessError, AccessResult};
use crate::export::encoder::RescaledImage;

const ITEM_SEPARATOR: &str = "  ";

fn format_name(depth: u32) -> AccessResult<&'static str> {
    match depth {
        8 => Ok("BYTE"),
        16 => Ok("HALF"),
        32 => Ok("FULL"),
        depth => Err(AccessError::UnsupportedPixelDepth { depth, format: "VICAR" }),
    }
}

/// Build the NUL-padded system label
pub fn system_label(image: &RescaledImage) -> AccessResult<Vec<u8>> {
    let format = format_name(image.depth)?;
    let recsize = image.width * image.bytes_per_sample();
    let (nl, ns) = (image.height, image.width);

    let items = [
        format!("FORMAT='{}'", format),
        "TYPE='IMAGE'".to_string(),
        format!("BUFSIZ={}", recsize),
        "DIM=3".to_string(),
        "EOL=0".to_string(),
        format!("RECSIZE={}", recsize),
        "ORG='BSQ'".to_string(),
        format!("NL={}", nl),
        format!("NS={}", ns),
        "NB=1".to_string(),
        format!("N1={}", ns),
        format!("N2={}", nl),
        "N3=1".to_string(),
        "N4=0".to_string(),
        "NBB=0".to_string(),
        "NLB=0".to_string(),
        "HOST='SUN-SOLR'".to_string(),
        "INTFMT='HIGH'".to_string(),
        "REALFMT='IEEE'".to_string(),
        "BHOST='SUN-SOLR'".to_string(),
        "BINTFMT='HIGH'".to_string(),
        "BREALFMT='IEEE'".to_string(),
        "BLTYPE=''".to_string(),
    ];
    let body = items.join(ITEM_SEPARATOR);

    // LBLSIZE counts itself, so grow it until the text fits
    let mut lblsize = recsize;
    let text = loop {
        let text = format!("LBLSIZE={}{}{}{}", lblsize, ITEM_SEPARATOR, body, ITEM_SEPARATOR);
        let needed = text.len().div_ceil(recsize) * recsize;
        if needed <= lblsize {
            break text;
        }
        lblsize = needed;
    };

    let mut label = text.into_bytes();
    label.resize(lblsize, 0);
    Ok(label)
}

/// Write the label followed by big-endian image lines
pub fn encode<W: Write>(image: &RescaledImage, out: &mut W) -> AccessResult<()> {
    let label = system_label(image)?;
    out.write_all(&label)?;
    out.write_all(&image.big_endian_bytes())?;
    Ok(())
}

/// Items of a VICAR system label
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VicarLabel {
    items: Vec<(String, String)>,
}

impl VicarLabel {
    /// Value of an item with surrounding quotes removed
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parse the system label at the start of a VICAR file
pub fn parse_system_label(bytes: &[u8]) -> AccessResult<VicarLabel> {
    let invalid = |msg: &str| AccessError::GenericError(format!("Invalid VICAR label: {}", msg));

    let head = bytes.strip_prefix(b"LBLSIZE=").ok_or_else(|| invalid("missing LBLSIZE"))?;
    let digits: String = head.iter()
        .skip_while(|b| **b == b' ')
        .take_while(|b| b.is_ascii_digit())
        .map(|&b| b as char)
        .collect();
    let lblsize: usize = digits.parse().map_err(|_| invalid("bad LBLSIZE"))?;
    let label = bytes.get(..lblsize).ok_or_else(|| invalid("truncated label"))?;
    let end = label.iter().position(|&b| b == 0).unwrap_or(label.len());
    let text = String::from_utf8_lossy(&label[..end]);

    let mut items = Vec::new();
    let mut chars = text.chars().peekable();
    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let key: String = chars.by_ref().take_while(|&c| c != '=').collect();
        if key.is_empty() {
            break;
        }
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut value = String::new();
        if chars.peek() == Some(&'\'') {
            chars.next();
            // A doubled quote inside a string is a literal quote
            while let Some(c) = chars.next() {
                if c == '\'' {
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        value.push('\'');
                        continue;
                    }
                    break;
                }
                value.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                value.push(c);
                chars.next();
            }
        }
        items.push((key.trim().to_string(), value));
    }

    Ok(VicarLabel { items })
}
