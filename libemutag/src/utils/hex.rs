//! Hex rendering for trace logs and a forgiving parser for test vectors.

use crate::{Error, Result};
use std::fmt::Write;

/// Lowercase hex without separators: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        // writing to a String cannot fail
        let _ = write!(s, "{:02x}", b);
        s
    })
}

/// Lowercase hex with one space between bytes: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(s, "{:02x}", b);
    }
    s
}

/// Parse an APDU or frame written as hex. ASCII whitespace is ignored so
/// vectors can be grouped by field, e.g. `"00 A4 04 00 07 D2760000850101"`.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = s.bytes().filter(|c| !c.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(Error::FrameFormat(format!(
            "hex string has odd length {}",
            digits.len()
        )));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair)
                .map_err(|_| Error::FrameFormat("hex string is not ASCII".into()))?;
            u8::from_str_radix(text, 16)
                .map_err(|e| Error::FrameFormat(format!("invalid hex pair '{}': {}", text, e)))
        })
        .collect()
}
