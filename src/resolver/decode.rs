//! Percent-decoding of request paths.

use crate::resolver::error::ResolveError;

/// Decode `%HH` escape sequences in a request path.
///
/// Decoded bytes outside printable ASCII (32..=126) are dropped. Everything
/// that is not part of an escape is copied through unchanged.
///
/// # Errors
///
/// [`ResolveError::InvalidEscape`] if a `%` is not followed by two hex digits.
pub fn decode_escapes(input: &str) -> Result<String, ResolveError> {
    if !input.contains('%') {
        return Ok(input.to_string());
    }

    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            decoded.push(bytes[i]);
            i += 1;
            continue;
        }

        let invalid = || ResolveError::InvalidEscape(input.to_string());
        if i + 2 >= bytes.len() {
            return Err(invalid());
        }
        let high = hex_nibble(bytes[i + 1]).ok_or_else(invalid)?;
        let low = hex_nibble(bytes[i + 2]).ok_or_else(invalid)?;
        let value = (high << 4) | low;
        if (32..=126).contains(&value) {
            decoded.push(value);
        }
        i += 3;
    }

    // Only whole ASCII triplets were removed or inserted, so the result stays valid UTF-8.
    String::from_utf8(decoded).map_err(|_| ResolveError::InvalidEscape(input.to_string()))
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
