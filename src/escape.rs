//! Reversible encoding of path bytes into printable, single-token strings.
//!
//! A description line separates its fields with single spaces and ends with
//! a newline, so every path-like field has to be free of both. [`escape`]
//! guarantees that for arbitrary bytes and [`unescape`] reverses it exactly.
//!
//! | input                                   | output   |
//! |-----------------------------------------|----------|
//! | `\`                                     | `\\`     |
//! | TAB, LF, CR                             | `\t`, `\n`, `\r` |
//! | other control or whitespace characters  | `\xHH` per UTF-8 byte |
//! | bytes that are not valid UTF-8          | `\xHH`   |
//! | anything else                           | verbatim |
//!
//! ```rust
//! use describe_subtree::escape::{escape, unescape};
//!
//! let name = b"holiday photo\n\xff.jpg";
//! let token = escape(name);
//! assert_eq!(token, r"holiday\x20photo\n\xff.jpg");
//! assert_eq!(unescape(&token).unwrap(), name);
//! ```

use std::fmt::Write;

use crate::errors::Error;

/// Escapes `bytes` into a token without spaces, newlines, or other
/// whitespace and control characters.
pub fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        for ch in chunk.valid().chars() {
            match ch {
                '\\' => out.push_str(r"\\"),
                '\t' => out.push_str(r"\t"),
                '\n' => out.push_str(r"\n"),
                '\r' => out.push_str(r"\r"),
                c if c.is_control() || c.is_whitespace() => {
                    let mut buf = [0u8; 4];
                    for byte in c.encode_utf8(&mut buf).as_bytes() {
                        push_hex(&mut out, *byte);
                    }
                }
                c => out.push(c),
            }
        }
        for byte in chunk.invalid() {
            push_hex(&mut out, *byte);
        }
    }
    out
}

fn push_hex(out: &mut String, byte: u8) {
    // Writing into a String cannot fail.
    let _ = write!(out, r"\x{byte:02x}");
}

/// Reverses [`escape`].
///
/// Fails with [`Error::Parse`] on a dangling escape character, an unknown
/// escape sequence, or a malformed `\xHH` byte.
pub fn unescape(token: &str) -> Result<Vec<u8>, Error> {
    let bytes = token.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let decoded = match bytes.get(i + 1) {
            Some(b'\\') => b'\\',
            Some(b't') => b'\t',
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b'x') => {
                let byte = bytes
                    .get(i + 2..i + 4)
                    .and_then(parse_hex_byte)
                    .ok_or_else(|| Error::Parse {
                        what: token.to_string(),
                        how: format!("malformed \\x escape at offset {i}"),
                    })?;
                out.push(byte);
                i += 4;
                continue;
            }
            Some(other) => {
                return Err(Error::Parse {
                    what: token.to_string(),
                    how: format!("unknown escape \\{} at offset {i}", char::from(*other)),
                });
            }
            None => {
                return Err(Error::Parse {
                    what: token.to_string(),
                    how: "dangling escape character".to_string(),
                });
            }
        };
        out.push(decoded);
        i += 2;
    }
    Ok(out)
}

fn parse_hex_byte(digits: &[u8]) -> Option<u8> {
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let digits = std::str::from_utf8(digits).ok()?;
    u8::from_str_radix(digits, 16).ok()
}

/// Renders path bytes for output, escaping them unless `literal` is set.
///
/// Literal output is passed through untouched, which is only possible for
/// valid UTF-8.
pub(crate) fn render(bytes: &[u8], literal: bool) -> Result<String, Error> {
    if !literal {
        return Ok(escape(bytes));
    }
    String::from_utf8(bytes.to_vec()).map_err(|_| Error::Encoding {
        what: String::from_utf8_lossy(bytes).into_owned(),
    })
}
