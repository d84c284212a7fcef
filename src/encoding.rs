//! Text encodings for CSV byte streams
//!
//! The tokenizer works on decoded characters. Readers decode bytes one
//! character at a time; writers encode whole rows before they hit the sink.

use crate::error::{CsvError, Result};
use std::fmt;
use std::io::{BufRead, ErrorKind};
use std::str::FromStr;

/// Encoding of a CSV byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Encoding {
    /// UTF-8, rejecting invalid sequences
    #[default]
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value
    Latin1,
}

impl Encoding {
    /// Canonical label
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Latin1 => "ISO-8859-1",
        }
    }

    /// Decode the next character from `reader`.
    ///
    /// Returns `Ok(None)` at end of input. `offset` is advanced by the number
    /// of bytes consumed and is used for error reporting. An invalid UTF-8
    /// sequence is consumed only up to the first byte that cannot continue
    /// it; that byte is left for the next call.
    pub fn decode_char<R: BufRead>(&self, reader: &mut R, offset: &mut u64) -> Result<Option<char>> {
        let Some(first) = read_byte(reader)? else {
            return Ok(None);
        };
        let start = *offset;
        *offset += 1;
        let invalid = CsvError::Decode {
            encoding: *self,
            offset: start,
        };

        match self {
            Encoding::Latin1 => Ok(Some(char::from(first))),
            Encoding::Utf8 => {
                let width = utf8_width(first);
                if width == 0 {
                    return Err(invalid);
                }

                let mut bytes = [first, 0, 0, 0];
                for slot in bytes.iter_mut().take(width).skip(1) {
                    match peek_byte(reader)? {
                        Some(b) if is_continuation(b) => {
                            reader.consume(1);
                            *slot = b;
                            *offset += 1;
                        }
                        _ => return Err(invalid),
                    }
                }

                std::str::from_utf8(&bytes[..width])
                    .ok()
                    .and_then(|s| s.chars().next())
                    .map(Some)
                    .ok_or(invalid)
            }
        }
    }

    /// Append the encoded form of `text` to `out`
    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Encoding::Utf8 => out.extend_from_slice(text.as_bytes()),
            Encoding::Latin1 => {
                for ch in text.chars() {
                    let cp = u32::from(ch);
                    if cp > 0xFF {
                        return Err(CsvError::Unencodable { encoding: *self, ch });
                    }
                    out.push(cp as u8);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = CsvError;

    /// Resolve an encoding label, case-insensitively
    fn from_str(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" | "iso_8859-1" => {
                Ok(Encoding::Latin1)
            }
            _ => Err(CsvError::UnknownEncoding(label.to_string())),
        }
    }
}

/// Sequence length announced by a UTF-8 lead byte, 0 if it cannot start one
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Next byte without consuming it
fn peek_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CsvError::Io(e)),
        }
    }
}

fn read_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>> {
    let next = peek_byte(reader)?;
    if next.is_some() {
        reader.consume(1);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode_all(encoding: Encoding, bytes: &[u8]) -> Result<String> {
        let mut cursor = Cursor::new(bytes);
        let mut offset = 0;
        let mut out = String::new();
        while let Some(ch) = encoding.decode_char(&mut cursor, &mut offset)? {
            out.push(ch);
        }
        Ok(out)
    }

    #[test]
    fn test_decode_utf8_multibyte() {
        let text = "a,é,€,𝄞\n";
        assert_eq!(decode_all(Encoding::Utf8, text.as_bytes()).unwrap(), text);
    }

    #[test]
    fn test_decode_utf8_invalid_lead() {
        let err = decode_all(Encoding::Utf8, b"ab\xFFc").unwrap_err();
        assert!(matches!(err, CsvError::Decode { offset: 2, .. }));
    }

    #[test]
    fn test_decode_utf8_truncated() {
        let err = decode_all(Encoding::Utf8, b"a\xE2\x82").unwrap_err();
        assert!(matches!(err, CsvError::Decode { offset: 1, .. }));
    }

    #[test]
    fn test_decode_utf8_bad_continuation_keeps_next_byte() {
        let mut cursor = Cursor::new(&b"\xC3,x"[..]);
        let mut offset = 0;
        let err = Encoding::Utf8.decode_char(&mut cursor, &mut offset).unwrap_err();
        assert!(matches!(err, CsvError::Decode { offset: 0, .. }));
        assert_eq!(offset, 1);
        assert_eq!(Encoding::Utf8.decode_char(&mut cursor, &mut offset).unwrap(), Some(','));
        assert_eq!(Encoding::Utf8.decode_char(&mut cursor, &mut offset).unwrap(), Some('x'));
        assert_eq!(offset, 3);
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_all(Encoding::Latin1, b"caf\xE9").unwrap(), "café");
    }

    #[test]
    fn test_encode_latin1() {
        let mut out = Vec::new();
        Encoding::Latin1.encode_into("café", &mut out).unwrap();
        assert_eq!(out, b"caf\xE9");

        let err = Encoding::Latin1.encode_into("€", &mut out).unwrap_err();
        assert!(matches!(err, CsvError::Unencodable { ch: '€', .. }));
    }

    #[test]
    fn test_labels() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("ISO-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!(" latin1 ".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert!(matches!(
            "shift_jis".parse::<Encoding>(),
            Err(CsvError::UnknownEncoding(_))
        ));
    }
}
