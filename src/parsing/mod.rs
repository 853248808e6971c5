//! Shared parsing utilities.
//!
//! These pure functions are used by both the in-memory [`ChatParser`](crate::ChatParser)
//! and the streaming [`RecordStream`](crate::streaming::RecordStream):
//! - [`match_header`] recognizes a header line
//! - [`normalize_date`] turns a raw date token into a calendar date
//! - [`decode_line`] turns raw bytes into a trimmed line

pub mod date;
pub mod header;

use std::borrow::Cow;

pub use date::normalize_date;
pub use header::{HeaderFields, is_header, match_header};

/// Decodes one raw line, replacing invalid UTF-8 sequences instead of failing.
///
/// Trailing `\r\n`/`\n` and surrounding whitespace are stripped.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::decode_line;
///
/// assert_eq!(decode_line(b"  hello\r\n"), "hello");
/// assert_eq!(decode_line(b"caf\xe9"), "caf\u{FFFD}");
/// ```
pub fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => Cow::Borrowed(text.trim()),
        Cow::Owned(text) => {
            log::trace!("line is not valid UTF-8, decoded lossily");
            Cow::Owned(text.trim().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_utf8_borrows() {
        let decoded = decode_line("  Привет 👋 \n".as_bytes());
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(decoded, "Привет 👋");
    }

    #[test]
    fn test_decode_invalid_utf8_falls_back() {
        let decoded = decode_line(b"1/1/24, 10:00 am - Bob: caf\xe9 time");
        assert_eq!(decoded, "1/1/24, 10:00 am - Bob: caf\u{FFFD} time");
        assert!(is_header(&decoded));
    }

    #[test]
    fn test_decode_strips_crlf() {
        assert_eq!(decode_line(b"line\r\n"), "line");
        assert_eq!(decode_line(b"\r\n"), "");
    }
}
