//! Header line recognition.
//!
//! A header line starts a new message:
//!
//! ```text
//! 12/5/23, 9:42 pm - Asha: See you at night study
//! ^date^^  ^time^^   ^sndr^ ^message^^^^^^^^^^^^^^
//! ```
//!
//! Recognition is a pure function of one line; deciding whether a
//! non-matching line continues the previous message is the parser's job.

use std::sync::LazyLock;

use regex::Regex;

/// `D{1,2}/D{1,2}/D{2,4}, D{1,2}:DD[ ][ap]m - sender: message`
///
/// The am/pm marker is optional and case-insensitive. The sender excludes
/// colons, so the first colon after it separates sender from message.
const HEADER_PATTERN: &str = r"^(\d{1,2}/\d{1,2}/\d{2,4}),\s*(\d{1,2}:\d{2}(?:\s?[aApP][mM])?)\s*-\s*([^:]+):\s*(.*)$";

static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("header pattern is a valid regex"));

/// Fields captured from a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields<'a> {
    /// Raw date token, e.g. `12/5/23`
    pub date: &'a str,
    /// Raw time token, e.g. `9:42 pm`
    pub time: &'a str,
    /// Sender name, trimmed and non-empty
    pub sender: &'a str,
    /// First line of the message body, trimmed
    pub message: &'a str,
}

/// Matches a trimmed line against the header shape.
///
/// Returns `None` when the line is not a header, including when the sender
/// is blank.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::match_header;
///
/// let fields = match_header("1/1/24, 10:00 am - Bob: Meeting at 10:30").unwrap();
/// assert_eq!(fields.sender, "Bob");
/// assert_eq!(fields.message, "Meeting at 10:30");
///
/// assert!(match_header("How are you?").is_none());
/// ```
pub fn match_header(line: &str) -> Option<HeaderFields<'_>> {
    let caps = HEADER_REGEX.captures(line)?;

    let sender = caps.get(3)?.as_str().trim();
    if sender.is_empty() {
        return None;
    }

    Some(HeaderFields {
        date: caps.get(1)?.as_str(),
        time: caps.get(2)?.as_str().trim(),
        sender,
        message: caps.get(4).map_or("", |m| m.as_str().trim()),
    })
}

/// Returns `true` if the line has header shape.
pub fn is_header(line: &str) -> bool {
    match_header(line).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_basic_header() {
        let fields = match_header("12/5/23, 9:42 pm - Asha: See you at night study").unwrap();
        assert_eq!(fields.date, "12/5/23");
        assert_eq!(fields.time, "9:42 pm");
        assert_eq!(fields.sender, "Asha");
        assert_eq!(fields.message, "See you at night study");
    }

    #[test]
    fn test_colon_in_message_is_kept() {
        let fields = match_header("1/1/24, 10:00 am - Bob: Meeting at 10:30").unwrap();
        assert_eq!(fields.sender, "Bob");
        assert_eq!(fields.message, "Meeting at 10:30");

        let fields = match_header("1/1/24, 10:00 am - Bob: note: bring: snacks").unwrap();
        assert_eq!(fields.message, "note: bring: snacks");
    }

    #[test]
    fn test_am_pm_case_insensitive() {
        for time in ["10:00 am", "10:00 AM", "10:00 Pm", "10:00pm", "10:00 pM"] {
            let line = format!("1/1/24, {time} - Bob: hi");
            let fields = match_header(&line).unwrap_or_else(|| panic!("no match for {time}"));
            assert_eq!(fields.time, time);
        }
    }

    #[test]
    fn test_missing_marker_tolerated() {
        let fields = match_header("15/01/2024, 22:15 - Amy: late").unwrap();
        assert_eq!(fields.time, "22:15");
        assert_eq!(fields.date, "15/01/2024");
    }

    #[test]
    fn test_narrow_no_break_space_before_marker() {
        let fields = match_header("1/1/24, 9:05\u{202f}pm - Bob: hi").unwrap();
        assert_eq!(fields.time, "9:05\u{202f}pm");
    }

    #[test]
    fn test_sender_is_trimmed() {
        let fields = match_header("1/1/24, 10:00 am -   Bob Smith  : hi").unwrap();
        assert_eq!(fields.sender, "Bob Smith");
    }

    #[test]
    fn test_empty_message_body() {
        let fields = match_header("1/1/24, 10:00 am - Bob:").unwrap();
        assert_eq!(fields.message, "");
    }

    #[test]
    fn test_anchored_to_line_start() {
        assert!(match_header("fwd: 1/1/24, 10:00 am - Bob: Hello").is_none());
        assert!(match_header("Re 1/1/24, 10:00 am - Bob: Hello").is_none());
    }

    #[test]
    fn test_rejects_non_headers() {
        assert!(match_header("How are you?").is_none());
        assert!(match_header("").is_none());
        // System banner without a sender colon
        assert!(match_header("1/1/24, 10:00 am - Messages are end-to-end encrypted").is_none());
        // Bracketed iOS style is a different dialect
        assert!(match_header("[1/15/24, 10:30:45 AM] Alice: Hello").is_none());
        // Three-digit day
        assert!(match_header("123/1/24, 10:00 am - Bob: hi").is_none());
        // Single-digit year
        assert!(match_header("1/1/4, 10:00 am - Bob: hi").is_none());
    }

    #[test]
    fn test_blank_sender_rejected() {
        assert!(match_header("1/1/24, 10:00 am -  : hi").is_none());
    }

    #[test]
    fn test_is_header() {
        assert!(is_header("1/1/24, 10:01 am - Amy: Good!"));
        assert!(!is_header("Good!"));
    }
}
