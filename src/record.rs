//! The message record produced by the chat log parser.
//!
//! A [`MessageRecord`] is one logical chat message: the header fields of the
//! line that started it, the body with every continuation line folded in, and
//! the calendar date normalized from the raw date token.
//!
//! # Examples
//!
//! ```
//! use chatlens::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let record = MessageRecord::new("12/5/23", "9:42 pm", "Asha", "See you at night study")
//!     .with_parsed_date(NaiveDate::from_ymd_opt(2023, 5, 12).unwrap());
//!
//! assert_eq!(record.sender(), "Asha");
//! assert_eq!(record.parsed_date().map(|d| d.to_string()).as_deref(), Some("2023-05-12"));
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatlens::MessageRecord;
//!
//! let record = MessageRecord::new("1/1/24", "10:00 am", "Bob", "Hello");
//! let json = serde_json::to_string(&record)?;
//! let parsed: MessageRecord = serde_json::from_str(&json)?;
//!
//! assert_eq!(record, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker WhatsApp writes in place of attachments when media is excluded
/// from the export.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// One chat message after continuation lines have been merged.
///
/// Records are built by the parser and handed out read-only: the body only
/// grows while the parser is still folding lines into it, and nothing outside
/// the crate can mutate a finished record.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `date_text` | `String` | Raw date token, e.g. `12/5/23` |
/// | `time_text` | `String` | Raw time token, e.g. `9:42 pm` |
/// | `sender` | `String` | Trimmed display name |
/// | `message` | `String` | Body with continuation lines space-joined |
/// | `parsed_date` | `Option<NaiveDate>` | Normalized date, if the token was valid |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    date_text: String,
    time_text: String,
    sender: String,
    message: String,
    #[serde(default)]
    parsed_date: Option<NaiveDate>,
}

impl MessageRecord {
    /// Creates a record from header fields, without a normalized date.
    pub fn new(
        date_text: impl Into<String>,
        time_text: impl Into<String>,
        sender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            date_text: date_text.into(),
            time_text: time_text.into(),
            sender: sender.into(),
            message: message.into(),
            parsed_date: None,
        }
    }

    /// Builder method to set the normalized date.
    #[must_use]
    pub fn with_parsed_date(mut self, date: NaiveDate) -> Self {
        self.parsed_date = Some(date);
        self
    }

    /// Appends a continuation line, separated from the body by one space.
    pub(crate) fn append_continuation(&mut self, line: &str) {
        self.message.push(' ');
        self.message.push_str(line);
    }

    /// Appends a continuation line, cutting the body at `max_len` bytes.
    /// Returns `false` if the body had to be cut.
    pub(crate) fn append_continuation_bounded(&mut self, line: &str, max_len: usize) -> bool {
        self.append_continuation(line);
        !self.truncate_message(max_len)
    }

    /// Cuts the body to at most `max_len` bytes on a char boundary.
    /// Returns `true` if anything was removed.
    pub(crate) fn truncate_message(&mut self, max_len: usize) -> bool {
        if self.message.len() <= max_len {
            return false;
        }
        let cut = (0..=max_len)
            .rev()
            .find(|&i| self.message.is_char_boundary(i))
            .unwrap_or(0);
        self.message.truncate(cut);
        true
    }

    pub(crate) fn set_parsed_date(&mut self, date: Option<NaiveDate>) {
        self.parsed_date = date;
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the raw date token as it appeared in the export.
    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    /// Returns the raw time token as it appeared in the export.
    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// Returns the sender's display name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the normalized date, if the raw token could be parsed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.parsed_date
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` if the record carries a normalized date.
    pub fn is_dated(&self) -> bool {
        self.parsed_date.is_some()
    }

    /// Returns `true` if the body is the media placeholder or contains it.
    pub fn is_media(&self) -> bool {
        self.message.contains(MEDIA_OMITTED)
    }
}
