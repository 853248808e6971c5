//! # chatlens
//!
//! Turns a line-oriented chat export (WhatsApp style) into an ordered
//! sequence of structured message records.
//!
//! ## Overview
//!
//! An export looks like this:
//!
//! ```text
//! Messages and calls are end-to-end encrypted.
//! 12/5/23, 9:42 pm - Asha: See you at night study
//! bring the notes
//! 12/5/23, 9:43 pm - Ravi: Meeting at 10:30 instead?
//! ```
//!
//! Every line matching `date, time - sender: message` starts a new
//! [`MessageRecord`]. Any other line is appended, space-separated, to the
//! record before it, or discarded if no record exists yet. The date token is
//! then normalized day-first (2- or 4-digit years, `/`, `.` or `-`
//! separators), and records whose date cannot be read are dropped.
//!
//! Parsing never fails on malformed content: undecodable bytes are replaced,
//! stray lines are folded or skipped, bad dates are filtered out.
//!
//! ## Quick Start
//!
//! ```rust
//! let records = chatlens::parse([
//!     "1/1/24, 10:00 am - Bob: Hello",
//!     "How are you?",
//!     "1/1/24, 10:01 am - Amy: Good!",
//! ]);
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].sender(), "Bob");
//! assert_eq!(records[0].message(), "Hello How are you?");
//! assert_eq!(records[1].message(), "Good!");
//! ```
//!
//! ## Files, filters, and output
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::prelude::*;
//!
//! let records = ChatParser::new().parse_file("chat.txt")?;
//!
//! let filter = FilterConfig::new()
//!     .with_date_from("2023-05-01")?
//!     .with_whole_word("night study")?;
//! let hits = apply_filters(records, &filter);
//!
//! write_csv(&hits, "night_study.csv", &OutputConfig::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`], [`parse`], [`ParseStats`]
//! - [`parsing`] - Header recognizer and date normalization
//! - [`record`] - [`MessageRecord`]
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`DateOrder`](config::DateOrder)
//! - [`core`] - Filtering, summaries, and output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - `streaming` - Record-at-a-time reading (feature `streaming`)
//! - `cli` - clap argument types (feature `cli`)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Logging
//!
//! The library logs through the [`log`] facade: dropped records at `debug`,
//! individual line decisions at `trace`, truncated streaming bodies at `warn`.
//! Install any logger to see them.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;
pub mod record;
#[cfg(feature = "streaming")]
pub mod streaming;

pub use error::{ChatlensError, Result};
pub use parser::{ChatParser, ParseStats, parse};
pub use record::MessageRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRecord;
    pub use crate::error::{ChatlensError, Result};
    pub use crate::parser::{ChatParser, ParseStats, parse};

    pub use crate::config::{DateOrder, ParserConfig};

    pub use crate::core::filter::{FilterConfig, apply_filters, filter_records};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::summary::{ChatSummary, PhraseReport, SenderSummary};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    #[cfg(feature = "streaming")]
    pub use crate::streaming::{RecordIterator, RecordStream, StreamingConfig};
}
