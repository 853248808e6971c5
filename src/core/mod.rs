//! Everything downstream of parsing.
//!
//! This module contains:
//! - [`models`] - Output configuration
//! - [`filter`] - Record filtering by date, sender, and phrase
//! - [`summary`] - Chat, sender, and phrase statistics
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatlens::core::{
//!     OutputConfig, FilterConfig, ChatSummary,
//!     apply_filters, write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod summary;

pub use filter::{FilterConfig, PhraseFilter, apply_filters, filter_records};
pub use models::OutputConfig;
pub use summary::{ChatSummary, PhraseReport, SenderSummary};

pub use crate::MessageRecord;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
