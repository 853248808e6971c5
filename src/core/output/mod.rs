//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines (one record per line) - requires `json-output` feature
//!
//! Every format carries the same columns:
//!
//! | Column | When | Content |
//! |--------|------|---------|
//! | `Date` | always | Normalized date as `YYYY-MM-DD`, empty if undated |
//! | `Time` | `include_time` | Raw time token |
//! | `Sender` | always | Display name |
//! | `Message` | always | Body with continuation lines merged |
//! | `RawDate` | `include_raw_date` | Raw date token |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::{write_csv, write_json, write_jsonl, to_csv};
//! use chatlens::core::models::OutputConfig;
//!
//! let records = chatlens::parse([
//!     "1/1/24, 10:00 am - Bob: Hello",
//!     "1/1/24, 10:01 am - Amy: Good!",
//! ]);
//!
//! let config = OutputConfig::new().with_time();
//!
//! write_csv(&records, "records.csv", &config)?;
//! write_json(&records, "records.json", &config)?;
//! write_jsonl(&records, "records.jsonl", &config)?;
//!
//! let csv_string = to_csv(&records, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(any(feature = "csv-output", feature = "json-output"))]
use crate::MessageRecord;

/// ISO form of the normalized date, or an empty string for undated records.
#[cfg(any(feature = "csv-output", feature = "json-output"))]
fn iso_date(record: &MessageRecord) -> String {
    record
        .parsed_date()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
