//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

use super::iso_date;

/// Flat view of a record for JSON output.
/// Only includes the optional columns enabled in `OutputConfig`.
#[derive(Serialize)]
pub(super) struct JsonRecord<'a> {
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<&'a str>,
    sender: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_date: Option<&'a str>,
}

impl<'a> JsonRecord<'a> {
    pub(super) fn from_record(record: &'a MessageRecord, config: &OutputConfig) -> Self {
        Self {
            date: record.parsed_date().map(|_| iso_date(record)),
            time: config.include_time.then(|| record.time_text()),
            sender: record.sender(),
            message: record.message(),
            raw_date: config.include_raw_date.then(|| record.date_text()),
        }
    }
}

/// Writes records to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"date": "2024-01-01", "sender": "Bob", "message": "Hello"},
///   {"date": null, "sender": "Amy", "message": "Hi"}
/// ]
/// ```
///
/// `date` is `null` for undated records.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_json(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let json = to_json(records, config)?;
    let mut file = File::create(output_path.as_ref())?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(records: &[MessageRecord], config: &OutputConfig) -> Result<String, ChatlensError> {
    let rows: Vec<JsonRecord<'_>> = records
        .iter()
        .map(|record| JsonRecord::from_record(record, config))
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}
