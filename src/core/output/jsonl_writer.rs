//! JSON Lines (JSONL) output writer.
//!
//! One record per line, which suits line-oriented tools and incremental
//! loading of large exports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

use super::json_writer::JsonRecord;

/// Writes records in JSONL format.
///
/// # Format
/// ```text
/// {"date":"2024-01-01","sender":"Bob","message":"Hello"}
/// {"date":"2024-01-01","sender":"Amy","message":"Good!"}
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_jsonl(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path.as_ref())?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, &JsonRecord::from_record(record, config))?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_jsonl(records: &[MessageRecord], config: &OutputConfig) -> Result<String, ChatlensError> {
    let mut output = String::new();

    for record in records {
        output.push_str(&serde_json::to_string(&JsonRecord::from_record(
            record, config,
        ))?);
        output.push('\n');
    }

    Ok(output)
}
