//! CSV output writer.

use std::fs::File;
use std::path::Path;

use crate::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

use super::iso_date;

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Date`, `Time`?, `Sender`, `Message`, `RawDate`?
/// - Encoding: UTF-8
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row cannot be written.
pub fn write_csv(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path.as_ref())?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);

    write_rows(&mut writer, records, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], but returns a `String` instead of writing a file.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_csv(records: &[MessageRecord], config: &OutputConfig) -> Result<String, ChatlensError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    write_rows(&mut writer, records, config)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ChatlensError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn write_rows<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    records: &[MessageRecord],
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    writer.write_record(build_header(config))?;
    for record in records {
        writer.write_record(build_row(record, config))?;
    }
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["Date"];

    if config.include_time {
        header.push("Time");
    }

    header.push("Sender");
    header.push("Message");

    if config.include_raw_date {
        header.push("RawDate");
    }

    header
}

/// Build CSV row for a single record.
fn build_row(record: &MessageRecord, config: &OutputConfig) -> Vec<String> {
    let mut row = vec![iso_date(record)];

    if config.include_time {
        row.push(record.time_text().to_string());
    }

    row.push(record.sender().to_string());
    row.push(record.message().to_string());

    if config.include_raw_date {
        row.push(record.date_text().to_string());
    }

    row
}
