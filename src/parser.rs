//! The chat log parser.
//!
//! Parsing is one forward pass over the lines of an export:
//!
//! 1. Each line is trimmed and matched against the header shape
//!    (see [`match_header`]).
//! 2. A header line starts a new [`MessageRecord`].
//! 3. Any other line is a continuation: it is appended, after a single space,
//!    to the most recent record. Lines before the first header (export
//!    banners, preambles) are discarded.
//! 4. After the pass, every record's date token is normalized. Records whose
//!    date cannot be normalized are dropped unless
//!    [`ParserConfig::keep_undated`] is set.
//!
//! Content never produces an error. Only the reader and file entry points can
//! fail, and only with I/O errors.
//!
//! # Example
//!
//! ```rust
//! let records = chatlens::parse([
//!     "1/1/24, 10:00 am - Bob: Hello",
//!     "How are you?",
//!     "1/1/24, 10:01 am - Amy: Good!",
//! ]);
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].message(), "Hello How are you?");
//! assert_eq!(records[1].sender(), "Amy");
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::MessageRecord;
use crate::config::ParserConfig;
use crate::error::ChatlensError;
use crate::parsing::{decode_line, match_header, normalize_date};

#[cfg(feature = "streaming")]
use crate::streaming::{RecordStream, StreamingConfig};

/// Parses lines with the default configuration.
///
/// This is the single conversion function most callers need. Lines may be
/// `&str`, `String`, or anything else that is `AsRef<str>`.
pub fn parse<I>(lines: I) -> Vec<MessageRecord>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ChatParser::new().parse_lines(lines)
}

/// Counters describing what one parse did with its input.
///
/// A line is counted exactly once as a header, a continuation, or discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines fed to the parser
    pub lines_read: usize,
    /// Lines that started a record
    pub headers: usize,
    /// Lines appended to the previous record
    pub continuations: usize,
    /// Lines seen before the first header
    pub discarded: usize,
    /// Records removed because their date could not be normalized
    pub undated_dropped: usize,
    /// Records kept without a date (only with `keep_undated`)
    pub undated_kept: usize,
}

impl ParseStats {
    /// Number of records the parse produced.
    pub fn records(&self) -> usize {
        self.headers - self.undated_dropped
    }
}

/// Accumulator of the line fold.
#[derive(Debug, Default)]
struct Reducer {
    records: Vec<MessageRecord>,
    stats: ParseStats,
}

impl Reducer {
    fn feed(&mut self, line: &str) {
        let line = line.trim();
        self.stats.lines_read += 1;

        if let Some(fields) = match_header(line) {
            self.records.push(MessageRecord::new(
                fields.date,
                fields.time,
                fields.sender,
                fields.message,
            ));
            self.stats.headers += 1;
        } else if let Some(last) = self.records.last_mut() {
            log::trace!("continuation for record from {}", last.sender());
            last.append_continuation(line);
            self.stats.continuations += 1;
        } else {
            self.stats.discarded += 1;
        }
    }

    fn finish(self, config: &ParserConfig) -> (Vec<MessageRecord>, ParseStats) {
        let Reducer { records, mut stats } = self;

        if stats.discarded > 0 {
            log::debug!(
                "discarded {} line(s) before the first message",
                stats.discarded
            );
        }

        let records = records
            .into_iter()
            .filter_map(|record| {
                let record = normalize_record(record, config);
                match record {
                    Some(ref r) if !r.is_dated() => stats.undated_kept += 1,
                    Some(_) => {}
                    None => stats.undated_dropped += 1,
                }
                record
            })
            .collect();

        (records, stats)
    }
}

/// Attaches the normalized date to a finished record.
///
/// Returns `None` when the date cannot be normalized and the configuration
/// drops undated records.
pub(crate) fn normalize_record(
    mut record: MessageRecord,
    config: &ParserConfig,
) -> Option<MessageRecord> {
    let date = normalize_date(record.date_text(), config.date_order);

    if date.is_none() {
        if !config.keep_undated {
            log::debug!(
                "dropping message from {}: unparseable date '{}'",
                record.sender(),
                record.date_text()
            );
            return None;
        }
        log::debug!(
            "keeping message from {} without a date: '{}'",
            record.sender(),
            record.date_text()
        );
    }

    record.set_parsed_date(date);
    Some(record)
}

/// Parser for line-oriented chat exports.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::ChatParser;
///
/// let parser = ChatParser::new();
/// let records = parser.parse_file("WhatsApp Chat with Study Group.txt")?;
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a sequence of text lines.
    pub fn parse_lines<I>(&self, lines: I) -> Vec<MessageRecord>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.parse_lines_with_stats(lines).0
    }

    /// Parses a sequence of text lines and reports what happened to them.
    pub fn parse_lines_with_stats<I>(&self, lines: I) -> (Vec<MessageRecord>, ParseStats)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        lines
            .into_iter()
            .fold(Reducer::default(), |mut reducer, line| {
                reducer.feed(line.as_ref());
                reducer
            })
            .finish(&self.config)
    }

    /// Parses a sequence of raw byte lines, decoding invalid UTF-8 lossily.
    pub fn parse_byte_lines<I>(&self, lines: I) -> Vec<MessageRecord>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        lines
            .into_iter()
            .fold(Reducer::default(), |mut reducer, bytes| {
                reducer.feed(&decode_line(bytes.as_ref()));
                reducer
            })
            .finish(&self.config)
            .0
    }

    /// Parses the full text of an export.
    pub fn parse_str(&self, content: &str) -> Vec<MessageRecord> {
        self.parse_lines(content.lines())
    }

    /// Parses an export from a reader.
    ///
    /// Lines are read as raw bytes so that a single line with invalid UTF-8
    /// cannot abort the parse.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if reading fails.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Vec<MessageRecord>, ChatlensError> {
        Ok(self.parse_reader_with_stats(reader)?.0)
    }

    /// Parses an export from a reader and reports what happened to its lines.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if reading fails.
    pub fn parse_reader_with_stats<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<(Vec<MessageRecord>, ParseStats), ChatlensError> {
        let reducer = reader
            .split(b'\n')
            .try_fold(Reducer::default(), |mut reducer, bytes| {
                reducer.feed(&decode_line(&bytes?));
                Ok::<_, std::io::Error>(reducer)
            })?;

        Ok(reducer.finish(&self.config))
    }

    /// Parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the file cannot be opened or read.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<MessageRecord>, ChatlensError> {
        Ok(self.parse_file_with_stats(path)?.0)
    }

    /// Parses an export file and reports what happened to its lines.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the file cannot be opened or read.
    pub fn parse_file_with_stats(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(Vec<MessageRecord>, ParseStats), ChatlensError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::with_capacity(self.config.buffer_size.max(1), file);
        self.parse_reader_with_stats(reader)
    }

    /// Opens an export file for streaming, one record at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the file cannot be opened.
    #[cfg(feature = "streaming")]
    pub fn stream(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<RecordStream<BufReader<File>>, ChatlensError> {
        let streaming_config = StreamingConfig::new().with_buffer_size(self.config.buffer_size);
        RecordStream::open(path, self.config.clone(), streaming_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateOrder;
    use chrono::NaiveDate;

    #[test]
    fn test_spec_scenario() {
        let records = parse([
            "1/1/24, 10:00 am - Bob: Hello",
            "How are you?",
            "1/1/24, 10:01 am - Amy: Good!",
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sender(), "Bob");
        assert_eq!(records[0].message(), "Hello How are you?");
        assert_eq!(records[1].sender(), "Amy");
        assert_eq!(records[1].message(), "Good!");
    }

    #[test]
    fn test_preamble_discarded() {
        let parser = ChatParser::new();
        let (records, stats) = parser.parse_lines_with_stats([
            "Messages and calls are end-to-end encrypted.",
            "",
            "1/1/24, 10:00 am - Bob: Hello",
        ]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message(), "Hello");
        assert_eq!(stats.discarded, 2);
        assert_eq!(stats.headers, 1);
        assert_eq!(stats.lines_read, 3);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let records = parse(["   1/1/24, 10:00 am - Bob: Hello   ", "\t  more  "]);
        assert_eq!(records[0].message(), "Hello more");
    }

    #[test]
    fn test_blank_line_appends_single_space() {
        let records = parse(["1/1/24, 10:00 am - Bob: Hello", "", "again"]);
        assert_eq!(records[0].message(), "Hello  again");
    }

    #[test]
    fn test_undated_dropped_by_default() {
        let parser = ChatParser::new();
        let (records, stats) = parser.parse_lines_with_stats([
            "1/1/24, 10:00 am - Bob: before",
            "32/13/9999, 10:00 am - Eve: bad date",
            "continued",
            "2/1/24, 10:00 am - Amy: after",
        ]);

        let senders: Vec<_> = records.iter().map(MessageRecord::sender).collect();
        assert_eq!(senders, ["Bob", "Amy"]);
        assert_eq!(stats.undated_dropped, 1);
        assert_eq!(stats.continuations, 1);
        assert_eq!(stats.records(), 2);
    }

    #[test]
    fn test_undated_kept_when_configured() {
        let parser = ChatParser::with_config(ParserConfig::new().with_keep_undated(true));
        let (records, stats) = parser.parse_lines_with_stats([
            "32/13/9999, 10:00 am - Eve: bad date",
            "1/1/24, 10:00 am - Bob: fine",
        ]);

        assert_eq!(records.len(), 2);
        assert!(records[0].parsed_date().is_none());
        assert!(records[1].parsed_date().is_some());
        assert_eq!(stats.undated_kept, 1);
        assert_eq!(stats.undated_dropped, 0);
    }

    #[test]
    fn test_month_first_config() {
        let parser =
            ChatParser::with_config(ParserConfig::new().with_date_order(DateOrder::MonthFirst));
        let records = parser.parse_str("1/15/24, 10:00 am - Bob: Hello");
        assert_eq!(records[0].parsed_date(), NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_parse_str_handles_crlf() {
        let records = ChatParser::new()
            .parse_str("1/1/24, 10:00 am - Bob: Hello\r\nsecond line\r\n2/1/24, 9:00 pm - Amy: Hi\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message(), "Hello second line");
    }

    #[test]
    fn test_parse_byte_lines_with_invalid_utf8() {
        let lines: Vec<&[u8]> = vec![
            b"1/1/24, 10:00 am - Bob: caf\xe9",
            b"\xff\xfe",
            b"2/1/24, 10:00 am - Amy: ok",
        ];
        let records = ChatParser::new().parse_byte_lines(lines);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message(), "caf\u{FFFD} \u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_parse_reader() {
        let input = b"Banner line\n1/1/24, 10:00 am - Bob: Hello\nworld\n".as_slice();
        let (records, stats) = ChatParser::new().parse_reader_with_stats(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message(), "Hello world");
        assert_eq!(stats.discarded, 1);
    }

    #[test]
    fn test_empty_input() {
        let records = parse(Vec::<String>::new());
        assert!(records.is_empty());
        assert!(ChatParser::new().parse_str("").is_empty());
    }
}
