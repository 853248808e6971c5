//! Streaming record reader.
//!
//! Reads an export line by line and yields each record as soon as the next
//! header line (or the end of input) proves it complete. Only the record being
//! assembled is held in memory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::MessageRecord;
use crate::config::ParserConfig;
use crate::error::{ChatlensError, Result};
use crate::parser::normalize_record;
use crate::parsing::{decode_line, match_header};

use super::{RecordIterator, StreamingConfig};

/// Iterator over the records of a line-oriented export.
///
/// Applies exactly the same header, continuation, and date rules as
/// [`ChatParser`](crate::ChatParser), so collecting a stream gives the same
/// records as parsing the whole input at once, except that bodies are capped
/// at [`StreamingConfig::max_message_size`].
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
/// use chatlens::streaming::{RecordStream, StreamingConfig};
///
/// let input = "1/1/24, 10:00 am - Bob: Hello\nHow are you?\n1/1/24, 10:01 am - Amy: Good!\n";
/// let stream = RecordStream::new(input.as_bytes(), ParserConfig::new(), StreamingConfig::new());
///
/// let records: Vec<_> = stream.filter_map(Result::ok).collect();
/// assert_eq!(records[0].message(), "Hello How are you?");
/// assert_eq!(records[1].message(), "Good!");
/// ```
pub struct RecordStream<R: BufRead> {
    reader: R,
    total_bytes: Option<u64>,
    bytes_read: u64,
    parser_config: ParserConfig,
    config: StreamingConfig,
    line_buffer: Vec<u8>,
    pending: Option<MessageRecord>,
    truncated: bool,
    finished: bool,
}

impl RecordStream<BufReader<File>> {
    /// Opens an export file for streaming.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the file cannot be opened.
    pub fn open(
        path: impl AsRef<Path>,
        parser_config: ParserConfig,
        config: StreamingConfig,
    ) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let file_size = file.metadata()?.len();
        let reader = BufReader::with_capacity(config.buffer_size.max(1), file);

        Ok(Self::new(reader, parser_config, config).with_total_bytes(file_size))
    }
}

impl<R: BufRead> RecordStream<R> {
    /// Creates a stream over any buffered reader.
    pub fn new(reader: R, parser_config: ParserConfig, config: StreamingConfig) -> Self {
        Self {
            reader,
            total_bytes: None,
            bytes_read: 0,
            parser_config,
            config,
            line_buffer: Vec::with_capacity(4096),
            pending: None,
            truncated: false,
            finished: false,
        }
    }

    /// Sets the input size used for progress reporting.
    #[must_use]
    pub fn with_total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    fn read_line(&mut self) -> std::io::Result<bool> {
        self.line_buffer.clear();
        let bytes = self.reader.read_until(b'\n', &mut self.line_buffer)?;
        self.bytes_read += bytes as u64;
        Ok(bytes > 0)
    }

    /// Folds one line into the pending record. Returns the previous record
    /// when the line starts a new one.
    fn process_line(&mut self, line: &str) -> Option<MessageRecord> {
        let limit = self.config.max_message_size;

        if let Some(fields) = match_header(line) {
            let mut record =
                MessageRecord::new(fields.date, fields.time, fields.sender, fields.message);
            self.truncated = record.truncate_message(limit);
            if self.truncated {
                warn_truncated(&record, limit);
            }
            return self.pending.replace(record);
        }

        match self.pending.as_mut() {
            Some(pending) if !self.truncated => {
                if !pending.append_continuation_bounded(line, limit) {
                    warn_truncated(pending, limit);
                    self.truncated = true;
                }
            }
            Some(_) => {}
            None => log::trace!("discarding line before the first message"),
        }

        None
    }
}

fn warn_truncated(record: &MessageRecord, limit: usize) {
    log::warn!(
        "message from {} exceeds {limit} bytes, truncating and ignoring further lines",
        record.sender()
    );
}

impl<R: BufRead + Send> RecordIterator for RecordStream<R> {
    fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<MessageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.read_line() {
                Ok(true) => {
                    let bytes = std::mem::take(&mut self.line_buffer);
                    let completed = self.process_line(&decode_line(&bytes));
                    self.line_buffer = bytes;

                    if let Some(record) = completed
                        .and_then(|record| normalize_record(record, &self.parser_config))
                    {
                        return Some(Ok(record));
                    }
                }
                Ok(false) => self.finished = true,
                Err(e) => {
                    self.finished = true;
                    self.pending = None;
                    return Some(Err(ChatlensError::from(e)));
                }
            }
        }

        // End of input: the pending record is complete.
        self.pending
            .take()
            .and_then(|record| normalize_record(record, &self.parser_config))
            .map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    fn stream_of(input: &str) -> RecordStream<Cursor<Vec<u8>>> {
        RecordStream::new(
            Cursor::new(input.as_bytes().to_vec()),
            ParserConfig::new(),
            StreamingConfig::new(),
        )
        .with_total_bytes(input.len() as u64)
    }

    #[test]
    fn test_stream_multiline_messages() {
        let txt = "15/1/24, 10:30 am - Alice: Line 1
Line 2
Line 3
15/1/24, 10:31 am - Bob: Reply";

        let records: Vec<_> = stream_of(txt).filter_map(Result::ok).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message(), "Line 1 Line 2 Line 3");
        assert_eq!(records[1].message(), "Reply");
        assert_eq!(records[1].sender(), "Bob");
    }

    #[test]
    fn test_stream_drops_undated_but_keeps_neighbours() {
        let txt = "1/1/24, 10:00 am - Bob: Hello
32/13/9999, 10:00 am - Eve: never
1/1/24, 10:01 am - Amy: Good!
";
        let records: Vec<_> = stream_of(txt).filter_map(Result::ok).collect();
        let senders: Vec<_> = records.iter().map(MessageRecord::sender).collect();
        assert_eq!(senders, ["Bob", "Amy"]);
    }

    #[test]
    fn test_stream_discards_preamble() {
        let txt = "Chat export banner\n\n1/1/24, 10:00 am - Bob: Hello\n";
        let records: Vec<_> = stream_of(txt).filter_map(Result::ok).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message(), "Hello");
    }

    #[test]
    fn test_progress_reporting() {
        let txt = "1/1/24, 10:00 am - Bob: Hello\n1/1/24, 10:01 am - Amy: Good!\n";
        let mut stream = stream_of(txt);

        let _: Vec<_> = stream.by_ref().collect();

        assert_eq!(stream.bytes_processed(), txt.len() as u64);
        assert_eq!(stream.progress(), Some(100.0));
    }

    #[test]
    fn test_max_message_size_caps_body() {
        let txt = "1/1/24, 10:00 am - Bob: 12345\nabcdef\nxy\n1/1/24, 10:01 am - Amy: ok\n";
        let stream = RecordStream::new(
            txt.as_bytes(),
            ParserConfig::new(),
            StreamingConfig::new().with_max_message_size(10),
        );

        let records: Vec<_> = stream.filter_map(Result::ok).collect();
        // "12345 abcdef" is cut at 10 bytes; "xy" is ignored
        assert_eq!(records[0].message(), "12345 abcd");
        assert_eq!(records[1].message(), "ok");
    }

    #[test]
    fn test_max_message_size_caps_header_body() {
        let txt = "1/1/24, 10:00 am - Bob: 123456789012345\nmore\n1/1/24, 10:01 am - Amy: ok\n";
        let stream = RecordStream::new(
            txt.as_bytes(),
            ParserConfig::new(),
            StreamingConfig::new().with_max_message_size(10),
        );

        let records: Vec<_> = stream.filter_map(Result::ok).collect();
        assert_eq!(records[0].message(), "1234567890");
        assert_eq!(records[1].message(), "ok");
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk gone"))
        }
    }

    #[test]
    fn test_io_error_ends_stream() {
        let mut stream = RecordStream::new(
            io::BufReader::new(FailingReader),
            ParserConfig::new(),
            StreamingConfig::new(),
        );

        assert!(matches!(stream.next(), Some(Err(ChatlensError::Io(_)))));
        assert!(stream.next().is_none());
    }
}
