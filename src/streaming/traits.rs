//! Core traits and configuration for streaming.
//!
//! - [`RecordIterator`] - Iterator with progress tracking
//! - [`StreamingConfig`] - Configuration options

use crate::MessageRecord;
use crate::error::Result;

/// Iterator over records with progress tracking.
///
/// Items are `Err` only for I/O failures; the stream ends after yielding one.
///
/// Extends the standard [`Iterator`] trait with methods for monitoring
/// how much of the input has been consumed, useful for progress bars and
/// logging.
///
/// # Object Safety
///
/// This trait is object-safe, enabling dynamic dispatch via `Box<dyn RecordIterator>`.
///
/// # Examples
///
/// ```no_run
/// use chatlens::ChatParser;
/// use chatlens::streaming::RecordIterator;
///
/// let mut stream = ChatParser::new().stream("export.txt")?;
///
/// while let Some(record) = stream.next() {
///     let record = record?;
///     if let Some(pct) = stream.progress() {
///         eprintln!("\r{:.1}% {}", pct, record.sender());
///     }
/// }
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub trait RecordIterator: Iterator<Item = Result<MessageRecord>> + Send {
    /// Returns approximate progress as a percentage (0.0 to 100.0).
    ///
    /// Returns `None` if progress cannot be determined (e.g., unknown input size).
    fn progress(&self) -> Option<f64> {
        let total = self.total_bytes()?;
        if total == 0 {
            return None;
        }
        Some((self.bytes_processed() as f64 / total as f64) * 100.0)
    }

    /// Returns the number of bytes consumed so far.
    fn bytes_processed(&self) -> u64;

    /// Returns the total input size in bytes, if known.
    fn total_bytes(&self) -> Option<u64> {
        None
    }
}

/// Configuration options for streaming.
///
/// # Examples
///
/// ```
/// use chatlens::streaming::StreamingConfig;
///
/// let config = StreamingConfig::new()
///     .with_buffer_size(128 * 1024)
///     .with_max_message_size(1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StreamingConfig {
    /// Buffer size for file reading.
    ///
    /// Default: 64KB. Larger buffers improve throughput but use more memory.
    pub buffer_size: usize,

    /// Maximum size of a single message body in bytes.
    ///
    /// Default: 10MB. A body that grows past this limit, from its header line
    /// or a continuation, is cut at the limit on a char boundary and further
    /// continuation lines are ignored.
    pub max_message_size: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,             // 64KB
            max_message_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl StreamingConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the buffer size. Zero is raised to one byte.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Sets the maximum message size.
    #[must_use]
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }
}
