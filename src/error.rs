//! Unified error types for chatlens.
//!
//! Parsing chat content never fails: lines that cannot be interpreted are
//! folded into the previous record or discarded, and records with dates that
//! cannot be normalized are dropped. [`ChatlensError`] therefore only covers
//! the edges of the library: reading files, building filters from user input,
//! and writing output.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::MessageRecord;
///
/// fn load() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all fallible chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred while reading an export or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A date supplied to a filter could not be parsed.
    ///
    /// Filter dates expect `YYYY-MM-DD`.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A phrase filter could not be compiled into a matcher.
    #[error("Invalid search phrase '{phrase}': {source}")]
    InvalidPattern {
        /// The phrase as given by the caller
        phrase: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The requested format is unknown or its feature is disabled.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format family (e.g. "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output buffer was not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

impl ChatlensError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid pattern error for a search phrase.
    pub fn invalid_pattern(phrase: impl Into<String>, source: regex::Error) -> Self {
        ChatlensError::InvalidPattern {
            phrase: phrase.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is an invalid date error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if this is an invalid search phrase error.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, ChatlensError::InvalidPattern { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing.txt");
        let err: ChatlensError = io_err.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = ChatlensError::invalid_date("01-01-2024");
        assert!(err.is_invalid_date());
        assert_eq!(
            err.to_string(),
            "Invalid date '01-01-2024'. Expected format: YYYY-MM-DD"
        );
    }

    #[test]
    fn test_invalid_format_display() {
        let err = ChatlensError::invalid_format("output", "Unknown file extension: '.txt'");
        assert!(err.to_string().starts_with("Invalid output format"));
        assert!(!err.is_io());
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        use std::error::Error as _;

        let regex_err = regex::Regex::new("(").unwrap_err();
        let err = ChatlensError::invalid_pattern("(", regex_err);
        assert!(err.is_invalid_pattern());
        assert!(err.source().is_some());
    }

    #[test]
    fn test_utf8_conversion() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: ChatlensError = bad.into();
        assert!(err.to_string().contains("output conversion"));
    }
}
