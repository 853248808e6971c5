//! Configuration types for the parser.
//!
//! These structs carry no CLI framework dependencies and can be built in code
//! or deserialized from any serde format.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{DateOrder, ParserConfig};
//! use chatlens::ChatParser;
//!
//! let config = ParserConfig::new()
//!     .with_date_order(DateOrder::MonthFirst)
//!     .with_keep_undated(true);
//!
//! let parser = ChatParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Order of the day and month components in a slash-separated date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `DD/MM/YY` as exported by most non-US locales.
    #[default]
    DayFirst,
    /// `MM/DD/YY` as exported by US locales.
    MonthFirst,
}

/// Configuration for chat log parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
///
/// let config = ParserConfig::new().with_buffer_size(256 * 1024);
/// assert!(!config.keep_undated);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// How to read the day and month of the date token (default: day first)
    pub date_order: DateOrder,

    /// Keep records whose date cannot be normalized, with no parsed date,
    /// instead of dropping them (default: false)
    pub keep_undated: bool,

    /// Buffer size for reading files (default: 64KB)
    pub buffer_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::DayFirst,
            keep_undated: false,
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date component order.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Sets whether records with unparseable dates are kept.
    #[must_use]
    pub fn with_keep_undated(mut self, keep: bool) -> Self {
        self.keep_undated = keep;
        self
    }

    /// Sets the read buffer size. Zero is raised to one byte.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_default() {
        let config = ParserConfig::default();
        assert_eq!(config.date_order, DateOrder::DayFirst);
        assert!(!config.keep_undated);
        assert_eq!(config.buffer_size, 64 * 1024);
    }

    #[test]
    fn test_parser_config_builder() {
        let config = ParserConfig::new()
            .with_date_order(DateOrder::MonthFirst)
            .with_keep_undated(true)
            .with_buffer_size(1024);

        assert_eq!(config.date_order, DateOrder::MonthFirst);
        assert!(config.keep_undated);
        assert_eq!(config.buffer_size, 1024);
    }

    #[test]
    fn test_zero_buffer_size_is_raised() {
        assert_eq!(ParserConfig::new().with_buffer_size(0).buffer_size, 1);
    }

    #[test]
    fn test_parser_config_serde() {
        let config = ParserConfig::new().with_date_order(DateOrder::MonthFirst);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""date_order":"month_first""#));

        let parsed: ParserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.date_order, DateOrder::MonthFirst);
    }
}
