//! Filter records by date range, sender, and phrase.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] / [`filter_records`] for applying them.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Records from one sender |
//! | Phrase | [`with_phrase`](FilterConfig::with_phrase) | Case-insensitive substring |
//! | Whole word | [`with_whole_word`](FilterConfig::with_whole_word) | Case-insensitive whole-word phrase |
//!
//! # Examples
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//!
//! let records = chatlens::parse([
//!     "12/5/23, 9:42 pm - Asha: See you at night study",
//!     "12/5/23, 9:43 pm - Ravi: night studying is overrated",
//!     "13/5/23, 8:00 am - Asha: morning",
//! ]);
//!
//! let config = FilterConfig::new().with_whole_word("Night Study")?;
//! let filtered = apply_filters(records, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].sender(), "Asha");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! # Behavior Notes
//!
//! - Records without a parsed date are **excluded** when date filters are active
//! - Sender matching is exact, on the trimmed display name
//! - Phrases are matched literally; regex metacharacters have no special meaning
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

use crate::MessageRecord;
use crate::error::ChatlensError;

/// A compiled case-insensitive phrase matcher.
#[derive(Debug, Clone)]
pub struct PhraseFilter {
    phrase: String,
    whole_word: bool,
    regex: Regex,
}

impl PhraseFilter {
    /// Compiles a phrase matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidPattern`] if the phrase cannot be
    /// compiled (e.g. it exceeds the regex size limit).
    pub fn new(phrase: impl Into<String>, whole_word: bool) -> Result<Self, ChatlensError> {
        let phrase = phrase.into();
        let escaped = regex::escape(&phrase);
        let pattern = if whole_word {
            format!(r"\b{escaped}\b")
        } else {
            escaped
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ChatlensError::invalid_pattern(phrase.as_str(), e))?;

        Ok(Self {
            phrase,
            whole_word,
            regex,
        })
    }

    /// Returns the phrase as given.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Returns `true` if only whole-word occurrences match.
    pub fn is_whole_word(&self) -> bool {
        self.whole_word
    }

    /// Returns `true` if the text contains the phrase.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Configuration for filtering records.
///
/// Filters are combined with AND logic: a record must match all active
/// filters to be included in the result.
///
/// # Examples
///
/// ```
/// use chatlens::core::filter::FilterConfig;
///
/// # fn main() -> chatlens::Result<()> {
/// let by_sender = FilterConfig::new().with_sender("Asha");
///
/// let by_date = FilterConfig::new()
///     .with_date_from("2023-05-01")?
///     .with_date_to("2023-05-31")?;
///
/// let combined = FilterConfig::new()
///     .with_sender("Asha")
///     .with_phrase("night")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only records on or after this date.
    pub after: Option<NaiveDate>,

    /// Include only records on or before this date.
    pub before: Option<NaiveDate>,

    /// Include only records from this sender.
    pub from: Option<String>,

    /// Include only records whose message contains this phrase.
    pub phrase: Option<PhraseFilter>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.after = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.before = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the start date directly.
    #[must_use]
    pub fn with_after(mut self, date: NaiveDate) -> Self {
        self.after = Some(date);
        self
    }

    /// Sets the end date directly.
    #[must_use]
    pub fn with_before(mut self, date: NaiveDate) -> Self {
        self.before = Some(date);
        self
    }

    /// Sets the sender filter.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into().trim().to_string());
        self
    }

    /// Keeps records whose message contains `phrase`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidPattern`] if the phrase cannot be compiled.
    pub fn with_phrase(mut self, phrase: &str) -> Result<Self, ChatlensError> {
        self.phrase = Some(PhraseFilter::new(phrase, false)?);
        Ok(self)
    }

    /// Keeps records whose message contains `phrase` as whole words,
    /// ignoring case. `"night study"` matches "Night study tonight?" but not
    /// "night studying".
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidPattern`] if the phrase cannot be compiled.
    pub fn with_whole_word(mut self, phrase: &str) -> Result<Self, ChatlensError> {
        self.phrase = Some(PhraseFilter::new(phrase, true)?);
        Ok(self)
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.from.is_some() || self.phrase.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the record passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        if let Some(ref from) = self.from {
            if record.sender() != from {
                return false;
            }
        }

        if self.has_date_filter() {
            let Some(date) = record.parsed_date() else {
                return false;
            };
            if self.after.is_some_and(|after| date < after) {
                return false;
            }
            if self.before.is_some_and(|before| date > before) {
                return false;
            }
        }

        if let Some(ref phrase) = self.phrase {
            if !phrase.matches(record.message()) {
                return false;
            }
        }

        true
    }
}

/// Parse a filter date in `YYYY-MM-DD` format.
fn parse_filter_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Filters records, consuming the input.
///
/// If no filters are active, returns the records unchanged. Order is
/// preserved.
pub fn apply_filters(records: Vec<MessageRecord>, config: &FilterConfig) -> Vec<MessageRecord> {
    if !config.is_active() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| config.matches(record))
        .collect()
}

/// Filters records by reference, leaving the input untouched.
pub fn filter_records<'a>(
    records: &'a [MessageRecord],
    config: &FilterConfig,
) -> Vec<&'a MessageRecord> {
    records
        .iter()
        .filter(|record| config.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(sender: &str, message: &str, date: Option<&str>) -> MessageRecord {
        let record = MessageRecord::new("1/1/24", "10:00 am", sender, message);
        match date {
            Some(d) => record.with_parsed_date(NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            None => record,
        }
    }

    #[test]
    fn test_filter_by_sender_is_exact() {
        let records = vec![
            make_record("Asha", "Hello", None),
            make_record("Ravi", "Hi", None),
            make_record("asha", "Bye", None),
        ];

        let config = FilterConfig::new().with_sender(" Asha ");
        let filtered = apply_filters(records, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].message(), "Hello");
    }

    #[test]
    fn test_filter_by_date_range_inclusive() {
        let records = vec![
            make_record("Asha", "Old", Some("2024-01-01")),
            make_record("Asha", "Start", Some("2024-06-01")),
            make_record("Asha", "End", Some("2024-06-30")),
            make_record("Asha", "New", Some("2024-07-01")),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_date_to("2024-06-30")
            .unwrap();
        let filtered = apply_filters(records, &config);

        let messages: Vec<_> = filtered.iter().map(MessageRecord::message).collect();
        assert_eq!(messages, ["Start", "End"]);
    }

    #[test]
    fn test_undated_excluded_when_date_filter() {
        let records = vec![
            make_record("Asha", "With date", Some("2024-06-15")),
            make_record("Asha", "No date", None),
        ];

        let config = FilterConfig::new().with_date_from("2024-01-01").unwrap();
        let filtered = apply_filters(records, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].message(), "With date");
    }

    #[test]
    fn test_phrase_contains_case_insensitive() {
        let records = vec![
            make_record("Asha", "See you at NIGHT STUDY", None),
            make_record("Ravi", "night studying again", None),
            make_record("Mira", "day study", None),
        ];

        let config = FilterConfig::new().with_phrase("night study").unwrap();
        let filtered = filter_records(&records, &config);

        assert_eq!(filtered.len(), 2);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_whole_word_phrase() {
        let records = vec![
            make_record("Asha", "See you at night study", None),
            make_record("Ravi", "night studying again", None),
            make_record("Mira", "Night Study, then sleep", None),
            make_record("Jo", "midnight study", None),
        ];

        let config = FilterConfig::new().with_whole_word("night study").unwrap();
        let filtered = apply_filters(records, &config);

        let senders: Vec<_> = filtered.iter().map(MessageRecord::sender).collect();
        assert_eq!(senders, ["Asha", "Mira"]);
    }

    #[test]
    fn test_phrase_is_literal() {
        let records = vec![
            make_record("Asha", "price is $5 (approx)", None),
            make_record("Ravi", "price is 5 approx", None),
        ];

        let config = FilterConfig::new().with_phrase("$5 (approx)").unwrap();
        let filtered = apply_filters(records, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].sender(), "Asha");
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(ChatlensError::InvalidDate { .. })));
    }

    #[test]
    fn test_combined_filters() {
        let records = vec![
            make_record("Asha", "old night study", Some("2024-01-01")),
            make_record("Asha", "new night study", Some("2024-06-15")),
            make_record("Ravi", "new night study", Some("2024-06-15")),
            make_record("Asha", "new day", Some("2024-06-15")),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_sender("Asha")
            .with_whole_word("night study")
            .unwrap();

        let filtered = apply_filters(records, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].message(), "new night study");
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().with_sender("Asha").is_active());
        assert!(FilterConfig::new().with_phrase("x").unwrap().is_active());
        assert!(
            FilterConfig::new()
                .with_date_to("2024-01-01")
                .unwrap()
                .is_active()
        );
    }

    #[test]
    fn test_inactive_filter_returns_input() {
        let records = vec![make_record("Asha", "a", None), make_record("Ravi", "b", None)];
        let filtered = apply_filters(records.clone(), &FilterConfig::new());
        assert_eq!(filtered, records);
    }
}
