//! Aggregate views over a parsed record sequence.
//!
//! - [`ChatSummary`] - totals, participants, media count, daily activity
//! - [`SenderSummary`] - activity of one sender
//! - [`PhraseReport`] - who mentioned a phrase, and when
//!
//! All three only read the records they are given; apply a
//! [`FilterConfig`](super::FilterConfig) first to summarize a subset.
//! Records without a parsed date count towards totals but not towards any
//! per-day figure.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::filter::PhraseFilter;
use crate::MessageRecord;
use crate::error::ChatlensError;

/// Overall statistics for a chat.
///
/// # Example
///
/// ```
/// use chatlens::core::ChatSummary;
///
/// let records = chatlens::parse([
///     "1/1/24, 10:00 am - Bob: Hello",
///     "1/1/24, 10:01 am - Amy: <Media omitted>",
///     "2/1/24, 9:00 am - Bob: Morning",
/// ]);
///
/// let summary = ChatSummary::from_records(&records);
/// assert_eq!(summary.total_messages, 3);
/// assert_eq!(summary.participants, ["Amy", "Bob"]);
/// assert_eq!(summary.media_shared, 1);
/// assert_eq!(summary.top_senders[0], ("Bob".to_string(), 2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatSummary {
    /// Number of records
    pub total_messages: usize,
    /// Distinct senders, sorted by name
    pub participants: Vec<String>,
    /// Records whose body contains the media placeholder
    pub media_shared: usize,
    /// Record count per normalized date
    pub messages_per_day: BTreeMap<NaiveDate, usize>,
    /// Senders by record count, highest first, ties broken by name
    pub top_senders: Vec<(String, usize)>,
}

impl ChatSummary {
    /// Computes totals and per-day activity over `records`.
    ///
    /// Undated records count toward totals and senders but not toward
    /// `messages_per_day`.
    pub fn from_records(records: &[MessageRecord]) -> Self {
        let mut per_sender: HashMap<&str, usize> = HashMap::new();
        let mut media_shared = 0;

        for record in records {
            *per_sender.entry(record.sender()).or_default() += 1;
            if record.is_media() {
                media_shared += 1;
            }
        }

        let mut participants: Vec<String> = per_sender.keys().map(|s| (*s).to_string()).collect();
        participants.sort();

        Self {
            total_messages: records.len(),
            participants,
            media_shared,
            messages_per_day: daily_counts(records.iter()),
            top_senders: ranked(per_sender),
        }
    }

    /// Number of distinct senders.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Earliest normalized date in the chat.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.messages_per_day.keys().next().copied()
    }

    /// Latest normalized date in the chat.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.messages_per_day.keys().next_back().copied()
    }

    /// The day with the most records. Earlier days win ties.
    pub fn busiest_day(&self) -> Option<(NaiveDate, usize)> {
        self.messages_per_day
            .iter()
            .fold(None, |best, (&date, &count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((date, count)),
            })
    }
}

/// Activity of a single sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderSummary {
    /// Sender name as matched (trimmed)
    pub sender: String,
    /// Number of records from this sender
    pub message_count: usize,
    /// Earliest normalized date of their records
    pub first_date: Option<NaiveDate>,
    /// Latest normalized date of their records
    pub last_date: Option<NaiveDate>,
    /// Record count per normalized date
    pub messages_per_day: BTreeMap<NaiveDate, usize>,
}

impl SenderSummary {
    /// Summarizes the records sent by `sender` (exact match).
    ///
    /// A sender with no records yields a zero count and no dates.
    pub fn for_sender(records: &[MessageRecord], sender: &str) -> Self {
        let sender = sender.trim();
        let own = || records.iter().filter(|r| r.sender() == sender);

        let messages_per_day = daily_counts(own());

        Self {
            sender: sender.to_string(),
            message_count: own().count(),
            first_date: messages_per_day.keys().next().copied(),
            last_date: messages_per_day.keys().next_back().copied(),
            messages_per_day,
        }
    }
}

/// Mentions of a phrase across a chat.
///
/// # Example
///
/// ```
/// use chatlens::core::PhraseReport;
///
/// let records = chatlens::parse([
///     "12/5/23, 9:42 pm - Asha: See you at night study",
///     "12/5/23, 9:50 pm - Ravi: Night study it is",
///     "13/5/23, 9:00 pm - Asha: night study again?",
/// ]);
///
/// let report = PhraseReport::search(&records, "night study", true)?;
/// assert_eq!(report.mentions, 3);
/// assert_eq!(report.unique_senders, 2);
/// assert_eq!(report.mentions_per_sender[0], ("Asha".to_string(), 2));
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseReport {
    /// The phrase as searched
    pub phrase: String,
    /// Number of records containing the phrase
    pub mentions: usize,
    /// Distinct senders among those records
    pub unique_senders: usize,
    /// Earliest date the phrase appears on
    pub first_mention: Option<NaiveDate>,
    /// Latest date the phrase appears on
    pub last_mention: Option<NaiveDate>,
    /// Mentions per normalized date
    pub timeline: BTreeMap<NaiveDate, usize>,
    /// Senders by mention count, highest first, ties broken by name
    pub mentions_per_sender: Vec<(String, usize)>,
}

impl PhraseReport {
    /// Builds a report for a case-insensitive phrase.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidPattern`] if the phrase cannot be compiled.
    pub fn search(
        records: &[MessageRecord],
        phrase: &str,
        whole_word: bool,
    ) -> Result<Self, ChatlensError> {
        let filter = PhraseFilter::new(phrase, whole_word)?;
        Ok(Self::with_filter(records, &filter))
    }

    /// Builds a report from an already compiled phrase.
    pub fn with_filter(records: &[MessageRecord], filter: &PhraseFilter) -> Self {
        let hits: Vec<&MessageRecord> = records
            .iter()
            .filter(|r| filter.matches(r.message()))
            .collect();

        let mut per_sender: HashMap<&str, usize> = HashMap::new();
        for record in &hits {
            *per_sender.entry(record.sender()).or_default() += 1;
        }

        let senders: BTreeSet<&str> = per_sender.keys().copied().collect();
        let timeline = daily_counts(hits.iter().copied());

        Self {
            phrase: filter.phrase().to_string(),
            mentions: hits.len(),
            unique_senders: senders.len(),
            first_mention: timeline.keys().next().copied(),
            last_mention: timeline.keys().next_back().copied(),
            timeline,
            mentions_per_sender: ranked(per_sender),
        }
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.mentions == 0
    }
}

fn daily_counts<'a>(records: impl Iterator<Item = &'a MessageRecord>) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for date in records.filter_map(MessageRecord::parsed_date) {
        *counts.entry(date).or_default() += 1;
    }
    counts
}

fn ranked(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, sender: &str, message: &str) -> MessageRecord {
        MessageRecord::new(format!("{day}/5/23"), "9:00 pm", sender, message)
            .with_parsed_date(NaiveDate::from_ymd_opt(2023, 5, day).unwrap())
    }

    fn sample() -> Vec<MessageRecord> {
        vec![
            record(12, "Asha", "See you at night study"),
            record(12, "Ravi", "<Media omitted>"),
            record(12, "Ravi", "night studying is hard"),
            record(13, "Mira", "Night Study tonight?"),
            record(14, "Asha", "ok"),
            MessageRecord::new("32/13/99", "1:00", "Zed", "undated night study"),
        ]
    }

    #[test]
    fn test_chat_summary() {
        let summary = ChatSummary::from_records(&sample());

        assert_eq!(summary.total_messages, 6);
        assert_eq!(summary.participants, ["Asha", "Mira", "Ravi", "Zed"]);
        assert_eq!(summary.participant_count(), 4);
        assert_eq!(summary.media_shared, 1);
        assert_eq!(summary.messages_per_day.len(), 3);
        assert_eq!(summary.first_date(), NaiveDate::from_ymd_opt(2023, 5, 12));
        assert_eq!(summary.last_date(), NaiveDate::from_ymd_opt(2023, 5, 14));
        assert_eq!(
            summary.busiest_day(),
            Some((NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(), 3))
        );
    }

    #[test]
    fn test_top_senders_ties_by_name() {
        let summary = ChatSummary::from_records(&sample());
        let names: Vec<_> = summary.top_senders.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["Asha", "Ravi", "Mira", "Zed"]);
        assert_eq!(summary.top_senders[0].1, 2);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ChatSummary::from_records(&[]);
        assert_eq!(summary, ChatSummary::default());
        assert_eq!(summary.busiest_day(), None);
    }

    #[test]
    fn test_sender_summary() {
        let summary = SenderSummary::for_sender(&sample(), "Asha");

        assert_eq!(summary.message_count, 2);
        assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2023, 5, 12));
        assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2023, 5, 14));
        assert_eq!(summary.messages_per_day.len(), 2);
    }

    #[test]
    fn test_sender_summary_unknown() {
        let summary = SenderSummary::for_sender(&sample(), "Nobody");
        assert_eq!(summary.message_count, 0);
        assert_eq!(summary.first_date, None);
    }

    #[test]
    fn test_phrase_report_whole_word() {
        let report = PhraseReport::search(&sample(), "night study", true).unwrap();

        assert_eq!(report.mentions, 3);
        assert_eq!(report.unique_senders, 3);
        // the undated mention counts but has no day
        assert_eq!(report.timeline.values().sum::<usize>(), 2);
        assert_eq!(report.first_mention, NaiveDate::from_ymd_opt(2023, 5, 12));
        assert_eq!(report.last_mention, NaiveDate::from_ymd_opt(2023, 5, 13));
    }

    #[test]
    fn test_phrase_report_substring() {
        let report = PhraseReport::search(&sample(), "night study", false).unwrap();
        assert_eq!(report.mentions, 4);
        assert_eq!(report.mentions_per_sender[0].0, "Asha");
    }

    #[test]
    fn test_phrase_report_no_hits() {
        let report = PhraseReport::search(&sample(), "exam", false).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.first_mention, None);
        assert!(report.mentions_per_sender.is_empty());
    }
}
