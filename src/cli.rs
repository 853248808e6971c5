//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - Output format options as accepted on the command line
//!
//! [`Args`] also knows how to turn itself into the library's configuration
//! types, so the binary only wires steps together.
//!
//! ```rust
//! use chatlens::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::try_parse_from(["chatlens", "chat.txt", "-f", "json"]).unwrap();
//! assert_eq!(args.output_path().to_str(), Some("chat_records.json"));
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DateOrder, ParserConfig};
use crate::core::filter::FilterConfig;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

/// Output file used when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "chat_records.csv";

/// Turn a WhatsApp-style chat export into structured records.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt -o records.json -f json
    chatlens chat.txt --after 2023-05-01 --before 2023-05-31 --from Asha
    chatlens chat.txt --search \"night study\" --whole-word --summary
    chatlens huge_chat.txt --streaming -f jsonl")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Path to output file [default: chat_records.<format>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Keep records on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep records on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep records from this sender only
    #[arg(long, value_name = "NAME")]
    pub from: Option<String>,

    /// Keep records containing this phrase (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Match --search as whole words only
    #[arg(short, long, requires = "search")]
    pub whole_word: bool,

    /// Read dates as month/day/year instead of day/month/year
    #[arg(long)]
    pub month_first: bool,

    /// Keep records whose date cannot be parsed (empty Date column)
    #[arg(long)]
    pub keep_undated: bool,

    /// Include the raw time column
    #[arg(short = 't', long)]
    pub time: bool,

    /// Include the raw date column
    #[arg(long)]
    pub raw_date: bool,

    /// Print chat statistics after writing
    #[arg(long)]
    pub summary: bool,

    /// Read the export incrementally instead of loading it at once
    #[arg(long)]
    pub streaming: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Output path, with the default file name following the chosen format.
    pub fn output_path(&self) -> PathBuf {
        match self.output {
            Some(ref path) => path.clone(),
            None => crate::format::OutputFormat::from(self.format).apply_extension(DEFAULT_OUTPUT),
        }
    }

    pub fn parser_config(&self) -> ParserConfig {
        let order = if self.month_first {
            DateOrder::MonthFirst
        } else {
            DateOrder::DayFirst
        };
        ParserConfig::new()
            .with_date_order(order)
            .with_keep_undated(self.keep_undated)
    }

    /// Builds the record filter from `--after`, `--before`, `--from`, and `--search`.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed dates or an uncompilable phrase.
    pub fn filter_config(&self) -> Result<FilterConfig, ChatlensError> {
        let mut config = FilterConfig::new();

        if let Some(ref after) = self.after {
            config = config.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            config = config.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            config = config.with_sender(from.as_str());
        }
        if let Some(ref phrase) = self.search {
            config = if self.whole_word {
                config.with_whole_word(phrase)?
            } else {
                config.with_phrase(phrase)?
            };
        }

        Ok(config)
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_time: self.time,
            include_raw_date: self.raw_date,
        }
    }

    /// Log filter derived from `-v` / `-q`.
    ///
    /// Only applied when one of the flags is given; otherwise `RUST_LOG`
    /// decides, defaulting to `warn`.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Output format options.
///
/// Mirrors [`crate::format::OutputFormat`] for clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Semicolon-delimited CSV (default)
    #[default]
    Csv,

    /// JSON array
    Json,

    /// One JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
