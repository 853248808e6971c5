//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;
use std::time::{Duration, Instant};

use clap::Parser as ClapParser;

use chatlens::cli::Args;
use chatlens::core::{ChatSummary, PhraseReport, apply_filters};
use chatlens::format::{OutputFormat, write_to_format};
use chatlens::streaming::RecordIterator;
use chatlens::{ChatParser, ChatlensError, MessageRecord};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        log::debug!("{e:?}");
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose > 0 || args.quiet {
        builder.filter_level(args.log_level());
    }
    if let Err(err) = builder.try_init() {
        eprintln!("logger already initialized: {err}");
    }
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();

    let format: OutputFormat = args.format.into();
    let output_path = args.output_path();
    let output_display = output_path.display().to_string();

    // Validate filters before touching the input
    let filter_config = args.filter_config()?;

    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {output_display}");
    println!("📄 Format:  {format}");
    if args.streaming {
        println!("🌊 Mode:    Streaming");
    }
    if let Some(ref after) = args.after {
        println!("📅 After:   {after}");
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {before}");
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {from}");
    }
    if let Some(ref phrase) = args.search {
        let mode = if args.whole_word { "whole word" } else { "contains" };
        println!("🔍 Search:  \"{phrase}\" ({mode})");
    }
    println!();

    // Step 1: Parse
    let (records, parse_time) = if args.streaming {
        parse_streaming(args)?
    } else {
        parse_regular(args)?
    };
    let parsed_count = records.len();
    println!(
        "   Found {parsed_count} records ({:.2}s)",
        parse_time.as_secs_f64()
    );

    // Phrase statistics cover the whole chat, not just the filtered slice
    let phrase_report = match (args.summary, filter_config.phrase.as_ref()) {
        (true, Some(phrase)) => Some(PhraseReport::with_filter(&records, phrase)),
        _ => None,
    };

    // Step 2: Filter
    let records = if filter_config.is_active() {
        println!("🔍 Filtering records...");
        let filtered = apply_filters(records, &filter_config);
        println!("   {} records after filtering", filtered.len());
        filtered
    } else {
        records
    };

    // Step 3: Write
    println!("💾 Writing {format}...");
    let write_start = Instant::now();
    write_to_format(&records, &output_path, format, &args.output_config())?;
    println!(
        "   Written in {:.2}s",
        write_start.elapsed().as_secs_f64()
    );

    println!();
    println!("✅ Done! Output saved to {output_display}");

    if args.summary {
        print_summary(&ChatSummary::from_records(&records));
        if let Some(ref report) = phrase_report {
            print_phrase_report(report);
        }
    }

    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    println!(
        "   Throughput:  {:.0} records/sec",
        parsed_count as f64 / total_time.as_secs_f64().max(f64::EPSILON)
    );

    Ok(())
}

/// Parse the whole file in memory.
fn parse_regular(args: &Args) -> Result<(Vec<MessageRecord>, Duration), ChatlensError> {
    let parser = ChatParser::with_config(args.parser_config());
    println!("⏳ Parsing...");

    let parse_start = Instant::now();
    let (records, stats) = parser.parse_file_with_stats(&args.input)?;

    if stats.discarded > 0 {
        println!("   Skipped {} lines before the first message", stats.discarded);
    }
    if stats.undated_dropped > 0 {
        println!(
            "   Dropped {} records with unreadable dates",
            stats.undated_dropped
        );
    }
    if stats.undated_kept > 0 {
        println!("   Kept {} records without a date", stats.undated_kept);
    }

    Ok((records, parse_start.elapsed()))
}

/// Parse record by record.
fn parse_streaming(args: &Args) -> Result<(Vec<MessageRecord>, Duration), ChatlensError> {
    let parser = ChatParser::with_config(args.parser_config());
    println!("⏳ Streaming...");

    let parse_start = Instant::now();
    let mut stream = parser.stream(&args.input)?;
    let mut records = Vec::new();

    while let Some(record) = stream.next() {
        records.push(record?);
        if records.len() % 10_000 == 0 {
            if let Some(pct) = stream.progress() {
                log::info!("{} records, {pct:.1}% of input", records.len());
            }
        }
    }

    Ok((records, parse_start.elapsed()))
}

fn print_summary(summary: &ChatSummary) {
    println!();
    println!("📊 Summary:");
    println!("   Messages:      {}", summary.total_messages);
    println!("   Participants:  {}", summary.participant_count());
    println!("   Media shared:  {}", summary.media_shared);
    if let (Some(first), Some(last)) = (summary.first_date(), summary.last_date()) {
        println!("   Date range:    {first} to {last}");
    }
    if let Some((day, count)) = summary.busiest_day() {
        println!("   Busiest day:   {day} ({count} messages)");
    }
    if !summary.top_senders.is_empty() {
        println!("   Top senders:");
        for (sender, count) in summary.top_senders.iter().take(5) {
            println!("     {sender}: {count}");
        }
    }
}

fn print_phrase_report(report: &PhraseReport) {
    println!();
    println!("🔤 \"{}\":", report.phrase);
    if report.is_empty() {
        println!("   No mentions");
        return;
    }
    println!("   Mentions:        {}", report.mentions);
    println!("   Unique senders:  {}", report.unique_senders);
    if let (Some(first), Some(last)) = (report.first_mention, report.last_mention) {
        println!("   First mention:   {first}");
        println!("   Last mention:    {last}");
    }
    for (sender, count) in report.mentions_per_sender.iter().take(5) {
        println!("     {sender}: {count}");
    }
}
