//! Command execution for the delay preprocessor CLI
//!
//! Contains the run orchestration: logging setup, lookup loading, the
//! 24-file processing loop with progress reporting, and the final report.

use crate::app::models::{FileDelaySummary, RunReport, SummaryCollection};
use crate::app::services::extract_writer::ExtractWriter;
use crate::app::services::lookup::LookupTable;
use crate::app::services::pipeline::{FileOutcome, FilePipeline};
use crate::app::services::summary_writer;
use crate::cli::args::Args;
use crate::{Result, constants};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

/// One monthly source in the fixed chronological sequence
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Summary label, `<year>-<month-number>`
    pub label: String,
    /// Path relative to the base data directory, e.g. `2023/JAN_23.csv`
    pub relative_path: PathBuf,
}

/// Enumerate the fixed source sequence: 2023 Jan..Dec then 2024 Jan..Dec
///
/// The month number in the label is 1-based and derived from the position
/// modulo 12, so labels run 2023-1..2023-12, 2024-1..2024-12.
pub fn enumerate_sources() -> Vec<SourceFile> {
    let mut sources = Vec::with_capacity(24);
    for year in constants::SOURCE_YEARS {
        let yy = &year[year.len() - 2..];
        for (position, month) in constants::MONTH_ABBREVIATIONS.iter().enumerate() {
            sources.push(SourceFile {
                label: format!("{}-{}", year, position % 12 + 1),
                relative_path: PathBuf::from(year).join(format!("{month}_{yy}.csv")),
            });
        }
    }
    sources
}

/// Main command runner
///
/// Orchestrates the whole run: validates the base directory, loads both
/// lookup tables, streams each monthly source through the pipeline, then
/// writes the summary document and prints the final report.
pub fn run(args: Args) -> Result<RunReport> {
    let start_time = Instant::now();

    setup_logging(&args);

    info!("Starting delay preprocessing");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let base = args.data_dir.clone();

    println!(
        "{}",
        "Starting flight-delay preprocessing".bright_green().bold()
    );
    println!("  {} {}", "Data directory:".bright_cyan(), base.display());

    // Lookup tables are loaded exactly once, before any file processing
    println!("\n{}", "Loading lookup tables...".bright_yellow());
    let carriers = LookupTable::load(&base.join(constants::CARRIER_LOOKUP_FILE))?;
    let airports = LookupTable::load(&base.join(constants::AIRPORT_LOOKUP_FILE))?;
    println!(
        "  {} {} airlines, {} airports",
        "Loaded".bright_green(),
        carriers.len().to_string().bright_white().bold(),
        airports.len().to_string().bright_white().bold()
    );

    let sources = enumerate_sources();
    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let pipeline = FilePipeline::new(&carriers, &airports);
    let mut extract = ExtractWriter::new(base.join(constants::EXTRACT_FILE_NAME));
    let mut summaries = SummaryCollection::new();
    let mut run_report = RunReport::default();

    println!("\n{}", "Processing monthly sources...".bright_yellow());
    for (i, source) in sources.iter().enumerate() {
        if let Some(pb) = &progress_bar {
            pb.set_position(i as u64);
            pb.set_message(source.label.clone());
        }

        let path = base.join(&source.relative_path);
        match pipeline.process_file(&path, &source.label, &mut extract, &mut summaries) {
            Ok(Some(outcome)) => {
                if args.show_progress() {
                    report_file(source, &outcome);
                }
                run_report.absorb(&outcome.report);
            }
            Ok(None) => {
                if args.show_progress() {
                    println!(
                        "  {} {} ({})",
                        "Skipped".bright_red(),
                        source.relative_path.display(),
                        "file not found".red()
                    );
                }
                run_report.files_skipped += 1;
            }
            Err(e) => {
                // Keep going; only lookup loading is fatal to the run
                error!("Failed to process {}: {}", path.display(), e);
                run_report.files_failed += 1;
            }
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Processing complete");
    }

    summary_writer::write(&base.join(constants::SUMMARY_FILE_NAME), &summaries)?;

    run_report.processing_time = start_time.elapsed();
    report_run(&base, &run_report);
    info!(
        "Run complete: {} files processed, {} skipped, {} failed",
        run_report.files_processed, run_report.files_skipped, run_report.files_failed
    );

    Ok(run_report)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("delay_preprocessor={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", args.log_level());
}

/// Format the per-file delay-stats line: the summary label followed by the
/// finalized weekday/weekend percentage vectors
fn delay_stats_line(label: &str, summary: &FileDelaySummary) -> String {
    // Plain floats, serialization cannot fail
    let stats = serde_json::to_string(summary).unwrap_or_default();
    format!("{label}, Delays: {stats}")
}

/// Print per-file progress in the manner of the original reporter
fn report_file(source: &SourceFile, outcome: &FileOutcome) {
    let report = &outcome.report;
    println!("\n{}:", source.relative_path.display().to_string().bold());
    println!(
        "  {} {:.2} MB",
        "File size =".bright_cyan(),
        report.size_mb
    );
    println!(
        "  {} {} \t {} {}",
        "Total =".bright_cyan(),
        report.total_records,
        "Kept =".bright_cyan(),
        report.kept_records
    );
    if report.unknown_code_records > 0 {
        println!(
            "  {} {}",
            "Dropped (unknown code) =".yellow(),
            report.unknown_code_records
        );
    }
    println!(
        "  {} {:.3}",
        "Compressed =".bright_cyan(),
        report.compression_ratio()
    );
    println!(
        "  {}",
        delay_stats_line(&report.label, &outcome.summary).bright_cyan()
    );
}

/// Print the run-wide final report
fn report_run(base: &Path, report: &RunReport) {
    println!("\n{}", "Preprocessing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        report.processing_time.as_millis()
    );
    println!(
        "  {} {} processed, {} skipped, {} failed",
        "Files:".bright_cyan(),
        report.files_processed.to_string().bright_white(),
        report.files_skipped,
        report.files_failed
    );
    println!(
        "  {} {}",
        "Total records kept:".bright_cyan(),
        report.total_kept.to_string().bright_white().bold()
    );
    println!(
        "  {} {:.2} MB",
        "Approx. extract size:".bright_cyan(),
        report.approx_extract_mb
    );
    println!(
        "  {} {}",
        "Extract:".bright_cyan(),
        base.join(constants::EXTRACT_FILE_NAME).display()
    );
    println!(
        "  {} {}",
        "Summary:".bright_cyan(),
        base.join(constants::SUMMARY_FILE_NAME).display()
    );
}
