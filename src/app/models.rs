//! Data models for delay preprocessing
//!
//! This module contains the core data structures for representing raw and
//! enriched flight-operations records, the weekday/weekend delay statistics
//! gathered per source file, and the per-run reporting structures.

use crate::constants::DELAY_CAUSE_COLUMNS;
use serde::Serialize;
use std::collections::HashMap;

// =============================================================================
// Delay Causes and Buckets
// =============================================================================

/// The five fixed delay-cause categories
///
/// Each cause maps to one source column and one index in the per-bucket
/// count vectors. Causes are independent per-record indicators, not a
/// mutually exclusive partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayCause {
    Carrier,
    Weather,
    NationalAirspace,
    Security,
    LateAircraft,
}

impl DelayCause {
    /// All causes in canonical index order
    pub const ALL: [DelayCause; 5] = [
        DelayCause::Carrier,
        DelayCause::Weather,
        DelayCause::NationalAirspace,
        DelayCause::Security,
        DelayCause::LateAircraft,
    ];

    /// Source column carrying this cause's delay minutes
    pub fn column(self) -> &'static str {
        DELAY_CAUSE_COLUMNS[self.index()]
    }

    /// Position of this cause in the count vectors
    pub fn index(self) -> usize {
        match self {
            DelayCause::Carrier => 0,
            DelayCause::Weather => 1,
            DelayCause::NationalAirspace => 2,
            DelayCause::Security => 3,
            DelayCause::LateAircraft => 4,
        }
    }
}

/// Weekday/weekend partition used for per-file statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Monday through Friday
    Weekday,
    /// Saturday and Sunday
    Weekend,
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Weekday => write!(f, "weekday"),
            Bucket::Weekend => write!(f, "weekend"),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// A single source row addressed by column name
///
/// Ephemeral: exists only while one line is being filtered, enriched,
/// and accumulated. Missing columns read as absent, not as errors.
#[derive(Debug, Clone)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Get a field value by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Get a field value, treating a missing column as empty
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}

/// An enriched record ready for the extract
///
/// Holds the required columns verbatim plus the three derived name fields,
/// with delay-cause minutes normalized to whole integers. Created by the
/// enricher, consumed exactly once by the extract writer.
#[derive(Debug, Clone)]
pub struct EnrichedRecord {
    fields: HashMap<String, String>,
}

impl EnrichedRecord {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

// =============================================================================
// Per-File Delay Statistics
// =============================================================================

/// Raw delay/no-delay counters for one bucket
///
/// Two parallel 5-element vectors indexed by [`DelayCause`]. Every record
/// classified into this bucket increments exactly one of the two vectors at
/// every cause index, so `delays[i] + no_delays[i]` equals the bucket's
/// record total for each `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketCounts {
    pub delays: [u64; 5],
    pub no_delays: [u64; 5],
    /// Records classified into this bucket
    pub records: u64,
}

impl BucketCounts {
    /// Finalize counts into percentages of this bucket's record total
    ///
    /// An empty bucket yields all-zero percentages rather than failing.
    pub fn percentages(&self) -> BucketPercentages {
        let mut result = BucketPercentages::default();
        if self.records == 0 {
            return result;
        }
        for i in 0..5 {
            result.delays[i] = round3(self.delays[i] as f64 * 100.0 / self.records as f64);
            result.no_delays[i] = round3(self.no_delays[i] as f64 * 100.0 / self.records as f64);
        }
        result
    }
}

/// Percentages of a bucket's records with/without each delay cause
///
/// Each value is independently normalized against the bucket total and
/// rounded to 3 decimals; the delay and no-delay percentages for a cause
/// are not forced to sum to 100.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketPercentages {
    pub delays: [f64; 5],
    pub no_delays: [f64; 5],
}

/// Finalized weekday/weekend delay percentages for one source file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileDelaySummary {
    pub weekday: BucketPercentages,
    pub weekend: BucketPercentages,
}

/// Round to 3 decimal places
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// =============================================================================
// Summary Collection
// =============================================================================

/// Ordered collection of per-file delay summaries, one per processed file
///
/// Built incrementally across the run and serialized exactly once at the
/// end. Labels follow the `<source-group>-<month-number>` convention.
#[derive(Debug, Clone, Default)]
pub struct SummaryCollection {
    entries: Vec<(String, FileDelaySummary)>,
}

impl SummaryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one labeled per-file summary, preserving processing order
    pub fn push(&mut self, label: impl Into<String>, summary: FileDelaySummary) {
        self.entries.push((label.into(), summary));
    }

    pub fn entries(&self) -> &[(String, FileDelaySummary)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Progress Reporting
// =============================================================================

/// Per-file processing counters for progress reporting
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    /// Summary label, e.g. "2023-1"
    pub label: String,
    /// Source file size in MB
    pub size_mb: f64,
    /// Records read from the file
    pub total_records: u64,
    /// Records kept for the extract
    pub kept_records: u64,
    /// Records classified as weekday
    pub weekday_records: u64,
    /// Records classified as weekend
    pub weekend_records: u64,
    /// Records dropped because a code was absent from its lookup table
    pub unknown_code_records: u64,
    /// Records excluded from statistics due to an invalid calendar date
    pub unclassified_records: u64,
}

impl FileReport {
    /// Fraction of records kept for the extract
    pub fn compression_ratio(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.kept_records as f64 / self.total_records as f64
        }
    }

    /// Approximate extract contribution in MB (kept fraction of source size)
    pub fn approx_output_mb(&self) -> f64 {
        self.compression_ratio() * self.size_mb
    }
}

/// Run-wide processing totals for the final report
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Files processed to completion
    pub files_processed: usize,
    /// Files skipped because the source was absent
    pub files_skipped: usize,
    /// Files that failed mid-stream
    pub files_failed: usize,
    /// Total records kept for the extract across all files
    pub total_kept: u64,
    /// Approximate extract size in MB
    pub approx_extract_mb: f64,
    /// Wall-clock processing time
    pub processing_time: std::time::Duration,
}

impl RunReport {
    /// Fold one file's counters into the run totals
    pub fn absorb(&mut self, report: &FileReport) {
        self.files_processed += 1;
        self.total_kept += report.kept_records;
        self.approx_extract_mb += report.approx_output_mb();
    }
}
