//! Per-file streaming pipeline
//!
//! Orchestrates one source file through its states: Opening (resolve the
//! path, skip if absent), Streaming (one record at a time through filter,
//! enricher, and aggregator), Flushing (append the kept batch to the
//! extract and collect the finalized statistics), Finalized (batch dropped,
//! nothing carried to the next file).

use crate::app::models::{FileDelaySummary, FileReport, RawRecord, SummaryCollection};
use crate::app::services::aggregator::DelayAggregator;
use crate::app::services::extract_writer::ExtractWriter;
use crate::app::services::{enricher, filter};
use crate::app::services::lookup::LookupTable;
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Streaming transform-and-aggregate pipeline for monthly source files
///
/// Holds shared references to the two lookup tables; all per-file state
/// (batch buffer, aggregator, counters) is scoped to a single
/// [`process_file`](FilePipeline::process_file) call.
pub struct FilePipeline<'a> {
    carriers: &'a LookupTable,
    airports: &'a LookupTable,
}

/// Result of processing one source file
#[derive(Debug)]
pub struct FileOutcome {
    pub report: FileReport,
    pub summary: FileDelaySummary,
}

impl<'a> FilePipeline<'a> {
    pub fn new(carriers: &'a LookupTable, airports: &'a LookupTable) -> Self {
        Self { carriers, airports }
    }

    /// Process one source file end to end
    ///
    /// Returns `Ok(None)` when the source file is absent: a missing file is
    /// logged and skipped, never fatal to the run. On success the kept batch
    /// has been flushed to the extract writer and the finalized statistics
    /// appended to the summary collection under the given label.
    pub fn process_file(
        &self,
        path: &Path,
        label: &str,
        extract: &mut ExtractWriter,
        summaries: &mut SummaryCollection,
    ) -> Result<Option<FileOutcome>> {
        // Opening
        if !path.exists() {
            warn!("{}, skipping", Error::missing_source_file(path));
            return Ok(None);
        }

        let size_mb = std::fs::metadata(path)
            .map(|m| m.len() as f64 / 1_000_000.0)
            .unwrap_or(0.0);

        let mut reader = csv::ReaderBuilder::new().from_path(path).map_err(|e| {
            Error::csv_parsing(path.display().to_string(), "failed to open source", Some(e))
        })?;
        let headers = reader
            .headers()
            .map_err(|e| {
                Error::csv_parsing(path.display().to_string(), "failed to read header", Some(e))
            })?
            .clone();

        // Streaming
        let mut report = FileReport {
            label: label.to_string(),
            size_mb,
            ..Default::default()
        };
        let mut aggregator = DelayAggregator::new();
        // Batch buffer for this file only; dropped after the flush below
        let mut batch = Vec::new();

        for result in reader.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    // A malformed row never aborts the file
                    warn!("Skipping malformed row in {}: {}", path.display(), e);
                    continue;
                }
            };
            report.total_records += 1;

            let record = raw_record(&headers, &row);

            if filter::is_delayed(&record) {
                match enricher::enrich(&record, self.carriers, self.airports) {
                    Ok(enriched) => batch.push(enriched),
                    Err(e) => {
                        // Drop the record, continue the file
                        debug!("Dropping record in {}: {}", path.display(), e);
                        report.unknown_code_records += 1;
                    }
                }
            }

            // Statistics cover the full file population, kept or not
            match DelayAggregator::classify(&record) {
                Ok(bucket) => aggregator.accumulate(bucket, &record),
                Err(e) => {
                    debug!("Excluding record from statistics in {}: {}", path.display(), e);
                    report.unclassified_records += 1;
                }
            }
        }

        report.kept_records = batch.len() as u64;
        report.weekday_records = aggregator.weekday_records();
        report.weekend_records = aggregator.weekend_records();

        // Flushing
        extract.append_batch(&batch)?;
        let summary = aggregator.finalize();
        summaries.push(label, summary.clone());

        debug!(
            "Processed {}: total={} kept={} weekday={} weekend={}",
            path.display(),
            report.total_records,
            report.kept_records,
            report.weekday_records,
            report.weekend_records,
        );

        // Finalized: batch and aggregator go out of scope here
        Ok(Some(FileOutcome { report, summary }))
    }
}

fn raw_record(headers: &csv::StringRecord, row: &csv::StringRecord) -> RawRecord {
    let fields: HashMap<String, String> = headers
        .iter()
        .zip(row.iter())
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect();
    RawRecord::new(fields)
}
