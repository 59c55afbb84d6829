//! Append-only writer for the enriched extract
//!
//! A single growing CSV table spans the whole run. The header row is written
//! exactly once, on the first flush; every later flush appends rows only.
//! The writer never rewrites or seeks backward, so re-running without
//! clearing the output file will append a header-free continuation.

use crate::app::models::EnrichedRecord;
use crate::constants::extract_header;
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writer appending enriched record batches to the extract file
#[derive(Debug)]
pub struct ExtractWriter {
    path: PathBuf,
    header: Vec<&'static str>,
    header_written: bool,
}

impl ExtractWriter {
    /// Create a writer targeting the given extract path
    ///
    /// Nothing is opened or written until the first batch is flushed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            header: extract_header(),
            header_written: false,
        }
    }

    /// Append one file's batch of enriched records
    ///
    /// Writes the shared header first if this is the first flush of the run.
    /// Record fields outside the header order are ignored; fields missing
    /// from a record are written empty. Returns the number of rows appended.
    pub fn append_batch(&mut self, records: &[EnrichedRecord]) -> Result<usize> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| {
                Error::io(format!("failed to open extract '{}'", self.path.display()), e)
            })?;

        let mut writer = csv::WriterBuilder::new().from_writer(file);

        if !self.header_written {
            writer.write_record(&self.header).map_err(|e| {
                Error::csv_parsing(
                    self.path.display().to_string(),
                    "failed to write extract header",
                    Some(e),
                )
            })?;
            self.header_written = true;
        }

        for record in records {
            let row = self
                .header
                .iter()
                .map(|column| record.get(column).unwrap_or(""));
            writer.write_record(row).map_err(|e| {
                Error::csv_parsing(
                    self.path.display().to_string(),
                    "failed to append extract row",
                    Some(e),
                )
            })?;
        }

        writer.flush().map_err(|e| {
            Error::io(format!("failed to flush extract '{}'", self.path.display()), e)
        })?;

        debug!("Appended {} rows to {}", records.len(), self.path.display());
        Ok(records.len())
    }

    /// Extract file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
