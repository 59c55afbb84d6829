//! Delay Preprocessor Library
//!
//! A Rust library for preprocessing monthly flight-operations extracts into
//! a cleaned, enriched delay dataset plus a per-month delay-incidence summary.
//!
//! This library provides tools for:
//! - Loading carrier and airport lookup tables for O(1) code enrichment
//! - Streaming large monthly CSV files one record at a time
//! - Filtering records down to those carrying at least one delay cause
//! - Enriching kept records with human-readable airline and airport names
//! - Accumulating weekday/weekend delay-cause statistics per file
//! - Writing an append-only CSV extract and a run-wide JSON summary

pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod enricher;
        pub mod extract_writer;
        pub mod filter;
        pub mod lookup;
        pub mod pipeline;
        pub mod summary_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Bucket, DelayCause, EnrichedRecord, RawRecord};
pub use app::services::lookup::LookupTable;

/// Result type alias for the delay preprocessor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for preprocessing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Lookup table could not be loaded (fatal to the whole run)
    #[error("Lookup load error for '{path}': {message}")]
    LookupLoad {
        path: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Base data directory does not exist
    #[error("Base data directory not found: {path}")]
    BasePathMissing { path: std::path::PathBuf },

    /// Monthly source file is absent (recoverable, file is skipped)
    #[error("Source file not found: {path}")]
    MissingSourceFile { path: std::path::PathBuf },

    /// A record references a code absent from its lookup table
    /// (recoverable, record is dropped)
    #[error("Unknown code '{code}' in column '{column}'")]
    UnknownCode { column: String, code: String },

    /// Record date fields do not form a valid calendar date
    #[error("Invalid calendar date: {year}-{month}-{day}")]
    InvalidDate {
        year: String,
        month: String,
        day: String,
    },

    /// Summary document serialization failed
    #[error("Summary writing error: {message}")]
    SummaryWrite {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a lookup load error with context
    pub fn lookup_load(
        path: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::LookupLoad {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a base-path-missing error
    pub fn base_path_missing(path: impl Into<std::path::PathBuf>) -> Self {
        Self::BasePathMissing { path: path.into() }
    }

    /// Create a missing-source-file error
    pub fn missing_source_file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::MissingSourceFile { path: path.into() }
    }

    /// Create an unknown-code error
    pub fn unknown_code(column: impl Into<String>, code: impl Into<String>) -> Self {
        Self::UnknownCode {
            column: column.into(),
            code: code.into(),
        }
    }

    /// Create an invalid-date error
    pub fn invalid_date(
        year: impl Into<String>,
        month: impl Into<String>,
        day: impl Into<String>,
    ) -> Self {
        Self::InvalidDate {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }

    /// Create a summary writing error
    pub fn summary_write(message: impl Into<String>, source: Option<serde_json::Error>) -> Self {
        Self::SummaryWrite {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::SummaryWrite {
            message: "JSON serialization failed".to_string(),
            source: Some(error),
        }
    }
}
