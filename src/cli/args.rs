//! Command-line argument definitions for the delay preprocessor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the flight-delay preprocessor
///
/// Streams 24 monthly flight-operations extracts (2023 and 2024), keeps the
/// records with at least one nonzero delay cause, enriches them with airline
/// and airport names, and writes the cumulative extract plus a weekday/weekend
/// delay summary back into the data directory.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "delay-preprocessor",
    version,
    about = "Filter, enrich and summarise monthly flight-delay extracts",
    long_about = "Processes a year's worth of per-month flight-operations CSV files in a single \
                  streaming pass per file. Records with at least one nonzero delay cause are \
                  enriched with human-readable airline and airport names and appended to a \
                  cumulative extract; every record contributes to per-month weekday/weekend \
                  delay-incidence statistics written as a JSON summary."
)]
pub struct Args {
    /// Base data directory
    ///
    /// Must contain L_UNIQUE_CARRIERS.csv, L_AIRPORT.csv, and the monthly
    /// sources at <year>/<MON>_<yy>.csv (e.g. 2023/JAN_23.csv). Outputs are
    /// written into the same directory.
    #[arg(value_name = "PATH", help = "Base data directory")]
    pub data_dir: PathBuf,

    /// Enable verbose (debug) logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Suppress progress output, log warnings and errors only
    #[arg(short, long, conflicts_with = "verbose", help = "Suppress progress output")]
    pub quiet: bool,
}

impl Args {
    /// Validate the argument combination before running
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.exists() {
            return Err(Error::base_path_missing(self.data_dir.clone()));
        }
        if !self.data_dir.is_dir() {
            return Err(Error::base_path_missing(self.data_dir.clone()));
        }
        Ok(())
    }

    /// Log level implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Whether per-file progress should be reported on the terminal
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
