//! Application constants for the delay preprocessor
//!
//! This module contains the fixed column sets, file naming conventions,
//! and source sequencing used throughout the preprocessing pipeline.

// =============================================================================
// Column Sets
// =============================================================================

/// The five delay-cause columns, in canonical index order
pub const DELAY_CAUSE_COLUMNS: [&str; 5] = [
    "CARRIER_DELAY",
    "WEATHER_DELAY",
    "NAS_DELAY",
    "SECURITY_DELAY",
    "LATE_AIRCRAFT_DELAY",
];

/// Columns copied verbatim from each source record into the extract
///
/// Grouped as: time, origin state, destination state, departure details,
/// arrival details, flight details, then the five delay causes.
pub const REQUIRED_COLUMNS: [&str; 26] = [
    // Time
    "YEAR",
    "MONTH",
    "DAY_OF_MONTH",
    // Origin airport details
    "ORIGIN_STATE_ABR",
    "ORIGIN_STATE_NM",
    // Destination airport details
    "DEST_STATE_ABR",
    "DEST_STATE_NM",
    // Departure details
    "CRS_DEP_TIME",
    "DEP_TIME",
    "DEP_DELAY_NEW",
    "TAXI_OUT",
    "WHEELS_OFF",
    // Arrival details
    "CRS_ARR_TIME",
    "ARR_TIME",
    "ARR_DELAY_NEW",
    "TAXI_IN",
    "WHEELS_ON",
    // Flight details
    "CRS_ELAPSED_TIME",
    "ACTUAL_ELAPSED_TIME",
    "AIR_TIME",
    "DISTANCE",
    // Delay details
    "CARRIER_DELAY",
    "WEATHER_DELAY",
    "NAS_DELAY",
    "SECURITY_DELAY",
    "LATE_AIRCRAFT_DELAY",
];

/// Derived name columns attached during enrichment
pub const AIRLINE_NAME_COLUMN: &str = "AIRLINE_NAME";
pub const ORIGIN_AIRPORT_NAME_COLUMN: &str = "ORIGIN_AIRPORT_NAME";
pub const DEST_AIRPORT_NAME_COLUMN: &str = "DEST_AIRPORT_NAME";

/// Raw code columns consumed by enrichment (not part of the extract)
pub const CARRIER_CODE_COLUMN: &str = "OP_UNIQUE_CARRIER";
pub const ORIGIN_CODE_COLUMN: &str = "ORIGIN";
pub const DEST_CODE_COLUMN: &str = "DEST";

/// Date columns used for weekday/weekend classification
pub const YEAR_COLUMN: &str = "YEAR";
pub const MONTH_COLUMN: &str = "MONTH";
pub const DAY_COLUMN: &str = "DAY_OF_MONTH";

/// Build the extract header: required columns with the three derived name
/// columns inserted at positions 4, 5, and 8 of the final ordering.
pub fn extract_header() -> Vec<&'static str> {
    let mut header: Vec<&'static str> = REQUIRED_COLUMNS.to_vec();
    header.insert(4, AIRLINE_NAME_COLUMN);
    header.insert(5, ORIGIN_AIRPORT_NAME_COLUMN);
    header.insert(8, DEST_AIRPORT_NAME_COLUMN);
    header
}

// =============================================================================
// Lookup Table Sources
// =============================================================================

/// Column names expected in every lookup source
pub const LOOKUP_CODE_COLUMN: &str = "Code";
pub const LOOKUP_DESCRIPTION_COLUMN: &str = "Description";

/// Carrier-code lookup file, relative to the base data directory
pub const CARRIER_LOOKUP_FILE: &str = "L_UNIQUE_CARRIERS.csv";

/// Airport-code lookup file, relative to the base data directory
pub const AIRPORT_LOOKUP_FILE: &str = "L_AIRPORT.csv";

// =============================================================================
// Source Sequencing and Outputs
// =============================================================================

/// Month abbreviations used in monthly source file names
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Source years, processed in chronological order
pub const SOURCE_YEARS: [&str; 2] = ["2023", "2024"];

/// Append-only enriched extract, relative to the base data directory
pub const EXTRACT_FILE_NAME: &str = "airlines_delay_data_v3.csv";

/// Run-wide delay summary document, relative to the base data directory
pub const SUMMARY_FILE_NAME: &str = "all_week.json";

// =============================================================================
// Process Exit Codes
// =============================================================================

pub mod exit_codes {
    /// Run completed (skipped files do not affect the exit code)
    pub const SUCCESS: i32 = 0;

    /// Unclassified failure
    pub const FAILURE: i32 = 1;

    /// The supplied base data directory does not exist
    pub const BASE_PATH_MISSING: i32 = 2;

    /// A lookup table could not be loaded; nothing can be enriched
    pub const LOOKUP_LOAD_FAILED: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_header_positions() {
        let header = extract_header();
        assert_eq!(header.len(), REQUIRED_COLUMNS.len() + 3);
        assert_eq!(header[4], AIRLINE_NAME_COLUMN);
        assert_eq!(header[5], ORIGIN_AIRPORT_NAME_COLUMN);
        assert_eq!(header[8], DEST_AIRPORT_NAME_COLUMN);
    }

    #[test]
    fn test_extract_header_preserves_required_order() {
        let header = extract_header();
        assert_eq!(&header[..4], &REQUIRED_COLUMNS[..4]);
        // After removing the derived columns the required order is intact
        let without_derived: Vec<&str> = header
            .iter()
            .copied()
            .filter(|c| {
                *c != AIRLINE_NAME_COLUMN
                    && *c != ORIGIN_AIRPORT_NAME_COLUMN
                    && *c != DEST_AIRPORT_NAME_COLUMN
            })
            .collect();
        assert_eq!(without_derived, REQUIRED_COLUMNS.to_vec());
    }

    #[test]
    fn test_delay_causes_are_required_columns() {
        for cause in DELAY_CAUSE_COLUMNS {
            assert!(REQUIRED_COLUMNS.contains(&cause));
        }
    }
}
