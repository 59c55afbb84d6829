//! Record enrichment with human-readable lookup names
//!
//! Projects a raw record onto the extract schema: the required columns are
//! copied verbatim, three derived name fields are attached via the lookup
//! tables, and delay-cause minutes are normalized to whole integers.

use crate::app::models::{DelayCause, EnrichedRecord, RawRecord};
use crate::app::services::filter::delay_minutes;
use crate::app::services::lookup::LookupTable;
use crate::constants::{
    AIRLINE_NAME_COLUMN, CARRIER_CODE_COLUMN, DEST_AIRPORT_NAME_COLUMN, DEST_CODE_COLUMN,
    ORIGIN_AIRPORT_NAME_COLUMN, ORIGIN_CODE_COLUMN, REQUIRED_COLUMNS,
};
use crate::{Error, Result};
use std::collections::HashMap;

/// Enrich a raw record into its extract form
///
/// Fails with [`Error::UnknownCode`] if the carrier, origin, or destination
/// code is absent from its lookup table. The failure is fatal to that record
/// only: the caller drops it and continues with the next record, never the
/// whole run.
///
/// Delay-cause values are truncated to the integer minute (floor of the
/// float value); sub-minute fractions are deliberately lost to match the
/// extract's coarse granularity.
pub fn enrich(
    record: &RawRecord,
    carriers: &LookupTable,
    airports: &LookupTable,
) -> Result<EnrichedRecord> {
    let airline_name = lookup_name(record, CARRIER_CODE_COLUMN, carriers)?;
    let origin_name = lookup_name(record, ORIGIN_CODE_COLUMN, airports)?;
    let dest_name = lookup_name(record, DEST_CODE_COLUMN, airports)?;

    let mut fields: HashMap<String, String> = HashMap::with_capacity(REQUIRED_COLUMNS.len() + 3);
    for column in REQUIRED_COLUMNS {
        fields.insert(column.to_string(), record.get_or_empty(column).to_string());
    }

    fields.insert(AIRLINE_NAME_COLUMN.to_string(), airline_name);
    fields.insert(ORIGIN_AIRPORT_NAME_COLUMN.to_string(), origin_name);
    fields.insert(DEST_AIRPORT_NAME_COLUMN.to_string(), dest_name);

    for cause in DelayCause::ALL {
        let minutes = delay_minutes(record, cause).trunc().max(0.0) as i64;
        fields.insert(cause.column().to_string(), minutes.to_string());
    }

    Ok(EnrichedRecord::new(fields))
}

fn lookup_name(record: &RawRecord, code_column: &str, table: &LookupTable) -> Result<String> {
    let code = record.get_or_empty(code_column);
    table
        .get(code)
        .map(str::to_string)
        .ok_or_else(|| Error::unknown_code(code_column, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_tables() -> (TempDir, LookupTable, LookupTable) {
        let dir = TempDir::new().unwrap();
        let carriers_path = dir.path().join("carriers.csv");
        let airports_path = dir.path().join("airports.csv");
        fs::write(
            &carriers_path,
            "Code,Description\nAA,American Airlines Inc.\n",
        )
        .unwrap();
        fs::write(
            &airports_path,
            "Code,Description\nJFK,New York JFK\nLAX,Los Angeles International\n",
        )
        .unwrap();
        let carriers = LookupTable::load(&carriers_path).unwrap();
        let airports = LookupTable::load(&airports_path).unwrap();
        (dir, carriers, airports)
    }

    fn test_record() -> RawRecord {
        let mut fields = HashMap::new();
        fields.insert("YEAR".to_string(), "2023".to_string());
        fields.insert("MONTH".to_string(), "6".to_string());
        fields.insert("DAY_OF_MONTH".to_string(), "15".to_string());
        fields.insert("OP_UNIQUE_CARRIER".to_string(), "AA".to_string());
        fields.insert("ORIGIN".to_string(), "JFK".to_string());
        fields.insert("DEST".to_string(), "LAX".to_string());
        fields.insert("DISTANCE".to_string(), "2475".to_string());
        fields.insert("CARRIER_DELAY".to_string(), "15.7".to_string());
        fields.insert("WEATHER_DELAY".to_string(), "".to_string());
        RawRecord::new(fields)
    }

    #[test]
    fn test_enrich_attaches_derived_names() {
        let (_dir, carriers, airports) = test_tables();
        let enriched = enrich(&test_record(), &carriers, &airports).unwrap();

        assert_eq!(enriched.get("AIRLINE_NAME"), Some("American Airlines Inc."));
        assert_eq!(enriched.get("ORIGIN_AIRPORT_NAME"), Some("New York JFK"));
        assert_eq!(
            enriched.get("DEST_AIRPORT_NAME"),
            Some("Los Angeles International")
        );
    }

    #[test]
    fn test_enrich_copies_required_columns_verbatim() {
        let (_dir, carriers, airports) = test_tables();
        let enriched = enrich(&test_record(), &carriers, &airports).unwrap();

        assert_eq!(enriched.get("YEAR"), Some("2023"));
        assert_eq!(enriched.get("DISTANCE"), Some("2475"));
        // Columns absent from the source end up empty, not missing
        assert_eq!(enriched.get("AIR_TIME"), Some(""));
        // The raw code columns are not part of the extract schema
        assert_eq!(enriched.get("OP_UNIQUE_CARRIER"), None);
    }

    #[test]
    fn test_enrich_truncates_delay_minutes() {
        let (_dir, carriers, airports) = test_tables();
        let enriched = enrich(&test_record(), &carriers, &airports).unwrap();

        assert_eq!(enriched.get("CARRIER_DELAY"), Some("15"));
        assert_eq!(enriched.get("WEATHER_DELAY"), Some("0"));
        assert_eq!(enriched.get("NAS_DELAY"), Some("0"));
    }

    #[test]
    fn test_enrich_clamps_negative_delay_minutes() {
        let (_dir, carriers, airports) = test_tables();
        let mut fields = HashMap::new();
        fields.insert("OP_UNIQUE_CARRIER".to_string(), "AA".to_string());
        fields.insert("ORIGIN".to_string(), "JFK".to_string());
        fields.insert("DEST".to_string(), "LAX".to_string());
        fields.insert("CARRIER_DELAY".to_string(), "-3.2".to_string());
        let record = RawRecord::new(fields);

        let enriched = enrich(&record, &carriers, &airports).unwrap();
        assert_eq!(enriched.get("CARRIER_DELAY"), Some("0"));
    }

    #[test]
    fn test_enrich_is_deterministic() {
        let (_dir, carriers, airports) = test_tables();
        let record = test_record();
        let first = enrich(&record, &carriers, &airports).unwrap();
        let second = enrich(&record, &carriers, &airports).unwrap();
        assert_eq!(first.get("AIRLINE_NAME"), second.get("AIRLINE_NAME"));
        assert_eq!(first.get("CARRIER_DELAY"), second.get("CARRIER_DELAY"));
    }

    #[test]
    fn test_unknown_carrier_code_fails_record() {
        let (_dir, carriers, airports) = test_tables();
        let mut fields = HashMap::new();
        fields.insert("OP_UNIQUE_CARRIER".to_string(), "ZZ".to_string());
        fields.insert("ORIGIN".to_string(), "JFK".to_string());
        fields.insert("DEST".to_string(), "LAX".to_string());
        let record = RawRecord::new(fields);

        let result = enrich(&record, &carriers, &airports);
        match result {
            Err(Error::UnknownCode { column, code }) => {
                assert_eq!(column, "OP_UNIQUE_CARRIER");
                assert_eq!(code, "ZZ");
            }
            other => panic!("expected UnknownCode error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_airport_code_fails_record() {
        let (_dir, carriers, airports) = test_tables();
        let mut fields = HashMap::new();
        fields.insert("OP_UNIQUE_CARRIER".to_string(), "AA".to_string());
        fields.insert("ORIGIN".to_string(), "XXX".to_string());
        fields.insert("DEST".to_string(), "LAX".to_string());
        let record = RawRecord::new(fields);

        assert!(matches!(
            enrich(&record, &carriers, &airports),
            Err(Error::UnknownCode { .. })
        ));
    }
}
