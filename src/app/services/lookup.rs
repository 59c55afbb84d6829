//! Lookup table service for O(1) code-to-description enrichment
//!
//! This module loads the carrier and airport lookup sources into in-memory
//! tables indexed by code. Both tables are loaded exactly once before any
//! file processing starts and are read-only for the lifetime of the run.

use crate::constants::{LOOKUP_CODE_COLUMN, LOOKUP_DESCRIPTION_COLUMN};
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Immutable code→description mapping providing O(1) lookups
///
/// Built from a two-column delimited source with `Code` and `Description`
/// headers. Shared by reference into every component that enriches records;
/// there is no ambient global state.
#[derive(Debug, Clone)]
pub struct LookupTable {
    entries: HashMap<String, String>,
    source: PathBuf,
}

impl LookupTable {
    /// Load a lookup table from a Code/Description CSV source
    ///
    /// Fails with [`Error::LookupLoad`] if the source is missing, unreadable,
    /// or lacks the required columns. This error is fatal to the whole run:
    /// nothing can be enriched without the table.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::lookup_load(
                path.display().to_string(),
                "file does not exist",
                None,
            ));
        }

        let mut reader = csv::ReaderBuilder::new().from_path(path).map_err(|e| {
            Error::lookup_load(path.display().to_string(), "failed to open", Some(e))
        })?;

        let headers = reader
            .headers()
            .map_err(|e| {
                Error::lookup_load(path.display().to_string(), "failed to read header", Some(e))
            })?
            .clone();

        let code_idx = Self::column_index(&headers, LOOKUP_CODE_COLUMN, path)?;
        let description_idx = Self::column_index(&headers, LOOKUP_DESCRIPTION_COLUMN, path)?;

        let mut entries = HashMap::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                Error::lookup_load(path.display().to_string(), "malformed row", Some(e))
            })?;
            let code = record.get(code_idx).unwrap_or("").to_string();
            let description = record.get(description_idx).unwrap_or("").to_string();
            entries.insert(code, description);
        }

        debug!("Loaded {} lookup entries from {}", entries.len(), path.display());

        Ok(Self {
            entries,
            source: path.to_path_buf(),
        })
    }

    fn column_index(headers: &csv::StringRecord, column: &str, path: &Path) -> Result<usize> {
        headers.iter().position(|h| h == column).ok_or_else(|| {
            Error::lookup_load(
                path.display().to_string(),
                format!("missing required column '{column}'"),
                None,
            )
        })
    }

    /// Get the description for a code (O(1))
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Number of entries loaded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path the table was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_lookup(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_success() {
        let dir = TempDir::new().unwrap();
        let path = write_lookup(
            &dir,
            "L_UNIQUE_CARRIERS.csv",
            "Code,Description\nAA,American Airlines Inc.\nDL,Delta Air Lines Inc.\n",
        );

        let table = LookupTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("AA"), Some("American Airlines Inc."));
        assert_eq!(table.get("DL"), Some("Delta Air Lines Inc."));
        assert!(table.get("ZZ").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = LookupTable::load(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(Error::LookupLoad { .. })));
    }

    #[test]
    fn test_load_missing_required_column() {
        let dir = TempDir::new().unwrap();
        let path = write_lookup(&dir, "bad.csv", "Code,Name\nAA,American\n");
        let result = LookupTable::load(&path);
        assert!(matches!(result, Err(Error::LookupLoad { .. })));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_lookup(
            &dir,
            "L_AIRPORT.csv",
            "Code,Description,Region\nATL,\"Atlanta, GA: Hartsfield-Jackson\",South\n",
        );
        let table = LookupTable::load(&path).unwrap();
        assert_eq!(table.get("ATL"), Some("Atlanta, GA: Hartsfield-Jackson"));
    }
}
