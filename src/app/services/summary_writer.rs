//! Run-wide summary document writer
//!
//! Serializes the ordered summary collection once, after all files have
//! been processed. The document is a JSON array with one single-key object
//! per file: `[{"2023-1": {...}}, {"2023-2": {...}}, ...]`.

use crate::app::models::SummaryCollection;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Write the summary collection to the given path
pub fn write(path: &Path, collection: &SummaryCollection) -> Result<()> {
    let document = to_document(collection)?;

    let file = File::create(path).map_err(|e| {
        Error::io(format!("failed to create summary '{}'", path.display()), e)
    })?;
    serde_json::to_writer(BufWriter::new(file), &document)
        .map_err(|e| Error::summary_write("failed to serialize summary document", Some(e)))?;

    debug!(
        "Wrote {} summary entries to {}",
        collection.len(),
        path.display()
    );
    Ok(())
}

/// Build the serialized document: an ordered list of one-entry objects
pub fn to_document(collection: &SummaryCollection) -> Result<Value> {
    let mut entries = Vec::with_capacity(collection.len());
    for (label, summary) in collection.entries() {
        let stats = serde_json::to_value(summary)
            .map_err(|e| Error::summary_write(format!("entry '{label}'"), Some(e)))?;
        let mut object = Map::with_capacity(1);
        object.insert(label.clone(), stats);
        entries.push(Value::Object(object));
    }
    Ok(Value::Array(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{BucketPercentages, FileDelaySummary};
    use tempfile::TempDir;

    fn summary_with_carrier_delay(pct: f64) -> FileDelaySummary {
        FileDelaySummary {
            weekday: BucketPercentages {
                delays: [pct, 0.0, 0.0, 0.0, 0.0],
                no_delays: [100.0 - pct, 100.0, 100.0, 100.0, 100.0],
            },
            weekend: BucketPercentages::default(),
        }
    }

    #[test]
    fn test_document_is_ordered_list_of_one_entry_objects() {
        let mut collection = SummaryCollection::new();
        collection.push("2023-1", summary_with_carrier_delay(42.857));
        collection.push("2023-2", summary_with_carrier_delay(10.0));

        let document = to_document(&collection).unwrap();
        let entries = document.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        let first = entries[0].as_object().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(
            first["2023-1"]["weekday"]["delays"][0].as_f64().unwrap(),
            42.857
        );
        assert!(entries[1].as_object().unwrap().contains_key("2023-2"));
    }

    #[test]
    fn test_write_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("all_week.json");

        let mut collection = SummaryCollection::new();
        collection.push("2024-12", summary_with_carrier_delay(5.5));
        write(&path, &collection).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(
            parsed[0]["2024-12"]["weekday"]["no_delays"][0]
                .as_f64()
                .unwrap(),
            94.5
        );
    }

    #[test]
    fn test_empty_collection_writes_empty_array() {
        let document = to_document(&SummaryCollection::new()).unwrap();
        assert_eq!(document, serde_json::json!([]));
    }
}
