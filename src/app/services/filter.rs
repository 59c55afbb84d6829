//! Delay filtering for raw flight records
//!
//! Decides whether a record carries any delay signal worth keeping for the
//! extract. Delay minutes are parsed leniently: empty, missing, or
//! unparsable values count as zero so a malformed field never aborts a file.

use crate::app::models::{DelayCause, RawRecord};
use tracing::trace;

/// Leniently parse a delay-minutes field
///
/// Tolerates decimal-formatted counts ("12.0"). Empty or unparsable input
/// yields 0.0; this is a deliberate tolerance policy, upgrading it to a
/// hard error would change which records classify as delayed.
pub fn parse_delay_minutes(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or_else(|_| {
        trace!("Treating unparsable delay value '{}' as zero", trimmed);
        0.0
    })
}

/// Parsed minutes for one cause of one record
pub fn delay_minutes(record: &RawRecord, cause: DelayCause) -> f64 {
    parse_delay_minutes(record.get_or_empty(cause.column()))
}

/// Returns true iff at least one delay-cause value is strictly positive
pub fn is_delayed(record: &RawRecord) -> bool {
    DelayCause::ALL
        .iter()
        .any(|cause| delay_minutes(record, *cause) > 0.0)
}
