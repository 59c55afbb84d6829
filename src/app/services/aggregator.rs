//! Weekday/weekend delay-cause accumulation for one source file
//!
//! The aggregator sees every record of a file regardless of whether the
//! filter kept it: the statistics reflect the full file population, not
//! just the extract. Counters are created fresh per file, finalized once at
//! end of file, and discarded after the labeled summary is collected.

use crate::app::models::{Bucket, BucketCounts, DelayCause, FileDelaySummary, RawRecord};
use crate::app::services::filter::delay_minutes;
use crate::constants::{DAY_COLUMN, MONTH_COLUMN, YEAR_COLUMN};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate, Weekday};

/// Per-file delay statistics accumulator
#[derive(Debug, Clone, Default)]
pub struct DelayAggregator {
    weekday: BucketCounts,
    weekend: BucketCounts,
}

impl DelayAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a record as weekday or weekend from its date fields
    ///
    /// Interprets `YEAR`/`MONTH`/`DAY_OF_MONTH` as a calendar date; weekday
    /// means Monday through Friday. Fails with [`Error::InvalidDate`] when
    /// the fields do not form a valid date; the caller excludes such a
    /// record from the statistics and continues the file.
    pub fn classify(record: &RawRecord) -> Result<Bucket> {
        let year = record.get_or_empty(YEAR_COLUMN);
        let month = record.get_or_empty(MONTH_COLUMN);
        let day = record.get_or_empty(DAY_COLUMN);

        let date = parse_date(year, month, day)
            .ok_or_else(|| Error::invalid_date(year, month, day))?;

        match date.weekday() {
            Weekday::Sat | Weekday::Sun => Ok(Bucket::Weekend),
            _ => Ok(Bucket::Weekday),
        }
    }

    /// Accumulate one record into a bucket's counters
    ///
    /// For each of the five causes, increments the bucket's delay counter at
    /// that index if the leniently parsed value is strictly positive, else
    /// the no-delay counter.
    pub fn accumulate(&mut self, bucket: Bucket, record: &RawRecord) {
        let counts = self.bucket_mut(bucket);
        counts.records += 1;
        for cause in DelayCause::ALL {
            if delay_minutes(record, cause) > 0.0 {
                counts.delays[cause.index()] += 1;
            } else {
                counts.no_delays[cause.index()] += 1;
            }
        }
    }

    /// Finalize counters into per-bucket percentages, rounded to 3 decimals
    ///
    /// Each counter is divided by its own bucket's record total; a bucket
    /// with zero records yields all-zero percentages instead of failing the
    /// file.
    pub fn finalize(&self) -> FileDelaySummary {
        FileDelaySummary {
            weekday: self.weekday.percentages(),
            weekend: self.weekend.percentages(),
        }
    }

    /// Records classified as weekday so far
    pub fn weekday_records(&self) -> u64 {
        self.weekday.records
    }

    /// Records classified as weekend so far
    pub fn weekend_records(&self) -> u64 {
        self.weekend.records
    }

    /// All records accumulated so far
    pub fn total_records(&self) -> u64 {
        self.weekday.records + self.weekend.records
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut BucketCounts {
        match bucket {
            Bucket::Weekday => &mut self.weekday,
            Bucket::Weekend => &mut self.weekend,
        }
    }
}

fn parse_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(year: &str, month: &str, day: &str, carrier_delay: &str) -> RawRecord {
        let mut fields = HashMap::new();
        fields.insert("YEAR".to_string(), year.to_string());
        fields.insert("MONTH".to_string(), month.to_string());
        fields.insert("DAY_OF_MONTH".to_string(), day.to_string());
        fields.insert("CARRIER_DELAY".to_string(), carrier_delay.to_string());
        RawRecord::new(fields)
    }

    #[test]
    fn test_classify_weekday() {
        // 2023-06-15 is a Thursday
        let bucket = DelayAggregator::classify(&record("2023", "6", "15", "0")).unwrap();
        assert_eq!(bucket, Bucket::Weekday);
    }

    #[test]
    fn test_classify_weekend() {
        // 2023-06-17 is a Saturday, 2023-06-18 a Sunday
        for day in ["17", "18"] {
            let bucket = DelayAggregator::classify(&record("2023", "6", day, "0")).unwrap();
            assert_eq!(bucket, Bucket::Weekend);
        }
    }

    #[test]
    fn test_classify_invalid_date() {
        assert!(matches!(
            DelayAggregator::classify(&record("2023", "2", "30", "0")),
            Err(Error::InvalidDate { .. })
        ));
        assert!(matches!(
            DelayAggregator::classify(&record("", "", "", "0")),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_accumulate_counts_every_cause() {
        let mut aggregator = DelayAggregator::new();
        aggregator.accumulate(Bucket::Weekday, &record("2023", "6", "15", "15.0"));

        assert_eq!(aggregator.weekday.records, 1);
        assert_eq!(aggregator.weekday.delays, [1, 0, 0, 0, 0]);
        assert_eq!(aggregator.weekday.no_delays, [0, 1, 1, 1, 1]);
        assert_eq!(aggregator.weekend.records, 0);
    }

    #[test]
    fn test_bucket_totals_partition_records() {
        let mut aggregator = DelayAggregator::new();
        for _ in 0..7 {
            aggregator.accumulate(Bucket::Weekday, &record("2023", "6", "15", "0"));
        }
        for _ in 0..3 {
            aggregator.accumulate(Bucket::Weekend, &record("2023", "6", "17", "0"));
        }
        assert_eq!(
            aggregator.weekday_records() + aggregator.weekend_records(),
            aggregator.total_records()
        );
        assert_eq!(aggregator.total_records(), 10);
    }

    /// 10 records: 3 delayed (carrier, 15.0 min) on weekdays, 7 weekday
    /// total, 3 weekend total, no delays on the weekend.
    #[test]
    fn test_finalize_weekday_weekend_scenario() {
        let mut aggregator = DelayAggregator::new();
        for i in 0..7 {
            let minutes = if i < 3 { "15.0" } else { "0" };
            aggregator.accumulate(Bucket::Weekday, &record("2023", "6", "15", minutes));
        }
        for _ in 0..3 {
            aggregator.accumulate(Bucket::Weekend, &record("2023", "6", "17", "0"));
        }

        let summary = aggregator.finalize();
        assert_eq!(summary.weekday.delays[0], 42.857);
        assert_eq!(summary.weekday.no_delays[0], 57.143);
        assert_eq!(summary.weekend.delays[0], 0.0);
        assert_eq!(summary.weekend.no_delays[0], 100.0);
        // Untouched causes: zero delayed, everything in no-delay
        assert_eq!(summary.weekday.delays[3], 0.0);
        assert_eq!(summary.weekday.no_delays[3], 100.0);
    }

    #[test]
    fn test_finalize_empty_bucket_yields_zeros() {
        let mut aggregator = DelayAggregator::new();
        aggregator.accumulate(Bucket::Weekday, &record("2023", "6", "15", "5.0"));

        let summary = aggregator.finalize();
        assert_eq!(summary.weekend.delays, [0.0; 5]);
        assert_eq!(summary.weekend.no_delays, [0.0; 5]);
        assert_eq!(summary.weekday.delays[0], 100.0);
    }

    #[test]
    fn test_percentages_bounded() {
        let mut aggregator = DelayAggregator::new();
        for i in 0..13 {
            let minutes = if i % 3 == 0 { "7.5" } else { "" };
            aggregator.accumulate(Bucket::Weekday, &record("2023", "6", "15", minutes));
        }
        let summary = aggregator.finalize();
        for i in 0..5 {
            assert!((0.0..=100.0).contains(&summary.weekday.delays[i]));
            assert!((0.0..=100.0).contains(&summary.weekday.no_delays[i]));
        }
    }
}
