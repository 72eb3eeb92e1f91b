//! Summary statistics over fetched series metadata
//!
//! A pure reduction over a record list: deterministic, order-independent
//! and side-effect-free. Date bounds are only computed over records that
//! actually carry an update time; when none do, both bounds are absent
//! rather than collapsing to an epoch value.

use crate::model::{MetadataRecord, SeriesStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived statistics for one fetched record list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Oldest update time among records that have one
    pub min_update_date: Option<DateTime<Utc>>,
    /// Newest update time among records that have one
    pub max_update_date: Option<DateTime<Utc>>,
    /// Records with `Active` status
    pub active_count: u64,
    /// Length of the input list; may differ from the declared total
    /// when the caller passes a partial batch
    pub records_processed: u64,
}

/// Reduce a record list into its summary statistics
///
/// # Examples
///
/// ```
/// use sercat::session::stats::aggregate;
///
/// let stats = aggregate(&[]);
/// assert!(stats.min_update_date.is_none());
/// assert_eq!(stats.active_count, 0);
/// assert_eq!(stats.records_processed, 0);
/// ```
pub fn aggregate(records: &[MetadataRecord]) -> SummaryStats {
    let mut min_update_date: Option<DateTime<Utc>> = None;
    let mut max_update_date: Option<DateTime<Utc>> = None;
    let mut active_count = 0u64;

    for record in records {
        if record.status == SeriesStatus::Active {
            active_count += 1;
        }

        if let Some(updated) = record.last_update_time {
            min_update_date = Some(match min_update_date {
                Some(current) => current.min(updated),
                None => updated,
            });
            max_update_date = Some(match max_update_date {
                Some(current) => current.max(updated),
                None => updated,
            });
        }
    }

    SummaryStats {
        min_update_date,
        max_update_date,
        active_count,
        records_processed: records.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Frequency, MetadataRecord};
    use chrono::TimeZone;

    fn record(id: &str, status: SeriesStatus, updated: Option<(i32, u32, u32)>) -> MetadataRecord {
        MetadataRecord {
            id: id.to_string(),
            name: format!("Series {}", id),
            status,
            frequency: Frequency::Unknown,
            last_update_time: updated
                .map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
            last_value: None,
            start_date: None,
            end_date: None,
            number_of_observations: None,
            indicator_path: Vec::new(),
            geo_info: Vec::new(),
            is_forecast: false,
            is_key_series: false,
            has_continuous_series: false,
            has_vintage: false,
            is_new_series: false,
            has_schedule: false,
        }
    }

    fn sample_records() -> Vec<MetadataRecord> {
        vec![
            record("1", SeriesStatus::Active, Some((2020, 1, 1))),
            record("2", SeriesStatus::Inactive, Some((2021, 6, 15))),
            record("3", SeriesStatus::Active, Some((2019, 12, 31))),
        ]
    }

    #[test]
    fn test_small_full_load_scenario() {
        let stats = aggregate(&sample_records());

        assert_eq!(
            stats.min_update_date,
            Some(Utc.with_ymd_and_hms(2019, 12, 31, 0, 0, 0).unwrap())
        );
        assert_eq!(
            stats.max_update_date,
            Some(Utc.with_ymd_and_hms(2021, 6, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(stats.active_count, 2);
        assert_eq!(stats.records_processed, 3);
    }

    #[test]
    fn test_idempotent() {
        let records = sample_records();
        let first = aggregate(&records);
        let second = aggregate(&records);
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_independent() {
        let mut records = sample_records();
        let forward = aggregate(&records);
        records.reverse();
        let reversed = aggregate(&records);

        assert_eq!(forward.min_update_date, reversed.min_update_date);
        assert_eq!(forward.max_update_date, reversed.max_update_date);
        assert_eq!(forward.active_count, reversed.active_count);
    }

    #[test]
    fn test_all_dates_missing() {
        let records = vec![
            record("1", SeriesStatus::Active, None),
            record("2", SeriesStatus::Unknown, None),
            record("3", SeriesStatus::Active, None),
        ];
        let stats = aggregate(&records);

        assert!(stats.min_update_date.is_none());
        assert!(stats.max_update_date.is_none());
        assert_eq!(stats.active_count, 2);
        assert_eq!(stats.records_processed, 3);
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregate(&[]);
        assert!(stats.min_update_date.is_none());
        assert!(stats.max_update_date.is_none());
        assert_eq!(stats.active_count, 0);
        assert_eq!(stats.records_processed, 0);
    }

    #[test]
    fn test_single_dated_record_sets_both_bounds() {
        let records = vec![record("1", SeriesStatus::Inactive, Some((2020, 5, 5)))];
        let stats = aggregate(&records);
        assert_eq!(stats.min_update_date, stats.max_update_date);
        assert_eq!(stats.active_count, 0);
    }

    #[test]
    fn test_partial_batch_reports_its_own_length() {
        // The aggregator never second-guesses the declared total; it
        // reports the length of what it was given.
        let records = sample_records();
        let stats = aggregate(&records[..2]);
        assert_eq!(stats.records_processed, 2);
    }
}
