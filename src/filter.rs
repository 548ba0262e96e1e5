//! Inclusive date-range restriction of the daily log.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::PipelineError;
use crate::records::{RecordStore, RentalRecord};

/// An inclusive `[start, end]` interval of calendar dates.
///
/// A range whose start lies after its end is valid and simply matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Fills whichever bound is missing with the matching end of the daily
    /// log.
    ///
    /// # Errors
    ///
    /// [`PipelineError::EmptyInput`] when a bound is missing and the daily
    /// log has no records to take it from.
    pub fn resolve(
        store: &RecordStore,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, PipelineError> {
        let bounds = store.date_bounds();
        let start = start
            .or(bounds.map(|(first, _)| first))
            .ok_or(PipelineError::EmptyInput)?;
        let end = end
            .or(bounds.map(|(_, last)| last))
            .ok_or(PipelineError::EmptyInput)?;
        Ok(Self::new(start, end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Returns the records dated within `range`, in their original order.
pub fn filter_by_date(records: &[RentalRecord], range: DateRange) -> Vec<RentalRecord> {
    if range.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| range.contains(r.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordBuilder, date};

    fn record(id: u32, on: NaiveDate, casual: u64, registered: u64) -> RentalRecord {
        RecordBuilder::new(id, on).counts(casual, registered).build()
    }

    fn sample() -> Vec<RentalRecord> {
        vec![
            record(1, date(2011, 1, 1), 1, 2),
            record(2, date(2011, 1, 2), 3, 4),
            record(3, date(2011, 1, 3), 5, 6),
            record(4, date(2011, 1, 4), 7, 8),
        ]
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let records = sample();
        let out = filter_by_date(&records, DateRange::new(date(2011, 1, 2), date(2011, 1, 3)));

        let ids: Vec<u32> = out.iter().map(|r| r.record_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut records = sample();
        records.reverse();
        let out = filter_by_date(&records, DateRange::new(date(2011, 1, 1), date(2011, 1, 4)));

        let ids: Vec<u32> = out.iter().map(|r| r.record_id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let range = DateRange::new(date(2011, 1, 2), date(2011, 1, 4));

        let once = filter_by_date(&records, range);
        let twice = filter_by_date(&once, range);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_reversed_range_is_empty() {
        let records = sample();
        let range = DateRange::new(date(2011, 1, 4), date(2011, 1, 1));

        assert!(range.is_empty());
        assert!(filter_by_date(&records, range).is_empty());
    }

    #[test]
    fn test_resolve_defaults_to_log_bounds() {
        let mut records = sample();
        records.swap(0, 3);
        let store = RecordStore::new(records, vec![]);

        let range = DateRange::resolve(&store, None, None).unwrap();
        assert_eq!(range, DateRange::new(date(2011, 1, 1), date(2011, 1, 4)));
    }

    #[test]
    fn test_resolve_keeps_given_bound() {
        let store = RecordStore::new(sample(), vec![]);

        let range = DateRange::resolve(&store, Some(date(2011, 1, 3)), None).unwrap();
        assert_eq!(range, DateRange::new(date(2011, 1, 3), date(2011, 1, 4)));

        let range = DateRange::resolve(&store, None, Some(date(2011, 1, 2))).unwrap();
        assert_eq!(range, DateRange::new(date(2011, 1, 1), date(2011, 1, 2)));
    }

    #[test]
    fn test_resolve_empty_store() {
        let store = RecordStore::default();

        assert!(matches!(
            DateRange::resolve(&store, None, Some(date(2011, 1, 2))),
            Err(PipelineError::EmptyInput)
        ));
        // both bounds given needs nothing from the log
        let range = DateRange::resolve(&store, Some(date(2011, 1, 1)), Some(date(2011, 1, 2)));
        assert_eq!(range.unwrap(), DateRange::new(date(2011, 1, 1), date(2011, 1, 2)));
    }

    #[test]
    fn test_filter_single_day() {
        let records = sample();
        let out = filter_by_date(&records, DateRange::new(date(2011, 1, 3), date(2011, 1, 3)));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record_id, 3);
    }
}
