use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use super::types::WeekdayRfm;
use crate::error::PipelineError;
use crate::records::RentalRecord;

#[derive(Default)]
struct WeekdayGroup {
    last_active: Option<NaiveDate>,
    ids: HashSet<u32>,
    monetary: u64,
}

/// Computes recency, frequency and monetary figures per weekday.
///
/// Recency is measured against the latest date of the whole input, not of
/// each weekday. Rows come back ordered by weekday.
///
/// # Errors
///
/// [`PipelineError::EmptyInput`] when `records` is empty, since there is no
/// latest date to measure from.
pub fn weekday_rfm(records: &[RentalRecord]) -> Result<Vec<WeekdayRfm>, PipelineError> {
    let latest = records
        .iter()
        .map(|r| r.date)
        .max()
        .ok_or(PipelineError::EmptyInput)?;

    let mut groups: BTreeMap<u8, WeekdayGroup> = BTreeMap::new();
    for r in records {
        let group = groups.entry(r.weekday).or_default();
        group.last_active = group.last_active.max(Some(r.date));
        group.ids.insert(r.record_id);
        group.monetary = group.monetary.saturating_add(r.total_count);
    }

    let rows: Vec<WeekdayRfm> = groups
        .into_iter()
        .map(|(weekday, group)| WeekdayRfm {
            weekday,
            frequency: group.ids.len(),
            monetary: group.monetary,
            recency: group
                .last_active
                .map(|last| (latest - last).num_days())
                .unwrap_or_default(),
        })
        .collect();

    debug!(records = records.len(), weekdays = rows.len(), %latest, "Weekday RFM computed");
    Ok(rows)
}

/// The dimension weekdays are ranked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfmMetric {
    /// Most recently active first.
    Recency,
    /// Most observed days first.
    Frequency,
    /// Most rentals first.
    Monetary,
}

/// Returns at most `limit` weekdays, best first on `metric`. Ties go to the
/// lower weekday code.
pub fn rank_weekdays(rows: &[WeekdayRfm], metric: RfmMetric, limit: usize) -> Vec<WeekdayRfm> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| {
        let order = match metric {
            RfmMetric::Recency => a.recency.cmp(&b.recency),
            RfmMetric::Frequency => b.frequency.cmp(&a.frequency),
            RfmMetric::Monetary => b.monetary.cmp(&a.monetary),
        };
        order.then(a.weekday.cmp(&b.weekday))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordBuilder, date};

    #[test]
    fn test_single_weekday_example() {
        let records = vec![
            RecordBuilder::new(1, date(2011, 1, 2)).weekday(0).total(10).build(),
            RecordBuilder::new(2, date(2011, 1, 9)).weekday(0).total(20).build(),
        ];
        let rows = weekday_rfm(&records).unwrap();

        assert_eq!(
            rows,
            vec![WeekdayRfm {
                weekday: 0,
                frequency: 2,
                monetary: 30,
                recency: 0,
            }]
        );
    }

    #[test]
    fn test_recency_uses_global_latest_date() {
        let records = vec![
            RecordBuilder::new(1, date(2011, 1, 3)).weekday(1).total(5).build(),
            RecordBuilder::new(2, date(2011, 1, 8)).weekday(6).total(5).build(),
            RecordBuilder::new(3, date(2011, 1, 10)).weekday(1).total(5).build(),
            RecordBuilder::new(4, date(2011, 1, 15)).weekday(6).total(5).build(),
        ];
        let rows = weekday_rfm(&records).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].weekday, 1);
        assert_eq!(rows[0].recency, 5);
        assert_eq!(rows[1].weekday, 6);
        assert_eq!(rows[1].recency, 0);
    }

    #[test]
    fn test_frequency_counts_distinct_ids() {
        let records = vec![
            RecordBuilder::new(7, date(2011, 1, 3)).weekday(1).total(1).build(),
            RecordBuilder::new(7, date(2011, 1, 3)).weekday(1).total(1).build(),
            RecordBuilder::new(8, date(2011, 1, 10)).weekday(1).total(1).build(),
        ];
        let rows = weekday_rfm(&records).unwrap();

        assert_eq!(rows[0].frequency, 2);
        assert_eq!(rows[0].monetary, 3);
    }

    #[test]
    fn test_monetary_saturates() {
        let records = vec![
            RecordBuilder::new(1, date(2011, 1, 3)).weekday(1).counts(u64::MAX, 0).build(),
            RecordBuilder::new(2, date(2011, 1, 10)).weekday(1).total(4).build(),
        ];
        let rows = weekday_rfm(&records).unwrap();

        assert_eq!(rows[0].monetary, u64::MAX);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(weekday_rfm(&[]), Err(PipelineError::EmptyInput)));
    }

    fn row(weekday: u8, frequency: usize, monetary: u64, recency: i64) -> WeekdayRfm {
        WeekdayRfm {
            weekday,
            frequency,
            monetary,
            recency,
        }
    }

    #[test]
    fn test_rank_by_each_metric() {
        let rows = vec![row(0, 3, 100, 6), row(1, 5, 50, 0), row(2, 4, 300, 2)];

        let by_recency: Vec<u8> = rank_weekdays(&rows, RfmMetric::Recency, 5)
            .iter()
            .map(|r| r.weekday)
            .collect();
        let by_frequency: Vec<u8> = rank_weekdays(&rows, RfmMetric::Frequency, 5)
            .iter()
            .map(|r| r.weekday)
            .collect();
        let by_monetary: Vec<u8> = rank_weekdays(&rows, RfmMetric::Monetary, 5)
            .iter()
            .map(|r| r.weekday)
            .collect();

        assert_eq!(by_recency, vec![1, 2, 0]);
        assert_eq!(by_frequency, vec![1, 2, 0]);
        assert_eq!(by_monetary, vec![2, 0, 1]);
    }

    #[test]
    fn test_rank_truncates_and_breaks_ties_by_weekday() {
        let rows = vec![row(4, 1, 10, 0), row(2, 1, 10, 0), row(6, 1, 10, 0)];
        let top = rank_weekdays(&rows, RfmMetric::Monetary, 2);

        assert_eq!(top.iter().map(|r| r.weekday).collect::<Vec<_>>(), vec![2, 4]);
    }
}
