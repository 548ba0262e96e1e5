use std::collections::BTreeMap;
use tracing::debug;

use super::types::CategoryTotal;
use crate::records::RentalRecord;

fn totals_by<F>(records: &[RentalRecord], key: F) -> Vec<CategoryTotal>
where
    F: Fn(&RentalRecord) -> u8,
{
    let mut sums: BTreeMap<u8, u64> = BTreeMap::new();
    for r in records {
        *sums.entry(key(r)).or_insert(0) += r.total_count;
    }

    sums.into_iter()
        .map(|(code, total)| CategoryTotal { code, total })
        .collect()
}

/// Total rentals per season code, ascending by code.
///
/// The dashboard feeds this the full daily log, not the date-filtered one.
pub fn seasonal_totals(records: &[RentalRecord]) -> Vec<CategoryTotal> {
    let totals = totals_by(records, |r| r.season);
    debug!(records = records.len(), seasons = totals.len(), "Seasonal totals aggregated");
    totals
}

/// Total rentals per weather-situation code, ascending by code.
pub fn weather_totals(records: &[RentalRecord]) -> Vec<CategoryTotal> {
    let totals = totals_by(records, |r| r.weather_situation);
    debug!(records = records.len(), situations = totals.len(), "Weather totals aggregated");
    totals
}
