use tracing::debug;

use super::types::{DayType, HourlyByDayType};
use crate::records::HourlyRentalRecord;

/// Sums `total_count` per hour of day, with one column per day type present.
///
/// Takes the whole hourly log: callers pass it unfiltered, whatever date
/// range the daily views are restricted to. Missing hours stay missing.
pub fn hourly_by_daytype(records: &[HourlyRentalRecord]) -> HourlyByDayType {
    let mut table = HourlyByDayType::new();
    for r in records {
        table.add(r.hour, DayType::from(r.record.is_working_day), r.record.total_count);
    }

    debug!(
        records = records.len(),
        hours = table.index().len(),
        "Hourly rentals by day type aggregated"
    );
    table
}
