use tracing::debug;

use super::types::{DayTypeTotals, UserTypeTotals};
use crate::records::RentalRecord;

/// Sums casual, registered and total counts separately for working and
/// non-working days. An empty partition yields all zeros.
pub fn daytype_user_totals(records: &[RentalRecord]) -> DayTypeTotals {
    let mut totals = DayTypeTotals::default();

    for r in records {
        let bucket = if r.is_working_day {
            &mut totals.working
        } else {
            &mut totals.non_working
        };
        bucket.casual = bucket.casual.saturating_add(r.casual_count);
        bucket.registered = bucket.registered.saturating_add(r.registered_count);
        bucket.total = bucket.total.saturating_add(r.total_count);
    }

    debug!(
        records = records.len(),
        working = totals.working.total,
        non_working = totals.non_working.total,
        "Day type totals aggregated"
    );
    totals
}
