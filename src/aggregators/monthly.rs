use tracing::debug;

use super::types::MonthlyRentals;
use crate::records::RentalRecord;

/// Sums `total_count` per month, with one column per year index present.
///
/// Months with no records are left out of the index, and the column set is
/// exactly the year indices seen, however many there are.
pub fn monthly_rentals(records: &[RentalRecord]) -> MonthlyRentals {
    let mut table = MonthlyRentals::new();
    for r in records {
        table.add(r.month, r.year_index, r.total_count);
    }

    debug!(
        records = records.len(),
        months = table.index().len(),
        years = table.columns().len(),
        "Monthly rentals aggregated"
    );
    table
}
