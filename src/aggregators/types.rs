//! Result tables produced by the aggregators.

use serde::Serialize;

use super::pivot::Pivot;

/// Whether a record falls on a working day. Orders non-working first, the
/// same way the 0/1 flag in the logs does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    NonWorking,
    Working,
}

impl From<bool> for DayType {
    fn from(is_working_day: bool) -> Self {
        if is_working_day {
            DayType::Working
        } else {
            DayType::NonWorking
        }
    }
}

/// Rentals per month (rows) and year index (columns).
pub type MonthlyRentals = Pivot<u8, u8>;

/// Rentals per hour of day (rows) and day type (columns).
pub type HourlyByDayType = Pivot<u8, DayType>;

/// Summed rentals for one categorical code (season or weather situation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub code: u8,
    pub total: u64,
}

/// Column sums of the user-type counts for a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserTypeTotals {
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

impl UserTypeTotals {
    /// The sums in `(casual, registered, total)` order.
    pub fn as_array(&self) -> [u64; 3] {
        [self.casual, self.registered, self.total]
    }

    /// Element-wise sum, saturating at `u64::MAX`.
    pub fn combined(&self, other: &UserTypeTotals) -> UserTypeTotals {
        UserTypeTotals {
            casual: self.casual.saturating_add(other.casual),
            registered: self.registered.saturating_add(other.registered),
            total: self.total.saturating_add(other.total),
        }
    }
}

/// User-type sums split by working and non-working days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayTypeTotals {
    pub working: UserTypeTotals,
    pub non_working: UserTypeTotals,
}

/// Recency, frequency and monetary figures for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayRfm {
    pub weekday: u8,
    /// Distinct record ids observed on this weekday.
    pub frequency: usize,
    /// Summed rentals.
    pub monetary: u64,
    /// Days between the weekday's last record and the latest date overall.
    pub recency: i64,
}
