//! Stateless summaries of the rental logs.
//!
//! Every aggregator is a free function from a slice of records to a fresh
//! result table. Categories with no records are absent from the output,
//! never zero-filled.

pub mod categorical;
pub mod daytype;
pub mod hourly;
pub mod monthly;
pub mod pivot;
pub mod rfm;
pub mod types;

pub use categorical::{seasonal_totals, weather_totals};
pub use daytype::daytype_user_totals;
pub use hourly::hourly_by_daytype;
pub use monthly::monthly_rentals;
pub use pivot::Pivot;
pub use rfm::{RfmMetric, rank_weekdays, weekday_rfm};
