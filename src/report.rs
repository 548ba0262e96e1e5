//! Assembly of every dashboard view for one date range.
//!
//! Monthly, weather, day-type and RFM views use the date-filtered daily log.
//! Seasonal totals use the full daily log and the hourly view uses the full
//! hourly log, regardless of the range.

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::aggregators::types::{
    CategoryTotal, DayType, DayTypeTotals, HourlyByDayType, MonthlyRentals, UserTypeTotals,
    WeekdayRfm,
};
use crate::aggregators::{
    RfmMetric, daytype_user_totals, hourly_by_daytype, monthly_rentals, rank_weekdays,
    seasonal_totals, weather_totals, weekday_rfm,
};
use crate::filter::{DateRange, filter_by_date};
use crate::records::{RecordStore, RentalRecord};

/// How many weekdays each RFM ranking keeps.
pub const TOP_WEEKDAYS: usize = 5;

/// Total rentals for one year column of the monthly table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year_index: u8,
    /// Calendar year of the earliest record carrying this index.
    pub calendar_year: Option<i32>,
    pub total: u64,
}

/// Busiest and quietest hour of the working-day series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakHours {
    pub peak: u8,
    pub off_peak: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RfmSummary {
    pub weekdays: Vec<WeekdayRfm>,
    pub by_recency: Vec<WeekdayRfm>,
    pub by_frequency: Vec<WeekdayRfm>,
    pub by_monetary: Vec<WeekdayRfm>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub range: DateRange,
    pub filtered_records: usize,
    pub monthly: MonthlyRentals,
    pub year_totals: Vec<YearTotal>,
    pub grand_total: u64,
    pub hourly: HourlyByDayType,
    pub working_day_peaks: Option<PeakHours>,
    pub seasons: Vec<CategoryTotal>,
    pub weather: Vec<CategoryTotal>,
    pub day_types: DayTypeTotals,
    pub user_totals: UserTypeTotals,
    /// Absent when the range selects no records.
    pub rfm: Option<RfmSummary>,
}

impl DashboardReport {
    #[tracing::instrument(skip(store), fields(start = %range.start, end = %range.end))]
    pub fn build(store: &RecordStore, range: DateRange) -> Self {
        let filtered = filter_by_date(store.daily(), range);
        info!(
            total = store.daily().len(),
            selected = filtered.len(),
            "Daily records filtered"
        );

        let monthly = monthly_rentals(&filtered);
        let year_totals = year_totals(&monthly, &filtered);
        let grand_total = monthly.grand_total();

        let hourly = hourly_by_daytype(store.hourly());
        let working_day_peaks = peak_hours(&hourly, DayType::Working);

        let day_types = daytype_user_totals(&filtered);
        let user_totals = day_types.working.combined(&day_types.non_working);

        let rfm = match weekday_rfm(&filtered) {
            Ok(weekdays) => Some(RfmSummary {
                by_recency: rank_weekdays(&weekdays, RfmMetric::Recency, TOP_WEEKDAYS),
                by_frequency: rank_weekdays(&weekdays, RfmMetric::Frequency, TOP_WEEKDAYS),
                by_monetary: rank_weekdays(&weekdays, RfmMetric::Monetary, TOP_WEEKDAYS),
                weekdays,
            }),
            Err(err) => {
                warn!(error = %err, "Skipping RFM summary");
                None
            }
        };

        Self {
            range,
            filtered_records: filtered.len(),
            monthly,
            year_totals,
            grand_total,
            hourly,
            working_day_peaks,
            seasons: seasonal_totals(store.daily()),
            weather: weather_totals(&filtered),
            day_types,
            user_totals,
            rfm,
        }
    }
}

/// One total per year column actually present in `monthly`.
pub fn year_totals(monthly: &MonthlyRentals, records: &[RentalRecord]) -> Vec<YearTotal> {
    let mut first_year: BTreeMap<u8, i32> = BTreeMap::new();
    for r in records {
        let year = first_year.entry(r.year_index).or_insert(r.date.year());
        *year = (*year).min(r.date.year());
    }

    monthly
        .columns()
        .into_iter()
        .map(|year_index| YearTotal {
            year_index,
            calendar_year: first_year.get(&year_index).copied(),
            total: monthly.column_total(year_index),
        })
        .collect()
}

/// Highest and lowest hour of one day-type column. Ties go to the earlier
/// hour; `None` when the column has no cells.
pub fn peak_hours(hourly: &HourlyByDayType, day_type: DayType) -> Option<PeakHours> {
    let series = hourly.column(day_type);
    let peak = series
        .iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))?;
    let off_peak = series.iter().min_by_key(|(_, total)| *total)?;

    Some(PeakHours {
        peak: peak.0,
        off_peak: off_peak.0,
    })
}
