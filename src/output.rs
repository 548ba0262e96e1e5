//! Rendering and persistence of a [`DashboardReport`].
//!
//! Supports a labelled text summary, JSON serialization, and CSV export of
//! every table. Category labels and number formatting live here only.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::aggregators::Pivot;
use crate::aggregators::types::{CategoryTotal, DayType, UserTypeTotals};
use crate::report::DashboardReport;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub fn season_label(code: u8) -> &'static str {
    match code {
        1 => "Spring",
        2 => "Summer",
        3 => "Fall",
        4 => "Winter",
        _ => "Unknown",
    }
}

pub fn weather_label(code: u8) -> &'static str {
    match code {
        1 => "Clear/Partly cloudy",
        2 => "Mist/Cloudy",
        3 => "Light snow/Rain",
        4 => "Heavy rain/Storm",
        _ => "Unknown",
    }
}

pub fn weekday_name(code: u8) -> &'static str {
    WEEKDAYS.get(code as usize).copied().unwrap_or("Unknown")
}

pub fn month_abbr(month: u8) -> &'static str {
    (month as usize)
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i))
        .copied()
        .unwrap_or("???")
}

fn day_type_label(day_type: DayType) -> &'static str {
    match day_type {
        DayType::Working => "working",
        DayType::NonWorking => "non_working",
    }
}

/// Formats `n` with comma thousands separators, e.g. `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Builds the human-readable dashboard summary.
pub fn render_text(report: &DashboardReport) -> String {
    let mut s = String::new();
    // writing to a String cannot fail
    let _ = write_text(&mut s, report);
    s
}

fn write_text(s: &mut String, report: &DashboardReport) -> fmt::Result {
    writeln!(s, "Bike rentals {} to {}", report.range.start, report.range.end)?;
    writeln!(s, "Days selected: {}", report.filtered_records)?;

    writeln!(s, "\nRentals per year")?;
    for y in &report.year_totals {
        let label = y
            .calendar_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| format!("year {}", y.year_index));
        writeln!(s, "  {label:<12} {:>12}", thousands(y.total))?;
    }
    writeln!(s, "  {:<12} {:>12}", "Total", thousands(report.grand_total))?;

    writeln!(s, "\nMonthly trend")?;
    for month in report.monthly.index() {
        let cells: Vec<String> = report
            .monthly
            .columns()
            .into_iter()
            .map(|year| {
                report
                    .monthly
                    .get(month, year)
                    .map(thousands)
                    .unwrap_or_else(|| "-".to_string())
            })
            .collect();
        writeln!(s, "  {:<4} {}", month_abbr(month), cells.join("  "))?;
    }

    writeln!(s, "\nRentals by weather")?;
    write_categories(s, &report.weather, weather_label)?;

    writeln!(s, "\nRentals by season (all dates)")?;
    write_categories(s, &report.seasons, season_label)?;

    writeln!(s, "\nUser types")?;
    write_user_types(s, "Working day", &report.day_types.working)?;
    write_user_types(s, "Non-working", &report.day_types.non_working)?;
    write_user_types(s, "All days", &report.user_totals)?;

    if let Some(peaks) = report.working_day_peaks {
        writeln!(
            s,
            "\nWorking-day traffic (all dates): peak {:02}:00, off-peak {:02}:00",
            peaks.peak, peaks.off_peak
        )?;
    }

    match &report.rfm {
        Some(rfm) => {
            writeln!(s, "\nWeekday RFM")?;
            writeln!(
                s,
                "  {:<10} {:>8} {:>10} {:>12}",
                "weekday", "recency", "frequency", "monetary"
            )?;
            for row in &rfm.weekdays {
                writeln!(
                    s,
                    "  {:<10} {:>8} {:>10} {:>12}",
                    weekday_name(row.weekday),
                    row.recency,
                    row.frequency,
                    thousands(row.monetary)
                )?;
            }
        }
        None => writeln!(s, "\nWeekday RFM: no records in range")?,
    }

    Ok(())
}

fn write_categories(
    s: &mut String,
    rows: &[CategoryTotal],
    label: fn(u8) -> &'static str,
) -> fmt::Result {
    for row in rows {
        writeln!(s, "  {:<20} {:>12}", label(row.code), thousands(row.total))?;
    }
    Ok(())
}

fn write_user_types(s: &mut String, name: &str, totals: &UserTypeTotals) -> fmt::Result {
    writeln!(
        s,
        "  {name:<12} casual {:>10}  registered {:>10}  total {:>10}",
        thousands(totals.casual),
        thousands(totals.registered),
        thousands(totals.total)
    )
}

/// Prints the text summary to stdout.
pub fn print_pretty(report: &DashboardReport) {
    print!("{}", render_text(report));
}

/// Prints the report as pretty-printed JSON to stdout.
pub fn print_json(report: &DashboardReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the report as pretty-printed JSON to `path`.
pub fn write_json(path: &str, report: &DashboardReport) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(report)?)?;
    info!(path, "Report written");
    Ok(())
}

#[derive(Serialize)]
struct LabelledTotal<'a> {
    code: u8,
    label: &'a str,
    total: u64,
}

#[derive(Serialize)]
struct DayTypeRow<'a> {
    day_type: &'a str,
    casual: u64,
    registered: u64,
    total: u64,
}

fn write_pivot<R, C>(
    path: &Path,
    index_name: &str,
    table: &Pivot<R, C>,
    column_name: impl Fn(C) -> String,
) -> Result<()>
where
    R: Ord + Copy + ToString,
    C: Ord + Copy,
{
    let mut writer = WriterBuilder::new().from_path(path)?;

    let columns = table.columns();
    let mut header = vec![index_name.to_string()];
    header.extend(columns.iter().map(|c| column_name(*c)));
    writer.write_record(&header)?;

    for row in table.index() {
        let mut record = vec![row.to_string()];
        record.extend(
            columns
                .iter()
                .map(|c| table.get(row, *c).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Exports every table of the report as a CSV file inside `dir`.
///
/// Sparse pivot cells are written as empty fields.
pub fn write_tables(dir: &str, report: &DashboardReport) -> Result<()> {
    let dir = Path::new(dir);
    fs::create_dir_all(dir)?;
    debug!(dir = %dir.display(), "Exporting report tables");

    write_pivot(&dir.join("monthly.csv"), "month", &report.monthly, |y| {
        format!("year_{y}")
    })?;
    write_pivot(&dir.join("hourly.csv"), "hour", &report.hourly, |d| {
        day_type_label(d).to_string()
    })?;

    write_rows(
        &dir.join("seasons.csv"),
        report.seasons.iter().map(|c| LabelledTotal {
            code: c.code,
            label: season_label(c.code),
            total: c.total,
        }),
    )?;
    write_rows(
        &dir.join("weather.csv"),
        report.weather.iter().map(|c| LabelledTotal {
            code: c.code,
            label: weather_label(c.code),
            total: c.total,
        }),
    )?;

    let day_types = [
        ("working", report.day_types.working),
        ("non_working", report.day_types.non_working),
    ];
    write_rows(
        &dir.join("day_types.csv"),
        day_types.iter().map(|(name, t)| DayTypeRow {
            day_type: *name,
            casual: t.casual,
            registered: t.registered,
            total: t.total,
        }),
    )?;

    if let Some(rfm) = &report.rfm {
        write_rows(&dir.join("rfm.csv"), rfm.weekdays.iter())?;
    }

    info!(dir = %dir.display(), "Report tables exported");
    Ok(())
}
