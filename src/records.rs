//! Loading of the daily and hourly rental logs.
//!
//! Both logs share the same column layout; the hourly log adds an `hr`
//! column. Rows are deserialized with `csv` + `serde`, the textual `dteday`
//! column is parsed into a [`NaiveDate`], and nothing else is validated.

use std::io::Read;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};
use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::fetch::{HttpClient, read_source};

/// Columns every rental log must provide.
pub const DAILY_COLUMNS: &[&str] = &[
    "instant",
    "dteday",
    "season",
    "yr",
    "mnth",
    "holiday",
    "weekday",
    "workingday",
    "weathersit",
    "temp",
    "atemp",
    "hum",
    "windspeed",
    "casual",
    "registered",
    "cnt",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day of rentals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalRecord {
    pub record_id: u32,
    pub date: NaiveDate,
    /// 0 for the first year of the log, 1 for the second, and so on.
    pub year_index: u8,
    pub month: u8,
    pub season: u8,
    pub weather_situation: u8,
    pub is_holiday: bool,
    pub is_working_day: bool,
    pub weekday: u8,

    // normalised weather readings
    pub temperature: f64,
    pub feels_like_temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,

    pub casual_count: u64,
    pub registered_count: u64,
    pub total_count: u64,
}

impl RentalRecord {
    /// True when the casual and registered counts add up to the total.
    pub fn is_consistent(&self) -> bool {
        self.casual_count.checked_add(self.registered_count) == Some(self.total_count)
    }
}

/// One hour of rentals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRentalRecord {
    pub hour: u8,
    #[serde(flatten)]
    pub record: RentalRecord,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    instant: u32,
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u8,
    #[serde(default)]
    hr: Option<u8>,
    #[serde(deserialize_with = "flag")]
    holiday: bool,
    weekday: u8,
    #[serde(deserialize_with = "flag")]
    workingday: bool,
    weathersit: u8,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: u64,
    registered: u64,
    cnt: u64,
}

impl RawRow {
    fn into_record(self, line: u64) -> Result<(RentalRecord, Option<u8>), PipelineError> {
        let date = NaiveDate::parse_from_str(&self.dteday, DATE_FORMAT).map_err(|_| {
            PipelineError::Parse {
                line,
                value: self.dteday.clone(),
            }
        })?;

        let record = RentalRecord {
            record_id: self.instant,
            date,
            year_index: self.yr,
            month: self.mnth,
            season: self.season,
            weather_situation: self.weathersit,
            is_holiday: self.holiday,
            is_working_day: self.workingday,
            weekday: self.weekday,
            temperature: self.temp,
            feels_like_temperature: self.atemp,
            humidity: self.hum,
            wind_speed: self.windspeed,
            casual_count: self.casual,
            registered_count: self.registered,
            total_count: self.cnt,
        };

        Ok((record, self.hr))
    }
}

/// Accepts the 0/1 encoding the logs use for boolean columns.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match u8::deserialize(deserializer)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(de::Error::custom(format!("expected 0 or 1, found {other}"))),
    }
}

fn read_rows<R: Read>(
    reader: R,
    required: &[&'static str],
) -> Result<Vec<(RentalRecord, Option<u8>)>, PipelineError> {
    // padding around any field, dates and counts alike, is ignored
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(PipelineError::from_csv)?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(PipelineError::MissingColumn(*column));
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize::<RawRow>() {
        let raw = result.map_err(PipelineError::from_csv)?;
        // the header occupies line 1
        let line = rows.len() as u64 + 2;
        rows.push(raw.into_record(line)?);
    }

    Ok(rows)
}

/// Parses a daily rental log.
///
/// # Errors
///
/// [`PipelineError::MissingColumn`] or [`PipelineError::Schema`] when the
/// layout or a value type is wrong, [`PipelineError::Parse`] when a date
/// cannot be read. The first failure aborts the whole load.
pub fn read_daily<R: Read>(reader: R) -> Result<Vec<RentalRecord>, PipelineError> {
    let rows = read_rows(reader, DAILY_COLUMNS)?;
    Ok(rows.into_iter().map(|(record, _)| record).collect())
}

/// Parses an hourly rental log. Same contract as [`read_daily`], plus a
/// mandatory `hr` column.
pub fn read_hourly<R: Read>(reader: R) -> Result<Vec<HourlyRentalRecord>, PipelineError> {
    let mut required = DAILY_COLUMNS.to_vec();
    required.push("hr");

    read_rows(reader, &required)?
        .into_iter()
        .enumerate()
        .map(|(i, (record, hour))| match hour {
            Some(hour) => Ok(HourlyRentalRecord { hour, record }),
            None => Err(PipelineError::Schema {
                line: i as u64 + 2,
                message: "empty value in column `hr`".to_string(),
            }),
        })
        .collect()
}

/// Both rental logs, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    daily: Vec<RentalRecord>,
    hourly: Vec<HourlyRentalRecord>,
}

impl RecordStore {
    pub fn new(daily: Vec<RentalRecord>, hourly: Vec<HourlyRentalRecord>) -> Self {
        let inconsistent = daily.iter().filter(|r| !r.is_consistent()).count()
            + hourly.iter().filter(|r| !r.record.is_consistent()).count();
        if inconsistent > 0 {
            warn!(
                inconsistent,
                "Records where casual + registered does not equal the total"
            );
        }

        Self { daily, hourly }
    }

    /// Parses both logs from in-memory readers.
    pub fn from_readers<D: Read, H: Read>(day: D, hour: H) -> Result<Self, PipelineError> {
        let daily = read_daily(day)?;
        let hourly = read_hourly(hour)?;
        debug!(
            daily = daily.len(),
            hourly = hourly.len(),
            "Rental logs parsed"
        );
        Ok(Self::new(daily, hourly))
    }

    /// Reads both logs from local paths or URLs and parses them.
    #[tracing::instrument(skip(client))]
    pub async fn load<C: HttpClient>(client: &C, day_source: &str, hour_source: &str) -> Result<Self> {
        let day_bytes = read_source(client, day_source).await?;
        let hour_bytes = read_source(client, hour_source).await?;

        let store = Self::from_readers(day_bytes.as_slice(), hour_bytes.as_slice())?;
        info!(
            daily = store.daily.len(),
            hourly = store.hourly.len(),
            "Rental logs loaded"
        );
        Ok(store)
    }

    pub fn daily(&self) -> &[RentalRecord] {
        &self.daily
    }

    pub fn hourly(&self) -> &[HourlyRentalRecord] {
        &self.hourly
    }

    /// Earliest and latest date of the daily log, or `None` when it is empty.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.daily.iter().map(|r| r.date).min()?;
        let max = self.daily.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}
