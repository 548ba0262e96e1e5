use crate::records::{HourlyRentalRecord, RentalRecord};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builder for rental records with sensible defaults for tests
pub struct RecordBuilder {
    record: RentalRecord,
}

impl RecordBuilder {
    /// A working-day record with zero rentals
    pub fn new(record_id: u32, on: NaiveDate) -> Self {
        Self {
            record: RentalRecord {
                record_id,
                date: on,
                year_index: 0,
                month: 1,
                season: 1,
                weather_situation: 1,
                is_holiday: false,
                is_working_day: true,
                weekday: 1,
                temperature: 0.3,
                feels_like_temperature: 0.3,
                humidity: 0.5,
                wind_speed: 0.1,
                casual_count: 0,
                registered_count: 0,
                total_count: 0,
            },
        }
    }

    pub fn counts(mut self, casual: u64, registered: u64) -> Self {
        self.record.casual_count = casual;
        self.record.registered_count = registered;
        self.record.total_count = casual + registered;
        self
    }

    /// Sets the total alone, splitting it evenly-ish between user types
    pub fn total(self, total: u64) -> Self {
        self.counts(total / 2, total - total / 2)
    }

    pub fn year(mut self, year_index: u8) -> Self {
        self.record.year_index = year_index;
        self
    }

    pub fn month(mut self, month: u8) -> Self {
        self.record.month = month;
        self
    }

    pub fn season(mut self, season: u8) -> Self {
        self.record.season = season;
        self
    }

    pub fn weather(mut self, weather_situation: u8) -> Self {
        self.record.weather_situation = weather_situation;
        self
    }

    pub fn working(mut self, is_working_day: bool) -> Self {
        self.record.is_working_day = is_working_day;
        self
    }

    pub fn weekday(mut self, weekday: u8) -> Self {
        self.record.weekday = weekday;
        self
    }

    pub fn build(self) -> RentalRecord {
        self.record
    }

    pub fn at_hour(self, hour: u8) -> HourlyRentalRecord {
        HourlyRentalRecord {
            hour,
            record: self.record,
        }
    }
}
