use chrono::{Datelike, Duration, Local, NaiveDate};

/// Day and week-start keys computed at one moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodKeys {
    pub day: String,
    pub week_start: String,
}

impl PeriodKeys {
    pub fn at(date: NaiveDate) -> Self {
        Self {
            day: day_key_at(date),
            week_start: week_start_key_at(date),
        }
    }

    pub fn current() -> Self {
        Self::at(today())
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn day_key() -> String {
    day_key_at(today())
}

pub fn week_start_key() -> String {
    week_start_key_at(today())
}

pub fn day_key_at(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn week_start_key_at(date: NaiveDate) -> String {
    day_key_at(week_start(date))
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
