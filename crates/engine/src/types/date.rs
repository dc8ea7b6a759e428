//! Calendar-date parameters at day, month, and year granularity.
//!
//! All three clamp parsed values to the nearest preceding boundary of an
//! N-unit interval measured from a configurable start (Unix epoch by
//! default). Month and year arithmetic counts months and years directly;
//! month lengths vary, so fixed-length day deltas would drift.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::errors::ParameterError;
use crate::types::contract::{ParameterKind, ParameterType};

pub(crate) fn unix_epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date is valid")
}

/// Adds whole months, landing on the first of the resulting month.
fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) + 1;
    NaiveDate::from_ymd_opt(year, month as u32, 1).expect("month arithmetic lands on a valid first-of-month")
}

/// Parameter whose value is a date formatted `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy)]
pub struct DateParameter {
    interval: u32,
    start: NaiveDate,
}

impl DateParameter {
    /// Daily granularity from the Unix epoch.
    pub fn new() -> Self {
        Self::with_interval(1, unix_epoch_date())
    }

    /// Clamp to every `interval` days counted from `start`. A zero interval
    /// is treated as one.
    pub fn with_interval(interval: u32, start: NaiveDate) -> Self {
        Self {
            interval: interval.max(1),
            start,
        }
    }
}

impl Default for DateParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterType for DateParameter {
    type Value = NaiveDate;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ParameterError::invalid(raw, "a date formatted YYYY-MM-DD"))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.format("%Y-%m-%d").to_string()
    }

    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        let overshoot = (value - self.start).num_days().rem_euclid(self.interval as i64);
        Ok(value - TimeDelta::days(overshoot))
    }

    fn next_in_enumeration(&self, value: &Self::Value) -> Option<Self::Value> {
        value.checked_add_signed(TimeDelta::days(self.interval as i64))
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Date
    }
}

/// Parameter whose value is a date specified to the month (`YYYY-MM`);
/// normalization lands on the first of the month.
#[derive(Debug, Clone, Copy)]
pub struct MonthParameter {
    interval: u32,
    start: NaiveDate,
}

impl MonthParameter {
    /// Monthly granularity from the Unix epoch.
    pub fn new() -> Self {
        Self::with_interval(1, unix_epoch_date())
    }

    /// Clamp to every `interval` months counted from `start`.
    pub fn with_interval(interval: u32, start: NaiveDate) -> Self {
        Self {
            interval: interval.max(1),
            start,
        }
    }
}

impl Default for MonthParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterType for MonthParameter {
    type Value = NaiveDate;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        let invalid = || ParameterError::invalid(raw, "a month formatted YYYY-MM");
        let (year_text, month_text) = raw.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year_text.parse().map_err(|_| invalid())?;
        let month: u32 = month_text.parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.format("%Y-%m").to_string()
    }

    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        let months_since_start =
            (value.year() - self.start.year()) * 12 + value.month() as i32 - self.start.month() as i32;
        let clamped = months_since_start - months_since_start.rem_euclid(self.interval as i32);
        Ok(add_months(self.start, clamped))
    }

    fn next_in_enumeration(&self, value: &Self::Value) -> Option<Self::Value> {
        Some(add_months(*value, self.interval as i32))
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Date
    }
}

/// Parameter whose value is a date specified to the year (`YYYY`);
/// normalization lands on January 1st.
#[derive(Debug, Clone, Copy)]
pub struct YearParameter {
    interval: u32,
    start: NaiveDate,
}

impl YearParameter {
    /// Yearly granularity from the Unix epoch.
    pub fn new() -> Self {
        Self::with_interval(1, unix_epoch_date())
    }

    /// Clamp to every `interval` years counted from `start`.
    pub fn with_interval(interval: u32, start: NaiveDate) -> Self {
        Self {
            interval: interval.max(1),
            start,
        }
    }
}

impl Default for YearParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterType for YearParameter {
    type Value = NaiveDate;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        let invalid = || ParameterError::invalid(raw, "a year formatted YYYY");
        let year: i32 = raw.parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.format("%Y").to_string()
    }

    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        let overshoot = (value.year() - self.start.year()).rem_euclid(self.interval as i32);
        NaiveDate::from_ymd_opt(value.year() - overshoot, 1, 1)
            .ok_or_else(|| ParameterError::invalid(value.to_string(), "a year within the supported calendar range"))
    }

    fn next_in_enumeration(&self, value: &Self::Value) -> Option<Self::Value> {
        NaiveDate::from_ymd_opt(value.year() + self.interval as i32, 1, 1)
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Date
    }
}
