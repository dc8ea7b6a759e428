//! Date-and-time parameters at hour, minute, and second granularity.
//!
//! Normalization clamps to every Nth interval from a configurable start by
//! working in elapsed seconds: sub-second precision is truncated first so
//! the modulus never sees floating-point drift, then the overshoot
//! (`seconds_since_start mod (unit_seconds * interval)`) is subtracted.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use tracing::warn;

use crate::errors::ParameterError;
use crate::types::contract::{ParameterKind, ParameterType};

fn unix_epoch() -> NaiveDateTime {
    super::date::unix_epoch_date().and_hms_opt(0, 0, 0).expect("midnight is a valid time")
}

fn clamp_to_interval(value: NaiveDateTime, start: NaiveDateTime, unit_seconds: i64, interval: u32) -> NaiveDateTime {
    let value = value.with_nanosecond(0).unwrap_or(value);
    let elapsed = value.signed_duration_since(start).num_seconds();
    let granularity = unit_seconds * interval as i64;
    value - TimeDelta::seconds(elapsed.rem_euclid(granularity))
}

/// Parameter whose value is a datetime specified to the hour
/// (`YYYY-MM-DDTHH`, ISO 8601 with a `T` separator).
#[derive(Debug, Clone, Copy)]
pub struct DateHourParameter {
    interval: u32,
    start: NaiveDateTime,
}

impl DateHourParameter {
    /// Hourly granularity from the Unix epoch.
    pub fn new() -> Self {
        Self::with_interval(1, unix_epoch())
    }

    /// Clamp to every `interval` hours counted from `start`.
    pub fn with_interval(interval: u32, start: NaiveDateTime) -> Self {
        Self {
            interval: interval.max(1),
            start,
        }
    }
}

impl Default for DateHourParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterType for DateHourParameter {
    type Value = NaiveDateTime;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        let invalid = || ParameterError::invalid(raw, "a datetime formatted YYYY-MM-DDTHH");
        let (date_text, hour_text) = raw.split_once('T').ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").map_err(|_| invalid())?;
        let hour: u32 = hour_text.parse().map_err(|_| invalid())?;
        date.and_hms_opt(hour, 0, 0).ok_or_else(invalid)
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.format("%Y-%m-%dT%H").to_string()
    }

    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        Ok(clamp_to_interval(value, self.start, 3_600, self.interval))
    }

    fn next_in_enumeration(&self, value: &Self::Value) -> Option<Self::Value> {
        value.checked_add_signed(TimeDelta::hours(self.interval as i64))
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::DateTime
    }
}

/// Parameter whose value is a datetime specified to the minute
/// (`YYYY-MM-DDTHHMM`).
///
/// A deprecated older format with an `H` between hours and minutes
/// (`YYYY-MM-DDTHHHMM`, e.g. `2013-07-10T19H07`) is still accepted and
/// emits a deprecation notice when matched.
#[derive(Debug, Clone, Copy)]
pub struct DateMinuteParameter {
    interval: u32,
    start: NaiveDateTime,
}

impl DateMinuteParameter {
    /// Minute granularity from the Unix epoch.
    pub fn new() -> Self {
        Self::with_interval(1, unix_epoch())
    }

    /// Clamp to every `interval` minutes counted from `start`.
    pub fn with_interval(interval: u32, start: NaiveDateTime) -> Self {
        Self {
            interval: interval.max(1),
            start,
        }
    }
}

impl Default for DateMinuteParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterType for DateMinuteParameter {
    type Value = NaiveDateTime;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        // Deprecated compatibility branch: 'H' separating hours and minutes.
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%HH%M") {
            warn!(raw, "separating hours and minutes with 'H' is deprecated; omit it");
            return Ok(value);
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H%M")
            .map_err(|_| ParameterError::invalid(raw, "a datetime formatted YYYY-MM-DDTHHMM"))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.format("%Y-%m-%dT%H%M").to_string()
    }

    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        Ok(clamp_to_interval(value, self.start, 60, self.interval))
    }

    fn next_in_enumeration(&self, value: &Self::Value) -> Option<Self::Value> {
        value.checked_add_signed(TimeDelta::minutes(self.interval as i64))
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::DateTime
    }
}

/// Parameter whose value is a datetime specified to the second
/// (`YYYY-MM-DDTHHMMSS`).
#[derive(Debug, Clone, Copy)]
pub struct DateSecondParameter {
    interval: u32,
    start: NaiveDateTime,
}

impl DateSecondParameter {
    /// Second granularity from the Unix epoch.
    pub fn new() -> Self {
        Self::with_interval(1, unix_epoch())
    }

    /// Clamp to every `interval` seconds counted from `start`.
    pub fn with_interval(interval: u32, start: NaiveDateTime) -> Self {
        Self {
            interval: interval.max(1),
            start,
        }
    }
}

impl Default for DateSecondParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterType for DateSecondParameter {
    type Value = NaiveDateTime;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H%M%S")
            .map_err(|_| ParameterError::invalid(raw, "a datetime formatted YYYY-MM-DDTHHMMSS"))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.format("%Y-%m-%dT%H%M%S").to_string()
    }

    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        Ok(clamp_to_interval(value, self.start, 1, self.interval))
    }

    fn next_in_enumeration(&self, value: &Self::Value) -> Option<Self::Value> {
        value.checked_add_signed(TimeDelta::seconds(self.interval as i64))
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::DateTime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn hour_parses_and_round_trips() {
        let ty = DateHourParameter::new();
        let value = ty.parse("2013-07-10T19").unwrap();
        assert_eq!(value, datetime(2013, 7, 10, 19, 0, 0));
        assert_eq!(ty.serialize(&value), "2013-07-10T19");
        assert!(ty.parse("2013-07-10T25").is_err());
        assert!(ty.parse("2013-07-10").is_err());
    }

    #[test]
    fn hour_clamps_to_interval() {
        let ty = DateHourParameter::with_interval(6, datetime(2020, 1, 1, 0, 0, 0));
        assert_eq!(
            ty.normalize(datetime(2020, 1, 1, 14, 30, 0)).unwrap(),
            datetime(2020, 1, 1, 12, 0, 0)
        );
    }

    #[test]
    fn minute_accepts_canonical_and_deprecated_forms() {
        let ty = DateMinuteParameter::new();
        let canonical = ty.parse("2013-07-10T1907").unwrap();
        let deprecated = ty.parse("2013-07-10T19H07").unwrap();
        assert_eq!(canonical, datetime(2013, 7, 10, 19, 7, 0));
        assert_eq!(canonical, deprecated);
        assert_eq!(ty.serialize(&canonical), "2013-07-10T1907");
    }

    #[test]
    fn minute_clamps_to_interval() {
        let ty = DateMinuteParameter::with_interval(15, datetime(2020, 1, 1, 0, 0, 0));
        assert_eq!(
            ty.normalize(datetime(2020, 1, 1, 9, 44, 0)).unwrap(),
            datetime(2020, 1, 1, 9, 30, 0)
        );
    }

    #[test]
    fn second_parses_clamps_and_enumerates() {
        let ty = DateSecondParameter::with_interval(30, datetime(2020, 1, 1, 0, 0, 0));
        let value = ty.parse("2013-07-10T190738").unwrap();
        assert_eq!(value, datetime(2013, 7, 10, 19, 7, 38));
        assert_eq!(ty.normalize(value).unwrap(), datetime(2013, 7, 10, 19, 7, 30));
        assert_eq!(
            ty.next_in_enumeration(&datetime(2013, 7, 10, 19, 7, 30)),
            Some(datetime(2013, 7, 10, 19, 8, 0))
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let ty = DateHourParameter::with_interval(6, datetime(2020, 1, 1, 0, 0, 0));
        let once = ty.normalize(datetime(2020, 1, 1, 14, 0, 0)).unwrap();
        assert_eq!(ty.normalize(once).unwrap(), once);
    }
}
