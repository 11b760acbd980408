use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::errors::{Result, ValidationError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Current calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parses a calendar date.
///
/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM:SS` timestamp or an
/// RFC 3339 timestamp. Timestamps keep their UTC date.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::missing(field).into());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    parse_datetime(field, trimmed)
        .map(|dt| dt.date())
        .map_err(|_| invalid_date(field, raw))
}

/// Parses a timestamp, normalised to naive UTC.
///
/// A bare date is taken as midnight of that day.
pub fn parse_datetime(field: &str, raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::missing(field).into());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| invalid_date(field, raw))
}

/// Whole years elapsed between `birth` and `on`; zero if `on` precedes `birth`.
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> u32 {
    on.years_since(birth).unwrap_or(0)
}

fn invalid_date(field: &str, raw: &str) -> crate::Error {
    ValidationError::invalid(format!("Field '{}' is not a valid date: '{}'", field, raw)).into()
}
