//! Parsing of client-supplied timestamps into local wall-clock values.
//!
//! Events are scheduled on the local calendar, so an RFC 3339 offset is
//! dropped and the written wall-clock time is kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CoreError, CoreResult};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// ## Summary
/// Parses a timestamp in any of the accepted input forms.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]`, the same with a space
/// separator, or a bare `YYYY-MM-DD` (midnight).
///
/// ## Errors
/// Returns `CoreError::ParseError` if the value matches none of the forms.
pub fn parse_timestamp(raw: &str) -> CoreResult<NaiveDateTime> {
    let value = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.naive_local());
    }

    if let Some(parsed) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Ok(parsed);
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_err| CoreError::ParseError(format!("invalid timestamp '{value}'")))
}

/// ## Summary
/// Parses a date, keeping only the date portion of a full timestamp.
///
/// ## Errors
/// Returns `CoreError::ParseError` if the value is neither a date nor a timestamp.
pub fn parse_date(raw: &str) -> CoreResult<NaiveDate> {
    let value = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    parse_timestamp(value).map(|ts| ts.date())
}
