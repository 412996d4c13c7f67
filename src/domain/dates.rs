// src/domain/dates.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },
    #[error("start date {start} is after end date {end}")]
    ReversedRange { start: String, end: String },
}

/// Inclusive window of absolute instants, always anchored in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

/// Parse two `YYYY-MM-DD` strings into `[start 00:00:00.000, end 23:59:59.999]` in UTC.
///
/// Components are read directly; the process time zone never participates.
pub fn to_range_utc(start: &str, end: &str) -> Result<DateRange, DateError> {
    let start_date = parse_calendar_date(start)?;
    let end_date = parse_calendar_date(end)?;

    if start_date > end_date {
        return Err(DateError::ReversedRange {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        });
    }

    let start_at = start_date
        .and_hms_milli_opt(0, 0, 0, 0)
        .map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| invalid(start, "no midnight for date"))?;
    let end_at = end_date
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| invalid(end, "no end of day for date"))?;

    Ok(DateRange {
        start: start_at,
        end: end_at,
        start_date,
        end_date,
    })
}

/// Strict `YYYY-MM-DD`: four digit year, two digit month and day, all numeric.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, DateError> {
    let s = raw.trim();
    let parts: Vec<&str> = s.split('-').collect();

    let [y, m, d] = parts.as_slice() else {
        return Err(invalid(raw, "expected YYYY-MM-DD"));
    };

    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return Err(invalid(raw, "expected YYYY-MM-DD"));
    }

    let numeric = |part: &str| -> Result<u32, DateError> {
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(raw, "non-numeric component"));
        }
        part.parse::<u32>()
            .map_err(|_| invalid(raw, "non-numeric component"))
    };

    let year = numeric(*y)?;
    let month = numeric(*m)?;
    let day = numeric(*d)?;

    if !(1..=12).contains(&month) {
        return Err(invalid(raw, "month out of range"));
    }

    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| invalid(raw, "day out of range"))
}

/// Best-effort parse of a stored record timestamp.
///
/// Accepts RFC 3339 (any offset), a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]`
/// read as UTC, or a bare calendar date read as UTC midnight. Anything else
/// is `None` and never matches a range.
pub fn parse_record_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    parse_calendar_date(s)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `DD-MM-YYYY` in UTC; empty for absent or unparseable input.
pub fn format_display_date(raw: Option<&str>) -> String {
    raw.and_then(parse_record_instant)
        .map(|dt| dt.format("%d-%m-%Y").to_string())
        .unwrap_or_default()
}

/// Calendar part of a stored timestamp, for pre-filling `<input type="date">`.
pub fn calendar_part(raw: Option<&str>) -> String {
    match raw {
        Some(s) if !s.trim().is_empty() => s.trim().split('T').next().unwrap_or("").to_string(),
        _ => String::new(),
    }
}

fn invalid(input: &str, reason: &str) -> DateError {
    DateError::InvalidDate {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
