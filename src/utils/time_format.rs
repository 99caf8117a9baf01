use crate::utils::error::{BillingError, Result};
use chrono::{NaiveDateTime, NaiveTime};

/// Clock hours are written as `HH:MM`.
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Session timestamps at the caller boundary, e.g. `20190405T1000`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M";

pub fn parse_clock(field_name: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|e| {
        BillingError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("expected HH:MM ({})", e),
        }
    })
}

pub fn parse_timestamp(field_name: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        BillingError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("expected yyyyMMddTHHmm ({})", e),
        }
    })
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}
