use crate::utils::error::{BillingError, Result};
use crate::utils::time_format::format_clock;
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes elapsed since midnight, seconds truncated.
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / 60)
}

/// A recurring daily clock window. `start > end` means the window wraps
/// past midnight, e.g. 22:00-03:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayTimeInterval {
    start: NaiveTime,
    end: NaiveTime,
}

impl DayTimeInterval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length in minutes. `start == end` is treated as empty.
    pub fn length(&self) -> i64 {
        let start = minute_of_day(self.start);
        let end = minute_of_day(self.end);
        if start <= end {
            end - start
        } else {
            MINUTES_PER_DAY - (start - end)
        }
    }
}

impl fmt::Display for DayTimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_clock(self.start), format_clock(self.end))
    }
}

/// Drops seconds and sub-second precision.
fn truncate_to_minute(time: NaiveDateTime) -> NaiveDateTime {
    time.with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .unwrap_or(time)
}

/// The absolute span of one charging session, at minute resolution.
/// Always `start < end` once both ends are truncated to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl SessionInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if start >= end {
            return Err(BillingError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn total_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 4, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_length_of_forward_interval() {
        assert_eq!(DayTimeInterval::new(hm(12, 15), hm(16, 0)).length(), 225);
    }

    #[test]
    fn test_length_of_interval_wrapping_midnight() {
        assert_eq!(DayTimeInterval::new(hm(22, 0), hm(1, 20)).length(), 200);
        assert_eq!(DayTimeInterval::new(hm(4, 30), hm(0, 0)).length(), 1170);
    }

    #[test]
    fn test_degenerate_interval_is_empty() {
        assert_eq!(DayTimeInterval::new(hm(7, 0), hm(7, 0)).length(), 0);
        assert_eq!(DayTimeInterval::new(hm(0, 0), hm(0, 0)).length(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(DayTimeInterval::new(hm(22, 0), hm(3, 15)).to_string(), "22:00-03:15");
    }

    #[test]
    fn test_session_total_minutes_across_days() {
        let session = SessionInterval::new(at(1, 22, 0), at(2, 1, 30)).unwrap();
        assert_eq!(session.total_minutes(), 210);
    }

    #[test]
    fn test_session_rejects_reversed_range() {
        let result = SessionInterval::new(at(1, 13, 35), at(1, 13, 34));
        assert!(matches!(result, Err(BillingError::InvalidRange { .. })));
    }

    #[test]
    fn test_session_rejects_empty_range() {
        assert!(SessionInterval::new(at(1, 9, 0), at(1, 9, 0)).is_err());
    }

    #[test]
    fn test_session_truncates_seconds() {
        let start = NaiveDate::from_ymd_opt(2019, 4, 5)
            .unwrap()
            .and_hms_opt(10, 0, 59)
            .unwrap();
        let session = SessionInterval::new(start, at(5, 10, 2)).unwrap();
        assert_eq!(session.start(), at(5, 10, 0));
        assert_eq!(session.total_minutes(), 2);
    }

    #[test]
    fn test_session_within_one_minute_is_empty() {
        let day = NaiveDate::from_ymd_opt(2019, 4, 5).unwrap();
        let result = SessionInterval::new(
            day.and_hms_opt(10, 0, 5).unwrap(),
            day.and_hms_milli_opt(10, 0, 59, 900).unwrap(),
        );
        assert!(matches!(result, Err(BillingError::InvalidRange { .. })));
    }
}
