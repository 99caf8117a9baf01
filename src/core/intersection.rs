//! Overlap arithmetic between charging sessions and recurring daily windows.
//!
//! Both functions return whole minutes and never go negative; zero means the
//! intervals are disjoint. Intervals are half-open, so windows that only
//! touch at an endpoint do not overlap.

use crate::domain::interval::{minute_of_day, DayTimeInterval, SessionInterval, MINUTES_PER_DAY};
use chrono::NaiveTime;

/// Minutes shared by two daily windows, either of which may wrap midnight.
/// Symmetric in its arguments.
pub fn overlap_minutes(first: &DayTimeInterval, second: &DayTimeInterval) -> i64 {
    if first.length() == 0 || second.length() == 0 {
        return 0;
    }

    let start1 = minute_of_day(first.start());
    let end1 = minute_of_day(first.end());
    let start2 = minute_of_day(second.start());
    let end2 = minute_of_day(second.end());

    // Both contain midnight: the intersection is split around it. The last
    // two terms are non-zero only when one window starts before the other
    // one ends, i.e. the windows also meet away from midnight.
    if start1 > end1 && start2 > end2 {
        return end1.min(end2)
            + (MINUTES_PER_DAY - start1.max(start2))
            + (end2 - start1).max(0)
            + (end1 - start2).max(0);
    }
    if start1 > end1 {
        return overlap_minutes(second, first);
    }

    if start2 < end2 {
        (end1.min(end2) - start1.max(start2)).max(0)
    } else {
        // `second` wraps: intersect with its head after midnight and its
        // tail before midnight separately.
        (end1.min(end2) - start1).max(0) + (end1 - start1.max(start2)).max(0)
    }
}

/// Minutes of `session` that fall inside the daily `window`, counted over
/// every calendar day the session touches.
///
/// A session spanning several dates is split at midnight into a head, a run
/// of whole days and a tail; each whole day contributes the full window.
pub fn session_overlap_minutes(session: &SessionInterval, window: &DayTimeInterval) -> i64 {
    let start = session.start();
    let end = session.end();
    let days = (end.date() - start.date()).num_days();

    if days == 0 {
        return overlap_minutes(&DayTimeInterval::new(start.time(), end.time()), window);
    }

    let head = if start.time() == NaiveTime::MIN {
        window.length()
    } else {
        overlap_minutes(&DayTimeInterval::new(start.time(), NaiveTime::MIN), window)
    };
    let whole_days = (days - 1) * window.length();
    let tail = overlap_minutes(&DayTimeInterval::new(NaiveTime::MIN, end.time()), window);

    head + whole_days + tail
}
