//! Time types for event windows.
//!
//! All instants are naive local wall-clock times: event listings are written
//! in the organizer's local time and "now" comes from the same wall clock
//! (see [`crate::clock`]).

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// The first instant of `date` (00:00:00.000).
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The last millisecond of `date` (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid time"))
}

/// The last millisecond of the minute `time` falls in (`HH:MM:59.999`).
pub fn end_of_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_milli_opt(time.hour(), time.minute(), 59, 999).unwrap_or(time)
}

/// The window during which an event is considered to be happening.
///
/// Unlike a query range, both ends are inclusive: `[start, end]`. A window
/// whose end precedes its start contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiveWindow {
    /// First instant of the event (inclusive).
    pub start: NaiveDateTime,
    /// Last instant of the event (inclusive).
    pub end: NaiveDateTime,
}

impl LiveWindow {
    /// Creates a new window. No ordering is enforced.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// A window covering whole days, from the start of `first` to the end of `last`.
    pub fn all_day(first: NaiveDate, last: NaiveDate) -> Self {
        Self::new(start_of_day(first), end_of_day(last))
    }

    /// Returns `true` if `now` lies within `[start, end]`.
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.start <= now && now <= self.end
    }

    /// Returns `true` if the end precedes the start.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Returns `true` if the window has not opened yet at `now`.
    pub fn starts_after(&self, now: NaiveDateTime) -> bool {
        self.start > now
    }

    /// Returns `true` if the window closed before `now`.
    pub fn ended_before(&self, now: NaiveDateTime) -> bool {
        self.end < now
    }

    /// Length of the window; zero for empty windows.
    pub fn duration(&self) -> Duration {
        (self.end - self.start).max(Duration::zero())
    }

    /// Whole minutes until the window opens, negative once it has.
    pub fn minutes_until_start(&self, now: NaiveDateTime) -> i64 {
        (self.start - now).num_minutes()
    }
}

impl fmt::Display for LiveWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format(INSTANT_FORMAT),
            self.end.format(INSTANT_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_boundaries() {
        let d = date(2026, 2, 28);
        assert_eq!(start_of_day(d), dt(2026, 2, 28, 0, 0, 0));
        let end = end_of_day(d);
        assert_eq!(end.time().hour(), 23);
        assert_eq!(end.time().nanosecond(), 999_000_000);
        assert_eq!(end + Duration::milliseconds(1), dt(2026, 3, 1, 0, 0, 0));
    }

    #[test]
    fn end_of_minute_keeps_hour_and_minute() {
        let t = NaiveTime::from_hms_opt(12, 30, 0).unwrap();
        let end = end_of_minute(t);
        assert_eq!((end.hour(), end.minute(), end.second()), (12, 30, 59));
        assert_eq!(end.nanosecond(), 999_000_000);
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let window = LiveWindow::new(dt(2026, 2, 28, 11, 30, 0), dt(2026, 2, 28, 12, 30, 0));

        assert!(window.contains(dt(2026, 2, 28, 11, 30, 0)));
        assert!(window.contains(dt(2026, 2, 28, 12, 0, 0)));
        assert!(window.contains(dt(2026, 2, 28, 12, 30, 0)));

        assert!(!window.contains(dt(2026, 2, 28, 11, 29, 59)));
        assert!(!window.contains(dt(2026, 2, 28, 12, 30, 1)));
    }

    #[test]
    fn empty_window_contains_nothing() {
        let window = LiveWindow::all_day(date(2026, 2, 28), date(2026, 2, 27));
        assert!(window.is_empty());
        assert!(!window.contains(dt(2026, 2, 27, 12, 0, 0)));
        assert!(!window.contains(dt(2026, 2, 28, 0, 0, 0)));
        assert_eq!(window.duration(), Duration::zero());
    }

    #[test]
    fn relative_position() {
        let window = LiveWindow::all_day(date(2026, 3, 5), date(2026, 3, 6));
        let before = dt(2026, 3, 4, 23, 0, 0);
        let after = dt(2026, 3, 7, 0, 0, 0);

        assert!(window.starts_after(before));
        assert!(!window.ended_before(before));
        assert!(window.ended_before(after));
        assert_eq!(window.minutes_until_start(before), 60);
        assert_eq!(
            window.duration(),
            Duration::days(2) - Duration::milliseconds(1)
        );
    }

    #[test]
    fn display() {
        let window = LiveWindow::all_day(date(2026, 2, 27), date(2026, 2, 28));
        insta::assert_snapshot!(
            window.to_string(),
            @"2026-02-27 00:00:00.000 .. 2026-02-28 23:59:59.999"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let window = LiveWindow::new(dt(2026, 2, 28, 11, 30, 0), dt(2026, 2, 28, 12, 30, 0));
        let json = serde_json::to_string(&window).unwrap();
        let parsed: LiveWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(window, parsed);
    }
}
