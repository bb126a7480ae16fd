//! Parsing of the loosely formatted date and time strings used in event listings.
//!
//! Event dates are written by hand (`"Mar 5-6, 2026"`, `"28-02-2026"`,
//! `"Aug 2024"`), so this module tries an explicit, ordered list of
//! [`DatePattern`]s:
//!
//! | order | pattern             | example           |
//! |-------|---------------------|-------------------|
//! | 1     | `DD-MM-YYYY`        | `28-02-2026`      |
//! | 2     | `Month D[-D], YYYY` | `Feb 27-28, 2026` |
//! | 3     | `Month YYYY`        | `Aug 2024`        |
//! | 4     | generic calendar    | `2026-02-28`      |
//!
//! The first pattern whose *shape* matches decides the outcome. If that
//! pattern then names an impossible date (`31-02-2026`) or an unknown month,
//! the parse fails; it never falls through to a later pattern.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use eventdeck_core::date::{parse_end_date, parse_start_date, parse_time_of_day};
//!
//! let start = parse_start_date("Feb 27-28, 2026").unwrap();
//! let end = parse_end_date("Feb 27-28, 2026").unwrap();
//! assert_eq!(start, NaiveDate::from_ymd_opt(2026, 2, 27).unwrap());
//! assert_eq!(end, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
//!
//! let time = parse_time_of_day("12:00 AM").unwrap();
//! assert_eq!(time.format("%H:%M").to_string(), "00:00");
//! ```

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use thiserror::Error;
use tracing::debug;

/// `DD-MM-YYYY`.
static DAY_MONTH_YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})-(\d{1,2})-(\d{4})\s*$").expect("Invalid day-month-year regex")
});

/// `Month D[-D], YYYY`, the second day being the end of a range. The year is
/// set off by a comma or whitespace.
static MONTH_DAY_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z]+)\.?\s+(\d{1,2})(?:\s*-\s*(\d{1,2}))?(?:\s*,\s*|\s+)(\d{4})\s*$")
        .expect("Invalid month-day regex")
});

/// `Month YYYY`.
static MONTH_YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z]+)\.?\s+(\d{4})\s*$").expect("Invalid month-year regex")
});

/// `H:MM AM|PM`.
static TIME_OF_DAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*([AaPp][Mm])\s*$").expect("Invalid time-of-day regex")
});

/// Date-only layouts accepted by the generic fallback.
const GENERIC_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
];

/// Date-time layouts accepted by the generic fallback (the time is dropped).
const GENERIC_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Errors produced while parsing event dates and times.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// No pattern recognized the input.
    #[error("unrecognized date: {input:?}")]
    UnrecognizedDate { input: String },

    /// The input looked like a month-name date but the month is not English.
    #[error("unknown month name {name:?} in {input:?}")]
    UnknownMonth { name: String, input: String },

    /// The input matched a pattern but names a date that does not exist.
    #[error("no such calendar date: {input:?}")]
    InvalidDate { input: String },

    /// The input is not of the form `H:MM AM|PM`.
    #[error("unrecognized time of day: {input:?}")]
    UnrecognizedTime { input: String },

    /// Hour outside 1-12 or minute outside 0-59.
    #[error("time of day out of range: {input:?}")]
    TimeOutOfRange { input: String },
}

impl DateParseError {
    fn unrecognized(input: &str) -> Self {
        Self::UnrecognizedDate {
            input: input.to_string(),
        }
    }

    fn invalid(input: &str) -> Self {
        Self::InvalidDate {
            input: input.to_string(),
        }
    }
}

/// Which day of a `D-D` range a date parse resolves to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangeEnd {
    /// The first day of the range (used for start dates).
    #[default]
    First,
    /// The last day of the range (used for end dates).
    Last,
}

/// The date layouts recognized by [`parse_date`], in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePattern {
    /// `DD-MM-YYYY`, e.g. `28-02-2026`.
    DayMonthYear,
    /// `Month D[-D], YYYY`, e.g. `Mar 5-6, 2026`.
    MonthDayRange,
    /// `Month YYYY`, e.g. `Aug 2024`; resolves to the 1st of the month.
    MonthYear,
    /// Any other common calendar layout (ISO dates, `MM/DD/YYYY`, ...).
    Generic,
}

impl DatePattern {
    /// Patterns in the order they are tried.
    pub const PRECEDENCE: [DatePattern; 4] = [
        Self::DayMonthYear,
        Self::MonthDayRange,
        Self::MonthYear,
        Self::Generic,
    ];

    /// Returns `None` when the input does not have this pattern's shape.
    fn try_parse(self, input: &str, end: RangeEnd) -> Option<Result<NaiveDate, DateParseError>> {
        match self {
            Self::DayMonthYear => DAY_MONTH_YEAR_REGEX.captures(input).map(|caps| {
                let day = capture::<u32>(&caps, 1);
                let month = capture::<u32>(&caps, 2);
                let year = capture::<i32>(&caps, 3);
                calendar_date(input, year, month, day)
            }),
            Self::MonthDayRange => MONTH_DAY_RANGE_REGEX.captures(input).map(|caps| {
                let month = month_capture(input, &caps)?;
                let first = capture::<u32>(&caps, 2);
                let day = match end {
                    RangeEnd::Last if caps.get(3).is_some() => capture::<u32>(&caps, 3),
                    _ => first,
                };
                calendar_date(input, capture::<i32>(&caps, 4), Some(month), day)
            }),
            Self::MonthYear => MONTH_YEAR_REGEX.captures(input).map(|caps| {
                let month = month_capture(input, &caps)?;
                calendar_date(input, capture::<i32>(&caps, 2), Some(month), Some(1))
            }),
            Self::Generic => parse_generic(input).map(Ok),
        }
    }
}

/// Returns the first pattern whose shape matches `input`, if any.
///
/// Useful for diagnostics: a `Some` here with a failing [`parse_date`] means
/// the text was recognized but names an impossible date.
pub fn matching_pattern(input: &str) -> Option<DatePattern> {
    DatePattern::PRECEDENCE
        .into_iter()
        .find(|pattern| pattern.try_parse(input, RangeEnd::First).is_some())
}

/// Parses a date, resolving day ranges to the requested end.
pub fn parse_date(input: &str, end: RangeEnd) -> Result<NaiveDate, DateParseError> {
    for pattern in DatePattern::PRECEDENCE {
        if let Some(result) = pattern.try_parse(input, end) {
            debug!(?pattern, input, ok = result.is_ok(), "date pattern matched");
            return result;
        }
    }
    Err(DateParseError::unrecognized(input))
}

/// Parses the date an event starts on (first day of any range).
pub fn parse_start_date(input: &str) -> Result<NaiveDate, DateParseError> {
    parse_date(input, RangeEnd::First)
}

/// Parses the date an event ends on (last day of any range).
pub fn parse_end_date(input: &str) -> Result<NaiveDate, DateParseError> {
    parse_date(input, RangeEnd::Last)
}

/// Parses a 12-hour clock time such as `"9:00 AM"` or `" 12:30pm "`.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, DateParseError> {
    let caps = TIME_OF_DAY_REGEX
        .captures(input)
        .ok_or_else(|| DateParseError::UnrecognizedTime {
            input: input.to_string(),
        })?;

    let out_of_range = || DateParseError::TimeOutOfRange {
        input: input.to_string(),
    };

    let hour = capture::<u32>(&caps, 1)
        .filter(|h| (1..=12).contains(h))
        .ok_or_else(out_of_range)?;
    let minute = capture::<u32>(&caps, 2)
        .filter(|m| *m < 60)
        .ok_or_else(out_of_range)?;
    let is_pm = caps[3].eq_ignore_ascii_case("pm");

    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(out_of_range)
}

/// Resolves an English month name or abbreviation to its number (1-12).
///
/// Accepts full names, three-letter abbreviations and `Sept`, in any case,
/// with an optional trailing period.
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.trim().trim_end_matches('.').to_ascii_lowercase();
    if lower == "sept" {
        return Some(9);
    }
    MONTH_NAMES
        .iter()
        .position(|full| *full == lower || (lower.len() == 3 && full.starts_with(lower.as_str())))
        .map(|index| index as u32 + 1)
}

fn capture<T: FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

fn month_capture(input: &str, caps: &Captures<'_>) -> Result<u32, DateParseError> {
    let name = &caps[1];
    month_from_name(name).ok_or_else(|| DateParseError::UnknownMonth {
        name: name.to_string(),
        input: input.to_string(),
    })
}

fn calendar_date(
    input: &str,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
) -> Result<NaiveDate, DateParseError> {
    match (year, month, day) {
        (Some(y), Some(m), Some(d)) => {
            NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| DateParseError::invalid(input))
        }
        _ => Err(DateParseError::invalid(input)),
    }
}

fn parse_generic(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    GENERIC_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            GENERIC_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .filter(|date| (1000..=9999).contains(&date.year()))
}
