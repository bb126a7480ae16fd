//! Event types.
//!
//! This module provides:
//! - [`Schedule`]: the hand-written date/time fields of an event and the
//!   rules that turn them into a [`LiveWindow`]
//! - [`Event`]: a listed event with its author-assigned [`EventStatus`]
//! - [`EventView`]: a display-ready view of an event at a given instant

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::{DateParseError, parse_end_date, parse_start_date, parse_time_of_day};
use crate::time::{LiveWindow, end_of_day, end_of_minute, start_of_day};

/// Whether an event is still to come or already happened.
///
/// Assigned by whoever writes the listing; it is never derived from dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Past,
}

impl EventStatus {
    /// Lowercase label, as used in listings and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Past => "past",
        }
    }
}

/// The date and time fields of an event, exactly as written.
///
/// Empty or whitespace-only optional fields count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Day or day range, e.g. `"Mar 5-6, 2026"`, `"28-02-2026"`, `"Aug 2024"`.
    #[serde(rename = "date")]
    pub date_text: String,
    /// Start time, e.g. `"9:00 AM"`. Start of day when absent.
    #[serde(rename = "time", default, skip_serializing_if = "Option::is_none")]
    pub time_text: Option<String>,
    /// Overrides the day the event ends on.
    #[serde(rename = "end_date", default, skip_serializing_if = "Option::is_none")]
    pub end_date_text: Option<String>,
    /// End time. End of day when absent.
    #[serde(rename = "end_time", default, skip_serializing_if = "Option::is_none")]
    pub end_time_text: Option<String>,
}

impl Schedule {
    /// Creates a schedule with only a date.
    pub fn new(date_text: impl Into<String>) -> Self {
        Self {
            date_text: date_text.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the start time.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time_text = Some(time.into());
        self
    }

    /// Builder method to set the end date.
    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date_text = Some(date.into());
        self
    }

    /// Builder method to set the end time.
    pub fn with_end_time(mut self, time: impl Into<String>) -> Self {
        self.end_time_text = Some(time.into());
        self
    }

    /// The start time text, if meaningfully set.
    pub fn time(&self) -> Option<&str> {
        present(&self.time_text)
    }

    /// The end date text, if meaningfully set.
    pub fn end_date(&self) -> Option<&str> {
        present(&self.end_date_text)
    }

    /// The end time text, if meaningfully set.
    pub fn end_time(&self) -> Option<&str> {
        present(&self.end_time_text)
    }

    /// Resolves the first instant of the event.
    pub fn start(&self) -> Result<NaiveDateTime, DateParseError> {
        let date = parse_start_date(&self.date_text)?;
        match self.time() {
            Some(time) => Ok(date.and_time(parse_time_of_day(time)?)),
            None => Ok(start_of_day(date)),
        }
    }

    /// Resolves the last instant of the event.
    ///
    /// The end day comes from the explicit end date when set, otherwise from
    /// the last day of the date text's range. An explicit end time covers its
    /// whole minute.
    pub fn end(&self) -> Result<NaiveDateTime, DateParseError> {
        let date = match self.end_date() {
            Some(end_date) => parse_start_date(end_date)?,
            None => parse_end_date(&self.date_text)?,
        };
        match self.end_time() {
            Some(time) => Ok(date.and_time(end_of_minute(parse_time_of_day(time)?))),
            None => Ok(end_of_day(date)),
        }
    }

    /// Resolves both ends of the event.
    pub fn window(&self) -> Result<LiveWindow, DateParseError> {
        Ok(LiveWindow::new(self.start()?, self.end()?))
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// A listed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier within a catalog.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// When the event happens.
    #[serde(flatten)]
    pub schedule: Schedule,
    /// Author-assigned status.
    #[serde(default)]
    pub status: EventStatus,
    /// Filter key, e.g. `"workshop"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Badge text, e.g. `"Completed"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Cover picture path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Event {
    /// Creates an upcoming event with the required fields.
    pub fn new(id: u32, title: impl Into<String>, date_text: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            schedule: Schedule::new(date_text),
            status: EventStatus::Upcoming,
            category: None,
            tag: None,
            image: None,
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the start time.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.schedule = self.schedule.with_time(time);
        self
    }

    /// Builder method to set the end date.
    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.schedule = self.schedule.with_end_date(date);
        self
    }

    /// Builder method to set the end time.
    pub fn with_end_time(mut self, time: impl Into<String>) -> Self {
        self.schedule = self.schedule.with_end_time(time);
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder method to set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder method to set the badge text.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Builder method to set the cover picture.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns true if the event is marked upcoming.
    pub fn is_upcoming(&self) -> bool {
        self.status == EventStatus::Upcoming
    }

    /// Returns true if the event belongs to `category` (exact match).
    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    /// Resolves the event's live window.
    pub fn window(&self) -> Result<LiveWindow, DateParseError> {
        self.schedule.window()
    }

    /// Checks whether the event is happening at `now`.
    ///
    /// Past events are never live. Events whose dates cannot be parsed are
    /// never live either; the parse failure is only logged.
    pub fn is_live_at(&self, now: NaiveDateTime) -> bool {
        if !self.is_upcoming() {
            return false;
        }
        match self.window() {
            Ok(window) => window.contains(now),
            Err(err) => {
                debug!(event_id = self.id, error = %err, "event window unparseable, not live");
                false
            }
        }
    }
}

/// A display-ready view of an event.
///
/// Pre-computes everything a listing needs at a given reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    pub id: u32,
    pub title: String,
    pub date_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_text: Option<String>,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Whether the event is happening at the reference instant.
    pub is_live: bool,
    /// The resolved window, when the dates parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<LiveWindow>,
    /// Minutes until an upcoming event opens; absent once it has started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_until_start: Option<i64>,
}

impl EventView {
    /// Builds the view of `event` at `now`.
    pub fn from_event(event: &Event, now: NaiveDateTime) -> Self {
        let window = event.window().ok();
        let minutes_until_start = window
            .filter(|w| event.is_upcoming() && w.starts_after(now))
            .map(|w| w.minutes_until_start(now));

        Self {
            id: event.id,
            title: event.title.clone(),
            date_text: event.schedule.date_text.clone(),
            time_text: event.schedule.time().map(str::to_string),
            status: event.status,
            category: event.category.clone(),
            is_live: event.is_live_at(now),
            window,
            minutes_until_start,
        }
    }
}
