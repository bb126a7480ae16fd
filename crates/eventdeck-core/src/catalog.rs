//! The event listing.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventStatus, EventView};

/// Category key that selects every event.
pub const ALL_CATEGORIES: &str = "all";

/// An ordered list of events as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Looks up an event by id.
    pub fn get(&self, id: u32) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events in `category`, or all of them for [`ALL_CATEGORIES`].
    pub fn filter<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events
            .iter()
            .filter(move |e| category == ALL_CATEGORIES || e.in_category(category))
    }

    /// Events with the given status, in listing order.
    pub fn with_status(&self, status: EventStatus) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.status == status)
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &Event> {
        self.with_status(EventStatus::Upcoming)
    }

    pub fn past(&self) -> impl Iterator<Item = &Event> {
        self.with_status(EventStatus::Past)
    }

    /// Events happening at `now`.
    pub fn live_at(&self, now: NaiveDateTime) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_live_at(now)).collect()
    }

    /// The event to headline: the first upcoming event that has not started.
    ///
    /// An upcoming event whose dates cannot be parsed is still offered, so a
    /// listing with a loosely written date is shown rather than hidden.
    pub fn next_upcoming(&self, now: NaiveDateTime) -> Option<&Event> {
        self.upcoming().find(|e| match e.window() {
            Ok(window) => window.starts_after(now),
            Err(_) => true,
        })
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.events
            .iter()
            .filter_map(|e| e.category.as_deref())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Ids that appear more than once.
    pub fn duplicate_ids(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for event in &self.events {
            if !seen.insert(event.id) && !duplicates.contains(&event.id) {
                duplicates.push(event.id);
            }
        }
        duplicates
    }

    /// Display views of every event at `now`.
    pub fn views(&self, now: NaiveDateTime) -> Vec<EventView> {
        self.events
            .iter()
            .map(|e| EventView::from_event(e, now))
            .collect()
    }
}

impl From<Vec<Event>> for EventCatalog {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn sample() -> EventCatalog {
        EventCatalog::new(vec![
            Event::new(1, "Zenix", "Mar 5-6, 2026")
                .with_time("9:00 AM")
                .with_tag("Community Event"),
            Event::new(2, "Community Meetup", "Aug 2024")
                .with_status(EventStatus::Past)
                .with_category("meetup"),
            Event::new(4, "Devops Workshop", "Jan 2026")
                .with_status(EventStatus::Past)
                .with_category("workshop"),
            Event::new(7, "Devigo", "Jan 2026")
                .with_status(EventStatus::Past)
                .with_category("workshop"),
        ])
    }

    fn ids<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<u32> {
        events.into_iter().map(|e| e.id).collect()
    }

    #[test]
    fn filter_by_category() {
        let catalog = sample();
        assert_eq!(ids(catalog.filter(ALL_CATEGORIES)), vec![1, 2, 4, 7]);
        assert_eq!(ids(catalog.filter("workshop")), vec![4, 7]);
        assert_eq!(ids(catalog.filter("meetup")), vec![2]);
        assert!(ids(catalog.filter("design")).is_empty());
    }

    #[test]
    fn split_by_status() {
        let catalog = sample();
        assert_eq!(ids(catalog.upcoming()), vec![1]);
        assert_eq!(ids(catalog.past()), vec![2, 4, 7]);
    }

    #[test]
    fn live_at() {
        let catalog = sample();
        assert!(catalog.live_at(dt(2026, 3, 4, 12, 0)).is_empty());
        assert_eq!(ids(catalog.live_at(dt(2026, 3, 6, 12, 0))), vec![1]);
        // Jan 2026 workshops are marked past.
        assert!(catalog.live_at(dt(2026, 1, 1, 12, 0)).is_empty());
    }

    #[test]
    fn next_upcoming_skips_started_events() {
        let catalog = sample();
        assert_eq!(catalog.next_upcoming(dt(2026, 3, 1, 0, 0)).map(|e| e.id), Some(1));
        assert_eq!(catalog.next_upcoming(dt(2026, 3, 5, 10, 0)), None);
    }

    #[test]
    fn next_upcoming_offers_unparseable_dates() {
        let catalog = EventCatalog::new(vec![
            Event::new(1, "Done", "Jan 2026"),
            Event::new(2, "Soon", "TBA"),
        ]);
        assert_eq!(catalog.next_upcoming(dt(2026, 2, 1, 0, 0)).map(|e| e.id), Some(2));
    }

    #[test]
    fn categories_and_duplicates() {
        let mut events = sample().events().to_vec();
        events.push(Event::new(4, "Again", "Feb 2026").with_category("meetup"));
        let catalog = EventCatalog::from(events);

        assert_eq!(catalog.categories(), vec!["meetup", "workshop"]);
        assert_eq!(catalog.duplicate_ids(), vec![4]);
        assert!(sample().duplicate_ids().is_empty());
    }

    #[test]
    fn lookup_and_views() {
        let catalog = sample();
        assert_eq!(catalog.get(7).map(|e| e.title.as_str()), Some("Devigo"));
        assert!(catalog.get(3).is_none());

        let views = catalog.views(dt(2026, 3, 5, 9, 30));
        assert_eq!(views.len(), 4);
        assert!(views[0].is_live);
        assert!(views[1..].iter().all(|v| !v.is_live));
    }
}
