//! Event commands: listing, live status, next event, resolved windows.

use std::sync::Arc;

use chrono::NaiveDateTime;
use eventdeck_core::{Clock, Event, EventStatus, EventView, LiveWindow, SystemClock};
use tracing::warn;

use super::format_minutes;
use crate::board::{BoardSnapshot, LiveBoard};
use crate::config::SiteConfig;
use crate::error::{HostError, HostResult};

const SHORT_INSTANT: &str = "%Y-%m-%d %H:%M";

/// Lists events in `category`, optionally narrowed to one status.
pub fn list(
    config: &SiteConfig,
    category: &str,
    status: Option<EventStatus>,
    now: NaiveDateTime,
    json: bool,
) -> HostResult<()> {
    let catalog = config.catalog();
    let views: Vec<EventView> = catalog
        .filter(category)
        .filter(|e| status.is_none_or(|s| e.status == s))
        .map(|e| EventView::from_event(e, now))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        println!("{}", render_events(&views));
    }
    Ok(())
}

/// Shows what is live at `now` and what comes next.
pub fn live(config: &SiteConfig, now: NaiveDateTime) -> HostResult<()> {
    let board = BoardSnapshot::compute(&config.catalog(), now);
    println!("{}", render_board(&board));
    Ok(())
}

/// Keeps a live board running and prints it whenever the live set changes.
pub async fn watch_live(config: &SiteConfig) -> HostResult<()> {
    if config.refresh_interval().is_zero() {
        return Err(HostError::config(
            "clock.refresh_secs must be greater than zero",
        ));
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let board = LiveBoard::new(config.catalog(), clock, config.refresh_interval());
    let handle = board.handle();
    let mut rx = handle.subscribe();
    let task = tokio::spawn(board.run());

    let first = rx.borrow_and_update().clone();
    let mut shown = first.live_ids();
    println!("{}", render_board(&first));

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let board = rx.borrow_and_update().clone();
                let ids = board.live_ids();
                if ids != shown {
                    println!();
                    println!("{}", render_board(&board));
                    shown = ids;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.stop().await?;
    if let Err(err) = task.await {
        warn!(error = %err, "Live board task failed");
    }
    Ok(())
}

/// Shows the next upcoming event.
pub fn next(config: &SiteConfig, now: NaiveDateTime) -> HostResult<()> {
    let catalog = config.catalog();
    let view = catalog
        .next_upcoming(now)
        .map(|e| EventView::from_event(e, now));
    println!("{}", render_next(view.as_ref()));
    Ok(())
}

/// Shows the resolved start and end of event `id`.
pub fn window(config: &SiteConfig, id: u32) -> HostResult<()> {
    let catalog = config.catalog();
    let event = catalog.get(id).ok_or(HostError::UnknownEvent { id })?;
    let window = event
        .window()
        .map_err(|source| HostError::EventWindow { id, source })?;
    println!("{}", render_window(event, &window));
    Ok(())
}

fn when(view: &EventView) -> String {
    match &view.time_text {
        Some(time) => format!("{}, {}", view.date_text, time),
        None => view.date_text.clone(),
    }
}

/// One listing line for an event.
pub fn render_event_line(view: &EventView) -> String {
    let mut line = format!(
        "#{} {} | {} | {}",
        view.id,
        view.title,
        when(view),
        view.status.as_str()
    );
    if view.is_live {
        line.push_str(" | LIVE");
    } else if let Some(minutes) = view.minutes_until_start {
        line.push_str(&format!(" | in {}", format_minutes(minutes)));
    }
    line
}

pub fn render_events(views: &[EventView]) -> String {
    if views.is_empty() {
        return "No events.".to_string();
    }
    views
        .iter()
        .map(render_event_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_live(views: &[EventView], now: NaiveDateTime) -> String {
    if views.is_empty() {
        return format!("Nothing is live at {}.", now.format(SHORT_INSTANT));
    }
    views
        .iter()
        .map(|view| match view.window {
            Some(window) => format!(
                "LIVE #{} {} until {}",
                view.id,
                view.title,
                window.end.format(SHORT_INSTANT)
            ),
            None => format!("LIVE #{} {}", view.id, view.title),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_next(view: Option<&EventView>) -> String {
    match view {
        None => "No upcoming events.".to_string(),
        Some(view) => match view.minutes_until_start {
            Some(minutes) => format!(
                "Next: #{} {}, {} (in {})",
                view.id,
                view.title,
                when(view),
                format_minutes(minutes)
            ),
            None => format!("Next: #{} {}, {}", view.id, view.title, when(view)),
        },
    }
}

pub fn render_board(board: &BoardSnapshot) -> String {
    format!(
        "{}\n{}",
        render_live(&board.live, board.now),
        render_next(board.next_upcoming.as_ref())
    )
}

pub fn render_window(event: &Event, window: &LiveWindow) -> String {
    format!(
        "#{} {}\nstart: {}\nend: {}\nlength: {}",
        event.id,
        event.title,
        window.start.format(SHORT_INSTANT),
        window.end.format(SHORT_INSTANT),
        format_minutes(window.duration().num_minutes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use eventdeck_core::EventCatalog;
    use insta::assert_snapshot;

    fn dt(d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn catalog() -> EventCatalog {
        EventCatalog::new(vec![
            Event::new(1, "Lunch talk", "28-02-2026")
                .with_time("11:30 AM")
                .with_end_time("12:30 PM")
                .with_category("talk"),
            Event::new(2, "Hack night", "28-02-2026")
                .with_time("6:00 PM")
                .with_category("workshop"),
            Event::new(3, "Old meetup", "Aug 2024")
                .with_status(EventStatus::Past)
                .with_category("meetup"),
        ])
    }

    #[test]
    fn event_listing() {
        let views = catalog().views(dt(28, 12, 0));
        assert_snapshot!(render_events(&views), @r"
        #1 Lunch talk | 28-02-2026, 11:30 AM | upcoming | LIVE
        #2 Hack night | 28-02-2026, 6:00 PM | upcoming | in 6h 00m
        #3 Old meetup | Aug 2024 | past
        ");
        assert_eq!(render_events(&[]), "No events.");
    }

    #[test]
    fn board_during_a_talk() {
        let board = BoardSnapshot::compute(&catalog(), dt(28, 12, 0));
        assert_snapshot!(render_board(&board), @r"
        LIVE #1 Lunch talk until 2026-02-28 12:30
        Next: #2 Hack night, 28-02-2026, 6:00 PM (in 6h 00m)
        ");
    }

    #[test]
    fn board_with_nothing_on() {
        let board = BoardSnapshot::compute(&catalog(), dt(27, 9, 0));
        assert_snapshot!(render_board(&board), @r"
        Nothing is live at 2026-02-27 09:00.
        Next: #1 Lunch talk, 28-02-2026, 11:30 AM (in 1d 2h)
        ");
    }

    #[test]
    fn next_without_a_usable_date() {
        let catalog = EventCatalog::new(vec![Event::new(9, "Mystery", "TBA")]);
        let view = catalog
            .next_upcoming(dt(28, 12, 0))
            .map(|e| EventView::from_event(e, dt(28, 12, 0)));
        assert_eq!(render_next(view.as_ref()), "Next: #9 Mystery, TBA");
        assert_eq!(render_next(None), "No upcoming events.");
    }

    #[test]
    fn resolved_window() {
        let event = Event::new(1, "Zenix", "Mar 5-6, 2026").with_time("9:00 AM");
        let window = event.window().unwrap();
        assert_snapshot!(render_window(&event, &window), @r"
        #1 Zenix
        start: 2026-03-05 09:00
        end: 2026-03-06 23:59
        length: 1d 14h
        ");
    }

    #[test]
    fn window_errors() {
        let config = SiteConfig::default().with_events(vec![Event::new(4, "Soon", "TBA")]);
        assert!(matches!(
            window(&config, 99),
            Err(HostError::UnknownEvent { id: 99 })
        ));
        assert!(matches!(
            window(&config, 4),
            Err(HostError::EventWindow { id: 4, .. })
        ));
    }
}
