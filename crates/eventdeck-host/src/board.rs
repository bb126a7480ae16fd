//! Periodically refreshed live-event board.
//!
//! Liveness is derived from "now", so a view that shows it has to be
//! recomputed as time passes. [`LiveBoard`] does this on a fixed period
//! (30 s on the site), reading time from an injected [`Clock`], and publishes
//! each [`BoardSnapshot`] on a `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use eventdeck_core::{Clock, EventCatalog, EventView};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::error::{HostError, HostResult};

/// Refresh period used by the site.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// What the board shows at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// The reference instant the snapshot was computed at.
    pub now: NaiveDateTime,
    /// Events happening at `now`.
    pub live: Vec<EventView>,
    /// The event to headline next, if any.
    pub next_upcoming: Option<EventView>,
}

impl BoardSnapshot {
    /// Computes the board for `catalog` at `now`.
    pub fn compute(catalog: &EventCatalog, now: NaiveDateTime) -> Self {
        Self {
            now,
            live: catalog
                .live_at(now)
                .into_iter()
                .map(|e| EventView::from_event(e, now))
                .collect(),
            next_upcoming: catalog
                .next_upcoming(now)
                .map(|e| EventView::from_event(e, now)),
        }
    }

    /// Ids of the live events.
    pub fn live_ids(&self) -> Vec<u32> {
        self.live.iter().map(|v| v.id).collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum BoardCommand {
    Refresh,
    Stop,
}

/// Recomputes the live board on a timer.
pub struct LiveBoard {
    catalog: EventCatalog,
    clock: Arc<dyn Clock>,
    interval: Duration,
    command_tx: mpsc::Sender<BoardCommand>,
    command_rx: mpsc::Receiver<BoardCommand>,
    state_tx: watch::Sender<BoardSnapshot>,
}

impl LiveBoard {
    /// Creates a board and computes its first snapshot.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn new(catalog: EventCatalog, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "refresh interval must be non-zero");

        let initial = BoardSnapshot::compute(&catalog, clock.now());
        let (state_tx, _) = watch::channel(initial);
        let (command_tx, command_rx) = mpsc::channel(8);
        Self {
            catalog,
            clock,
            interval,
            command_tx,
            command_rx,
            state_tx,
        }
    }

    /// Returns a handle to the board. The board stops once every handle is dropped.
    pub fn handle(&self) -> BoardHandle {
        BoardHandle {
            command_tx: self.command_tx.clone(),
            state_rx: self.state_tx.subscribe(),
        }
    }

    /// Runs until stopped.
    pub async fn run(self) {
        let Self {
            catalog,
            clock,
            interval,
            command_tx,
            mut command_rx,
            state_tx,
        } = self;
        drop(command_tx);

        let mut ticker =
            tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = interval.as_secs(),
            events = catalog.len(),
            "Live board started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => refresh(&catalog, clock.as_ref(), &state_tx),
                cmd = command_rx.recv() => match cmd {
                    Some(BoardCommand::Refresh) => {
                        refresh(&catalog, clock.as_ref(), &state_tx);
                        ticker.reset();
                    }
                    Some(BoardCommand::Stop) | None => {
                        info!("Live board stopping");
                        break;
                    }
                },
            }
        }
    }
}

fn refresh(catalog: &EventCatalog, clock: &dyn Clock, state_tx: &watch::Sender<BoardSnapshot>) {
    let snapshot = BoardSnapshot::compute(catalog, clock.now());
    let previous = state_tx.borrow().live_ids();
    let current = snapshot.live_ids();
    if previous != current {
        info!(?previous, ?current, "Live events changed");
    } else {
        debug!(now = %snapshot.now, live = current.len(), "Live board refreshed");
    }
    state_tx.send_replace(snapshot);
}

/// Handle to a running [`LiveBoard`].
#[derive(Debug, Clone)]
pub struct BoardHandle {
    command_tx: mpsc::Sender<BoardCommand>,
    state_rx: watch::Receiver<BoardSnapshot>,
}

impl BoardHandle {
    /// Recomputes immediately instead of waiting for the next period.
    pub async fn refresh(&self) -> HostResult<()> {
        self.command_tx
            .send(BoardCommand::Refresh)
            .await
            .map_err(|_| HostError::stopped("live board"))
    }

    pub async fn stop(&self) -> HostResult<()> {
        self.command_tx
            .send(BoardCommand::Stop)
            .await
            .map_err(|_| HostError::stopped("live board"))
    }

    /// The latest published board.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.state_rx.borrow().clone()
    }

    /// A receiver that is notified after every refresh.
    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.state_rx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use eventdeck_core::{Event, EventStatus, FixedClock};

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
                .with_end_time("12:30 PM"),
            Event::new(2, "Hack night", "28-02-2026").with_time("6:00 PM"),
            Event::new(3, "Old meetup", "28-02-2026").with_status(EventStatus::Past),
        ])
    }

    #[test]
    fn compute_snapshot() {
        let board = BoardSnapshot::compute(&catalog(), dt(28, 12, 0));
        assert_eq!(board.live_ids(), vec![1]);
        assert_eq!(board.next_upcoming.as_ref().map(|v| v.id), Some(2));
        assert_eq!(
            board.next_upcoming.and_then(|v| v.minutes_until_start),
            Some(360)
        );

        let board = BoardSnapshot::compute(&catalog(), dt(28, 19, 0));
        assert_eq!(board.live_ids(), vec![2]);
        assert!(board.next_upcoming.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn refreshes_on_demand_and_on_timer() {
        let clock = Arc::new(FixedClock::new(dt(28, 11, 0)));
        let board = LiveBoard::new(catalog(), clock.clone(), DEFAULT_REFRESH_INTERVAL);
        let handle = board.handle();
        let mut rx = handle.subscribe();
        let task = tokio::spawn(board.run());

        assert!(handle.snapshot().live.is_empty());
        assert_eq!(handle.snapshot().next_upcoming.map(|v| v.id), Some(1));

        clock.set(dt(28, 12, 0));
        handle.refresh().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().live_ids(), vec![1]);

        clock.set(dt(28, 12, 31));
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert!(snapshot.live.is_empty());
        assert_eq!(snapshot.now, dt(28, 12, 31));

        handle.stop().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_handles_are_dropped() {
        let clock = Arc::new(FixedClock::new(dt(28, 11, 0)));
        let board = LiveBoard::new(catalog(), clock, DEFAULT_REFRESH_INTERVAL);
        let handle = board.handle();
        let task = tokio::spawn(board.run());

        drop(handle);
        task.await.unwrap();
    }
}
