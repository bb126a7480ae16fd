//! Timer-driven carousel.
//!
//! [`CarouselDriver`] owns a [`CarouselController`] inside a single task and
//! feeds it two kinds of input: ticks from a fixed-period timer and commands
//! from [`CarouselHandle`]s. Both are handled in one `select!` loop, so state
//! changes never overlap and are applied in arrival order.
//!
//! Every state change is published on a `watch` channel through a controller
//! subscription; renderers read the latest [`CarouselSnapshot`] from there.

use std::time::Duration;

use eventdeck_core::{CarouselController, CarouselSnapshot};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::{HostError, HostResult};

/// Auto-advance period used by the site.
pub const DEFAULT_ADVANCE_INTERVAL: Duration = Duration::from_millis(3000);

/// Commands accepted by a running driver.
#[derive(Debug, Clone)]
pub enum CarouselCommand<T> {
    /// Show the next item.
    Next,
    /// Show the previous item.
    Previous,
    /// Stop auto-advancing.
    Pause,
    /// Restart auto-advancing; the next tick is a full period away.
    /// Ignored when not paused.
    Resume,
    /// Replace the items and restart from the first one.
    SetItems(Vec<T>),
    /// Stop the driver.
    Stop,
}

/// Runs a carousel on a timer.
pub struct CarouselDriver<T> {
    controller: CarouselController<T>,
    interval: Duration,
    command_tx: mpsc::Sender<CarouselCommand<T>>,
    command_rx: mpsc::Receiver<CarouselCommand<T>>,
    state_rx: watch::Receiver<CarouselSnapshot<T>>,
}

impl<T> CarouselDriver<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a driver advancing every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn new(items: Vec<T>, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "carousel interval must be non-zero");

        let mut controller = CarouselController::new(items);
        let (state_tx, state_rx) = watch::channel(controller.snapshot());
        controller.subscribe(move |snapshot| {
            state_tx.send_replace(snapshot.clone());
        });

        let (command_tx, command_rx) = mpsc::channel(16);
        Self {
            controller,
            interval,
            command_tx,
            command_rx,
            state_rx,
        }
    }

    /// Returns a handle for sending commands to the driver.
    ///
    /// The driver stops once every handle is dropped.
    pub fn handle(&self) -> CarouselHandle<T> {
        CarouselHandle {
            command_tx: self.command_tx.clone(),
            state_rx: self.state_rx.clone(),
        }
    }

    /// Runs until [`CarouselCommand::Stop`] or until all handles are gone.
    pub async fn run(self) {
        let Self {
            mut controller,
            interval,
            command_tx,
            mut command_rx,
            state_rx: _,
        } = self;
        drop(command_tx);

        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = interval.as_millis() as u64,
            items = controller.len(),
            "Carousel driver started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !controller.tick() {
                        debug!(paused = controller.is_paused(), "Tick skipped");
                    }
                }
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(CarouselCommand::Next) => {
                            controller.advance();
                        }
                        Some(CarouselCommand::Previous) => {
                            controller.retreat();
                        }
                        Some(CarouselCommand::Pause) => {
                            debug!("Carousel paused");
                            controller.pause();
                        }
                        Some(CarouselCommand::Resume) => {
                            if controller.is_paused() {
                                debug!("Carousel resumed");
                                controller.resume();
                                ticker.reset();
                            }
                        }
                        Some(CarouselCommand::SetItems(items)) => {
                            debug!(items = items.len(), "Carousel items replaced");
                            controller.switch_collection(items);
                            ticker.reset();
                        }
                        Some(CarouselCommand::Stop) | None => {
                            info!("Carousel driver stopping");
                            break;
                        }
                    }
                }
            }
        }
    }
}

/// Handle for sending commands to a running driver.
#[derive(Debug, Clone)]
pub struct CarouselHandle<T> {
    command_tx: mpsc::Sender<CarouselCommand<T>>,
    state_rx: watch::Receiver<CarouselSnapshot<T>>,
}

impl<T: Clone> CarouselHandle<T> {
    async fn send(&self, command: CarouselCommand<T>) -> HostResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| HostError::stopped("carousel driver"))
    }

    pub async fn next(&self) -> HostResult<()> {
        self.send(CarouselCommand::Next).await
    }

    pub async fn previous(&self) -> HostResult<()> {
        self.send(CarouselCommand::Previous).await
    }

    pub async fn pause(&self) -> HostResult<()> {
        self.send(CarouselCommand::Pause).await
    }

    pub async fn resume(&self) -> HostResult<()> {
        self.send(CarouselCommand::Resume).await
    }

    pub async fn set_items(&self, items: Vec<T>) -> HostResult<()> {
        self.send(CarouselCommand::SetItems(items)).await
    }

    pub async fn stop(&self) -> HostResult<()> {
        self.send(CarouselCommand::Stop).await
    }

    /// The latest published state.
    pub fn snapshot(&self) -> CarouselSnapshot<T> {
        self.state_rx.borrow().clone()
    }

    /// A receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot<T>> {
        self.state_rx.clone()
    }
}
