//! Rotating display state for the team and gallery carousels.
//!
//! [`CarouselController`] owns the item list, the active index, the
//! direction of the last move and a paused flag. It has no clock of its own:
//! the host calls [`CarouselController::tick`] on a fixed period (3 s on the
//! site) and the controller advances unless paused.
//!
//! Renderers learn about changes by subscribing; every transition that
//! changes state is followed by one notification carrying a
//! [`CarouselSnapshot`].
//!
//! # Example
//!
//! ```
//! use eventdeck_core::carousel::CarouselController;
//!
//! let mut carousel = CarouselController::new(vec!["a", "b", "c"]);
//! carousel.advance();
//! assert_eq!(carousel.active_item(), Some(&"b"));
//! carousel.retreat();
//! carousel.retreat();
//! assert_eq!(carousel.active_index(), 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// The direction of the last move; only affects slide animations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// `1` for forward, `-1` for backward, for offsetting slide-in positions.
    pub fn sign(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Carousel state as seen by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSnapshot<T> {
    pub active_index: usize,
    pub direction: Direction,
    pub paused: bool,
    /// Bumped on every index change; use it to re-key slide animations.
    pub generation: u64,
    pub len: usize,
    /// The item at `active_index`, `None` when the carousel is empty.
    pub active: Option<T>,
}

/// Identifies a subscription for [`CarouselController::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<T> = Box<dyn FnMut(&CarouselSnapshot<T>) + Send>;

/// Drives a rotating display of items.
pub struct CarouselController<T> {
    items: Vec<T>,
    active_index: usize,
    direction: Direction,
    paused: bool,
    generation: u64,
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_subscription: u64,
}

impl<T> CarouselController<T> {
    /// Creates a running carousel showing the first item.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            active_index: 0,
            direction: Direction::Forward,
            paused: false,
            generation: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The item on display, `None` when empty.
    pub fn active_item(&self) -> Option<&T> {
        self.items.get(self.active_index)
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T: Clone> CarouselController<T> {
    /// Registers `observer` to be called after each state change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&CarouselSnapshot<T>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Captures the current state.
    pub fn snapshot(&self) -> CarouselSnapshot<T> {
        CarouselSnapshot {
            active_index: self.active_index,
            direction: self.direction,
            paused: self.paused,
            generation: self.generation,
            len: self.items.len(),
            active: self.active_item().cloned(),
        }
    }

    /// Moves to the next item, wrapping to the first. No-op when empty.
    pub fn advance(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.active_index = (self.active_index + 1) % self.items.len();
        self.direction = Direction::Forward;
        self.generation += 1;
        self.notify();
        true
    }

    /// Moves to the previous item, wrapping to the last. No-op when empty.
    pub fn retreat(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let len = self.items.len();
        self.active_index = (self.active_index + len - 1) % len;
        self.direction = Direction::Backward;
        self.generation += 1;
        self.notify();
        true
    }

    /// Handles one timer period: advances unless paused.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.advance()
    }

    /// Suspends automatic advancement. Manual moves keep working.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.notify();
        }
    }

    /// Re-enables automatic advancement.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.notify();
        }
    }

    /// Replaces the items and starts over from the first one, moving forward.
    ///
    /// The paused flag is left as is.
    pub fn switch_collection(&mut self, items: Vec<T>) {
        self.items = items;
        self.active_index = 0;
        self.direction = Direction::Forward;
        self.generation += 1;
        self.notify();
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, observer) in self.observers.iter_mut() {
            observer(&snapshot);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CarouselController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselController")
            .field("items", &self.items)
            .field("active_index", &self.active_index)
            .field("direction", &self.direction)
            .field("paused", &self.paused)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .finish()
    }
}
