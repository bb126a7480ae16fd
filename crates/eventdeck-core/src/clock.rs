//! Reference clocks.
//!
//! Liveness is always computed against an explicit "now". Hosts obtain it
//! from a [`Clock`] so that views can be refreshed on a timer in production
//! and pinned to a fixed instant in tests.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{Duration, Local, NaiveDateTime};

/// A source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> NaiveDateTime;
}

/// The system's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 28)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn fixed_clock_set_and_advance() {
        let clock = FixedClock::new(dt(11, 0));
        assert_eq!(clock.now(), dt(11, 0));

        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), dt(12, 30));

        clock.set(dt(9, 15));
        assert_eq!(clock.now(), dt(9, 15));
    }

    #[test]
    fn shared_clock_sees_updates() {
        let clock = Arc::new(FixedClock::new(dt(10, 0)));
        let shared: Arc<dyn Clock> = clock.clone();

        clock.advance(Duration::minutes(5));
        assert_eq!(shared.now(), dt(10, 5));
    }

    #[test]
    fn system_clock_moves_forward() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }
}
