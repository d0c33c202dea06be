//! Engine time source
//!
//! The engine stamps instances, tasks and comments with [`EngineClock::now`].
//! Demo fixtures move that notion of "now" through a [`ClockOverride`] guard,
//! which puts the previous time source back when it goes out of scope,
//! including on early returns and errors. Guards nest.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock shared by the engine and everything that needs to backdate work.
pub struct EngineClock {
    base: Arc<dyn Clock>,
    current_override: RwLock<Option<DateTime<Utc>>>,
}

impl EngineClock {
    pub fn system() -> Self {
        Self::with_base(Arc::new(SystemClock))
    }

    pub fn with_base(base: Arc<dyn Clock>) -> Self {
        Self {
            base,
            current_override: RwLock::new(None),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        let pinned = *self.current_override.read();
        pinned.unwrap_or_else(|| self.base.now())
    }

    pub fn is_overridden(&self) -> bool {
        self.current_override.read().is_some()
    }

    /// Pins "now" to `at` until the returned guard is dropped.
    pub fn travel_to(&self, at: DateTime<Utc>) -> ClockOverride<'_> {
        debug!(at = %at, "Overriding engine clock");
        let previous = self.current_override.write().replace(at);
        ClockOverride { clock: self, previous }
    }

    fn restore(&self, previous: Option<DateTime<Utc>>) {
        *self.current_override.write() = previous;
        match previous {
            Some(at) => debug!(at = %at, "Engine clock back to the outer override"),
            None => debug!("Engine clock reset to real time"),
        }
    }
}

impl Default for EngineClock {
    fn default() -> Self {
        Self::system()
    }
}

impl Clock for EngineClock {
    fn now(&self) -> DateTime<Utc> {
        EngineClock::now(self)
    }
}

/// Scoped clock override. Dropping it restores whatever was in effect
/// before it was taken.
#[must_use = "the override ends as soon as the guard is dropped"]
pub struct ClockOverride<'a> {
    clock: &'a EngineClock,
    previous: Option<DateTime<Utc>>,
}

impl ClockOverride<'_> {
    /// Moves the pinned time while keeping the override active.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.clock.current_override.write() = Some(at);
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl Drop for ClockOverride<'_> {
    fn drop(&mut self) {
        self.clock.restore(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed() -> (DateTime<Utc>, EngineClock) {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        (at, EngineClock::with_base(Arc::new(FixedClock(at))))
    }

    #[test]
    fn test_override_is_scoped() {
        let (real, clock) = fixed();
        {
            let guard = clock.travel_to(real - Duration::days(14));
            assert_eq!(clock.now(), real - Duration::days(14));
            guard.set(real - Duration::days(1));
            assert_eq!(guard.now(), real - Duration::days(1));
            assert!(clock.is_overridden());
        }
        assert!(!clock.is_overridden());
        assert_eq!(clock.now(), real);
    }

    #[test]
    fn test_reset_on_error_path() {
        let (real, clock) = fixed();
        let outcome: Result<(), &str> = (|| {
            let _guard = clock.travel_to(real - Duration::days(5));
            Err::<(), _>("boom")?;
            Ok(())
        })();
        assert!(outcome.is_err());
        assert_eq!(clock.now(), real);
    }

    #[test]
    fn test_nested_override_restores_outer() {
        let (real, clock) = fixed();
        let outer = clock.travel_to(real - Duration::days(14));
        {
            let _inner = clock.travel_to(real - Duration::days(5));
            assert_eq!(clock.now(), real - Duration::days(5));
        }
        assert_eq!(clock.now(), real - Duration::days(14));
        assert!(clock.is_overridden());
        drop(outer);
        assert_eq!(clock.now(), real);
    }
}
