//! Clock sources for pause and resume timestamps.
//!
//! The controller never calls [`Utc::now`] directly; it reads time through a
//! [`ClockSource`] so tests can drive pauses of exact lengths. Readings must
//! never go backwards or jump with wall-clock corrections, since the
//! difference between two of them is added to every timer anchor.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use chrono::{DateTime, TimeDelta, Utc};

/// A source of monotonic timestamps.
pub trait ClockSource {
    /// Return the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Monotonic clock anchored to the wall clock once, at construction.
///
/// Readings are `origin + elapsed` on [`Instant`], so NTP steps or manual
/// clock changes after construction never reach the paused duration.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin_utc: DateTime<Utc>,
    origin: Instant,
}

impl SystemClock {
    /// Anchor a new clock at the current wall-clock time.
    pub fn new() -> Self {
        Self {
            origin_utc: Utc::now(),
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        TimeDelta::from_std(self.origin.elapsed())
            .ok()
            .and_then(|elapsed| self.origin_utc.checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can hand one clone
/// to the controller and keep another to advance time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a manual clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Move the clock forward by `delta`. Saturates at the end of the
    /// representable range.
    pub fn advance(&self, delta: TimeDelta) {
        let current = self.now.get();
        let next = current.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.now.set(next);
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let handle = clock.clone();
        handle.advance(TimeDelta::seconds(90));
        assert_eq!(clock.now(), start + TimeDelta::seconds(90));
    }

    #[test]
    fn manual_clock_saturates() {
        let clock = ManualClock::new(DateTime::<Utc>::MAX_UTC);
        clock.advance(TimeDelta::days(1));
        assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn system_clock_never_goes_backwards() {
        let clock = SystemClock::new();
        let mut previous = clock.now();
        for _ in 0..1000 {
            let next = clock.now();
            assert!(next >= previous);
            previous = next;
        }
    }

    #[test]
    fn system_clock_tracks_monotonic_elapsed() {
        let clock = SystemClock::new();
        let before = clock.origin.elapsed();
        let reading = clock.now();
        let after = clock.origin.elapsed();

        let offset = reading - clock.origin_utc;
        assert!(offset >= TimeDelta::from_std(before).unwrap());
        assert!(offset <= TimeDelta::from_std(after).unwrap());
    }

    #[test]
    fn system_clock_saturates() {
        let clock = SystemClock {
            origin_utc: DateTime::<Utc>::MAX_UTC,
            origin: Instant::now(),
        };
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);
    }
}
