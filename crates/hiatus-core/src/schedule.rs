//! One-shot deferred actions polled once per frame.
//!
//! The frame loop is single-threaded, so a deferred action is just a
//! payload with a due instant. Whoever takes the payload decides at that
//! point whether its effect still applies.

use chrono::{DateTime, TimeDelta, Utc};

/// A single pending action of type `T` that fires at a fixed instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T> {
    pending: Option<(DateTime<Utc>, T)>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Deferred<T> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `payload` to fire `delay` after `now`, replacing anything
    /// already pending.
    pub fn schedule(&mut self, now: DateTime<Utc>, delay: TimeDelta, payload: T) {
        let due = now.checked_add_signed(delay).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.pending = Some((due, payload));
    }

    /// Drop the pending action, returning it if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, payload)| payload)
    }

    /// Whether an action is waiting to fire.
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending action fires, if any.
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    /// Take the payload if it is due at `now`.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Option<T> {
        if self.due_at().is_some_and(|due| due <= now) {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn fires_once_when_due() {
        let mut slot = Deferred::new();
        slot.schedule(t0(), TimeDelta::seconds(4), "hide");

        assert_eq!(slot.take_due(t0() + TimeDelta::seconds(3)), None);
        assert_eq!(slot.take_due(t0() + TimeDelta::seconds(4)), Some("hide"));
        assert_eq!(slot.take_due(t0() + TimeDelta::seconds(5)), None);
        assert!(!slot.is_pending());
    }

    #[test]
    fn reschedule_replaces_pending() {
        let mut slot = Deferred::new();
        slot.schedule(t0(), TimeDelta::seconds(4), 1);
        slot.schedule(t0() + TimeDelta::seconds(2), TimeDelta::seconds(4), 2);

        assert_eq!(slot.due_at(), Some(t0() + TimeDelta::seconds(6)));
        assert_eq!(slot.take_due(t0() + TimeDelta::seconds(10)), Some(2));
    }

    #[test]
    fn cancel_empties_slot() {
        let mut slot = Deferred::new();
        slot.schedule(t0(), TimeDelta::zero(), ());
        assert_eq!(slot.cancel(), Some(()));
        assert_eq!(slot.take_due(t0()), None);
    }
}
