//! Session timer fields and the raw anchor adapter over them.
//!
//! The session timer keeps its anchors in plain fields with no mutation
//! API; [`SessionTimers`] implements [`TimerAccessor`] directly over those
//! fields. A field left `None` models a layout where the anchor is absent,
//! and `locked` models a field that cannot be written.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use hiatus_core::host::{AccessorError, TimerAccessor};
use hiatus_types::{AnchorValue, TimerAnchor};

/// Authoritative session timer state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionTimers {
    /// When the session started.
    pub start: Option<DateTime<Utc>>,
    /// When the session ends by timer.
    pub deadline: Option<DateTime<Utc>>,
    /// Deadline the countdown panel counts toward.
    pub displayed_deadline: Option<DateTime<Utc>>,
    /// Process uptime, in seconds, that the in-game day clock is measured
    /// from.
    pub realtime_anchor: Option<f64>,
    /// Anchors whose backing fields reject writes.
    pub locked: BTreeSet<TimerAnchor>,
}

impl SessionTimers {
    /// Timers for a session of `length` starting at `start`.
    pub fn starting(start: DateTime<Utc>, length: TimeDelta, uptime_secs: f64) -> Self {
        let deadline = start.checked_add_signed(length);
        Self {
            start: Some(start),
            deadline,
            displayed_deadline: deadline,
            realtime_anchor: Some(uptime_secs),
            locked: BTreeSet::new(),
        }
    }

    /// Time left before the authoritative deadline.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.deadline.map(|d| d.signed_duration_since(now))
    }

    /// Time left on the countdown panel.
    pub fn displayed_remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.displayed_deadline.map(|d| d.signed_duration_since(now))
    }

    /// Time since the session started.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.start.map(|s| now.signed_duration_since(s))
    }

    /// Whether the authoritative deadline has passed.
    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }
}

impl TimerAccessor for SessionTimers {
    fn read(&self, anchor: TimerAnchor) -> Option<AnchorValue> {
        match anchor {
            TimerAnchor::SessionStart => self.start.map(AnchorValue::Instant),
            TimerAnchor::SessionDeadline => self.deadline.map(AnchorValue::Instant),
            TimerAnchor::DisplayedDeadline => self.displayed_deadline.map(AnchorValue::Instant),
            TimerAnchor::ElapsedRealTime => self.realtime_anchor.map(AnchorValue::Seconds),
        }
    }

    fn write(&mut self, anchor: TimerAnchor, value: AnchorValue) -> Result<(), AccessorError> {
        if self.locked.contains(&anchor) {
            return Err(AccessorError::Unwritable { anchor });
        }
        match (anchor, value) {
            (TimerAnchor::SessionStart, AnchorValue::Instant(at)) => self.start = Some(at),
            (TimerAnchor::SessionDeadline, AnchorValue::Instant(at)) => self.deadline = Some(at),
            (TimerAnchor::DisplayedDeadline, AnchorValue::Instant(at)) => {
                self.displayed_deadline = Some(at);
            }
            (TimerAnchor::ElapsedRealTime, AnchorValue::Seconds(secs)) => {
                self.realtime_anchor = Some(secs);
            }
            _ => return Err(AccessorError::TypeMismatch { anchor }),
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 20, 0, 0).unwrap()
    }

    #[test]
    fn starting_sets_every_anchor() {
        let timers = SessionTimers::starting(t0(), TimeDelta::minutes(40), 12.5);
        for anchor in TimerAnchor::ALL {
            assert!(timers.read(anchor).is_some());
        }
        assert_eq!(timers.remaining(t0()), Some(TimeDelta::minutes(40)));
        assert!(!timers.expired(t0()));
        assert!(timers.expired(t0() + TimeDelta::minutes(40)));
    }

    #[test]
    fn write_rejects_wrong_kind() {
        let mut timers = SessionTimers::starting(t0(), TimeDelta::minutes(40), 0.0);
        let err = timers
            .write(TimerAnchor::SessionDeadline, AnchorValue::Seconds(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            AccessorError::TypeMismatch {
                anchor: TimerAnchor::SessionDeadline
            }
        );
    }

    #[test]
    fn locked_anchor_rejects_writes() {
        let mut timers = SessionTimers::starting(t0(), TimeDelta::minutes(40), 0.0);
        timers.locked.insert(TimerAnchor::SessionStart);
        assert!(timers
            .write(TimerAnchor::SessionStart, AnchorValue::Instant(t0()))
            .is_err());
    }
}
