//! Timer Compensator: shifts every timer anchor forward by the paused
//! duration.
//!
//! The host's timers keep running in real time while paused. Adding the
//! paused interval back to every anchor collapses that interval to zero
//! length as far as deadlines and elapsed-time displays are concerned.
//!
//! Compensation is all-or-nothing. All four anchors are read and shifted
//! before the first write, and a write failure rolls back the anchors
//! already written, so the displayed countdown can never drift away from
//! the authoritative deadline.

use chrono::TimeDelta;
use hiatus_types::{AnchorValue, TimerAnchor};
use tracing::{debug, warn};

use crate::host::{AccessorError, TimerAccessor};

/// Errors that abandon a compensation pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompensationError {
    /// An anchor could not be read.
    #[error("timer anchor {anchor} is absent or uninitialized")]
    AnchorUnreadable {
        /// The unreadable anchor.
        anchor: TimerAnchor,
    },

    /// An anchor holds the wrong kind of value for its identity.
    #[error("timer anchor {anchor} holds an unexpected value kind")]
    ValueKindMismatch {
        /// The mismatched anchor.
        anchor: TimerAnchor,
    },

    /// Shifting an anchor would overflow its representation.
    #[error("shifting timer anchor {anchor} overflows")]
    Overflow {
        /// The anchor that would overflow.
        anchor: TimerAnchor,
    },

    /// Writing an anchor failed; earlier writes were rolled back.
    #[error("writing timer anchor failed: {source}")]
    AnchorUnwritable {
        /// The underlying accessor error.
        #[from]
        source: AccessorError,
    },
}

/// Outcome of a successful [`TimerCompensator::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compensation {
    /// The duration was zero or negative; nothing was touched.
    Skipped,
    /// Every anchor was shifted by the given amount.
    Applied(TimeDelta),
}

/// Applies paused durations to the timer anchors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerCompensator;

impl TimerCompensator {
    /// Create a compensator.
    pub const fn new() -> Self {
        Self
    }

    /// Shift every anchor forward by `duration`.
    ///
    /// Zero or negative durations are a no-op. On error no anchor is left
    /// modified.
    pub fn apply(
        &self,
        accessor: &mut dyn TimerAccessor,
        duration: TimeDelta,
    ) -> Result<Compensation, CompensationError> {
        if duration <= TimeDelta::zero() {
            debug!("Zero-length pause, timers untouched");
            return Ok(Compensation::Skipped);
        }

        let planned = plan(accessor, duration)?;

        for (index, (anchor, _old, new)) in planned.iter().enumerate() {
            if let Err(err) = accessor.write(*anchor, *new) {
                rollback(accessor, planned.get(..index).unwrap_or_default());
                return Err(err.into());
            }
        }

        debug!(
            paused_ms = duration.num_milliseconds(),
            "Timer anchors compensated"
        );
        Ok(Compensation::Applied(duration))
    }
}

/// Read and shift every anchor without writing anything.
fn plan(
    accessor: &dyn TimerAccessor,
    duration: TimeDelta,
) -> Result<Vec<(TimerAnchor, AnchorValue, AnchorValue)>, CompensationError> {
    TimerAnchor::ALL
        .into_iter()
        .map(|anchor| {
            let old = accessor
                .read(anchor)
                .ok_or(CompensationError::AnchorUnreadable { anchor })?;
            if anchor.is_scalar() != old.as_seconds().is_some() {
                return Err(CompensationError::ValueKindMismatch { anchor });
            }
            let new = old
                .shifted_by(duration)
                .ok_or(CompensationError::Overflow { anchor })?;
            Ok((anchor, old, new))
        })
        .collect()
}

/// Restore already-written anchors to their pre-compensation values.
fn rollback(accessor: &mut dyn TimerAccessor, written: &[(TimerAnchor, AnchorValue, AnchorValue)]) {
    for (anchor, old, _new) in written.iter().rev() {
        if let Err(err) = accessor.write(*anchor, *old) {
            warn!(%anchor, error = %err, "Failed to roll back timer anchor");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    #[derive(Debug, Clone, Default)]
    pub(crate) struct FakeTimers {
        pub values: BTreeMap<TimerAnchor, AnchorValue>,
        pub read_only: BTreeSet<TimerAnchor>,
        pub writes: usize,
    }

    impl FakeTimers {
        pub(crate) fn at(start: DateTime<Utc>) -> Self {
            let deadline = start + TimeDelta::minutes(40);
            let mut values = BTreeMap::new();
            values.insert(TimerAnchor::SessionStart, AnchorValue::Instant(start));
            values.insert(TimerAnchor::SessionDeadline, AnchorValue::Instant(deadline));
            values.insert(TimerAnchor::DisplayedDeadline, AnchorValue::Instant(deadline));
            values.insert(TimerAnchor::ElapsedRealTime, AnchorValue::Seconds(120.0));
            Self {
                values,
                ..Self::default()
            }
        }
    }

    impl TimerAccessor for FakeTimers {
        fn read(&self, anchor: TimerAnchor) -> Option<AnchorValue> {
            self.values.get(&anchor).copied()
        }
        fn write(&mut self, anchor: TimerAnchor, value: AnchorValue) -> Result<(), AccessorError> {
            if self.read_only.contains(&anchor) {
                return Err(AccessorError::Unwritable { anchor });
            }
            self.writes += 1;
            self.values.insert(anchor, value);
            Ok(())
        }
    }

    pub(crate) fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 18, 30, 0).unwrap()
    }

    #[test]
    fn shifts_every_anchor_by_duration() {
        for delta in [TimeDelta::seconds(1), TimeDelta::hours(1)] {
            let mut timers = FakeTimers::at(start());
            let before = timers.clone();

            let outcome = TimerCompensator::new().apply(&mut timers, delta).unwrap();

            assert_eq!(outcome, Compensation::Applied(delta));
            for anchor in TimerAnchor::ALL {
                let expected = before.read(anchor).unwrap().shifted_by(delta).unwrap();
                assert_eq!(timers.read(anchor), Some(expected));
            }
        }
    }

    #[test]
    fn zero_duration_leaves_anchors_untouched() {
        let mut timers = FakeTimers::at(start());
        let before = timers.values.clone();

        let outcome = TimerCompensator::new()
            .apply(&mut timers, TimeDelta::zero())
            .unwrap();

        assert_eq!(outcome, Compensation::Skipped);
        assert_eq!(timers.values, before);
        assert_eq!(timers.writes, 0);
    }

    #[test]
    fn negative_duration_is_clamped_to_noop() {
        let mut timers = FakeTimers::at(start());
        let outcome = TimerCompensator::new()
            .apply(&mut timers, TimeDelta::seconds(-5))
            .unwrap();
        assert_eq!(outcome, Compensation::Skipped);
        assert_eq!(timers.writes, 0);
    }

    #[test]
    fn unreadable_anchor_abandons_everything() {
        let mut timers = FakeTimers::at(start());
        timers.values.remove(&TimerAnchor::DisplayedDeadline);
        let before = timers.values.clone();

        let err = TimerCompensator::new()
            .apply(&mut timers, TimeDelta::seconds(30))
            .unwrap_err();

        assert_eq!(
            err,
            CompensationError::AnchorUnreadable {
                anchor: TimerAnchor::DisplayedDeadline
            }
        );
        assert_eq!(timers.values, before);
        assert_eq!(timers.writes, 0);
    }

    #[test]
    fn failed_write_rolls_back_earlier_writes() {
        let mut timers = FakeTimers::at(start());
        timers.read_only.insert(TimerAnchor::ElapsedRealTime);
        let before = timers.values.clone();

        let err = TimerCompensator::new()
            .apply(&mut timers, TimeDelta::seconds(30))
            .unwrap_err();

        assert!(matches!(err, CompensationError::AnchorUnwritable { .. }));
        assert_eq!(timers.values, before);
    }

    #[test]
    fn wrong_value_kind_is_rejected() {
        let mut timers = FakeTimers::at(start());
        timers
            .values
            .insert(TimerAnchor::SessionStart, AnchorValue::Seconds(1.0));

        let err = TimerCompensator::new()
            .apply(&mut timers, TimeDelta::seconds(1))
            .unwrap_err();

        assert_eq!(
            err,
            CompensationError::ValueKindMismatch {
                anchor: TimerAnchor::SessionStart
            }
        );
    }
}
