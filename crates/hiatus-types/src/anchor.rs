//! Values held by the session's timer anchors.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// The value of one [`TimerAnchor`](crate::TimerAnchor).
///
/// Date/time anchors shift by calendar addition; the real-time accumulator
/// shifts by adding seconds in its own unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnchorValue {
    /// A wall-clock instant.
    Instant(DateTime<Utc>),
    /// A scalar number of seconds.
    Seconds(f64),
}

impl AnchorValue {
    /// Return this value moved forward by `delta`.
    ///
    /// Negative deltas are not supported and return `None`, as does an
    /// instant that would leave the representable range or a scalar that
    /// would stop being finite.
    pub fn shifted_by(self, delta: TimeDelta) -> Option<Self> {
        let std_delta = delta.to_std().ok()?;
        match self {
            Self::Instant(at) => at.checked_add_signed(delta).map(Self::Instant),
            Self::Seconds(secs) => {
                let shifted = secs + std_delta.as_secs_f64();
                shifted.is_finite().then_some(Self::Seconds(shifted))
            }
        }
    }

    /// Return the seconds, if this is a scalar anchor.
    pub const fn as_seconds(&self) -> Option<f64> {
        match self {
            Self::Instant(_) => None,
            Self::Seconds(secs) => Some(*secs),
        }
    }
}
