//! Enumeration types shared across the workspace.

use serde::{Deserialize, Serialize};

/// The two states of the pause state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PauseStatus {
    /// Simulated time is flowing normally.
    #[default]
    Running,
    /// Simulated time is frozen.
    Paused,
}

impl PauseStatus {
    /// Return the opposite state.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
        }
    }

    /// Whether this is [`PauseStatus::Paused`].
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }
}

/// Playback state of one audio channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelState {
    /// The channel is emitting sound.
    Playing,
    /// Playback is suspended and can be resumed from the same position.
    Paused,
    /// The channel is silent (never started, finished, or stopped).
    Stopped,
}

/// Camera perspective of the local actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointOfView {
    /// Camera attached to the actor's eyes.
    FirstPerson,
    /// Camera orbiting behind the actor.
    ThirdPerson,
}

/// One of the time-valued fields of the session's authoritative timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerAnchor {
    /// Wall-clock instant the session started.
    SessionStart,
    /// Wall-clock instant the session ends by timer.
    SessionDeadline,
    /// Deadline instant shown by the on-screen countdown.
    DisplayedDeadline,
    /// Accumulated real seconds since the session's clock origin.
    ElapsedRealTime,
}

impl TimerAnchor {
    /// Every anchor, in the fixed order they are read and written.
    pub const ALL: [Self; 4] = [
        Self::SessionStart,
        Self::SessionDeadline,
        Self::DisplayedDeadline,
        Self::ElapsedRealTime,
    ];

    /// Whether this anchor holds a scalar seconds value rather than an
    /// instant.
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::ElapsedRealTime)
    }
}

impl core::fmt::Display for TimerAnchor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::SessionStart => "session_start",
            Self::SessionDeadline => "session_deadline",
            Self::DisplayedDeadline => "displayed_deadline",
            Self::ElapsedRealTime => "elapsed_real_time",
        };
        f.write_str(name)
    }
}
