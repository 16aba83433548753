//! The countdown panel, doubling as the paused indicator.

use chrono::TimeDelta;
use hiatus_core::gate::PAUSED_TEXT;

/// The on-screen session countdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimerPanel {
    /// Whether the panel is on screen.
    pub visible: bool,
    /// Held open by another feature (e.g. the player checking the time).
    pub pinned: bool,
    /// Current text.
    pub text: String,
}

impl TimerPanel {
    /// Render the remaining time as `MM:SS`, or `HH:MM:SS` past an hour.
    pub fn refresh(&mut self, remaining: TimeDelta) {
        let total = remaining.num_seconds().max(0);
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        self.text = if hours > 0 {
            format!("{hours:02}:{minutes:02}:{seconds:02}")
        } else {
            format!("{minutes:02}:{seconds:02}")
        };
    }

    /// Replace the countdown with the paused text.
    pub fn show_paused(&mut self) {
        PAUSED_TEXT.clone_into(&mut self.text);
    }
}
