//! Audio channels with finite or looping playback.

use hiatus_types::{ChannelId, ChannelState};

/// A sound-emitting channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Identifier.
    pub id: ChannelId,
    /// Clip name.
    pub clip: String,
    /// Playback state.
    pub state: ChannelState,
    /// Seconds of the clip left to play.
    pub remaining_secs: f32,
    /// Looping clips never run out.
    pub looping: bool,
}

impl Channel {
    /// A channel playing `clip` for `length_secs`.
    pub fn playing(clip: impl Into<String>, length_secs: f32, looping: bool) -> Self {
        Self {
            id: ChannelId::new(),
            clip: clip.into(),
            state: ChannelState::Playing,
            remaining_secs: length_secs,
            looping,
        }
    }

    /// A silent channel.
    pub fn stopped(clip: impl Into<String>) -> Self {
        Self {
            state: ChannelState::Stopped,
            ..Self::playing(clip, 0.0, false)
        }
    }

    /// Advance playback by `dt` real seconds. Finite clips stop when they
    /// run out.
    pub fn advance(&mut self, dt: f32) {
        if self.state != ChannelState::Playing || self.looping {
            return;
        }
        self.remaining_secs -= dt;
        if self.remaining_secs <= 0.0 {
            self.remaining_secs = 0.0;
            self.state = ChannelState::Stopped;
        }
    }

    /// Stop playback regardless of state.
    pub fn stop(&mut self) {
        self.state = ChannelState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_clip_stops_when_done() {
        let mut channel = Channel::playing("footsteps", 1.0, false);
        channel.advance(0.6);
        assert_eq!(channel.state, ChannelState::Playing);
        channel.advance(0.6);
        assert_eq!(channel.state, ChannelState::Stopped);
    }

    #[test]
    fn paused_clip_does_not_advance() {
        let mut channel = Channel::playing("radio", 1.0, false);
        channel.state = ChannelState::Paused;
        channel.advance(5.0);
        assert_eq!(channel.state, ChannelState::Paused);
        assert!((channel.remaining_secs - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn looping_clip_never_stops() {
        let mut channel = Channel::playing("ambience", 1.0, true);
        channel.advance(100.0);
        assert_eq!(channel.state, ChannelState::Playing);
    }
}
