//! Audio Suspender: pauses every playing channel and later resumes exactly
//! that set.
//!
//! A channel that was silent before the pause stays silent, and a channel
//! that was paused by us but stopped on its own while paused is not
//! restarted.

use std::collections::BTreeSet;

use hiatus_types::{ChannelId, ChannelState};
use tracing::debug;

use crate::entity::SuspendReport;
use crate::host::AudioRegistry;

/// Pauses and resumes audio channels.
#[derive(Debug, Default)]
pub struct AudioSuspender {
    /// Channels that were playing at the moment of the last pause.
    paused: BTreeSet<ChannelId>,
}

impl AudioSuspender {
    /// Create a suspender with an empty snapshot.
    pub const fn new() -> Self {
        Self {
            paused: BTreeSet::new(),
        }
    }

    /// Pause every playing channel and remember which ones were paused.
    pub fn pause_all(&mut self, registry: &mut dyn AudioRegistry) -> SuspendReport {
        self.paused.clear();
        let mut report = SuspendReport::default();

        for id in registry.playing_channels() {
            if registry.pause(id) {
                self.paused.insert(id);
                report.affected = report.affected.saturating_add(1);
            } else {
                report.skipped = report.skipped.saturating_add(1);
            }
        }

        report
    }

    /// Resume the channels captured by [`pause_all`](Self::pause_all) and
    /// clear the snapshot.
    pub fn resume_all(&mut self, registry: &mut dyn AudioRegistry) -> SuspendReport {
        let mut report = SuspendReport::default();

        for id in std::mem::take(&mut self.paused) {
            // Only a channel still sitting in our pause is ours to resume.
            let resumable = registry.channel_state(id) == Some(ChannelState::Paused);
            if resumable && registry.resume(id) {
                report.affected = report.affected.saturating_add(1);
            } else {
                debug!(channel_id = %id, "Paused channel stopped or gone, not resuming");
                report.skipped = report.skipped.saturating_add(1);
            }
        }

        report
    }

    /// Channels currently held in the snapshot.
    pub fn paused(&self) -> &BTreeSet<ChannelId> {
        &self.paused
    }

    /// Drop the snapshot without touching any channel.
    pub fn clear(&mut self) {
        self.paused.clear();
    }
}
