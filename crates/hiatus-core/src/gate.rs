//! The process-wide pause flag and the tick-gate decisions built on it.
//!
//! The controller owns the only [`PauseFlag`]; every interception point in
//! the host's frame update holds a [`PauseFlagReader`]. The flag is only
//! written from [`PauseController::update`](crate::PauseController::update)
//! at the start of a frame, so all gates in the same frame agree.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// An interception point in the host's per-frame update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickGate {
    /// Main world tick (physics and actor updates).
    WorldTick,
    /// Secondary world tick driving remote actor updates.
    OtherWorldTick,
    /// The session timer's own update.
    SessionTimer,
    /// The on-screen countdown panel refresh.
    TimerPanel,
    /// Per-actor update tick.
    ActorUpdate,
    /// The scenario that ends the session when the deadline passes.
    EndByTimer,
    /// The session owner's update (input, UI bookkeeping).
    SessionUpdate,
}

impl TickGate {
    /// Every gate the host is expected to install.
    pub const ALL: [Self; 7] = [
        Self::WorldTick,
        Self::OtherWorldTick,
        Self::SessionTimer,
        Self::TimerPanel,
        Self::ActorUpdate,
        Self::EndByTimer,
        Self::SessionUpdate,
    ];
}

/// What a gate should do with its guarded update this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateDecision {
    /// Run the update normally.
    Run,
    /// Skip the update entirely.
    Skip,
    /// Skip the update but still drive the local actor's physical tick,
    /// so held items and hands do not snap on resume.
    LocalActorOnly,
    /// Skip the update and show "PAUSED" in place of the countdown.
    ShowPausedText,
}

/// Text shown by the countdown panel while paused.
pub const PAUSED_TEXT: &str = "PAUSED";

/// Writer half of the pause flag. Owned by the controller.
#[derive(Debug, Default)]
pub struct PauseFlag {
    paused: Arc<AtomicBool>,
    show_paused_text: bool,
}

impl PauseFlag {
    /// Create a cleared flag.
    pub fn new(show_paused_text: bool) -> Self {
        Self {
            paused: Arc::new(AtomicBool::new(false)),
            show_paused_text,
        }
    }

    /// Hand out a read-only view for a tick gate.
    pub fn reader(&self) -> PauseFlagReader {
        PauseFlagReader {
            paused: Arc::clone(&self.paused),
            show_paused_text: self.show_paused_text,
        }
    }

    /// Set the flag.
    pub(crate) fn set(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    /// Read the flag.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }
}

/// Read-only view of the pause flag held by tick gates.
#[derive(Debug, Clone)]
pub struct PauseFlagReader {
    paused: Arc<AtomicBool>,
    show_paused_text: bool,
}

impl PauseFlagReader {
    /// Whether the simulation is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Decide what `gate` does this frame.
    pub fn decide(&self, gate: TickGate) -> GateDecision {
        if !self.is_paused() {
            return GateDecision::Run;
        }
        match gate {
            TickGate::WorldTick => GateDecision::LocalActorOnly,
            TickGate::TimerPanel if self.show_paused_text => GateDecision::ShowPausedText,
            TickGate::OtherWorldTick
            | TickGate::SessionTimer
            | TickGate::TimerPanel
            | TickGate::ActorUpdate
            | TickGate::EndByTimer
            | TickGate::SessionUpdate => GateDecision::Skip,
        }
    }
}
