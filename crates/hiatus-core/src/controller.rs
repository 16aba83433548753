//! The pause/resume state machine.
//!
//! [`PauseController`] has two states, `Running` and `Paused`, and changes
//! state only on a fresh press of the toggle shortcut. It sequences the
//! suspenders and the timer compensator and owns the single writer of the
//! pause flag that tick gates consult.
//!
//! # Transitions
//!
//! - **Running -> Paused**: record `paused_at`, set the flag, freeze the
//!   time scale, disable the local actor, deactivate non-local actors,
//!   pause playing audio, show the indicator.
//! - **Paused -> Running**: record `resumed_at`, clear the flag, restore the
//!   time scale, enable the local actor, reactivate exactly the suspended
//!   actors, resume exactly the paused channels, compensate the timers,
//!   schedule the indicator hide, restore the camera FOV.
//!
//! Every failure on the way is handled here and logged. A resume always
//! completes, even when timer compensation is abandoned, so the world can
//! never be left frozen.

use chrono::{DateTime, TimeDelta, Utc};
use hiatus_types::PauseStatus;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::audio::AudioSuspender;
use crate::clock::ClockSource;
use crate::config::PauseConfig;
use crate::entity::{EntitySuspender, SuspendReport};
use crate::fov::FovRestorer;
use crate::gate::{PauseFlag, PauseFlagReader};
use crate::host::{
    AudioRegistry, CameraRig, EntityDirectory, InputState, PauseIndicator, TimeScale,
    TimerAccessor,
};
use crate::input::ToggleTrigger;
use crate::schedule::Deferred;
use crate::session::InitError;
use crate::timer::{Compensation, CompensationError, TimerCompensator};

/// Time scale while paused.
pub const FROZEN_TIME_SCALE: f32 = 0.0;

/// Time scale while running.
pub const NORMAL_TIME_SCALE: f32 = 1.0;

/// Pause state: the status plus the timestamps of the current cycle.
///
/// `resumed_at` is only set between a resume and the compensation that
/// consumes it; both timestamps are cleared once compensation has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PauseState {
    /// Current state.
    pub status: PauseStatus,
    /// When the current pause began.
    pub paused_at: Option<DateTime<Utc>>,
    /// When the current pause ended.
    pub resumed_at: Option<DateTime<Utc>>,
}

impl PauseState {
    /// Consume both timestamps and return the paused duration, clamped to
    /// zero when either is missing or the clock went backwards.
    pub fn take_paused_duration(&mut self) -> TimeDelta {
        match (self.paused_at.take(), self.resumed_at.take()) {
            (Some(paused), Some(resumed)) => {
                resumed.signed_duration_since(paused).max(TimeDelta::zero())
            }
            _ => TimeDelta::zero(),
        }
    }
}

/// The resolved collaborators of a live controller.
pub struct Collaborators {
    /// Actors in the session.
    pub directory: Box<dyn EntityDirectory>,
    /// Raw timer anchor access.
    pub timers: Box<dyn TimerAccessor>,
    /// Audio channels.
    pub audio: Box<dyn AudioRegistry>,
    /// Global simulation rate.
    pub time_scale: Box<dyn TimeScale>,
    /// Keyboard state, if the host routes input through the controller.
    pub input: Option<Box<dyn InputState>>,
    /// Countdown panel used as the paused indicator.
    pub indicator: Option<Box<dyn PauseIndicator>>,
    /// First-person camera.
    pub camera: Option<Box<dyn CameraRig>>,
}

impl core::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collaborators")
            .field("input", &self.input.is_some())
            .field("indicator", &self.indicator.is_some())
            .field("camera", &self.camera.is_some())
            .finish_non_exhaustive()
    }
}

/// Deferred hide of the paused indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HideIndicator;

/// What happened to the timers on a resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompensationOutcome {
    /// Every anchor was shifted by this amount.
    Applied(TimeDelta),
    /// Zero-length pause; nothing to shift.
    Skipped,
    /// Compensation was abandoned and no anchor was changed.
    Abandoned(CompensationError),
}

/// Summary of one resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeReport {
    /// Measured wall-clock pause length.
    pub paused_for: TimeDelta,
    /// Actors reactivated / skipped.
    pub entities: SuspendReport,
    /// Channels resumed / skipped.
    pub audio: SuspendReport,
    /// Timer compensation result.
    pub compensation: CompensationOutcome,
}

/// Result of one frame's [`PauseController::update`] or a direct toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The controller failed to initialize for this session.
    Disabled,
    /// No transition this frame.
    Idle,
    /// The session was paused.
    Paused,
    /// The session was resumed.
    Resumed(ResumeReport),
}

/// Serializable view of the controller for logging and status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PauseSnapshot {
    /// Whether the controller resolved its collaborators.
    pub enabled: bool,
    /// Current state and timestamps.
    pub state: PauseState,
    /// Actors held by the current pause.
    pub suspended_entities: usize,
    /// Channels held by the current pause.
    pub suspended_channels: usize,
    /// Whether an indicator hide is waiting to fire.
    pub hide_pending: bool,
    /// Completed pause/resume cycles this session.
    pub cycles: u64,
}

/// The root of the pause system for one session.
pub struct PauseController {
    state: PauseState,
    flag: PauseFlag,
    trigger: ToggleTrigger,
    clock: Box<dyn ClockSource>,
    live: Option<Collaborators>,
    init_error: Option<InitError>,
    entities: EntitySuspender,
    audio: AudioSuspender,
    compensator: TimerCompensator,
    fov: FovRestorer,
    hide: Deferred<HideIndicator>,
    hide_delay: TimeDelta,
    cycles: u64,
}

impl core::fmt::Debug for PauseController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PauseController")
            .field("state", &self.state)
            .field("live", &self.live)
            .field("init_error", &self.init_error)
            .field("entities", &self.entities)
            .field("audio", &self.audio)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}

impl PauseController {
    /// Build a live controller.
    pub fn new(
        config: &PauseConfig,
        collaborators: Collaborators,
        clock: Box<dyn ClockSource>,
    ) -> Self {
        Self::build(config, Some(collaborators), None, clock)
    }

    /// Build a controller that refuses every transition for this session.
    pub fn disabled(config: &PauseConfig, error: InitError, clock: Box<dyn ClockSource>) -> Self {
        Self::build(config, None, Some(error), clock)
    }

    fn build(
        config: &PauseConfig,
        live: Option<Collaborators>,
        init_error: Option<InitError>,
        clock: Box<dyn ClockSource>,
    ) -> Self {
        Self {
            state: PauseState::default(),
            flag: PauseFlag::new(config.general.show_paused_text),
            trigger: ToggleTrigger::new(config.keybinds.toggle_pause.clone()),
            clock,
            live,
            init_error,
            entities: EntitySuspender::new(),
            audio: AudioSuspender::new(),
            compensator: TimerCompensator::new(),
            fov: FovRestorer::new(config.camera.clone()),
            hide: Deferred::new(),
            hide_delay: config.general.hide_indicator_delay(),
            cycles: 0,
        }
    }

    /// Run once at the start of every frame: detect a fresh toggle press,
    /// transition if there was one, then fire the indicator hide if due.
    pub fn update(&mut self) -> FrameOutcome {
        let Some(live) = self.live.as_ref() else {
            return FrameOutcome::Disabled;
        };
        let pressed = live
            .input
            .as_deref()
            .is_some_and(|input| self.trigger.poll(input));

        let outcome = if pressed {
            self.toggle()
        } else {
            FrameOutcome::Idle
        };
        self.poll_deferred();
        outcome
    }

    /// Perform one transition immediately.
    pub fn toggle(&mut self) -> FrameOutcome {
        if self.live.is_none() {
            return FrameOutcome::Disabled;
        }
        match self.state.status {
            PauseStatus::Running => {
                self.pause();
                FrameOutcome::Paused
            }
            PauseStatus::Paused => FrameOutcome::Resumed(self.resume()),
        }
    }

    fn pause(&mut self) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        let now = self.clock.now();
        self.state.status = self.state.status.toggled();
        self.state.paused_at = Some(now);
        self.state.resumed_at = None;
        self.flag.set(true);
        // A hide still pending from the last resume must not fire mid-pause.
        self.hide.cancel();

        live.time_scale.set_time_scale(FROZEN_TIME_SCALE);
        live.directory.with_local_actor(&mut |actor| {
            actor.set_enabled(false);
            actor.pause_effects();
        });
        let entities = self.entities.deactivate_all(live.directory.as_mut());
        let audio = self.audio.pause_all(live.audio.as_mut());
        if let Some(indicator) = live.indicator.as_mut() {
            indicator.show();
        }

        info!(
            paused_at = %now,
            entities_suspended = entities.affected,
            entities_skipped = entities.skipped,
            channels_paused = audio.affected,
            "Simulation paused"
        );
    }

    fn resume(&mut self) -> ResumeReport {
        let now = self.clock.now();
        self.state.status = self.state.status.toggled();
        self.state.resumed_at = Some(now);
        self.flag.set(false);
        let paused_for = self.state.take_paused_duration();

        let Some(live) = self.live.as_mut() else {
            return ResumeReport {
                paused_for,
                entities: SuspendReport::default(),
                audio: SuspendReport::default(),
                compensation: CompensationOutcome::Skipped,
            };
        };

        live.time_scale.set_time_scale(NORMAL_TIME_SCALE);
        live.directory.with_local_actor(&mut |actor| {
            actor.set_enabled(true);
            actor.resume_effects();
        });
        let entities = self.entities.reactivate_all(live.directory.as_mut());
        let audio = self.audio.resume_all(live.audio.as_mut());

        let compensation = match self.compensator.apply(live.timers.as_mut(), paused_for) {
            Ok(Compensation::Applied(delta)) => CompensationOutcome::Applied(delta),
            Ok(Compensation::Skipped) => CompensationOutcome::Skipped,
            Err(err) => {
                warn!(error = %err, "Timer compensation abandoned, timers left unshifted");
                CompensationOutcome::Abandoned(err)
            }
        };

        if let Some(indicator) = live.indicator.as_ref() {
            if indicator.is_pinned() {
                debug!("Indicator pinned open, not scheduling hide");
            } else {
                self.hide.schedule(now, self.hide_delay, HideIndicator);
            }
        }

        if let Some(camera) = live.camera.as_mut() {
            self.fov.restore(camera.as_mut());
        }

        self.cycles = self.cycles.saturating_add(1);
        info!(
            resumed_at = %now,
            paused_ms = paused_for.num_milliseconds(),
            entities_restored = entities.affected,
            entities_skipped = entities.skipped,
            channels_resumed = audio.affected,
            channels_skipped = audio.skipped,
            "Simulation resumed"
        );

        ResumeReport {
            paused_for,
            entities,
            audio,
            compensation,
        }
    }

    /// Fire the indicator hide if it is due and still warranted.
    fn poll_deferred(&mut self) {
        let now = self.clock.now();
        if self.hide.take_due(now).is_none() {
            return;
        }
        if self.state.status.is_paused() {
            return;
        }
        let Some(indicator) = self.live.as_mut().and_then(|l| l.indicator.as_mut()) else {
            return;
        };
        if indicator.is_pinned() {
            debug!("Indicator pinned open, skipping hide");
            return;
        }
        indicator.hide();
    }

    /// Reset to the initial empty state at session end.
    pub(crate) fn teardown(&mut self) {
        if self.state.status.is_paused() {
            if let Some(live) = self.live.as_mut() {
                live.time_scale.set_time_scale(NORMAL_TIME_SCALE);
            }
        }
        self.state = PauseState::default();
        self.flag.set(false);
        self.trigger.reset();
        self.entities.clear();
        self.audio.clear();
        self.hide.cancel();
    }

    /// Whether the simulation is paused.
    pub fn is_paused(&self) -> bool {
        self.flag.is_paused()
    }

    /// A read-only view of the pause flag for a tick gate.
    pub fn flag_reader(&self) -> PauseFlagReader {
        self.flag.reader()
    }

    /// Current state and timestamps.
    pub const fn state(&self) -> &PauseState {
        &self.state
    }

    /// Whether collaborators resolved at session start.
    pub const fn is_enabled(&self) -> bool {
        self.live.is_some()
    }

    /// Why the controller is disabled, if it is.
    pub const fn init_error(&self) -> Option<&InitError> {
        self.init_error.as_ref()
    }

    /// Serializable status view.
    pub fn snapshot(&self) -> PauseSnapshot {
        PauseSnapshot {
            enabled: self.is_enabled(),
            state: self.state,
            suspended_entities: self.entities.suspended().len(),
            suspended_channels: self.audio.paused().len(),
            hide_pending: self.hide.is_pending(),
            cycles: self.cycles,
        }
    }
}
