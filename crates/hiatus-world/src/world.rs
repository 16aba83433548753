//! The shared world state, the gated frame loop, and the demo world.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};
use hiatus_core::config::EngineConfig;
use hiatus_core::gate::{GateDecision, PauseFlagReader, TickGate};
use hiatus_core::input::Key;
use hiatus_types::{ChannelId, ChannelState, EntityId, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::actor::{Actor, LocalPlayer, StatusEffect};
use crate::audio::Channel;
use crate::camera::Camera;
use crate::panel::TimerPanel;
use crate::timers::SessionTimers;

/// Everything the host simulation holds for one session.
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Every actor, local player included.
    pub actors: BTreeMap<EntityId, Actor>,
    /// The local player's component, if spawned.
    pub local: Option<LocalPlayer>,
    /// Audio channels.
    pub channels: BTreeMap<ChannelId, Channel>,
    /// Session timer fields.
    pub timers: SessionTimers,
    /// Time left on the authoritative deadline, as last computed by the
    /// session timer's own update.
    pub timer_readout: Option<TimeDelta>,
    /// Global simulation rate.
    pub time_scale: f32,
    /// Countdown panel.
    pub panel: TimerPanel,
    /// Player camera.
    pub camera: Camera,
    /// Keys held this frame.
    pub keys: BTreeSet<Key>,
    /// Set once the session deadline has been observed.
    pub session_over: bool,
    /// Frames run.
    pub frame: u64,
    rng: StdRng,
}

impl WorldState {
    /// An empty world whose session started at `now` and lasts `length`.
    pub fn empty(now: DateTime<Utc>, length: TimeDelta, seed: u64) -> Self {
        Self {
            actors: BTreeMap::new(),
            local: None,
            channels: BTreeMap::new(),
            timers: SessionTimers::starting(now, length, 0.0),
            timer_readout: None,
            time_scale: 1.0,
            panel: TimerPanel::default(),
            camera: Camera::default(),
            keys: BTreeSet::new(),
            session_over: false,
            frame: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn the local player at the origin.
    pub fn spawn_local(&mut self, name: &str) -> EntityId {
        let actor = Actor::new(name, Vec3::ZERO);
        let id = actor.id;
        self.actors.insert(id, actor);
        self.local = Some(LocalPlayer::new(id));
        id
    }

    /// Spawn an active non-local actor at `position`.
    pub fn spawn_bot(&mut self, name: &str, position: Vec3) -> EntityId {
        let actor = Actor::new(name, position);
        let id = actor.id;
        self.actors.insert(id, actor);
        id
    }

    /// Add an audio channel.
    pub fn add_channel(&mut self, channel: Channel) -> ChannelId {
        let id = channel.id;
        self.channels.insert(id, channel);
        id
    }

    /// The local player's actor id.
    pub fn local_id(&self) -> Option<EntityId> {
        self.local.as_ref().map(|l| l.id)
    }

    /// Run one frame. `dt` is the real frame time in seconds; physics use
    /// it scaled by the time scale, audio plays in real time.
    pub fn run_frame(&mut self, gates: &PauseFlagReader, dt: f32, now: DateTime<Utc>) -> FrameReport {
        let scaled = dt * self.time_scale;
        let local_id = self.local_id();
        self.frame = self.frame.saturating_add(1);

        if gates.decide(TickGate::SessionUpdate) == GateDecision::Run {
            if let Some(local) = self.local.as_mut() {
                local.tick_effects(scaled);
            }
        }

        if gates.decide(TickGate::ActorUpdate) == GateDecision::Run {
            for actor in self.actors.values_mut() {
                if Some(actor.id) != local_id {
                    actor.think(&mut self.rng);
                }
            }
        }

        if gates.decide(TickGate::OtherWorldTick) == GateDecision::Run {
            for actor in self.actors.values_mut() {
                if Some(actor.id) != local_id {
                    actor.act();
                }
            }
        }

        match gates.decide(TickGate::WorldTick) {
            GateDecision::Run => {
                for actor in self.actors.values_mut() {
                    actor.step_physics(scaled);
                }
            }
            GateDecision::LocalActorOnly => {
                if let Some(local) = local_id.and_then(|id| self.actors.get_mut(&id)) {
                    local.animate(dt);
                }
            }
            GateDecision::Skip | GateDecision::ShowPausedText => {}
        }

        for channel in self.channels.values_mut() {
            channel.advance(dt);
        }

        if gates.decide(TickGate::SessionTimer) == GateDecision::Run {
            self.timer_readout = self.timers.remaining(now);
        }

        match gates.decide(TickGate::TimerPanel) {
            GateDecision::Run => {
                if let Some(remaining) = self.timers.displayed_remaining(now) {
                    self.panel.refresh(remaining);
                }
            }
            GateDecision::ShowPausedText => self.panel.show_paused(),
            GateDecision::Skip | GateDecision::LocalActorOnly => {}
        }

        if gates.decide(TickGate::EndByTimer) == GateDecision::Run
            && !self.session_over
            && self.timers.expired(now)
        {
            info!(frame = self.frame, "Session deadline reached");
            self.session_over = true;
        }

        FrameReport {
            frame: self.frame,
            moving_actors: self.actors.values().filter(|a| a.is_moving()).count(),
            playing_channels: self
                .channels
                .values()
                .filter(|c| c.state == ChannelState::Playing)
                .count(),
            session_over: self.session_over,
        }
    }

    /// Serializable summary at `now`.
    pub fn summary(&self, now: DateTime<Utc>) -> WorldSummary {
        WorldSummary {
            frame: self.frame,
            actors: self.actors.len(),
            active_actors: self.actors.values().filter(|a| a.active).count(),
            playing_channels: self
                .channels
                .values()
                .filter(|c| c.state == ChannelState::Playing)
                .count(),
            time_scale: self.time_scale,
            remaining_secs: self.timers.remaining(now).map(|r| r.num_seconds()),
            elapsed_secs: self.timers.elapsed(now).map(|e| e.num_seconds()),
            panel_visible: self.panel.visible,
            panel_text: self.panel.text.clone(),
            session_over: self.session_over,
        }
    }
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame number.
    pub frame: u64,
    /// Actors with any body in motion.
    pub moving_actors: usize,
    /// Channels currently playing.
    pub playing_channels: usize,
    /// Whether the session deadline has been observed.
    pub session_over: bool,
}

/// Serializable world status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSummary {
    /// Frames run.
    pub frame: u64,
    /// Actors in the session.
    pub actors: usize,
    /// Actors participating in simulation.
    pub active_actors: usize,
    /// Channels playing.
    pub playing_channels: usize,
    /// Current time scale.
    pub time_scale: f32,
    /// Seconds to the authoritative deadline.
    pub remaining_secs: Option<i64>,
    /// Seconds since session start.
    pub elapsed_secs: Option<i64>,
    /// Whether the countdown panel is visible.
    pub panel_visible: bool,
    /// Countdown panel text.
    pub panel_text: String,
    /// Whether the deadline passed.
    pub session_over: bool,
}

/// Cloneable handle over the shared [`WorldState`].
///
/// The frame loop and every collaborator handle share one state through
/// `Rc<RefCell<_>>`; all access happens on the frame thread.
#[derive(Debug, Clone)]
pub struct World {
    state: Rc<RefCell<WorldState>>,
}

impl World {
    /// Wrap a world state.
    pub fn new(state: WorldState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Populate a demo world from engine settings: a local player, bots
    /// scattered around the origin, and a mix of looping and finite audio.
    pub fn demo(config: &EngineConfig, now: DateTime<Utc>) -> Self {
        let length = TimeDelta::minutes(i64::from(config.session_minutes));
        let mut state = WorldState::empty(now, length, config.seed);
        let mut rng = StdRng::seed_from_u64(config.seed);

        state.spawn_local("player");
        if let Some(local) = state.local.as_mut() {
            local.effects.push(StatusEffect {
                name: "painkiller".to_owned(),
                remaining_secs: 60.0,
            });
        }
        for n in 0..config.bots {
            let position = Vec3::new(
                rng.random_range(-40.0..40.0),
                0.0,
                rng.random_range(-40.0..40.0),
            );
            state.spawn_bot(&format!("bot-{n}"), position);
        }
        for n in 0..config.channels {
            let channel = if n % 2 == 0 {
                Channel::playing(format!("ambience-{n}"), 0.0, true)
            } else {
                Channel::playing(format!("gunfire-{n}"), rng.random_range(0.5..6.0), false)
            };
            state.add_channel(channel);
        }

        Self::new(state)
    }

    /// Borrow the state.
    pub fn state(&self) -> Ref<'_, WorldState> {
        self.state.borrow()
    }

    /// Borrow the state mutably.
    pub fn state_mut(&self) -> RefMut<'_, WorldState> {
        self.state.borrow_mut()
    }

    /// Run one frame.
    pub fn run_frame(&self, gates: &PauseFlagReader, dt: f32, now: DateTime<Utc>) -> FrameReport {
        self.state.borrow_mut().run_frame(gates, dt, now)
    }

    /// Serializable summary at `now`.
    pub fn summary(&self, now: DateTime<Utc>) -> WorldSummary {
        self.state.borrow().summary(now)
    }

    pub(crate) fn shared(&self) -> Rc<RefCell<WorldState>> {
        Rc::clone(&self.state)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use hiatus_core::gate::PauseFlag;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 8, 8, 0, 0).unwrap()
    }

    #[test]
    fn demo_world_matches_config() {
        let config = EngineConfig::default();
        let world = World::demo(&config, t0());
        let state = world.state();
        assert_eq!(state.actors.len(), 1 + 6);
        assert_eq!(state.channels.len(), 4);
        assert!(state.local.is_some());
        assert_eq!(state.timers.remaining(t0()), Some(TimeDelta::minutes(40)));
    }

    #[test]
    fn running_frames_move_bots_and_refresh_panel() {
        let world = World::demo(&EngineConfig::default(), t0());
        let flag = PauseFlag::new(true);
        let reader = flag.reader();
        for _ in 0..10 {
            world.run_frame(&reader, 0.1, t0());
        }
        let state = world.state();
        assert!(state.actors.values().any(Actor::is_moving));
        assert_eq!(state.panel.text, "40:00");
        assert_eq!(state.timer_readout, Some(TimeDelta::minutes(40)));
    }

    #[test]
    fn deadline_ends_session() {
        let mut state = WorldState::empty(t0(), TimeDelta::seconds(5), 1);
        let reader = PauseFlag::new(true).reader();
        let report = state.run_frame(&reader, 0.016, t0() + TimeDelta::seconds(6));
        assert!(report.session_over);
    }

    #[test]
    fn summary_serializes() {
        let world = World::demo(&EngineConfig::default(), t0());
        let json = serde_json::to_value(world.summary(t0())).unwrap();
        assert_eq!(json["remaining_secs"], 2400);
        assert_eq!(json["session_over"], false);
    }
}
