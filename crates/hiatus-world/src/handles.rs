//! Trait-object handles over the shared world state.
//!
//! Each handle implements one collaborator trait from
//! [`hiatus_core::host`] by borrowing the shared [`WorldState`] for the
//! duration of a single call. [`World::session_handles`] resolves all of
//! them at once for the session lifecycle hook.

use std::cell::RefCell;
use std::rc::Rc;

use hiatus_core::SessionHandles;
use hiatus_core::host::{
    AccessorError, AudioRegistry, CameraRig, EntityDirectory, InputState, LocalActor,
    PauseIndicator, SimEntity, TimeScale, TimerAccessor,
};
use hiatus_core::input::Key;
use hiatus_types::{
    AnchorValue, ChannelId, ChannelState, EntityId, PointOfView, TimerAnchor,
};

use crate::world::{World, WorldState};

type Shared = Rc<RefCell<WorldState>>;

/// Entity directory over the world's actors.
#[derive(Debug, Clone)]
pub struct DirectoryHandle(Shared);

impl EntityDirectory for DirectoryHandle {
    fn local_actor(&self) -> Option<EntityId> {
        self.0.borrow().local_id()
    }

    fn alive_entities(&self) -> Vec<EntityId> {
        self.0
            .borrow()
            .actors
            .values()
            .filter(|a| !a.destroyed)
            .map(|a| a.id)
            .collect()
    }

    fn with_entity(&mut self, id: EntityId, visit: &mut dyn FnMut(&mut dyn SimEntity)) -> bool {
        let mut state = self.0.borrow_mut();
        let Some(actor) = state.actors.get_mut(&id) else {
            return false;
        };
        visit(actor);
        true
    }

    fn with_local_actor(&mut self, visit: &mut dyn FnMut(&mut dyn LocalActor)) -> bool {
        let mut state = self.0.borrow_mut();
        let Some(local) = state.local.as_mut() else {
            return false;
        };
        visit(local);
        true
    }
}

/// Raw anchor access to the session timers.
#[derive(Debug, Clone)]
pub struct TimerStoreHandle(Shared);

impl TimerAccessor for TimerStoreHandle {
    fn read(&self, anchor: TimerAnchor) -> Option<AnchorValue> {
        self.0.borrow().timers.read(anchor)
    }

    fn write(&mut self, anchor: TimerAnchor, value: AnchorValue) -> Result<(), AccessorError> {
        self.0.borrow_mut().timers.write(anchor, value)
    }
}

/// Audio channel registry.
#[derive(Debug, Clone)]
pub struct AudioHandle(Shared);

impl AudioRegistry for AudioHandle {
    fn playing_channels(&self) -> Vec<ChannelId> {
        self.0
            .borrow()
            .channels
            .values()
            .filter(|c| c.state == ChannelState::Playing)
            .map(|c| c.id)
            .collect()
    }

    fn channel_state(&self, id: ChannelId) -> Option<ChannelState> {
        self.0.borrow().channels.get(&id).map(|c| c.state)
    }

    fn pause(&mut self, id: ChannelId) -> bool {
        self.set_state(id, ChannelState::Paused)
    }

    fn resume(&mut self, id: ChannelId) -> bool {
        self.set_state(id, ChannelState::Playing)
    }
}

impl AudioHandle {
    fn set_state(&self, id: ChannelId, state: ChannelState) -> bool {
        let mut world = self.0.borrow_mut();
        let Some(channel) = world.channels.get_mut(&id) else {
            return false;
        };
        channel.state = state;
        true
    }
}

/// Global time scale.
#[derive(Debug, Clone)]
pub struct TimeScaleHandle(Shared);

impl TimeScale for TimeScaleHandle {
    fn set_time_scale(&mut self, scale: f32) {
        self.0.borrow_mut().time_scale = scale;
    }
}

/// Keyboard state.
#[derive(Debug, Clone)]
pub struct InputHandle(Shared);

impl InputState for InputHandle {
    fn is_key_down(&self, key: Key) -> bool {
        self.0.borrow().keys.contains(&key)
    }
}

/// Countdown panel.
#[derive(Debug, Clone)]
pub struct IndicatorHandle(Shared);

impl PauseIndicator for IndicatorHandle {
    fn show(&mut self) {
        self.0.borrow_mut().panel.visible = true;
    }

    fn hide(&mut self) {
        self.0.borrow_mut().panel.visible = false;
    }

    fn is_pinned(&self) -> bool {
        self.0.borrow().panel.pinned
    }
}

/// Player camera.
#[derive(Debug, Clone)]
pub struct CameraHandle(Shared);

impl CameraRig for CameraHandle {
    fn point_of_view(&self) -> PointOfView {
        self.0.borrow().camera.point_of_view()
    }

    fn has_firearm(&self) -> bool {
        self.0.borrow().camera.has_firearm()
    }

    fn mouse_look(&self) -> Option<bool> {
        self.0.borrow().camera.mouse_look()
    }

    fn aim_index_in_range(&self) -> bool {
        self.0.borrow().camera.aim_index_in_range()
    }

    fn is_aiming(&self) -> bool {
        self.0.borrow().camera.is_aiming()
    }

    fn scope_is_optic(&self) -> bool {
        self.0.borrow().camera.scope_is_optic()
    }

    fn base_fov(&self) -> f32 {
        self.0.borrow().camera.base_fov()
    }

    fn set_fov(&mut self, target: f32, seconds: f32, instant: bool) {
        self.0.borrow_mut().camera.set_fov(target, seconds, instant);
    }
}

impl World {
    /// Resolve every collaborator handle for the session lifecycle hook.
    pub fn session_handles(&self) -> SessionHandles {
        SessionHandles {
            directory: Some(Box::new(DirectoryHandle(self.shared()))),
            timers: Some(Box::new(TimerStoreHandle(self.shared()))),
            audio: Some(Box::new(AudioHandle(self.shared()))),
            time_scale: Some(Box::new(TimeScaleHandle(self.shared()))),
            input: Some(Box::new(InputHandle(self.shared()))),
            indicator: Some(Box::new(IndicatorHandle(self.shared()))),
            camera: Some(Box::new(CameraHandle(self.shared()))),
        }
    }
}
