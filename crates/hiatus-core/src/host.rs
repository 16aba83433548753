//! Collaborator contracts implemented by the host simulation.
//!
//! The core never reaches into global state. Everything it touches is
//! handed to it as one of these trait objects by the session lifecycle hook
//! (see [`crate::session`]). All calls happen on the frame thread, so the
//! traits are not `Send`.
//!
//! Lookups that may race with the host's own entity lifecycle are expressed
//! as closures (`with_entity`) returning `false` when the target is gone,
//! which lets implementations back the directory with interior mutability.

use hiatus_types::{AnchorValue, ChannelId, ChannelState, EntityId, PointOfView, TimerAnchor};

use crate::input::Key;

/// Errors reported by a [`TimerAccessor`] write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessorError {
    /// The host field backing the anchor is missing or read-only.
    #[error("anchor {anchor} cannot be written")]
    Unwritable {
        /// The anchor that failed.
        anchor: TimerAnchor,
    },

    /// The value's kind does not match what the field stores.
    #[error("anchor {anchor} does not accept this value kind")]
    TypeMismatch {
        /// The anchor that failed.
        anchor: TimerAnchor,
    },
}

/// A physically simulated body (ragdoll bone or held item).
pub trait RigidBody {
    /// Zero linear and angular velocity.
    fn zero_motion(&mut self);
    /// Put the body to sleep so the physics step ignores it.
    fn sleep(&mut self);
    /// Wake the body so the physics step simulates it again.
    fn wake_up(&mut self);
}

/// A non-local actor as seen by the Entity Suspender.
pub trait SimEntity {
    /// Whether the actor currently participates in simulation.
    fn is_active(&self) -> bool;
    /// Whether the actor has been destroyed but not yet removed.
    fn is_destroyed(&self) -> bool;
    /// Add or remove the actor from active simulation without destroying it.
    fn set_active(&mut self, active: bool);
    /// Visit every physical body: skeleton bones first, then the held item.
    fn for_each_body(&mut self, visit: &mut dyn FnMut(&mut dyn RigidBody));
    /// Drop every pending behavioral decision.
    fn clear_decisions(&mut self);
    /// Ask the behavioral system to recompute its goal from scratch.
    fn recompute_goal(&mut self);
}

/// The local (player) actor.
pub trait LocalActor {
    /// Enable or disable the actor's top-level simulation component.
    fn set_enabled(&mut self, enabled: bool);
    /// Freeze timed status effects on the actor.
    fn pause_effects(&mut self);
    /// Resume timed status effects on the actor.
    fn resume_effects(&mut self);
}

/// Enumerable collection of actors alive in the session.
pub trait EntityDirectory {
    /// The local actor, if one is present.
    fn local_actor(&self) -> Option<EntityId>;
    /// Every alive actor, local one included.
    fn alive_entities(&self) -> Vec<EntityId>;
    /// Run `visit` against the actor. Returns `false` if it no longer exists.
    fn with_entity(&mut self, id: EntityId, visit: &mut dyn FnMut(&mut dyn SimEntity)) -> bool;
    /// Run `visit` against the local actor. Returns `false` if absent.
    fn with_local_actor(&mut self, visit: &mut dyn FnMut(&mut dyn LocalActor)) -> bool;
}

/// Enumerable collection of sound-emitting channels.
pub trait AudioRegistry {
    /// Every channel currently in [`ChannelState::Playing`].
    fn playing_channels(&self) -> Vec<ChannelId>;
    /// Current state of a channel, or `None` if it no longer exists.
    fn channel_state(&self, id: ChannelId) -> Option<ChannelState>;
    /// Pause a channel. Returns `false` if it no longer exists.
    fn pause(&mut self, id: ChannelId) -> bool;
    /// Resume a paused channel. Returns `false` if it no longer exists.
    fn resume(&mut self, id: ChannelId) -> bool;
}

/// Raw get/set access to the session's timer anchors.
///
/// The host exposes no public mutation API for these fields; this adapter
/// is the one place allowed to depend on its internal layout.
pub trait TimerAccessor {
    /// Read an anchor, or `None` if the backing field is absent or unset.
    fn read(&self, anchor: TimerAnchor) -> Option<AnchorValue>;
    /// Overwrite an anchor.
    fn write(&mut self, anchor: TimerAnchor, value: AnchorValue) -> Result<(), AccessorError>;
}

/// The host's global simulation rate.
pub trait TimeScale {
    /// Set the rate; `0.0` freezes, `1.0` is normal speed.
    fn set_time_scale(&mut self, scale: f32);
}

/// The on-screen countdown panel used as the "paused" indicator.
pub trait PauseIndicator {
    /// Make the panel visible.
    fn show(&mut self);
    /// Hide the panel.
    fn hide(&mut self);
    /// Whether another feature is holding the panel open.
    fn is_pinned(&self) -> bool;
}

/// First-person camera and weapon-aim inputs for FOV restoration.
pub trait CameraRig {
    /// Current camera perspective.
    fn point_of_view(&self) -> PointOfView;
    /// Whether the actor holds a firearm with animation data.
    fn has_firearm(&self) -> bool;
    /// Whether free mouse look is engaged, when the host reports it.
    fn mouse_look(&self) -> Option<bool>;
    /// Whether the current aim index refers to an existing scope.
    fn aim_index_in_range(&self) -> bool;
    /// Whether the actor is aiming down sights.
    fn is_aiming(&self) -> bool;
    /// Whether the current scope is magnified.
    fn scope_is_optic(&self) -> bool;
    /// The configured base field of view.
    fn base_fov(&self) -> f32;
    /// Animate the field of view to `target` over `seconds`.
    fn set_fov(&mut self, target: f32, seconds: f32, instant: bool);
}

/// Level-triggered keyboard state.
pub trait InputState {
    /// Whether `key` is held during the current frame.
    fn is_key_down(&self, key: Key) -> bool;
}
