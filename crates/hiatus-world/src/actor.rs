//! Actors, rigid bodies, and behavioral decision queues.

use std::collections::VecDeque;

use hiatus_core::host::{LocalActor, RigidBody, SimEntity};
use hiatus_types::{EntityId, Vec3};
use rand::Rng;

/// Maximum queued decisions per actor.
pub const MAX_QUEUED_DECISIONS: usize = 8;

/// Walking speed toward a goal, in units per second.
const MOVE_SPEED: f32 = 2.5;

/// A physically simulated body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    /// World position.
    pub position: Vec3,
    /// Linear velocity.
    pub velocity: Vec3,
    /// Angular velocity.
    pub angular_velocity: Vec3,
    /// Sleeping bodies are ignored by integration.
    pub asleep: bool,
}

impl Body {
    /// An awake body at rest at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Advance the position by `dt` seconds of velocity.
    pub fn integrate(&mut self, dt: f32) {
        if self.asleep {
            return;
        }
        self.position = self.position.add_scaled(self.velocity, dt);
    }

    /// Whether the body has any motion.
    pub fn is_moving(&self) -> bool {
        !self.velocity.is_zero() || !self.angular_velocity.is_zero()
    }
}

impl RigidBody for Body {
    fn zero_motion(&mut self) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    fn sleep(&mut self) {
        self.asleep = true;
    }

    fn wake_up(&mut self) {
        self.asleep = false;
    }
}

/// A queued behavioral decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Walk toward a point.
    MoveTo(Vec3),
    /// Stand still.
    Hold,
}

/// An actor in the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Whether the actor participates in simulation.
    pub active: bool,
    /// Destroyed actors linger until removed by the host.
    pub destroyed: bool,
    /// Ragdoll bones; the first is the root.
    pub bones: Vec<Body>,
    /// Body of the item in hand, if any.
    pub held_item: Option<Body>,
    /// Pending decisions, oldest first.
    pub decisions: VecDeque<Decision>,
    /// Point the actor is walking toward.
    pub goal: Option<Vec3>,
    /// How often the goal was recomputed from scratch.
    pub goal_recomputes: u32,
    /// Seconds of animation played.
    pub animation_secs: f32,
}

impl Actor {
    /// Create an active actor with a three-bone skeleton at `position`.
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            active: true,
            destroyed: false,
            bones: vec![Body::at(position); 3],
            held_item: Some(Body::at(position)),
            decisions: VecDeque::new(),
            goal: None,
            goal_recomputes: 0,
            animation_secs: 0.0,
        }
    }

    /// Root bone position.
    pub fn position(&self) -> Vec3 {
        self.bones.first().map_or(Vec3::ZERO, |b| b.position)
    }

    /// Whether any body still has motion.
    pub fn is_moving(&self) -> bool {
        self.bones.iter().chain(self.held_item.iter()).any(Body::is_moving)
    }

    /// Whether every body is asleep.
    pub fn is_asleep(&self) -> bool {
        self.bones.iter().chain(self.held_item.iter()).all(|b| b.asleep)
    }

    /// Queue a fresh decision.
    pub fn think(&mut self, rng: &mut impl Rng) {
        if !self.active || self.destroyed || self.decisions.len() >= MAX_QUEUED_DECISIONS {
            return;
        }
        let decision = if rng.random_bool(0.25) {
            Decision::Hold
        } else {
            Decision::MoveTo(Vec3::new(
                rng.random_range(-50.0..50.0),
                0.0,
                rng.random_range(-50.0..50.0),
            ))
        };
        self.decisions.push_back(decision);
    }

    /// Execute the oldest decision, steering every body toward the goal.
    pub fn act(&mut self) {
        if !self.active || self.destroyed {
            return;
        }
        let Some(decision) = self.decisions.pop_front() else {
            return;
        };
        let velocity = match decision {
            Decision::Hold => {
                self.goal = None;
                Vec3::ZERO
            }
            Decision::MoveTo(target) => {
                self.goal = Some(target);
                heading(self.position(), target)
            }
        };
        for body in self.bones.iter_mut().chain(self.held_item.iter_mut()) {
            body.velocity = velocity;
        }
    }

    /// Advance animation only.
    pub fn animate(&mut self, dt: f32) {
        self.animation_secs += dt;
    }

    /// Advance animation and integrate every body.
    pub fn step_physics(&mut self, dt: f32) {
        if !self.active || self.destroyed {
            return;
        }
        self.animate(dt);
        for body in self.bones.iter_mut().chain(self.held_item.iter_mut()) {
            body.integrate(dt);
        }
    }
}

/// Unit-speed heading from `from` to `to`, scaled to walking speed.
fn heading(from: Vec3, to: Vec3) -> Vec3 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    let len = dx.hypot(dz);
    if len <= f32::EPSILON {
        return Vec3::ZERO;
    }
    Vec3::new(dx / len * MOVE_SPEED, 0.0, dz / len * MOVE_SPEED)
}

impl SimEntity for Actor {
    fn is_active(&self) -> bool {
        self.active
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn for_each_body(&mut self, visit: &mut dyn FnMut(&mut dyn RigidBody)) {
        for body in self.bones.iter_mut().chain(self.held_item.iter_mut()) {
            visit(body);
        }
    }

    fn clear_decisions(&mut self) {
        self.decisions.clear();
    }

    fn recompute_goal(&mut self) {
        self.goal = None;
        self.goal_recomputes = self.goal_recomputes.saturating_add(1);
        self.decisions.push_back(Decision::Hold);
    }
}

/// A timed status effect on the local player.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEffect {
    /// Effect name.
    pub name: String,
    /// Seconds left.
    pub remaining_secs: f32,
}

/// The local player's top-level component.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPlayer {
    /// The player's actor in the entity map.
    pub id: EntityId,
    /// Whether the top-level component runs.
    pub enabled: bool,
    /// Whether status effects are frozen.
    pub effects_paused: bool,
    /// Active status effects.
    pub effects: Vec<StatusEffect>,
}

impl LocalPlayer {
    /// A fresh, enabled player component for actor `id`.
    pub const fn new(id: EntityId) -> Self {
        Self {
            id,
            enabled: true,
            effects_paused: false,
            effects: Vec::new(),
        }
    }

    /// Count down effects and drop the expired ones.
    pub fn tick_effects(&mut self, dt: f32) {
        if !self.enabled || self.effects_paused {
            return;
        }
        for effect in &mut self.effects {
            effect.remaining_secs -= dt;
        }
        self.effects.retain(|e| e.remaining_secs > 0.0);
    }
}

impl LocalActor for LocalPlayer {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn pause_effects(&mut self) {
        self.effects_paused = true;
    }

    fn resume_effects(&mut self) {
        self.effects_paused = false;
    }
}
