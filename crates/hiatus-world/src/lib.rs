//! In-memory host simulation for the Hiatus pause orchestrator.
//!
//! This crate stands in for the live game session: actors with ragdoll and
//! held-item bodies, behavioral decision queues, audio channels, the
//! session timer with its raw anchor fields, the countdown panel, and the
//! first-person camera. [`World`] hands out handles implementing every
//! collaborator trait from [`hiatus_core::host`], and runs one frame at a
//! time behind the tick gates.
//!
//! # Modules
//!
//! - [`actor`] -- Actors, rigid bodies, and decision queues.
//! - [`audio`] -- Audio channels with finite or looping playback.
//! - [`camera`] -- First-person camera and aim state.
//! - [`panel`] -- The countdown panel used as the paused indicator.
//! - [`timers`] -- Session timer fields and the raw anchor adapter.
//! - [`world`] -- [`WorldState`], the frame loop, and the demo world.
//! - [`handles`] -- Trait-object handles over the shared world state.
//!
//! [`WorldState`]: world::WorldState

pub mod actor;
pub mod audio;
pub mod camera;
pub mod handles;
pub mod panel;
pub mod timers;
pub mod world;

pub use actor::{Actor, Body, Decision, LocalPlayer};
pub use audio::Channel;
pub use camera::Camera;
pub use panel::TimerPanel;
pub use timers::SessionTimers;
pub use world::{FrameReport, World, WorldState, WorldSummary};
