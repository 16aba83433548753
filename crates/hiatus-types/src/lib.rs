//! Shared type definitions for the Hiatus pause orchestrator.
//!
//! Every crate in the workspace speaks in terms of these types: the core
//! uses them in its collaborator contracts, the in-memory world uses them
//! as its storage keys, and the engine binary logs them.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entities and audio channels
//! - [`enums`] -- Enumeration types (pause status, channel state, anchors)
//! - [`anchor`] -- [`AnchorValue`], the value held by one timer anchor
//! - [`vec3`] -- Minimal 3-component vector for physical body state

pub mod anchor;
pub mod enums;
pub mod ids;
pub mod vec3;

// Re-export all public types at crate root for convenience.
pub use anchor::AnchorValue;
pub use enums::{ChannelState, PauseStatus, PointOfView, TimerAnchor};
pub use ids::{ChannelId, EntityId};
pub use vec3::Vec3;
