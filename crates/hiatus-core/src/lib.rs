//! Pause/resume orchestration for a live, frame-driven simulation session.
//!
//! When the user presses the pause toggle, this crate freezes everything a
//! player can perceive -- world physics, non-local actors, audio, and the
//! on-screen countdown -- and on resume restores exact continuity by
//! shifting every time-anchored value forward by the paused duration.
//!
//! # Modules
//!
//! - [`clock`] -- [`ClockSource`] trait with system and manual clocks.
//! - [`config`] -- Configuration loading from `hiatus-config.yaml`.
//! - [`host`] -- Collaborator traits the host simulation implements.
//! - [`input`] -- Keyboard shortcuts and edge-triggered toggle detection.
//! - [`entity`] -- Entity Suspender: freeze and restore non-local actors.
//! - [`audio`] -- Audio Suspender: snapshot, pause, and resume channels.
//! - [`timer`] -- Timer Compensator: atomic anchor shifting.
//! - [`schedule`] -- One-shot deferred actions polled per frame.
//! - [`gate`] -- The shared pause flag and per-gate tick decisions.
//! - [`fov`] -- Best-effort camera field-of-view restoration.
//! - [`controller`] -- The pause/resume state machine.
//! - [`session`] -- Session start/teardown hooks that build the controller.
//!
//! [`ClockSource`]: clock::ClockSource

pub mod audio;
pub mod clock;
pub mod config;
pub mod controller;
pub mod entity;
pub mod fov;
pub mod gate;
pub mod host;
pub mod input;
pub mod schedule;
pub mod session;
pub mod timer;

pub use controller::{FrameOutcome, PauseController, PauseSnapshot, ResumeReport};
pub use gate::{GateDecision, PauseFlagReader, TickGate};
pub use session::{SessionHandles, end_session, start_session};
