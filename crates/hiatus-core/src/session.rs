//! Session lifecycle hooks.
//!
//! The host calls [`start_session`] when a new session begins, passing the
//! collaborator handles it could resolve, and [`end_session`] when the
//! session ends. If a required handle is missing the controller is built
//! disabled: the failure is logged once and every transition for the rest
//! of the session is refused.

use tracing::{error, info};

use crate::clock::ClockSource;
use crate::config::PauseConfig;
use crate::controller::{Collaborators, PauseController};
use crate::host::{
    AudioRegistry, CameraRig, EntityDirectory, InputState, PauseIndicator, TimeScale,
    TimerAccessor,
};

/// Errors that disable the controller for a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    /// A required collaborator handle did not resolve.
    #[error("required handle unresolved at session start: {handle}")]
    MissingHandle {
        /// Which handle was missing.
        handle: &'static str,
    },
}

/// Collaborator handles as resolved by the host at session start.
///
/// The entity directory, timer store, audio registry, and time scale are
/// required. Input, indicator, and camera are optional.
#[derive(Default)]
pub struct SessionHandles {
    /// Actors in the session.
    pub directory: Option<Box<dyn EntityDirectory>>,
    /// Raw timer anchor access.
    pub timers: Option<Box<dyn TimerAccessor>>,
    /// Audio channels.
    pub audio: Option<Box<dyn AudioRegistry>>,
    /// Global simulation rate.
    pub time_scale: Option<Box<dyn TimeScale>>,
    /// Keyboard state.
    pub input: Option<Box<dyn InputState>>,
    /// Countdown panel.
    pub indicator: Option<Box<dyn PauseIndicator>>,
    /// First-person camera.
    pub camera: Option<Box<dyn CameraRig>>,
}

impl core::fmt::Debug for SessionHandles {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionHandles")
            .field("directory", &self.directory.is_some())
            .field("timers", &self.timers.is_some())
            .field("audio", &self.audio.is_some())
            .field("time_scale", &self.time_scale.is_some())
            .field("input", &self.input.is_some())
            .field("indicator", &self.indicator.is_some())
            .field("camera", &self.camera.is_some())
            .finish()
    }
}

impl SessionHandles {
    /// Check required handles and convert into [`Collaborators`].
    ///
    /// # Errors
    ///
    /// Returns [`InitError::MissingHandle`] naming the first missing
    /// required handle.
    pub fn resolve(self) -> Result<Collaborators, InitError> {
        Ok(Collaborators {
            directory: self.directory.ok_or(InitError::MissingHandle {
                handle: "entity directory",
            })?,
            timers: self.timers.ok_or(InitError::MissingHandle {
                handle: "timer store",
            })?,
            audio: self.audio.ok_or(InitError::MissingHandle {
                handle: "audio registry",
            })?,
            time_scale: self.time_scale.ok_or(InitError::MissingHandle {
                handle: "time scale",
            })?,
            input: self.input,
            indicator: self.indicator,
            camera: self.camera,
        })
    }
}

/// Build the pause controller for a new session.
///
/// Always returns a controller; a disabled one if required handles are
/// missing.
pub fn start_session(
    config: &PauseConfig,
    handles: SessionHandles,
    clock: Box<dyn ClockSource>,
) -> PauseController {
    match handles.resolve() {
        Ok(collaborators) => {
            info!(
                toggle_key = %config.keybinds.toggle_pause,
                ?collaborators,
                "Pause controller installed"
            );
            PauseController::new(config, collaborators, clock)
        }
        Err(err) => {
            error!(error = %err, "Pause controller disabled for this session");
            PauseController::disabled(config, err, clock)
        }
    }
}

/// Tear down a session's controller, resetting the pause flag seen by tick
/// gates and restoring the time scale if the session ended paused.
pub fn end_session(mut controller: PauseController) {
    let snapshot = controller.snapshot();
    controller.teardown();
    info!(
        was_paused = snapshot.state.status.is_paused(),
        cycles = snapshot.cycles,
        "Pause controller removed"
    );
}
