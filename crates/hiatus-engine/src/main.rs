//! Demo engine binary for the Hiatus pause orchestrator.
//!
//! Wires the in-memory world to a pause controller and runs a fixed-rate
//! frame loop with scripted presses of the toggle shortcut, then logs a
//! JSON summary of the run.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `hiatus-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the demo world
//! 4. Start the session, installing the pause controller
//! 5. Run the frame loop
//! 6. End the session and log the summary

mod error;
mod frames;
mod script;

use std::path::Path;

use hiatus_core::clock::{ClockSource, SystemClock};
use hiatus_core::config::{LoggingConfig, PauseConfig};
use hiatus_core::{PauseSnapshot, end_session, start_session};
use hiatus_world::{World, WorldSummary};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::frames::RunStats;
use crate::script::InputScript;

/// Path of the optional configuration file, relative to the working
/// directory.
const CONFIG_PATH: &str = "hiatus-config.yaml";

/// Everything logged at the end of a run.
#[derive(Debug, Serialize)]
struct EngineSummary {
    run: RunStats,
    pause: PauseSnapshot,
    world: WorldSummary,
}

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, or the summary fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so this comes first.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        toggle_key = %config.keybinds.toggle_pause,
        from_file,
        frames = config.engine.frames,
        frame_interval_ms = config.engine.frame_interval_ms,
        "hiatus-engine starting"
    );

    // 3. Build the demo world.
    let clock = SystemClock::new();
    let world = World::demo(&config.engine, clock.now());
    {
        let state = world.state();
        info!(
            actors = state.actors.len(),
            channels = state.channels.len(),
            session_minutes = config.engine.session_minutes,
            "Demo world created"
        );
    }

    // 4. Start the session.
    let mut controller = start_session(&config, world.session_handles(), Box::new(clock));
    if let Some(err) = controller.init_error() {
        warn!(error = %err, "Running without pause support");
    }

    // 5. Run the frame loop.
    let script = InputScript::new(config.keybinds.toggle_pause.clone(), &config.engine);
    let run = frames::run(&config.engine, &world, &mut controller, &script, &clock).await;

    // 6. End the session and log the summary.
    let pause = controller.snapshot();
    end_session(controller);
    let summary = EngineSummary {
        run,
        pause,
        world: world.summary(clock.now()),
    };
    let json = serde_json::to_string(&summary).map_err(EngineError::from)?;
    info!(summary = %json, "hiatus-engine shutdown complete");

    Ok(())
}

/// Load configuration from [`CONFIG_PATH`], falling back to defaults when
/// the file is absent. Returns whether the file was used.
fn load_config() -> Result<(PauseConfig, bool), EngineError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok((PauseConfig::from_file(path)?, true))
    } else {
        // The toggle key override still applies without a file.
        Ok((PauseConfig::parse("{}")?, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| EngineError::Logging {
            message: format!("invalid log level {:?}: {e}", logging.level),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}
