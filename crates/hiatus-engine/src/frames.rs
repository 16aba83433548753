//! The fixed-rate frame loop.
//!
//! Each frame applies scripted input, lets the pause controller act, then
//! runs the world behind the tick gates. The loop stops after the
//! configured frame count or when the session deadline is reached.

use std::time::Duration;

use hiatus_core::clock::ClockSource;
use hiatus_core::config::EngineConfig;
use hiatus_core::controller::CompensationOutcome;
use hiatus_core::{FrameOutcome, PauseController};
use hiatus_world::World;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::script::InputScript;

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunStats {
    /// Frames executed.
    pub frames: u64,
    /// Frames on which the controller paused.
    pub pauses: u64,
    /// Frames on which the controller resumed.
    pub resumes: u64,
    /// Resumes whose timer compensation was abandoned.
    pub abandoned_compensations: u64,
    /// Whether the loop ended on the session deadline.
    pub ended_by_timer: bool,
}

/// Run the frame loop to completion.
pub async fn run(
    engine: &EngineConfig,
    world: &World,
    controller: &mut PauseController,
    script: &InputScript,
    clock: &dyn ClockSource,
) -> RunStats {
    let period = Duration::from_millis(engine.frame_interval_ms.max(1));
    let dt = period.as_secs_f32();
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let gates = controller.flag_reader();
    let mut stats = RunStats::default();

    for frame in 0..engine.frames {
        interval.tick().await;
        script.apply(frame, &mut world.state_mut().keys);

        match controller.update() {
            FrameOutcome::Paused => {
                stats.pauses = stats.pauses.saturating_add(1);
                debug!(frame, "Frame paused the session");
            }
            FrameOutcome::Resumed(report) => {
                stats.resumes = stats.resumes.saturating_add(1);
                if let CompensationOutcome::Abandoned(err) = &report.compensation {
                    stats.abandoned_compensations =
                        stats.abandoned_compensations.saturating_add(1);
                    warn!(frame, error = %err, "Resumed without timer compensation");
                }
                debug!(
                    frame,
                    paused_ms = report.paused_for.num_milliseconds(),
                    "Frame resumed the session"
                );
            }
            FrameOutcome::Idle | FrameOutcome::Disabled => {}
        }

        let report = world.run_frame(&gates, dt, clock.now());
        stats.frames = stats.frames.saturating_add(1);
        if report.session_over {
            info!(frame = report.frame, "Session over, stopping frame loop");
            stats.ended_by_timer = true;
            break;
        }
    }

    stats
}
