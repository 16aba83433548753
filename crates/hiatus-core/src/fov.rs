//! Best-effort camera field-of-view restoration after resume.
//!
//! Freezing the simulation mid-transition can leave the first-person FOV
//! stuck between its hip and aiming values. On resume the FOV is snapped
//! back to what the current aim state calls for. Any missing input skips
//! the restoration; nothing here is ever reported as an error.

use hiatus_types::PointOfView;
use tracing::debug;

use crate::config::CameraConfig;
use crate::host::CameraRig;

/// The FOV change requested from the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovTarget {
    /// Target field of view in degrees.
    pub fov: f32,
    /// Transition length in seconds.
    pub seconds: f32,
    /// Apply without animating.
    pub instant: bool,
}

/// Computes and applies the post-resume FOV.
#[derive(Debug, Clone)]
pub struct FovRestorer {
    config: CameraConfig,
}

impl FovRestorer {
    /// Create a restorer from camera settings.
    pub const fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    /// Work out the FOV the camera should have, or `None` to leave it alone.
    pub fn target(&self, camera: &dyn CameraRig) -> Option<FovTarget> {
        if camera.point_of_view() != PointOfView::FirstPerson
            || !camera.has_firearm()
            || !camera.aim_index_in_range()
        {
            return None;
        }
        if self.config.respect_mouse_look && camera.mouse_look() == Some(true) {
            return None;
        }

        let base = camera.base_fov();
        let aiming = camera.is_aiming();
        let fov = if !aiming {
            base
        } else if camera.scope_is_optic() {
            self.config.optic_fov
        } else {
            base - self.config.iron_sight_fov_offset
        };

        Some(FovTarget {
            fov,
            seconds: self.config.transition_seconds,
            instant: !aiming,
        })
    }

    /// Apply [`target`](Self::target) to the camera, if enabled.
    pub fn restore(&self, camera: &mut dyn CameraRig) -> Option<FovTarget> {
        if !self.config.restore_fov {
            return None;
        }
        let target = self.target(camera)?;
        debug!(
            base_fov = camera.base_fov(),
            target_fov = target.fov,
            "Restoring field of view"
        );
        camera.set_fov(target.fov, target.seconds, target.instant);
        Some(target)
    }
}
