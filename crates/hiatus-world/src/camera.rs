//! First-person camera and aim state.

use hiatus_core::host::CameraRig;
use hiatus_types::PointOfView;

/// The local player's camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Perspective.
    pub point_of_view: PointOfView,
    /// Whether a firearm with animation data is in hand.
    pub has_firearm: bool,
    /// Free look state, when known.
    pub mouse_look: Option<bool>,
    /// Number of aim transforms on the current weapon.
    pub scope_count: usize,
    /// Selected aim transform.
    pub aim_index: usize,
    /// Aiming down sights.
    pub aiming: bool,
    /// Current scope is magnified.
    pub optic: bool,
    /// Base FOV from settings.
    pub base_fov: f32,
    /// Current FOV.
    pub fov: f32,
    /// Last transition request: target, seconds, instant.
    pub last_transition: Option<(f32, f32, bool)>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            point_of_view: PointOfView::FirstPerson,
            has_firearm: true,
            mouse_look: Some(false),
            scope_count: 1,
            aim_index: 0,
            aiming: false,
            optic: false,
            base_fov: 75.0,
            fov: 75.0,
            last_transition: None,
        }
    }
}

impl CameraRig for Camera {
    fn point_of_view(&self) -> PointOfView {
        self.point_of_view
    }

    fn has_firearm(&self) -> bool {
        self.has_firearm
    }

    fn mouse_look(&self) -> Option<bool> {
        self.mouse_look
    }

    fn aim_index_in_range(&self) -> bool {
        self.aim_index < self.scope_count
    }

    fn is_aiming(&self) -> bool {
        self.aiming
    }

    fn scope_is_optic(&self) -> bool {
        self.optic
    }

    fn base_fov(&self) -> f32 {
        self.base_fov
    }

    fn set_fov(&mut self, target: f32, seconds: f32, instant: bool) {
        self.fov = target;
        self.last_transition = Some((target, seconds, instant));
    }
}
