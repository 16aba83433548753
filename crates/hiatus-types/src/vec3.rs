//! Minimal 3-component vector for physical body state.

use serde::{Deserialize, Serialize};

/// A 3-component vector (velocity, angular velocity, position).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Build a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Whether every component is exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Component-wise `self + other * scale`.
    pub fn add_scaled(self, other: Self, scale: f32) -> Self {
        Self {
            x: other.x.mul_add(scale, self.x),
            y: other.y.mul_add(scale, self.y),
            z: other.z.mul_add(scale, self.z),
        }
    }
}
