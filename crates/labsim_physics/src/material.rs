//! Surface material properties for the force-and-friction block

use serde::{Deserialize, Serialize};

/// Gravitational acceleration used by the block demonstration (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.8;

/// Friction and wall restitution of the block's track
///
/// `friction` is the kinetic coefficient between block and floor;
/// `restitution` is the fraction of speed kept after hitting a wall.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMaterial {
    /// Kinetic friction coefficient (0.0 = ice)
    pub friction: f64,
    /// Wall restitution (0.0 = dead stop, 1.0 = perfect bounce)
    pub restitution: f64,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            friction: 0.1,
            restitution: 0.8,
        }
    }
}

impl SurfaceMaterial {
    /// Create a new material
    ///
    /// Values are clamped to the range [0.0, 1.0].
    pub fn new(friction: f64, restitution: f64) -> Self {
        Self {
            friction: friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Kinetic friction force opposing `velocity`
    ///
    /// Zero for a block at rest: there is no static-friction threshold, the
    /// applied force alone decides whether the block starts moving.
    pub fn kinetic_friction(&self, velocity: f64, mass: f64, gravity: f64) -> f64 {
        if velocity == 0.0 {
            0.0
        } else {
            -velocity.signum() * self.friction * mass * gravity
        }
    }

    /// Velocity after bouncing off a wall
    pub fn bounce(&self, velocity: f64) -> f64 {
        -velocity * self.restitution
    }
}
