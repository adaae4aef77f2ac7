//! 2D Vector type

use serde::{Deserialize, Serialize};

/// 2D vector in the visual coordinate frame of a demonstration
///
/// The y axis follows the drawing-surface convention: it grows downward,
/// so "up" is negative y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Create a new Vec2
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a vector from a magnitude and an angle in degrees above the horizon
    ///
    /// The returned components are physical (y up), not visual.
    #[inline]
    pub fn from_polar_degrees(magnitude: f64, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self::new(magnitude * radians.cos(), magnitude * radians.sin())
    }

    /// Linear interpolation, `t = 0` at `self` and `t = 1` at `other`
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self * (1.0 - t) + other * t
    }

    /// Both components are neither NaN nor infinite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// Operator overloads

impl std::ops::Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}
