//! The four demonstrations

pub mod block;
pub mod projectile;
pub mod riemann;
pub mod tangent;
