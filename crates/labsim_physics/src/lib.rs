//! Kinematics steppers for the labsim demonstrations
//!
//! This crate advances the physical state of the two mechanics demos:
//! - Force-and-friction block on a walled track
//! - Projectile launcher with a bounded trail
//! - Surface material (friction and wall restitution)

pub mod block;
pub mod material;
pub mod projectile;
pub mod trail;

// Re-export commonly used types
pub use block::{
    displayed_net_force, BlockInputs, BlockStepper, BlockTrack, KinematicState, DEFAULT_BLOCK_DT,
};
pub use material::{SurfaceMaterial, STANDARD_GRAVITY};
pub use projectile::{
    Flight, LaunchParams, LaunchSolution, Projectile, ProjectileState, ProjectileStepper, Stage,
    DEFAULT_PROJECTILE_DT,
};
pub use trail::{Trail, DEFAULT_TRAIL_CAPACITY};
