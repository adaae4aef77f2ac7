//! Force-and-friction block on a bounded track
//!
//! The block model is deliberately simplified and reproduces the behaviour of
//! the classroom demo rather than textbook physics:
//! - friction is purely kinetic (no static threshold),
//! - position advances by `velocity * position_scale` per tick using the
//!   velocity from *before* the tick, not by `v * dt`.

use serde::{Deserialize, Serialize};

use crate::material::{SurfaceMaterial, STANDARD_GRAVITY};

/// Nominal tick duration of the block demonstration (seconds)
pub const DEFAULT_BLOCK_DT: f64 = 0.1;

/// Visual units the block moves per unit of velocity per tick
pub const DEFAULT_POSITION_SCALE: f64 = 2.0;

/// Speeds below this snap to exactly zero
pub const REST_EPSILON: f64 = 0.01;

/// Right-hand wall of the track
pub const DEFAULT_TRACK_LENGTH: f64 = 350.0;

/// Where the block sits after a reset
pub const DEFAULT_START_POSITION: f64 = 50.0;

/// Kinematic state of the block
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    /// Friction force applied during the last tick
    pub friction_force: f64,
    /// Net force applied during the last tick
    pub net_force: f64,
}

impl KinematicState {
    /// A block at rest at `position`
    pub fn at_rest(position: f64) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.friction_force.is_finite()
            && self.net_force.is_finite()
    }
}

/// Read-only inputs for one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockInputs {
    /// Mass in kg, must be positive
    pub mass: f64,
    /// Applied force in N (positive pushes right)
    pub applied_force: f64,
    /// Kinetic friction coefficient
    pub friction: f64,
}

/// Fixed geometry and constants of the track
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockTrack {
    /// Walls sit at 0 and `length`
    pub length: f64,
    pub start_position: f64,
    pub position_scale: f64,
    pub gravity: f64,
    pub restitution: f64,
}

impl Default for BlockTrack {
    fn default() -> Self {
        Self {
            length: DEFAULT_TRACK_LENGTH,
            start_position: DEFAULT_START_POSITION,
            position_scale: DEFAULT_POSITION_SCALE,
            gravity: STANDARD_GRAVITY,
            restitution: SurfaceMaterial::default().restitution,
        }
    }
}

/// Advances a [`KinematicState`] one tick at a time
#[derive(Clone, Debug, PartialEq)]
pub struct BlockStepper {
    track: BlockTrack,
    state: KinematicState,
}

impl BlockStepper {
    pub fn new(track: BlockTrack) -> Self {
        Self {
            state: KinematicState::at_rest(track.start_position),
            track,
        }
    }

    /// Start from an arbitrary state instead of rest
    pub fn with_state(mut self, state: KinematicState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn track(&self) -> &BlockTrack {
        &self.track
    }

    /// Back to rest at the start position
    pub fn reset(&mut self) {
        self.state = KinematicState::at_rest(self.track.start_position);
    }

    /// Advance one tick of `dt` seconds
    pub fn step(&mut self, inputs: &BlockInputs, dt: f64) -> &KinematicState {
        debug_assert!(inputs.mass > 0.0, "mass must be validated before stepping");

        let material = SurfaceMaterial::new(inputs.friction, self.track.restitution);
        let velocity = self.state.velocity;

        let friction_force = material.kinetic_friction(velocity, inputs.mass, self.track.gravity);
        let net_force = inputs.applied_force + friction_force;
        let acceleration = net_force / inputs.mass;

        let mut next_velocity = velocity + acceleration * dt;

        // Friction alone may stop the block but never turn it around
        if velocity * next_velocity < 0.0 && inputs.applied_force * next_velocity <= 0.0 {
            next_velocity = 0.0;
        }
        if next_velocity.abs() < REST_EPSILON {
            next_velocity = 0.0;
        }

        let mut position = self.state.position + velocity * self.track.position_scale;
        if position < 0.0 || position > self.track.length {
            position = position.clamp(0.0, self.track.length);
            next_velocity = material.bounce(next_velocity);
        }

        self.state = KinematicState {
            position,
            velocity: next_velocity,
            acceleration,
            friction_force,
            net_force,
        };
        debug_assert!(self.state.is_finite(), "block state diverged: {:?}", self.state);
        &self.state
    }
}

/// Net force as shown on the readout
///
/// Friction is only counted once the block is visibly moving
/// (`|velocity| > 0.1`), regardless of direction.
pub fn displayed_net_force(inputs: &BlockInputs, velocity: f64, gravity: f64) -> f64 {
    let friction = if velocity.abs() > 0.1 {
        inputs.friction * inputs.mass * gravity
    } else {
        0.0
    };
    inputs.applied_force - friction
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn inputs(mass: f64, applied_force: f64, friction: f64) -> BlockInputs {
        BlockInputs {
            mass,
            applied_force,
            friction,
        }
    }

    fn at(position: f64, velocity: f64) -> BlockStepper {
        BlockStepper::new(BlockTrack::default())
            .with_state(KinematicState::at_rest(position).with_velocity(velocity))
    }

    #[test]
    fn test_new_block_at_rest() {
        let stepper = BlockStepper::new(BlockTrack::default());
        assert_eq!(*stepper.state(), KinematicState::at_rest(DEFAULT_START_POSITION));
    }

    #[test]
    fn test_first_tick_from_rest_has_no_friction() {
        let mut stepper = BlockStepper::new(BlockTrack::default());
        let state = *stepper.step(&inputs(5.0, 10.0, 0.1), DEFAULT_BLOCK_DT);

        assert_eq!(state.friction_force, 0.0);
        assert!((state.acceleration - 2.0).abs() < EPSILON);
        assert!((state.velocity - 0.2).abs() < EPSILON);
        // position uses the velocity from before the tick
        assert_eq!(state.position, DEFAULT_START_POSITION);
    }

    #[test]
    fn test_second_tick_applies_friction() {
        let mut stepper = BlockStepper::new(BlockTrack::default());
        let inputs = inputs(5.0, 10.0, 0.1);
        stepper.step(&inputs, DEFAULT_BLOCK_DT);
        let state = *stepper.step(&inputs, DEFAULT_BLOCK_DT);

        assert!((state.friction_force + 4.9).abs() < EPSILON);
        assert!((state.net_force - 5.1).abs() < EPSILON);
        assert!((state.acceleration - 1.02).abs() < EPSILON);
        assert!((state.velocity - 0.302).abs() < EPSILON);
        assert!((state.position - 50.4).abs() < EPSILON);
    }

    #[test]
    fn test_small_velocity_snaps_to_zero() {
        let mut stepper = at(100.0, 0.005);
        // no friction, no force: the tick itself leaves 0.005 which is below epsilon
        let state = *stepper.step(&inputs(1.0, 0.0, 0.0), DEFAULT_BLOCK_DT);
        assert_eq!(state.velocity, 0.0);
    }

    #[test]
    fn test_friction_never_reverses_direction() {
        // friction impulse per tick (0.5 * 9.8 * 0.1 = 0.49) exceeds the speed
        let mut stepper = at(100.0, 0.1);
        let state = *stepper.step(&inputs(3.0, 0.0, 0.5), DEFAULT_BLOCK_DT);
        assert_eq!(state.velocity, 0.0);
    }

    #[test]
    fn test_applied_force_can_reverse_direction() {
        let mut stepper = at(100.0, 1.0);
        // pushing left hard enough to turn the block around within one tick
        let mut reverse = inputs(1.0, 0.0, 0.1);
        reverse.applied_force = -30.0;
        let state = *stepper.step(&reverse, DEFAULT_BLOCK_DT);
        assert!(state.velocity < 0.0);
    }

    #[test]
    fn test_bounce_off_right_wall() {
        let track = BlockTrack::default();
        let mut stepper = at(348.0, 5.0);
        let state = *stepper.step(&inputs(1.0, 0.0, 0.0), DEFAULT_BLOCK_DT);

        assert_eq!(state.position, track.length);
        assert!((state.velocity + 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_bounce_off_left_wall() {
        let mut stepper = at(1.0, -2.0);
        let state = *stepper.step(&inputs(1.0, 0.0, 0.0), DEFAULT_BLOCK_DT);

        assert_eq!(state.position, 0.0);
        assert!((state.velocity - 1.6).abs() < EPSILON);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut stepper = BlockStepper::new(BlockTrack::default());
        for _ in 0..20 {
            stepper.step(&inputs(2.0, 30.0, 0.0), DEFAULT_BLOCK_DT);
        }
        assert_ne!(stepper.state().position, DEFAULT_START_POSITION);

        stepper.reset();
        assert_eq!(*stepper.state(), KinematicState::at_rest(DEFAULT_START_POSITION));
    }

    #[test]
    fn test_displayed_net_force() {
        let inputs = inputs(5.0, 10.0, 0.1);
        assert_eq!(displayed_net_force(&inputs, 0.05, STANDARD_GRAVITY), 10.0);
        assert!((displayed_net_force(&inputs, -2.0, STANDARD_GRAVITY) - 5.1).abs() < EPSILON);
    }
}
