//! Projectile launcher
//!
//! Positions live in the visual frame of the launcher (y grows downward, one
//! metre is `scale` visual units). Velocities are physical, in m/s with y up.

use labsim_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::trail::{Trail, DEFAULT_TRAIL_CAPACITY};

/// Nominal frame duration of the launcher (seconds)
pub const DEFAULT_PROJECTILE_DT: f64 = 0.016;

/// Visual units per metre
pub const DEFAULT_VISUAL_SCALE: f64 = 10.0;

/// Cannon mouth, also the ground line
pub const DEFAULT_LAUNCH_ORIGIN: Vec2 = Vec2::new(50.0, 350.0);

/// Launch inputs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// Degrees above the horizon
    pub angle_degrees: f64,
    /// Launch speed (m/s)
    pub speed: f64,
    /// Gravitational acceleration (m/s², positive)
    pub gravity: f64,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            angle_degrees: 45.0,
            speed: 20.0,
            gravity: 9.8,
        }
    }
}

impl LaunchParams {
    /// Initial physical velocity (y up)
    pub fn initial_velocity(&self) -> Vec2 {
        Vec2::from_polar_degrees(self.speed, self.angle_degrees)
    }
}

/// Closed-form flight figures, fixed at launch
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchSolution {
    /// Peak height above the ground (m)
    pub max_height: f64,
    /// Horizontal distance at landing (m)
    pub range: f64,
    /// Time until landing (s)
    pub time_of_flight: f64,
}

impl LaunchSolution {
    pub fn solve(params: &LaunchParams) -> Self {
        let v = params.initial_velocity();
        let g = params.gravity;
        Self {
            max_height: v.y * v.y / (2.0 * g),
            range: params.speed * params.speed * (2.0 * params.angle_degrees.to_radians()).sin()
                / g,
            time_of_flight: 2.0 * v.y / g,
        }
    }
}

/// Fixed geometry of the launcher
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub origin: Vec2,
    /// Visual y of the ground line
    pub ground_y: f64,
    /// Visual units per metre
    pub scale: f64,
    pub trail_capacity: usize,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            origin: DEFAULT_LAUNCH_ORIGIN,
            ground_y: DEFAULT_LAUNCH_ORIGIN.y,
            scale: DEFAULT_VISUAL_SCALE,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
        }
    }
}

impl Stage {
    /// Visual position of the closed-form trajectory `t` seconds after launch
    pub fn ideal_position(&self, params: &LaunchParams, t: f64) -> Vec2 {
        let v = params.initial_velocity();
        let height = v.y * t - 0.5 * params.gravity * t * t;
        self.origin + Vec2::new(v.x * t, -height) * self.scale
    }

    /// Predicted trajectory sampled every `step` seconds, ending on the ground
    pub fn predicted_path(&self, params: &LaunchParams, step: f64) -> Vec<Vec2> {
        let solution = LaunchSolution::solve(params);
        let mut path = vec![self.origin];
        if step <= 0.0 || solution.time_of_flight <= 0.0 {
            return path;
        }
        let samples = (solution.time_of_flight / step).floor() as usize;
        for i in 1..=samples {
            let point = self.ideal_position(params, i as f64 * step);
            if point.y >= self.ground_y {
                break;
            }
            path.push(point);
        }
        path.push(Vec2::new(
            self.origin.x + solution.range * self.scale,
            self.ground_y,
        ));
        path
    }
}

/// The projectile in flight (or at rest after landing)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Visual position
    pub position: Vec2,
    /// Physical velocity (m/s, y up)
    pub velocity: Vec2,
    pub trail: Trail,
    /// Simulated seconds since launch
    pub elapsed: f64,
    pub landed: bool,
}

impl Projectile {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.elapsed.is_finite()
    }
}

/// Whether the projectile is still in the air after a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flight {
    Airborne,
    Landed,
}

/// Everything the launcher shows
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    /// `None` until the first launch and after a reset
    pub projectile: Option<Projectile>,
    /// Closed-form figures of the current launch
    pub solution: LaunchSolution,
}

/// One-shot projectile integrator
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileStepper {
    stage: Stage,
    state: ProjectileState,
}

impl ProjectileStepper {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            state: ProjectileState::default(),
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn state(&self) -> &ProjectileState {
        &self.state
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.state.projectile.as_ref()
    }

    /// Place a fresh projectile at the origin and record the closed-form figures
    pub fn launch(&mut self, params: &LaunchParams) -> LaunchSolution {
        let solution = LaunchSolution::solve(params);
        self.state = ProjectileState {
            projectile: Some(Projectile {
                position: self.stage.origin,
                velocity: params.initial_velocity(),
                trail: Trail::with_capacity(self.stage.trail_capacity),
                elapsed: 0.0,
                landed: false,
            }),
            solution,
        };
        solution
    }

    /// Remove the projectile and clear the figures
    pub fn reset(&mut self) {
        self.state = ProjectileState::default();
    }

    /// Advance one tick of `dt` seconds under `gravity`
    ///
    /// The position moves with the vertical velocity from before the tick.
    /// When the tick crosses the ground line the projectile is stopped where
    /// its path meets the ground. Stepping without a projectile in the air
    /// is a no-op that reports [`Flight::Landed`].
    pub fn step(&mut self, gravity: f64, dt: f64) -> Flight {
        let stage = self.stage;
        let Some(projectile) = self.state.projectile.as_mut() else {
            return Flight::Landed;
        };
        if projectile.landed {
            return Flight::Landed;
        }

        let start = projectile.position;
        let velocity = projectile.velocity;
        // physical y is up, visual y is down
        let next = start + Vec2::new(velocity.x, -velocity.y) * (dt * stage.scale);
        projectile.velocity.y = velocity.y - gravity * dt;
        projectile.trail.push(start);

        let flight = if next.y >= stage.ground_y {
            let drop = next.y - start.y;
            let t = if drop > 0.0 {
                ((stage.ground_y - start.y) / drop).clamp(0.0, 1.0)
            } else {
                1.0
            };
            projectile.position = Vec2::new(start.lerp(next, t).x, stage.ground_y);
            projectile.velocity.y = 0.0;
            projectile.elapsed += dt * t;
            projectile.landed = true;
            Flight::Landed
        } else {
            projectile.position = next;
            projectile.elapsed += dt;
            Flight::Airborne
        };

        debug_assert!(projectile.is_finite(), "projectile state diverged: {:?}", projectile);
        flight
    }

    /// Horizontal distance from the origin in metres
    pub fn horizontal_distance(&self) -> Option<f64> {
        self.projectile()
            .map(|p| (p.position.x - self.stage.origin.x) / self.stage.scale)
    }
}
