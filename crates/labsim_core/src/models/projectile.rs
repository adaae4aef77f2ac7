//! Projectile launcher
//!
//! Launch parameters are frozen from the moment the clock leaves Idle until
//! the projectile lands or the demonstration is reset.

use labsim_math::Vec2;
use labsim_physics::{
    Flight, LaunchParams, ProjectileState, ProjectileStepper, Stage, STANDARD_GRAVITY,
};

use crate::clock::ClockState;
use crate::error::ParameterError;
use crate::model::{Model, TickOutcome};
use crate::overlay::Overlays;
use crate::params::{param_keys, ParamKey, ParamRange, ParameterSet};

pub const ANGLE_RANGE: ParamRange = ParamRange::new(0.0, 90.0);
pub const SPEED_RANGE: ParamRange = ParamRange::new(5.0, 40.0);
pub const GRAVITY_RANGE: ParamRange = ParamRange::new(1.0, 20.0);

/// Time step used to sample the predicted path
const PATH_STEP: f64 = 0.05;

param_keys! {
    pub enum ProjectileParam {
        Angle => "angle",
        Speed => "speed",
        Gravity => "gravity",
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileParams {
    /// Degrees above horizontal
    pub angle: f64,
    /// m/s
    pub speed: f64,
    /// m/s²
    pub gravity: f64,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            angle: 45.0,
            speed: 20.0,
            gravity: STANDARD_GRAVITY,
        }
    }
}

impl ProjectileParams {
    pub fn launch(&self) -> LaunchParams {
        LaunchParams {
            angle_degrees: self.angle,
            speed: self.speed,
            gravity: self.gravity,
        }
    }
}

impl ParameterSet for ProjectileParams {
    type Key = ProjectileParam;

    fn keys() -> &'static [ProjectileParam] {
        ProjectileParam::ALL
    }

    fn get(&self, key: ProjectileParam) -> f64 {
        match key {
            ProjectileParam::Angle => self.angle,
            ProjectileParam::Speed => self.speed,
            ProjectileParam::Gravity => self.gravity,
        }
    }

    fn set(&mut self, key: ProjectileParam, value: f64) -> Result<f64, ParameterError> {
        let (slot, range) = match key {
            ProjectileParam::Angle => (&mut self.angle, ANGLE_RANGE),
            ProjectileParam::Speed => (&mut self.speed, SPEED_RANGE),
            ProjectileParam::Gravity => (&mut self.gravity, GRAVITY_RANGE),
        };
        *slot = range.apply(key.name(), value)?;
        Ok(*slot)
    }

    fn is_locked(_key: ProjectileParam, state: ClockState) -> bool {
        state != ClockState::Idle
    }
}

#[derive(Clone, Debug)]
pub struct ProjectileModel {
    stepper: ProjectileStepper,
}

impl ProjectileModel {
    pub fn new(stage: Stage) -> Self {
        Self {
            stepper: ProjectileStepper::new(stage),
        }
    }

    pub fn stage(&self) -> &Stage {
        self.stepper.stage()
    }

    /// Horizontal distance travelled so far, in metres
    pub fn horizontal_distance(&self) -> Option<f64> {
        self.stepper.horizontal_distance()
    }

    /// Ideal parabola for the current parameters, in visual coordinates
    pub fn predicted_path(&self, params: &ProjectileParams) -> Vec<Vec2> {
        self.stage().predicted_path(&params.launch(), PATH_STEP)
    }
}

impl Default for ProjectileModel {
    fn default() -> Self {
        Self::new(Stage::default())
    }
}

impl Model for ProjectileModel {
    type Params = ProjectileParams;
    type State = ProjectileState;

    const NAME: &'static str = "projectile";
    const DEFAULT_OVERLAYS: Overlays = Overlays::TRAIL.union(Overlays::PREDICTED_PATH);

    fn state(&self) -> &ProjectileState {
        self.stepper.state()
    }

    fn launch(&mut self, params: &ProjectileParams) {
        let solution = self.stepper.launch(&params.launch());
        log::info!(
            "projectile: launched at {}° and {} m/s, range {:.2} m, peak {:.2} m, flight {:.2} s",
            params.angle,
            params.speed,
            solution.range,
            solution.max_height,
            solution.time_of_flight
        );
    }

    fn tick(&mut self, params: &ProjectileParams, dt: f64) -> TickOutcome {
        let in_flight = self.stepper.projectile().map_or(false, |p| !p.landed);
        match self.stepper.step(params.gravity, dt) {
            Flight::Airborne => TickOutcome::Continue,
            Flight::Landed => {
                if in_flight {
                    if let Some(distance) = self.horizontal_distance() {
                        log::info!("projectile: landed {:.2} m from the launcher", distance);
                    }
                }
                TickOutcome::Finished
            }
        }
    }

    fn reset(&mut self, _params: &mut ProjectileParams) {
        self.stepper.reset();
    }
}
