//! Force-and-friction block

use labsim_physics::{displayed_net_force, BlockInputs, BlockStepper, BlockTrack, KinematicState};

use crate::error::ParameterError;
use crate::model::{Model, TickOutcome};
use crate::overlay::Overlays;
use crate::params::{param_keys, ParamKey, ParamRange, ParameterSet};

pub const MASS_RANGE: ParamRange = ParamRange::new(1.0, 15.0);
pub const FORCE_RANGE: ParamRange = ParamRange::new(0.0, 30.0);
pub const FRICTION_RANGE: ParamRange = ParamRange::new(0.0, 0.5);

param_keys! {
    pub enum BlockParam {
        Mass => "mass",
        Force => "force",
        Friction => "friction",
    }
}

/// Slider values for the block demonstration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockParams {
    pub mass: f64,
    pub force: f64,
    pub friction: f64,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            mass: 5.0,
            force: 10.0,
            friction: 0.1,
        }
    }
}

impl BlockParams {
    pub fn inputs(&self) -> BlockInputs {
        BlockInputs {
            mass: self.mass,
            applied_force: self.force,
            friction: self.friction,
        }
    }
}

impl ParameterSet for BlockParams {
    type Key = BlockParam;

    fn keys() -> &'static [BlockParam] {
        BlockParam::ALL
    }

    fn get(&self, key: BlockParam) -> f64 {
        match key {
            BlockParam::Mass => self.mass,
            BlockParam::Force => self.force,
            BlockParam::Friction => self.friction,
        }
    }

    fn set(&mut self, key: BlockParam, value: f64) -> Result<f64, ParameterError> {
        let (slot, range) = match key {
            BlockParam::Mass => (&mut self.mass, MASS_RANGE),
            BlockParam::Force => (&mut self.force, FORCE_RANGE),
            BlockParam::Friction => (&mut self.friction, FRICTION_RANGE),
        };
        *slot = range.apply(key.name(), value)?;
        Ok(*slot)
    }
}

/// Block stepper plus the readout derived from it
#[derive(Clone, Debug)]
pub struct BlockModel {
    stepper: BlockStepper,
}

impl BlockModel {
    pub fn new(track: BlockTrack) -> Self {
        Self {
            stepper: BlockStepper::new(track),
        }
    }

    pub fn track(&self) -> &BlockTrack {
        self.stepper.track()
    }

    /// Net force as the readout shows it for the current velocity
    pub fn displayed_net_force(&self, params: &BlockParams) -> f64 {
        displayed_net_force(&params.inputs(), self.stepper.state().velocity, self.track().gravity)
    }
}

impl Default for BlockModel {
    fn default() -> Self {
        Self::new(BlockTrack::default())
    }
}

impl Model for BlockModel {
    type Params = BlockParams;
    type State = KinematicState;

    const NAME: &'static str = "block";
    const DEFAULT_OVERLAYS: Overlays = Overlays::FORCES;

    fn state(&self) -> &KinematicState {
        self.stepper.state()
    }

    fn tick(&mut self, params: &BlockParams, dt: f64) -> TickOutcome {
        self.stepper.step(&params.inputs(), dt);
        TickOutcome::Continue
    }

    fn reset(&mut self, _params: &mut BlockParams) {
        self.stepper.reset();
    }
}
