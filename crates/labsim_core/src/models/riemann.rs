//! Riemann-sum integrator
//!
//! Starting from Idle rewinds the sum; each tick then adds one midpoint
//! rectangle until the partition is used up. The partition cannot change
//! until the run finishes or is reset.

use labsim_math::{
    Approximation, Catalog, FunctionKind, MidpointAccumulator, RiemannSum, Subinterval,
};
use serde::Serialize;

use crate::clock::ClockState;
use crate::error::ParameterError;
use crate::model::{Model, TickOutcome};
use crate::overlay::Overlays;
use crate::params::{param_keys, ParamKey, ParamRange, ParameterSet};
use crate::scheduler::FrameScheduler;
use crate::simulation::Simulation;

pub const BOUND_RANGE: ParamRange = ParamRange::new(-20.0, 20.0);
pub const SAMPLES_RANGE: ParamRange = ParamRange::new(5.0, 100.0).with_step(1.0);

param_keys! {
    pub enum RiemannParam {
        Lower => "lower",
        Upper => "upper",
        Samples => "samples",
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiemannParams {
    pub function: FunctionKind,
    pub lower: f64,
    pub upper: f64,
    pub samples: usize,
}

impl Default for RiemannParams {
    fn default() -> Self {
        Self {
            function: FunctionKind::Quadratic,
            lower: -10.0,
            upper: 10.0,
            samples: 20,
        }
    }
}

impl ParameterSet for RiemannParams {
    type Key = RiemannParam;

    fn keys() -> &'static [RiemannParam] {
        RiemannParam::ALL
    }

    fn get(&self, key: RiemannParam) -> f64 {
        match key {
            RiemannParam::Lower => self.lower,
            RiemannParam::Upper => self.upper,
            RiemannParam::Samples => self.samples as f64,
        }
    }

    fn set(&mut self, key: RiemannParam, value: f64) -> Result<f64, ParameterError> {
        match key {
            RiemannParam::Lower => {
                let lower = BOUND_RANGE.apply(key.name(), value)?;
                if lower >= self.upper {
                    return Err(ParameterError::InvertedBounds {
                        lower,
                        upper: self.upper,
                    });
                }
                self.lower = lower;
            }
            RiemannParam::Upper => {
                let upper = BOUND_RANGE.apply(key.name(), value)?;
                if self.lower >= upper {
                    return Err(ParameterError::InvertedBounds {
                        lower: self.lower,
                        upper,
                    });
                }
                self.upper = upper;
            }
            RiemannParam::Samples => {
                self.samples = SAMPLES_RANGE.apply(key.name(), value)? as usize;
            }
        }
        Ok(self.get(key))
    }

    fn is_locked(_key: RiemannParam, state: ClockState) -> bool {
        state != ClockState::Idle
    }
}

/// What the integrator shows
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RiemannState {
    pub function: FunctionKind,
    pub display_name: &'static str,
    /// Rectangles added so far in the current run
    pub consumed: usize,
    /// True between start and completion or reset
    pub animating: bool,
    /// Rectangles to draw: those consumed while animating, all of them otherwise
    pub rectangles: Vec<Subinterval>,
    /// Sum of the rectangles consumed so far
    pub partial: Approximation,
    /// Sum over the whole partition
    pub total: Approximation,
}

#[derive(Clone, Debug)]
pub struct RiemannModel {
    accumulator: MidpointAccumulator,
    animating: bool,
    state: RiemannState,
}

impl RiemannModel {
    pub fn new(params: &RiemannParams) -> Result<Self, ParameterError> {
        let sum = partition(params)?;
        let mut model = Self {
            accumulator: sum.accumulator(),
            animating: false,
            state: RiemannState {
                function: params.function,
                display_name: "",
                consumed: 0,
                animating: false,
                rectangles: Vec::new(),
                partial: Approximation::default(),
                total: Approximation::default(),
            },
        };
        model.refresh();
        Ok(model)
    }

    pub fn sum(&self) -> &RiemannSum {
        self.accumulator.partition()
    }

    /// Function values over the integration bounds, for plotting
    pub fn curve(&self, step: f64) -> Vec<(f64, f64)> {
        let (lower, upper) = self.sum().bounds();
        self.sum().spec().sample(lower, upper, step)
    }

    fn rebuild(&mut self, sum: RiemannSum) {
        self.accumulator = sum.accumulator();
        self.animating = false;
        self.refresh();
    }

    fn refresh(&mut self) {
        let sum = *self.sum();
        let consumed = self.accumulator.consumed();
        let visible = if self.animating { consumed } else { sum.samples() };
        self.state = RiemannState {
            function: sum.spec().kind(),
            display_name: sum.spec().display_name(),
            consumed,
            animating: self.animating,
            rectangles: sum.subintervals().take(visible).collect(),
            partial: self.accumulator.approximation(),
            total: sum.evaluate(),
        };
    }
}

impl Model for RiemannModel {
    type Params = RiemannParams;
    type State = RiemannState;

    const NAME: &'static str = "riemann";
    const DEFAULT_OVERLAYS: Overlays = Overlays::RECTANGLES.union(Overlays::EXACT_AREA);

    fn state(&self) -> &RiemannState {
        &self.state
    }

    fn launch(&mut self, _params: &RiemannParams) {
        self.accumulator.rewind();
        self.animating = true;
        self.refresh();
    }

    fn tick(&mut self, _params: &RiemannParams, _dt: f64) -> TickOutcome {
        self.accumulator.step();
        if self.accumulator.is_complete() {
            self.animating = false;
        }
        self.refresh();
        if self.accumulator.is_complete() {
            let result = self.state.total;
            log::info!(
                "riemann: {} rectangles sum to {:.4} (exact {:?}, error {:?})",
                result.samples,
                result.approximation,
                result.exact,
                result.error
            );
            TickOutcome::Finished
        } else {
            TickOutcome::Continue
        }
    }

    fn reset(&mut self, _params: &mut RiemannParams) {
        self.accumulator.rewind();
        self.animating = false;
        self.refresh();
    }

    fn parameters_changed(&mut self, params: &RiemannParams) {
        match partition(params) {
            Ok(sum) => self.rebuild(sum),
            Err(err) => log::warn!("riemann: keeping previous partition: {}", err),
        }
    }
}

impl<S: FrameScheduler> Simulation<RiemannModel, S> {
    /// Switch the integrated function; refused unless idle
    pub fn select_function(&mut self, kind: FunctionKind) -> Result<(), ParameterError> {
        let state = self.clock_state();
        if state != ClockState::Idle {
            return Err(ParameterError::Locked { name: "function", state });
        }
        let mut next = *self.params();
        next.function = kind;
        let sum = partition(&next)?;
        let (model, params) = self.parts_mut();
        *params = next;
        model.rebuild(sum);
        log::debug!("riemann: function = {}", kind);
        Ok(())
    }
}

fn partition(params: &RiemannParams) -> Result<RiemannSum, ParameterError> {
    let spec = Catalog::Area.get(params.function)?;
    Ok(RiemannSum::new(spec, params.lower, params.upper, params.samples)?)
}
