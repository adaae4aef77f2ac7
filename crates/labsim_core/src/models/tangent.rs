//! Derivative explorer
//!
//! A probe point sweeps across the curve while running. Paused or idle, the
//! point follows the `x` slider. The function can be switched at any time.

use labsim_math::{Catalog, FunctionKind, SlopeTriangle, Sweep, TangentPoint, TangentProbe};
use serde::Serialize;

use crate::clock::ClockState;
use crate::error::ParameterError;
use crate::model::{Model, TickOutcome};
use crate::overlay::Overlays;
use crate::params::{param_keys, ParamKey, ParamRange, ParameterSet};
use crate::scheduler::FrameScheduler;
use crate::simulation::Simulation;

pub const X_RANGE: ParamRange = ParamRange::new(-40.0, 40.0);

/// Half-length of the drawn tangent segment
pub const TANGENT_HALF_LENGTH: f64 = 30.0;
/// Horizontal leg of the slope triangle
pub const TRIANGLE_RUN: f64 = 10.0;
/// Slopes at least this steep get no triangle
pub const TRIANGLE_MAX_SLOPE: f64 = 10.0;

param_keys! {
    pub enum TangentParam {
        X => "x",
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentParams {
    pub function: FunctionKind,
    pub x: f64,
}

impl Default for TangentParams {
    fn default() -> Self {
        Self {
            function: FunctionKind::Quadratic,
            x: 0.0,
        }
    }
}

impl ParameterSet for TangentParams {
    type Key = TangentParam;

    fn keys() -> &'static [TangentParam] {
        TangentParam::ALL
    }

    fn get(&self, key: TangentParam) -> f64 {
        match key {
            TangentParam::X => self.x,
        }
    }

    fn set(&mut self, key: TangentParam, value: f64) -> Result<f64, ParameterError> {
        match key {
            TangentParam::X => self.x = X_RANGE.apply(key.name(), value)?,
        }
        Ok(self.get(key))
    }

    /// The sweep owns `x` while running
    fn is_locked(key: TangentParam, state: ClockState) -> bool {
        match key {
            TangentParam::X => state == ClockState::Running,
        }
    }
}

/// What the explorer shows for the current probe point
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TangentState {
    pub function: FunctionKind,
    pub display_name: &'static str,
    pub derivative_name: &'static str,
    pub point: TangentPoint,
    pub segment: [(f64, f64); 2],
    pub triangle: Option<SlopeTriangle>,
}

#[derive(Clone, Debug)]
pub struct TangentModel {
    probe: TangentProbe,
    sweep: Sweep,
    origin: f64,
    state: TangentState,
}

impl TangentModel {
    /// Fails if `params.function` has no derivative in the tangent catalog
    pub fn new(params: &TangentParams, sweep: Sweep) -> Result<Self, ParameterError> {
        let probe = resolve(params.function)?;
        Ok(Self {
            state: describe(&probe, params.x),
            probe,
            sweep,
            origin: 0.0,
        })
    }

    /// Where a reset puts the probe point
    pub fn with_origin(mut self, origin: f64) -> Self {
        self.origin = origin.clamp(X_RANGE.min, X_RANGE.max);
        self
    }

    pub fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    /// Function values on a grid, for plotting the curve
    pub fn curve(&self, step: f64) -> Vec<(f64, f64)> {
        self.probe.spec().sample(-self.sweep.bound, self.sweep.bound, step)
    }

    /// Derivative values on a grid
    pub fn derivative_curve(&self, step: f64) -> Vec<(f64, f64)> {
        self.probe
            .spec()
            .sample_derivative(-self.sweep.bound, self.sweep.bound, step)
            .unwrap_or_default()
    }

    fn move_to(&mut self, x: f64) {
        self.state = describe(&self.probe, x);
    }
}

impl Model for TangentModel {
    type Params = TangentParams;
    type State = TangentState;

    const NAME: &'static str = "tangent";
    const DEFAULT_OVERLAYS: Overlays = Overlays::DERIVATIVE
        .union(Overlays::TANGENT)
        .union(Overlays::SLOPE_TRIANGLE);

    fn state(&self) -> &TangentState {
        &self.state
    }

    fn tick(&mut self, _params: &TangentParams, _dt: f64) -> TickOutcome {
        let x = self.sweep.advance(self.state.point.x);
        self.move_to(x);
        TickOutcome::Continue
    }

    /// The slider follows the sweep, held to its own range
    fn sync_parameters(&self, params: &mut TangentParams) {
        params.x = self.state.point.x.clamp(X_RANGE.min, X_RANGE.max);
    }

    fn reset(&mut self, params: &mut TangentParams) {
        params.x = self.origin;
        self.move_to(self.origin);
    }

    fn parameters_changed(&mut self, params: &TangentParams) {
        self.move_to(params.x);
    }
}

impl<S: FrameScheduler> Simulation<TangentModel, S> {
    /// Switch the explored function, keeping the probe point
    pub fn select_function(&mut self, kind: FunctionKind) -> Result<(), ParameterError> {
        let probe = resolve(kind)?;
        let (model, params) = self.parts_mut();
        params.function = kind;
        model.probe = probe;
        let x = model.state.point.x;
        model.move_to(x);
        log::debug!("tangent: function = {}", kind);
        Ok(())
    }
}

fn resolve(kind: FunctionKind) -> Result<TangentProbe, ParameterError> {
    Ok(TangentProbe::new(Catalog::Tangent.get(kind)?)?)
}

fn describe(probe: &TangentProbe, x: f64) -> TangentState {
    let spec = probe.spec();
    let point = probe.at(x);
    TangentState {
        function: spec.kind(),
        display_name: spec.display_name(),
        derivative_name: spec.derivative_name().unwrap_or(""),
        point,
        segment: point.segment(TANGENT_HALF_LENGTH),
        triangle: point.slope_triangle(TRIANGLE_RUN, TRIANGLE_MAX_SLOPE),
    }
}
