//! The seam between the generic [`Simulation`](crate::Simulation) driver and
//! each demonstration's physics or numerics

use std::fmt;

use serde::Serialize;

use crate::overlay::Overlays;
use crate::params::ParameterSet;

/// What the driver should do after a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep the clock running
    Continue,
    /// The demonstration reached its end; the clock returns to Idle
    Finished,
}

/// A demonstration's mutable state and its update rule
pub trait Model {
    type Params: ParameterSet;
    type State: Clone + fmt::Debug + PartialEq + Serialize;

    /// Short name used in log lines
    const NAME: &'static str;

    /// Layers shown until the user toggles them
    const DEFAULT_OVERLAYS: Overlays;

    fn state(&self) -> &Self::State;

    /// Called when the clock leaves Idle
    fn launch(&mut self, _params: &Self::Params) {}

    /// Advance one tick of `dt` simulated seconds
    fn tick(&mut self, params: &Self::Params, dt: f64) -> TickOutcome;

    /// Write values the state owns back to their sliders after a tick
    fn sync_parameters(&self, _params: &mut Self::Params) {}

    /// Restore the initial state. Models whose reset moves a slider
    /// (the tangent point) write it back into `params`.
    fn reset(&mut self, params: &mut Self::Params);

    /// Called after a parameter was stored
    fn parameters_changed(&mut self, _params: &Self::Params) {}
}
