//! Tangent-line evaluation against the function catalog
//!
//! Slopes come straight from the catalog's exact derivative, never from a
//! finite difference.

use serde::{Deserialize, Serialize};

use crate::error::NumericError;
use crate::function::FunctionSpec;

/// A point on the curve together with its slope
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TangentPoint {
    pub x: f64,
    /// f(x)
    pub value: f64,
    /// f'(x)
    pub slope: f64,
}

impl TangentPoint {
    /// Endpoints of the tangent segment extending `half_length` either side of `x`
    pub fn segment(&self, half_length: f64) -> [(f64, f64); 2] {
        [
            (self.x - half_length, self.value - self.slope * half_length),
            (self.x + half_length, self.value + self.slope * half_length),
        ]
    }

    /// Rise-over-run triangle for a horizontal run of `run`
    ///
    /// Returns `None` when the slope is too steep (`|slope| >= max_slope`)
    /// for the triangle to be meaningful on screen.
    pub fn slope_triangle(&self, run: f64, max_slope: f64) -> Option<SlopeTriangle> {
        if self.slope.abs() < max_slope {
            Some(SlopeTriangle {
                run,
                rise: self.slope * run,
            })
        } else {
            None
        }
    }
}

/// Δx / Δy legs drawn from the tangent point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlopeTriangle {
    pub run: f64,
    pub rise: f64,
}

/// Evaluates value and exact slope of a catalog function
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentProbe {
    spec: FunctionSpec,
}

impl TangentProbe {
    /// Fails when the function has no derivative wired in its catalog
    pub fn new(spec: FunctionSpec) -> Result<Self, NumericError> {
        if spec.has_derivative() {
            Ok(Self { spec })
        } else {
            Err(NumericError::MissingDerivative(spec.kind()))
        }
    }

    pub fn spec(&self) -> FunctionSpec {
        self.spec
    }

    pub fn at(&self, x: f64) -> TangentPoint {
        TangentPoint {
            x,
            value: self.spec.evaluate(x),
            // presence checked in `new`
            slope: self.spec.derivative(x).unwrap_or(0.0),
        }
    }
}

/// Cyclic sweep of a query point over `[-bound, bound]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub step: f64,
    pub bound: f64,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            step: 2.0,
            bound: 50.0,
        }
    }
}

impl Sweep {
    pub fn new(step: f64, bound: f64) -> Self {
        Self {
            step,
            bound: bound.abs(),
        }
    }

    /// Next query point: `x + step`, wrapping to `-bound` once it passes `bound`
    pub fn advance(&self, x: f64) -> f64 {
        let next = x + self.step;
        if next > self.bound {
            -self.bound
        } else {
            next
        }
    }
}
