//! Midpoint Riemann sums
//!
//! [`RiemannSum`] describes a partition of `[lower, upper]` into `samples`
//! equal subintervals. It can be evaluated in one go ([`RiemannSum::evaluate`])
//! or consumed one subinterval at a time through a [`MidpointAccumulator`],
//! which is what the animated integrator drives.

use serde::{Deserialize, Serialize};

use crate::error::NumericError;
use crate::function::FunctionSpec;

/// One rectangle of the partition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subinterval {
    pub index: usize,
    pub left: f64,
    pub width: f64,
    pub midpoint: f64,
    /// f(midpoint)
    pub height: f64,
}

impl Subinterval {
    /// Signed area contributed to the sum
    pub fn area(&self) -> f64 {
        self.height * self.width
    }
}

/// Approximation reported next to the closed form
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Approximation {
    pub samples: usize,
    pub width: f64,
    pub approximation: f64,
    /// Exact integral, when the catalog wires one
    pub exact: Option<f64>,
    /// `|exact - approximation|`
    pub error: Option<f64>,
}

/// A validated midpoint-rule partition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiemannSum {
    spec: FunctionSpec,
    lower: f64,
    upper: f64,
    samples: usize,
}

impl RiemannSum {
    pub fn new(
        spec: FunctionSpec,
        lower: f64,
        upper: f64,
        samples: usize,
    ) -> Result<Self, NumericError> {
        if !(lower < upper) {
            return Err(NumericError::InvalidInterval { lower, upper });
        }
        if samples == 0 {
            return Err(NumericError::NoSamples);
        }
        Ok(Self {
            spec,
            lower,
            upper,
            samples,
        })
    }

    pub fn spec(&self) -> FunctionSpec {
        self.spec
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Subinterval width `(upper - lower) / samples`
    pub fn width(&self) -> f64 {
        (self.upper - self.lower) / self.samples as f64
    }

    /// The `index`-th rectangle, or `None` past the end
    pub fn subinterval(&self, index: usize) -> Option<Subinterval> {
        if index >= self.samples {
            return None;
        }
        let width = self.width();
        let left = self.lower + index as f64 * width;
        let midpoint = left + width / 2.0;
        Some(Subinterval {
            index,
            left,
            width,
            midpoint,
            height: self.spec.evaluate(midpoint),
        })
    }

    pub fn subintervals(&self) -> impl Iterator<Item = Subinterval> + '_ {
        (0..self.samples).filter_map(move |i| self.subinterval(i))
    }

    /// Exact integral over the bounds, if wired
    pub fn exact(&self) -> Option<f64> {
        self.spec.integral(self.lower, self.upper)
    }

    /// Batch form: all subintervals at once
    pub fn evaluate(&self) -> Approximation {
        let approximation = self.subintervals().map(|s| s.area()).sum();
        self.report(approximation)
    }

    /// Start an incremental accumulation from an empty sum
    pub fn accumulator(&self) -> MidpointAccumulator {
        MidpointAccumulator {
            partition: *self,
            cursor: 0,
            partial: 0.0,
        }
    }

    fn report(&self, approximation: f64) -> Approximation {
        let exact = self.exact();
        Approximation {
            samples: self.samples,
            width: self.width(),
            approximation,
            exact,
            error: exact.map(|e| (e - approximation).abs()),
        }
    }
}

/// Incremental midpoint sum, one subinterval per [`step`](Self::step)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MidpointAccumulator {
    partition: RiemannSum,
    cursor: usize,
    partial: f64,
}

impl MidpointAccumulator {
    /// Consume the next subinterval; `None` once all have been consumed
    pub fn step(&mut self) -> Option<Subinterval> {
        let next = self.partition.subinterval(self.cursor)?;
        self.partial += next.area();
        self.cursor += 1;
        Some(next)
    }

    /// Number of subintervals consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    pub fn partial_sum(&self) -> f64 {
        self.partial
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.partition.samples
    }

    pub fn partition(&self) -> &RiemannSum {
        &self.partition
    }

    /// Back to an empty sum over the same partition
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.partial = 0.0;
    }

    /// Report the partial sum against the exact integral
    pub fn approximation(&self) -> Approximation {
        self.partition.report(self.partial)
    }
}
