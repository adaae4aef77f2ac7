//! Parameter store errors

use labsim_math::NumericError;
use thiserror::Error;

use crate::clock::ClockState;

/// Why a parameter change was refused
///
/// Out-of-range numbers are clamped rather than refused; these variants
/// cover input that cannot be made valid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// NaN or infinite input
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    /// Lower integration bound not below the upper one
    #[error("lower bound {lower} must be below upper bound {upper}")]
    InvertedBounds { lower: f64, upper: f64 },
    /// The demonstration forbids this change in its current clock state
    #[error("{name} cannot change while the simulation is {state}")]
    Locked { name: &'static str, state: ClockState },
    /// Unrecognised parameter name
    #[error("unknown parameter '{0}'")]
    Unknown(String),
    /// The requested function is not wired for this demonstration
    #[error(transparent)]
    Function(#[from] NumericError),
}
