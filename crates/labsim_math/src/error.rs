//! Numeric error types

use thiserror::Error;

use crate::function::{Catalog, FunctionKind};

/// Error type for catalog lookups and numeric approximations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    /// The interval is empty or reversed
    #[error("invalid interval [{lower}, {upper}]: lower bound must be below upper bound")]
    InvalidInterval { lower: f64, upper: f64 },
    /// A Riemann sum was requested with zero subintervals
    #[error("at least one subinterval is required")]
    NoSamples,
    /// The catalog does not wire this function kind
    #[error("{kind} is not available in the {catalog} catalog")]
    Unsupported { catalog: Catalog, kind: FunctionKind },
    /// The function has no closed-form derivative in its catalog
    #[error("{0} has no derivative wired")]
    MissingDerivative(FunctionKind),
}
