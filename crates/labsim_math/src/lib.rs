//! Numeric core for the labsim demonstrations
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector in visual coordinates
//! - [`Catalog`] / [`FunctionSpec`] - closed set of functions with exact derivatives or integrals
//!
//! ## Approximators
//!
//! - [`TangentProbe`] - value and exact slope at a query point, plus the cyclic [`Sweep`]
//! - [`RiemannSum`] - midpoint rule, batch or incremental via [`MidpointAccumulator`]

mod vec2;
mod error;
pub mod function;
pub mod tangent;
pub mod riemann;

pub use vec2::Vec2;
pub use error::NumericError;
pub use function::{AreaCurve, Catalog, FunctionId, FunctionKind, FunctionSpec, TangentCurve};
pub use tangent::{SlopeTriangle, Sweep, TangentPoint, TangentProbe};
pub use riemann::{Approximation, MidpointAccumulator, RiemannSum, Subinterval};
