//! Run/pause/reset lifecycle and parameter handling for the labsim demonstrations
//!
//! A [`Simulation`] couples a [`Model`] (one of [`models`]) with its
//! [`ParameterSet`], a [`Clock`] and a [`FrameScheduler`]. The clock is an
//! explicit Idle/Running/Paused machine; frames come from the scheduler and
//! stale ones are dropped.

pub mod clock;
pub mod error;
pub mod model;
pub mod models;
pub mod overlay;
pub mod params;
pub mod scheduler;
pub mod simulation;

pub use clock::{Clock, ClockState};
pub use error::ParameterError;
pub use model::{Model, TickOutcome};
pub use models::block::{BlockModel, BlockParam, BlockParams};
pub use models::projectile::{ProjectileModel, ProjectileParam, ProjectileParams};
pub use models::riemann::{RiemannModel, RiemannParam, RiemannParams, RiemannState};
pub use models::tangent::{TangentModel, TangentParam, TangentParams, TangentState};
pub use overlay::Overlays;
pub use params::{apply_all, ParamKey, ParamRange, ParameterSet};
pub use scheduler::{FrameKey, FrameScheduler, ManualScheduler};
pub use simulation::{Simulation, Snapshot, Timing};
