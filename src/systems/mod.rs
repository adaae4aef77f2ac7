//! Application systems

mod simulation;

pub use simulation::{FrameResult, SimulationSystem, MAX_FRAME_DT};
