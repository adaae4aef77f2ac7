//! Frame system
//!
//! Measures wall-clock frame time and feeds it to the [`Lab`] schedulers.

use std::time::Instant;

use crate::lab::Lab;

/// Longest frame passed on to the schedulers (seconds)
pub const MAX_FRAME_DT: f64 = 0.25;

/// Result of a frame update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameResult {
    /// Seconds actually fed to the schedulers
    pub dt: f64,
    /// Demonstration ticks run during the frame
    pub ticks: usize,
}

/// Drives the lab from frame to frame
pub struct SimulationSystem {
    last_frame: Instant,
}

impl SimulationSystem {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Run one frame using the wall-clock time since the previous one
    pub fn update(&mut self, lab: &mut Lab) -> FrameResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.step(lab, raw_dt)
    }

    /// Run one frame of `raw_dt` seconds
    ///
    /// Long frames (first frame, stalls) are capped so a demonstration never
    /// fires a burst of catch-up ticks.
    pub fn step(&mut self, lab: &mut Lab, raw_dt: f64) -> FrameResult {
        let dt = if raw_dt.is_finite() { raw_dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        let ticks = lab.advance(dt);
        FrameResult { dt, ticks }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}
