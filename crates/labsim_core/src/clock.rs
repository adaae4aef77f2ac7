//! Run/pause/reset state machine shared by every demonstration
//!
//! ```text
//!            start                 pause
//!   Idle ──────────────▶ Running ─────────▶ Paused
//!    ▲                    │  ▲                 │
//!    │ finished / reset   │  └──── start ──────┘
//!    └────────────────────┘
//!   (reset from any state returns to Idle)
//! ```
//!
//! The clock owns at most one pending [`FrameKey`]. Pausing and resetting
//! cancel it before anything else changes, and a frame is only accepted if
//! it is the one currently pending, so a callback that raced a pause or
//! reset is dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scheduler::{FrameKey, FrameScheduler};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    #[default]
    Idle,
    Running,
    Paused,
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClockState::Idle => "idle",
            ClockState::Running => "running",
            ClockState::Paused => "paused",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    state: ClockState,
    pending: Option<FrameKey>,
    frame_delay: f64,
    elapsed: f64,
    ticks: u64,
}

impl Clock {
    /// `frame_delay` is the wall-clock gap requested between frames
    pub fn new(frame_delay: f64) -> Self {
        Self {
            state: ClockState::Idle,
            pending: None,
            frame_delay: frame_delay.max(0.0),
            elapsed: 0.0,
            ticks: 0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn pending(&self) -> Option<FrameKey> {
        self.pending
    }

    pub fn frame_delay(&self) -> f64 {
        self.frame_delay
    }

    /// Simulated seconds since the last reset
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Idle or Paused to Running. Returns false if already running.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = ClockState::Running;
        self.schedule(scheduler);
        true
    }

    /// Running to Paused. Returns false in any other state.
    pub fn pause(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if !self.is_running() {
            return false;
        }
        self.cancel(scheduler);
        self.state = ClockState::Paused;
        true
    }

    /// Back to Idle, keeping elapsed time and tick count
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) {
        self.cancel(scheduler);
        self.state = ClockState::Idle;
    }

    /// Back to Idle with elapsed time and tick count cleared
    pub fn reset(&mut self, scheduler: &mut impl FrameScheduler) {
        self.stop(scheduler);
        self.elapsed = 0.0;
        self.ticks = 0;
    }

    /// Claim a fired frame. Only the currently pending frame is accepted,
    /// and only while running.
    pub fn accept(&mut self, frame: FrameKey) -> bool {
        if self.is_running() && self.pending == Some(frame) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Account for one completed tick and, if still running, ask for the next frame
    pub fn record_tick(&mut self, scheduler: &mut impl FrameScheduler, dt: f64) {
        self.elapsed += dt;
        self.ticks += 1;
        if self.is_running() && self.pending.is_none() {
            self.schedule(scheduler);
        }
    }

    fn schedule(&mut self, scheduler: &mut impl FrameScheduler) {
        self.cancel(scheduler);
        self.pending = Some(scheduler.request_frame(self.frame_delay));
    }

    fn cancel(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(frame) = self.pending.take() {
            scheduler.cancel_frame(frame);
        }
    }
}
