//! Generic driver tying a [`Model`] to its parameters and [`Clock`]

use crate::clock::{Clock, ClockState};
use crate::error::ParameterError;
use crate::model::{Model, TickOutcome};
use crate::overlay::Overlays;
use crate::params::{ParamKey, ParameterSet};
use crate::scheduler::{FrameKey, FrameScheduler, ManualScheduler};

/// Tick length and frame spacing of a demonstration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Simulated seconds per tick
    pub tick_dt: f64,
    /// Wall-clock seconds between frames
    pub frame_delay: f64,
}

impl Timing {
    pub fn new(tick_dt: f64, frame_delay: f64) -> Self {
        Self { tick_dt, frame_delay }
    }

    /// One frame per tick, in real time
    pub fn realtime(tick_dt: f64) -> Self {
        Self::new(tick_dt, tick_dt)
    }
}

/// Everything a renderer needs for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<P, T> {
    pub clock: ClockState,
    pub elapsed: f64,
    pub ticks: u64,
    pub overlays: Overlays,
    pub params: P,
    pub state: T,
}

/// A demonstration: model, parameters, clock and frame source
///
/// All control goes through `&mut self`, so commands and frame callbacks
/// are applied one at a time and can never interleave.
pub struct Simulation<M: Model, S: FrameScheduler> {
    model: M,
    params: M::Params,
    clock: Clock,
    scheduler: S,
    tick_dt: f64,
    overlays: Overlays,
}

impl<M: Model, S: FrameScheduler> Simulation<M, S> {
    pub fn new(model: M, params: M::Params, scheduler: S, timing: Timing) -> Self {
        Self {
            model,
            params,
            clock: Clock::new(timing.frame_delay),
            scheduler,
            tick_dt: timing.tick_dt,
            overlays: M::DEFAULT_OVERLAYS,
        }
    }

    pub fn state(&self) -> &M::State {
        self.model.state()
    }

    pub fn params(&self) -> &M::Params {
        &self.params
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn tick_dt(&self) -> f64 {
        self.tick_dt
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn overlays(&self) -> Overlays {
        self.overlays
    }

    pub fn set_overlay(&mut self, overlay: Overlays, enabled: bool) {
        self.overlays.set(overlay, enabled);
    }

    pub fn snapshot(&self) -> Snapshot<M::Params, M::State> {
        Snapshot {
            clock: self.clock.state(),
            elapsed: self.clock.elapsed(),
            ticks: self.clock.ticks(),
            overlays: self.overlays,
            params: self.params.clone(),
            state: self.model.state().clone(),
        }
    }

    /// Start or resume. Starting from Idle launches the model first.
    ///
    /// Returns false, changing nothing, if already running.
    pub fn start(&mut self) -> bool {
        match self.clock.state() {
            ClockState::Running => {
                log::debug!("{}: start ignored, already running", M::NAME);
                return false;
            }
            ClockState::Idle => {
                self.model.launch(&self.params);
                log::info!("{}: started", M::NAME);
            }
            ClockState::Paused => log::info!("{}: resumed", M::NAME),
        }
        self.clock.start(&mut self.scheduler)
    }

    /// Returns false if the clock was not running
    pub fn pause(&mut self) -> bool {
        let paused = self.clock.pause(&mut self.scheduler);
        if paused {
            log::info!("{}: paused after {} ticks", M::NAME, self.clock.ticks());
        } else {
            log::debug!("{}: pause ignored while {}", M::NAME, self.clock.state());
        }
        paused
    }

    /// Return to Idle and the initial state
    ///
    /// The pending frame is cancelled before the model is touched.
    pub fn reset(&mut self) {
        self.clock.reset(&mut self.scheduler);
        self.model.reset(&mut self.params);
        log::info!("{}: reset", M::NAME);
    }

    /// Store a parameter and return the value actually applied
    pub fn set_parameter(
        &mut self,
        key: <M::Params as ParameterSet>::Key,
        value: f64,
    ) -> Result<f64, ParameterError> {
        let state = self.clock.state();
        if <M::Params as ParameterSet>::is_locked(key, state) {
            log::debug!("{}: {} = {} refused while {}", M::NAME, key, value, state);
            return Err(ParameterError::Locked {
                name: key.name(),
                state,
            });
        }
        let applied = self.params.set(key, value)?;
        log::debug!("{}: {} = {}", M::NAME, key, applied);
        self.model.parameters_changed(&self.params);
        Ok(applied)
    }

    /// [`set_parameter`](Self::set_parameter) by name
    pub fn set_parameter_named(&mut self, name: &str, value: f64) -> Result<f64, ParameterError> {
        let key: <M::Params as ParameterSet>::Key = name.parse()?;
        self.set_parameter(key, value)
    }

    /// Advance one tick of `dt` directly, bypassing the scheduler
    pub fn tick(&mut self, dt: f64) -> TickOutcome {
        let outcome = self.model.tick(&self.params, dt);
        self.model.sync_parameters(&mut self.params);
        self.clock.record_tick(&mut self.scheduler, dt);
        if outcome == TickOutcome::Finished && self.clock.state() != ClockState::Idle {
            self.clock.stop(&mut self.scheduler);
            log::info!("{}: finished after {} ticks", M::NAME, self.clock.ticks());
        }
        outcome
    }

    /// Frame callback. Stale frames are ignored.
    pub fn fire(&mut self, frame: FrameKey) -> bool {
        if !self.clock.accept(frame) {
            log::debug!("{}: ignoring stale frame {:?}", M::NAME, frame);
            return false;
        }
        self.tick(self.tick_dt);
        true
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut M, &mut M::Params) {
        (&mut self.model, &mut self.params)
    }
}

impl<M: Model> Simulation<M, ManualScheduler> {
    /// Move the manual scheduler forward and fire every due frame
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: f64) -> usize {
        let due = self.scheduler.advance(elapsed);
        due.into_iter().filter(|&frame| self.fire(frame)).count()
    }
}
