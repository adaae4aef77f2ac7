//! One instance of every demonstration, built from [`AppConfig`]

use std::fmt;
use std::str::FromStr;

use labsim_core::{
    apply_all, BlockModel, BlockParam, BlockParams, ClockState, ManualScheduler, ParameterError,
    ProjectileModel, ProjectileParam, ProjectileParams, RiemannModel, RiemannParam, RiemannParams,
    Simulation, TangentModel, TangentParam, TangentParams, Timing,
};
use labsim_math::{FunctionKind, Sweep, Vec2};
use labsim_physics::{BlockTrack, Stage};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum LabError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error("unknown demonstration '{0}'")]
    UnknownDemo(String),
    #[error("invalid override '{0}', expected demo.parameter=value")]
    InvalidOverride(String),
    /// A fixed constant from the configuration cannot drive a stepper
    #[error("invalid configuration value {field} = {value}: expected {expected}")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DemoKind {
    Block,
    Projectile,
    Tangent,
    Riemann,
}

impl DemoKind {
    pub const ALL: [DemoKind; 4] = [
        DemoKind::Block,
        DemoKind::Projectile,
        DemoKind::Tangent,
        DemoKind::Riemann,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Block => "block",
            DemoKind::Projectile => "projectile",
            DemoKind::Tangent => "tangent",
            DemoKind::Riemann => "riemann",
        }
    }

    /// `all` selects every demonstration
    pub fn parse_selection(s: &str) -> Result<Vec<DemoKind>, LabError> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::ALL.to_vec())
        } else {
            s.parse().map(|kind| vec![kind])
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| LabError::UnknownDemo(name.to_string()))
    }
}

pub type BlockSim = Simulation<BlockModel, ManualScheduler>;
pub type ProjectileSim = Simulation<ProjectileModel, ManualScheduler>;
pub type TangentSim = Simulation<TangentModel, ManualScheduler>;
pub type RiemannSim = Simulation<RiemannModel, ManualScheduler>;

/// The four demonstrations, each with its own clock and scheduler
pub struct Lab {
    pub block: BlockSim,
    pub projectile: ProjectileSim,
    pub tangent: TangentSim,
    pub riemann: RiemannSim,
}

impl Lab {
    pub fn new(config: &AppConfig) -> Result<Self, LabError> {
        Ok(Self {
            block: build_block(config)?,
            projectile: build_projectile(config)?,
            tangent: build_tangent(config)?,
            riemann: build_riemann(config)?,
        })
    }

    pub fn start(&mut self, kind: DemoKind) -> bool {
        match kind {
            DemoKind::Block => self.block.start(),
            DemoKind::Projectile => self.projectile.start(),
            DemoKind::Tangent => self.tangent.start(),
            DemoKind::Riemann => self.riemann.start(),
        }
    }

    pub fn pause(&mut self, kind: DemoKind) -> bool {
        match kind {
            DemoKind::Block => self.block.pause(),
            DemoKind::Projectile => self.projectile.pause(),
            DemoKind::Tangent => self.tangent.pause(),
            DemoKind::Riemann => self.riemann.pause(),
        }
    }

    pub fn reset(&mut self, kind: DemoKind) {
        match kind {
            DemoKind::Block => self.block.reset(),
            DemoKind::Projectile => self.projectile.reset(),
            DemoKind::Tangent => self.tangent.reset(),
            DemoKind::Riemann => self.riemann.reset(),
        }
    }

    pub fn clock_state(&self, kind: DemoKind) -> ClockState {
        match kind {
            DemoKind::Block => self.block.clock_state(),
            DemoKind::Projectile => self.projectile.clock_state(),
            DemoKind::Tangent => self.tangent.clock_state(),
            DemoKind::Riemann => self.riemann.clock_state(),
        }
    }

    pub fn set_parameter(
        &mut self,
        kind: DemoKind,
        name: &str,
        value: f64,
    ) -> Result<f64, ParameterError> {
        match kind {
            DemoKind::Block => self.block.set_parameter_named(name, value),
            DemoKind::Projectile => self.projectile.set_parameter_named(name, value),
            DemoKind::Tangent => self.tangent.set_parameter_named(name, value),
            DemoKind::Riemann => self.riemann.set_parameter_named(name, value),
        }
    }

    /// Switch the function of the tangent or Riemann demonstration
    pub fn select_function(
        &mut self,
        kind: DemoKind,
        function: FunctionKind,
    ) -> Result<(), LabError> {
        match kind {
            DemoKind::Tangent => self.tangent.select_function(function)?,
            DemoKind::Riemann => self.riemann.select_function(function)?,
            DemoKind::Block | DemoKind::Projectile => {
                return Err(ParameterError::Unknown(format!("{}.function", kind)).into())
            }
        }
        Ok(())
    }

    /// Apply a `demo.parameter=value` override
    pub fn apply_override(&mut self, spec: &str) -> Result<(), LabError> {
        let invalid = || LabError::InvalidOverride(spec.to_string());
        let (target, value) = spec.split_once('=').ok_or_else(invalid)?;
        let (demo, name) = target.split_once('.').ok_or_else(invalid)?;
        let kind: DemoKind = demo.parse()?;
        if name.trim().eq_ignore_ascii_case("function") {
            let function: FunctionKind = value.parse().map_err(|_| invalid())?;
            return self.select_function(kind, function);
        }
        let value: f64 = value.trim().parse().map_err(|_| invalid())?;
        let applied = self.set_parameter(kind, name, value)?;
        log::debug!("{}.{} set to {}", kind, name.trim(), applied);
        Ok(())
    }

    /// Move every demonstration's scheduler forward; returns the ticks run
    pub fn advance(&mut self, elapsed: f64) -> usize {
        self.block.advance(elapsed)
            + self.projectile.advance(elapsed)
            + self.tangent.advance(elapsed)
            + self.riemann.advance(elapsed)
    }

    /// One-line description of a demonstration's current state
    pub fn summary(&self, kind: DemoKind) -> String {
        match kind {
            DemoKind::Block => {
                let snap = self.block.snapshot();
                let s = snap.state;
                format!(
                    "block [{}] t={:.2}s x={:.1} v={:.2} a={:.2} net={:.2}N",
                    snap.clock,
                    snap.elapsed,
                    s.position,
                    s.velocity,
                    s.acceleration,
                    self.block.model().displayed_net_force(&snap.params)
                )
            }
            DemoKind::Projectile => {
                let snap = self.projectile.snapshot();
                match &snap.state.projectile {
                    Some(p) => format!(
                        "projectile [{}] t={:.2}s pos=({:.1}, {:.1}) distance={:.2}m{}",
                        snap.clock,
                        p.elapsed,
                        p.position.x,
                        p.position.y,
                        self.projectile.model().horizontal_distance().unwrap_or(0.0),
                        if p.landed { " landed" } else { "" }
                    ),
                    None => format!(
                        "projectile [{}] ready at {}° {} m/s",
                        snap.clock, snap.params.angle, snap.params.speed
                    ),
                }
            }
            DemoKind::Tangent => {
                let snap = self.tangent.snapshot();
                let p = snap.state.point;
                format!(
                    "tangent [{}] {} at x={:.1}: f={:.3} f'={:.3}",
                    snap.clock, snap.state.display_name, p.x, p.value, p.slope
                )
            }
            DemoKind::Riemann => {
                let snap = self.riemann.snapshot();
                let s = &snap.state;
                let exact = s
                    .total
                    .exact
                    .map_or_else(|| "n/a".to_string(), |e| format!("{:.4}", e));
                format!(
                    "riemann [{}] {} rectangles {}/{} partial={:.4} exact={}",
                    snap.clock,
                    s.display_name,
                    s.consumed,
                    s.total.samples,
                    s.partial.approximation,
                    exact
                )
            }
        }
    }
}

fn build_block(config: &AppConfig) -> Result<BlockSim, LabError> {
    let cfg = &config.block;
    let mut params = BlockParams::default();
    apply_all(
        &mut params,
        &[
            (BlockParam::Mass, cfg.mass),
            (BlockParam::Force, cfg.force),
            (BlockParam::Friction, cfg.friction),
        ],
    )?;
    let length = positive("block.track_length", cfg.track_length)?;
    let start_position = finite("block.start_position", cfg.start_position)?;
    if start_position < 0.0 || start_position > length {
        return Err(LabError::InvalidConfig {
            field: "block.start_position",
            value: start_position,
            expected: "a position between 0 and block.track_length",
        });
    }
    let track = BlockTrack {
        length,
        start_position,
        position_scale: positive("block.position_scale", cfg.position_scale)?,
        gravity: positive("block.gravity", cfg.gravity)?,
        restitution: finite("block.restitution", cfg.restitution)?.clamp(0.0, 1.0),
    };
    let timing = Timing::new(
        positive("block.dt", cfg.dt)?,
        non_negative("block.frame_delay", cfg.frame_delay)?,
    );
    Ok(Simulation::new(
        BlockModel::new(track),
        params,
        ManualScheduler::new(),
        timing,
    ))
}

fn build_projectile(config: &AppConfig) -> Result<ProjectileSim, LabError> {
    let cfg = &config.projectile;
    let mut params = ProjectileParams::default();
    apply_all(
        &mut params,
        &[
            (ProjectileParam::Angle, cfg.angle),
            (ProjectileParam::Speed, cfg.speed),
            (ProjectileParam::Gravity, cfg.gravity),
        ],
    )?;
    let origin = Vec2::new(
        finite("projectile.origin[0]", cfg.origin[0])?,
        finite("projectile.origin[1]", cfg.origin[1])?,
    );
    let stage = Stage {
        origin,
        ground_y: origin.y,
        scale: positive("projectile.scale", cfg.scale)?,
        trail_capacity: cfg.trail_capacity,
    };
    let timing = Timing::new(
        positive("projectile.dt", cfg.dt)?,
        non_negative("projectile.frame_delay", cfg.frame_delay)?,
    );
    Ok(Simulation::new(
        ProjectileModel::new(stage),
        params,
        ManualScheduler::new(),
        timing,
    ))
}

fn build_tangent(config: &AppConfig) -> Result<TangentSim, LabError> {
    let cfg = &config.tangent;
    let mut params = TangentParams {
        function: cfg.function,
        ..TangentParams::default()
    };
    apply_all(&mut params, &[(TangentParam::X, cfg.x)])?;
    let sweep = Sweep::new(
        positive("tangent.sweep_step", cfg.sweep_step)?,
        positive("tangent.sweep_bound", cfg.sweep_bound)?,
    );
    let frame_delay = non_negative("tangent.frame_delay", cfg.frame_delay)?;
    let model = TangentModel::new(&params, sweep)?.with_origin(params.x);
    Ok(Simulation::new(
        model,
        params,
        ManualScheduler::new(),
        Timing::new(frame_delay, frame_delay),
    ))
}

fn build_riemann(config: &AppConfig) -> Result<RiemannSim, LabError> {
    let cfg = &config.riemann;
    let mut params = RiemannParams {
        function: cfg.function,
        ..RiemannParams::default()
    };
    // widen first so the new bounds never cross the defaults
    apply_all(
        &mut params,
        &[
            (RiemannParam::Lower, -20.0),
            (RiemannParam::Upper, 20.0),
            (RiemannParam::Lower, cfg.lower),
            (RiemannParam::Upper, cfg.upper),
            (RiemannParam::Samples, cfg.samples as f64),
        ],
    )?;
    let frame_delay = non_negative("riemann.frame_delay", cfg.frame_delay)?;
    let model = RiemannModel::new(&params)?;
    Ok(Simulation::new(
        model,
        params,
        ManualScheduler::new(),
        Timing::new(frame_delay, frame_delay),
    ))
}

fn finite(field: &'static str, value: f64) -> Result<f64, LabError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LabError::InvalidConfig {
            field,
            value,
            expected: "a finite number",
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, LabError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LabError::InvalidConfig {
            field,
            value,
            expected: "a positive number",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, LabError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LabError::InvalidConfig {
            field,
            value,
            expected: "a non-negative number",
        })
    }
}
