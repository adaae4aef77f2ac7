//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`LABSIM_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use labsim_math::FunctionKind;
use labsim_physics::{
    DEFAULT_BLOCK_DT, DEFAULT_PROJECTILE_DT, DEFAULT_TRAIL_CAPACITY, STANDARD_GRAVITY,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub block: BlockConfig,
    #[serde(default)]
    pub projectile: ProjectileConfig,
    #[serde(default)]
    pub tangent: TangentConfig,
    #[serde(default)]
    pub riemann: RiemannConfig,
    /// Headless runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`LABSIM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // LABSIM_BLOCK__MASS=3 -> block.mass = 3
        figment = figment.merge(Env::prefixed("LABSIM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Force-and-friction block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Initial mass (kg)
    pub mass: f64,
    /// Initial applied force (N)
    pub force: f64,
    /// Initial friction coefficient
    pub friction: f64,
    /// Simulated seconds per tick
    pub dt: f64,
    /// Wall-clock seconds between frames
    pub frame_delay: f64,
    pub track_length: f64,
    pub start_position: f64,
    /// Visual units moved per unit of velocity per tick
    pub position_scale: f64,
    pub gravity: f64,
    /// Fraction of speed kept after hitting a wall
    pub restitution: f64,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            mass: 5.0,
            force: 10.0,
            friction: 0.1,
            dt: DEFAULT_BLOCK_DT,
            frame_delay: 0.016,
            track_length: 350.0,
            start_position: 50.0,
            position_scale: 2.0,
            gravity: STANDARD_GRAVITY,
            restitution: 0.8,
        }
    }
}

/// Projectile launcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Initial launch angle (degrees)
    pub angle: f64,
    /// Initial launch speed (m/s)
    pub speed: f64,
    /// Initial gravity (m/s²)
    pub gravity: f64,
    pub dt: f64,
    pub frame_delay: f64,
    /// Launch point in visual coordinates, also the ground line
    pub origin: [f64; 2],
    /// Visual units per metre
    pub scale: f64,
    pub trail_capacity: usize,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            angle: 45.0,
            speed: 20.0,
            gravity: STANDARD_GRAVITY,
            dt: DEFAULT_PROJECTILE_DT,
            frame_delay: DEFAULT_PROJECTILE_DT,
            origin: [50.0, 350.0],
            scale: 10.0,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
        }
    }
}

/// Derivative explorer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TangentConfig {
    pub function: FunctionKind,
    /// Initial probe point, also where a reset returns it
    pub x: f64,
    /// Distance the probe moves per tick while sweeping
    pub sweep_step: f64,
    /// The sweep wraps from `sweep_bound` back to `-sweep_bound`
    pub sweep_bound: f64,
    pub frame_delay: f64,
}

impl Default for TangentConfig {
    fn default() -> Self {
        Self {
            function: FunctionKind::Quadratic,
            x: 0.0,
            sweep_step: 2.0,
            sweep_bound: 50.0,
            frame_delay: 0.05,
        }
    }
}

/// Riemann-sum integrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiemannConfig {
    pub function: FunctionKind,
    pub lower: f64,
    pub upper: f64,
    pub samples: usize,
    /// Wall-clock seconds between added rectangles
    pub frame_delay: f64,
}

impl Default for RiemannConfig {
    fn default() -> Self {
        Self {
            function: FunctionKind::Quadratic,
            lower: -10.0,
            upper: 10.0,
            samples: 20,
            frame_delay: 0.2,
        }
    }
}

/// Headless runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// `all` or one of `block`, `projectile`, `tangent`, `riemann`
    pub demo: String,
    /// Frames to run before exiting
    pub frames: u32,
    /// Seconds per frame
    pub frame_dt: f64,
    /// Pace frames against the wall clock instead of stepping immediately
    pub realtime: bool,
    /// Log a summary every this many frames (0 disables)
    pub log_every: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            demo: "all".to_string(),
            frames: 600,
            frame_dt: 1.0 / 60.0,
            realtime: false,
            log_every: 60,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
#[error("configuration error: {0}")]
pub struct ConfigError(#[from] figment::Error);
