//! labsim - headless runner
//!
//! Usage: `labsim [all|block|projectile|tangent|riemann] [demo.parameter=value ...]`
//!
//! Starts the selected demonstrations, runs `runner.frames` frames and logs
//! their state along the way.

use std::time::Duration;

use labsim::config::AppConfig;
use labsim::lab::{DemoKind, Lab};
use labsim::systems::SimulationSystem;

fn main() {
    let loaded = AppConfig::load();
    let level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mut args = std::env::args().skip(1).peekable();
    let selection = match args.next_if(|arg| !arg.contains('=')) {
        Some(arg) => arg,
        None => config.runner.demo.clone(),
    };
    let demos = match DemoKind::parse_selection(&selection) {
        Ok(demos) => demos,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    let mut lab = match Lab::new(&config) {
        Ok(lab) => lab,
        Err(e) => {
            log::error!("Failed to build demonstrations: {}", e);
            std::process::exit(1);
        }
    };
    for spec in args {
        if let Err(e) = lab.apply_override(&spec) {
            log::warn!("Ignoring '{}': {}", spec, e);
        }
    }

    log::info!("Starting labsim with {}", selection);
    for &kind in &demos {
        lab.start(kind);
    }

    let runner = &config.runner;
    let mut system = SimulationSystem::new();
    for frame in 1..=runner.frames {
        let result = if runner.realtime {
            std::thread::sleep(Duration::from_secs_f64(runner.frame_dt.max(0.0)));
            system.update(&mut lab)
        } else {
            system.step(&mut lab, runner.frame_dt)
        };
        log::trace!("frame {}: dt={:.4} ticks={}", frame, result.dt, result.ticks);

        if runner.log_every > 0 && frame % runner.log_every == 0 {
            for &kind in &demos {
                log::info!("{}", lab.summary(kind));
            }
        }
    }

    for &kind in &demos {
        log::info!("final {}", lab.summary(kind));
    }
}
