//! Clock lifecycle behaviour shared by all demonstrations

use labsim_core::{
    BlockModel, BlockParam, BlockParams, ClockState, ManualScheduler, Overlays, ParameterError,
    ProjectileModel, ProjectileParam, ProjectileParams, RiemannModel, RiemannParam, RiemannParams,
    Simulation, TangentModel, TangentParam, TangentParams, TickOutcome, Timing,
};
use labsim_math::{FunctionKind, Sweep};

fn block() -> Simulation<BlockModel, ManualScheduler> {
    Simulation::new(
        BlockModel::default(),
        BlockParams::default(),
        ManualScheduler::new(),
        Timing::realtime(0.1),
    )
}

fn projectile() -> Simulation<ProjectileModel, ManualScheduler> {
    Simulation::new(
        ProjectileModel::default(),
        ProjectileParams::default(),
        ManualScheduler::new(),
        Timing::realtime(0.016),
    )
}

fn tangent() -> Simulation<TangentModel, ManualScheduler> {
    let params = TangentParams::default();
    let model = TangentModel::new(&params, Sweep::default()).unwrap();
    Simulation::new(model, params, ManualScheduler::new(), Timing::new(0.05, 0.05))
}

fn riemann() -> Simulation<RiemannModel, ManualScheduler> {
    let params = RiemannParams::default();
    let model = RiemannModel::new(&params).unwrap();
    Simulation::new(model, params, ManualScheduler::new(), Timing::new(0.2, 0.2))
}

#[test]
fn test_frames_drive_ticks_while_running() {
    let mut sim = block();
    assert!(sim.start());
    assert_eq!(sim.advance(0.1), 1);
    assert_eq!(sim.advance(0.1), 1);
    assert_eq!(sim.clock().ticks(), 2);
    assert!(sim.state().position > 50.0 || sim.state().velocity > 0.0);
}

#[test]
fn test_double_start_is_noop() {
    let mut sim = block();
    assert!(sim.start());
    let frame = sim.clock().pending();
    assert!(!sim.start());
    assert_eq!(sim.clock().pending(), frame);
    assert_eq!(sim.scheduler().pending_count(), 1);
}

#[test]
fn test_pause_stops_ticks() {
    let mut sim = block();
    sim.start();
    sim.advance(0.1);
    assert!(sim.pause());
    let state = *sim.state();
    assert_eq!(sim.advance(1.0), 0);
    assert_eq!(*sim.state(), state);
    assert_eq!(sim.clock_state(), ClockState::Paused);
    assert!(!sim.pause());
}

#[test]
fn test_stale_frame_after_pause_and_reset_is_ignored() {
    let fresh = *block().state();
    let mut sim = block();
    sim.start();
    for _ in 0..5 {
        sim.advance(0.1);
    }
    assert_ne!(*sim.state(), fresh);
    let stale = sim.clock().pending().unwrap();

    sim.pause();
    sim.reset();
    assert!(!sim.fire(stale));

    assert_eq!(*sim.state(), fresh);
    assert_eq!(sim.clock_state(), ClockState::Idle);
    assert_eq!(sim.clock().ticks(), 0);
    assert_eq!(sim.advance(1.0), 0);
}

#[test]
fn test_stale_frame_after_reset_while_running_is_ignored() {
    let fresh = *block().state();
    let mut sim = block();
    sim.start();
    for _ in 0..5 {
        sim.advance(0.1);
    }
    let stale = sim.clock().pending().unwrap();

    sim.reset();
    assert!(!sim.fire(stale));

    assert_eq!(*sim.state(), fresh);
    assert_eq!(sim.clock().ticks(), 0);
    assert_eq!(sim.scheduler().pending_count(), 0);
    assert_eq!(sim.advance(1.0), 0);
    assert_eq!(*sim.state(), fresh);
}

#[test]
fn test_stale_frame_after_projectile_reset_is_ignored() {
    let mut sim = projectile();
    sim.start();
    for _ in 0..10 {
        sim.advance(0.016);
    }
    let trail = sim.state().projectile.as_ref().map(|p| p.trail.len());
    assert_eq!(trail, Some(10));
    let stale = sim.clock().pending().unwrap();

    sim.reset();
    assert!(!sim.fire(stale));

    assert!(sim.state().projectile.is_none());
    assert_eq!(sim.clock().ticks(), 0);
    assert_eq!(sim.advance(1.0), 0);
    assert!(sim.state().projectile.is_none());
}

#[test]
fn test_stale_frame_after_riemann_reset_is_ignored() {
    for pause_first in [false, true] {
        let mut sim = riemann();
        sim.start();
        for _ in 0..5 {
            sim.advance(0.2);
        }
        assert_eq!(sim.state().consumed, 5);
        let stale = sim.clock().pending().unwrap();

        if pause_first {
            sim.pause();
        }
        sim.reset();
        assert!(!sim.fire(stale));

        assert_eq!(sim.state().consumed, 0);
        assert!(!sim.state().animating);
        assert_eq!(sim.state().rectangles.len(), 20);
        assert_eq!(sim.state().partial.approximation, 0.0);
        assert_eq!(sim.advance(1.0), 0);
    }
}

#[test]
fn test_stale_frame_after_resume_is_ignored() {
    let mut sim = block();
    sim.start();
    let stale = sim.clock().pending().unwrap();
    sim.pause();
    sim.start();
    assert!(!sim.fire(stale));
    assert_eq!(sim.clock().ticks(), 0);
    assert_eq!(sim.scheduler().pending_count(), 1);
}

#[test]
fn test_reset_is_idempotent() {
    let mut sim = block();
    sim.start();
    for _ in 0..5 {
        sim.advance(0.1);
    }
    sim.reset();
    let once = sim.snapshot();
    sim.reset();
    assert_eq!(sim.snapshot(), once);
    assert_eq!(once.clock, ClockState::Idle);
    assert_eq!(sim.scheduler().pending_count(), 0);
}

#[test]
fn test_direct_tick_does_not_need_scheduler() {
    let mut sim = block();
    for _ in 0..3 {
        sim.tick(0.1);
    }
    assert_eq!(sim.clock().ticks(), 3);
    assert_eq!(sim.clock_state(), ClockState::Idle);
    assert_eq!(sim.scheduler().pending_count(), 0);
}

#[test]
fn test_block_params_change_while_running() {
    let mut sim = block();
    sim.start();
    assert_eq!(sim.set_parameter(BlockParam::Mass, 20.0), Ok(15.0));
    assert_eq!(sim.set_parameter_named("force", 25.0), Ok(25.0));
    assert_eq!(sim.params().force, 25.0);
    assert_eq!(
        sim.set_parameter_named("colour", 1.0),
        Err(ParameterError::Unknown("colour".to_string()))
    );
}

#[test]
fn test_rejected_value_leaves_params_untouched() {
    let mut sim = block();
    let before = *sim.params();
    assert!(sim.set_parameter(BlockParam::Friction, f64::NAN).is_err());
    assert_eq!(*sim.params(), before);
}

#[test]
fn test_projectile_lands_and_returns_to_idle() {
    let mut sim = projectile();
    sim.start();
    let mut frames = 0;
    while sim.is_running() {
        sim.advance(0.016);
        frames += 1;
        assert!(frames < 1000, "projectile never landed");
    }
    assert_eq!(sim.clock_state(), ClockState::Idle);
    let projectile = sim.state().projectile.as_ref().unwrap();
    assert!(projectile.landed);
    assert_eq!(sim.scheduler().pending_count(), 0);
}

#[test]
fn test_projectile_relaunch_while_running_is_noop() {
    let mut sim = projectile();
    sim.start();
    sim.advance(0.016);
    sim.advance(0.016);
    let state = sim.state().clone();
    assert!(!sim.start());
    assert_eq!(*sim.state(), state);
}

#[test]
fn test_projectile_params_locked_in_flight() {
    let mut sim = projectile();
    sim.start();
    assert_eq!(
        sim.set_parameter(ProjectileParam::Angle, 30.0),
        Err(ParameterError::Locked {
            name: "angle",
            state: ClockState::Running
        })
    );
    sim.pause();
    assert!(sim.set_parameter(ProjectileParam::Gravity, 5.0).is_err());
    sim.reset();
    assert_eq!(sim.set_parameter(ProjectileParam::Angle, 30.0), Ok(30.0));
}

#[test]
fn test_projectile_reset_clears_flight() {
    let mut sim = projectile();
    sim.start();
    sim.advance(0.016);
    sim.reset();
    assert!(sim.state().projectile.is_none());
    assert_eq!(sim.state().solution.range, 0.0);
}

#[test]
fn test_tangent_sweep_wraps() {
    let mut sim = tangent();
    sim.set_parameter(TangentParam::X, 40.0).unwrap();
    sim.start();
    for _ in 0..5 {
        sim.advance(0.05);
    }
    assert_eq!(sim.state().point.x, 50.0);
    sim.advance(0.05);
    assert_eq!(sim.state().point.x, -50.0);
}

#[test]
fn test_tangent_x_locked_only_while_running() {
    let mut sim = tangent();
    sim.start();
    assert!(matches!(
        sim.set_parameter(TangentParam::X, 10.0),
        Err(ParameterError::Locked { .. })
    ));
    sim.pause();
    assert_eq!(sim.set_parameter(TangentParam::X, 10.0), Ok(10.0));
    assert_eq!(sim.state().point.x, 10.0);
}

#[test]
fn test_tangent_function_switch_keeps_point() {
    let mut sim = tangent();
    sim.set_parameter(TangentParam::X, 10.0).unwrap();
    sim.start();
    sim.select_function(FunctionKind::Sine).unwrap();
    assert_eq!(sim.state().function, FunctionKind::Sine);
    assert_eq!(sim.state().point.x, 10.0);
    assert_eq!(sim.params().function, FunctionKind::Sine);

    assert!(sim.select_function(FunctionKind::Linear).is_err());
    assert_eq!(sim.params().function, FunctionKind::Sine);
}

#[test]
fn test_tangent_slider_tracks_sweep() {
    let mut sim = tangent();
    sim.start();
    for _ in 0..3 {
        assert_eq!(sim.advance(0.05), 1);
    }
    assert_eq!(sim.state().point.x, 6.0);
    assert_eq!(sim.params().x, 6.0);

    // paused, the slider picks up where the sweep left off
    sim.pause();
    assert_eq!(sim.set_parameter(TangentParam::X, sim.params().x), Ok(6.0));
    assert_eq!(sim.state().point.x, 6.0);
}

#[test]
fn test_tangent_slider_clamped_beyond_range() {
    let mut sim = tangent();
    sim.set_parameter(TangentParam::X, 40.0).unwrap();
    sim.start();
    for _ in 0..5 {
        sim.advance(0.05);
    }
    assert_eq!(sim.state().point.x, 50.0);
    assert_eq!(sim.params().x, 40.0);

    sim.advance(0.05);
    assert_eq!(sim.state().point.x, -50.0);
    assert_eq!(sim.params().x, -40.0);
}

#[test]
fn test_tangent_reset_returns_to_origin() {
    let mut sim = tangent();
    sim.set_parameter(TangentParam::X, -30.0).unwrap();
    sim.start();
    sim.advance(0.05);
    sim.reset();
    assert_eq!(sim.state().point.x, 0.0);
    assert_eq!(sim.params().x, 0.0);
}

#[test]
fn test_riemann_completes_and_goes_idle() {
    let mut sim = riemann();
    sim.start();
    let mut ticks = 0;
    while sim.is_running() {
        ticks += sim.advance(0.2);
        assert!(ticks <= 20);
    }
    assert_eq!(ticks, 20);
    assert_eq!(sim.clock_state(), ClockState::Idle);
    assert_eq!(sim.state().consumed, 20);
    assert_eq!(sim.state().rectangles.len(), 20);
    assert!(sim.state().total.error.unwrap() < 0.1);
}

#[test]
fn test_riemann_restart_rewinds() {
    let mut sim = riemann();
    sim.start();
    while sim.is_running() {
        sim.advance(0.2);
    }
    sim.start();
    assert_eq!(sim.state().consumed, 0);
    assert!(sim.state().animating);
    assert_eq!(sim.advance(0.2), 1);
    assert_eq!(sim.state().consumed, 1);
}

#[test]
fn test_riemann_locked_while_animating() {
    let mut sim = riemann();
    sim.start();
    assert!(sim.set_parameter(RiemannParam::Samples, 50.0).is_err());
    assert!(matches!(
        sim.select_function(FunctionKind::Sine),
        Err(ParameterError::Locked { name: "function", .. })
    ));
    sim.pause();
    assert!(sim.set_parameter(RiemannParam::Lower, -5.0).is_err());
    sim.reset();
    assert_eq!(sim.set_parameter(RiemannParam::Samples, 50.0), Ok(50.0));
    sim.select_function(FunctionKind::Sine).unwrap();
    assert_eq!(sim.state().function, FunctionKind::Sine);
    assert_eq!(sim.state().rectangles.len(), 50);
}

#[test]
fn test_riemann_reset_mid_run() {
    let mut sim = riemann();
    sim.start();
    sim.advance(0.2);
    sim.advance(0.2);
    sim.reset();
    assert_eq!(sim.state().consumed, 0);
    assert!(!sim.state().animating);
    assert_eq!(sim.state().rectangles.len(), 20);
    assert_eq!(sim.tick(0.2), TickOutcome::Continue);
}

#[test]
fn test_overlays_travel_with_snapshot() {
    let mut sim = tangent();
    assert!(sim.snapshot().overlays.contains(Overlays::TANGENT));
    sim.set_overlay(Overlays::DERIVATIVE, false);
    sim.start();
    sim.advance(0.05);
    let snapshot = sim.snapshot();
    assert!(!snapshot.overlays.contains(Overlays::DERIVATIVE));
    assert_eq!(snapshot.ticks, 1);
    assert_eq!(snapshot.clock, ClockState::Running);
}
