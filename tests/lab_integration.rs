//! Driving the demonstrations through the lab and frame system

use labsim::config::AppConfig;
use labsim::lab::{DemoKind, Lab};
use labsim::systems::SimulationSystem;
use labsim_core::ClockState;
use labsim_physics::DEFAULT_PROJECTILE_DT;

const FRAME: f64 = 1.0 / 60.0;

fn lab() -> Lab {
    Lab::new(&AppConfig::default()).unwrap()
}

#[test]
fn test_block_moves_under_applied_force() {
    let mut lab = lab();
    let mut system = SimulationSystem::new();
    lab.start(DemoKind::Block);
    for _ in 0..30 {
        system.step(&mut lab, FRAME);
    }
    let state = lab.block.state();
    assert!(state.velocity > 0.0);
    assert!(state.position > 50.0);
    assert!(state.position <= 350.0);
}

#[test]
fn test_projectile_lands_near_range() {
    let mut lab = lab();
    let mut system = SimulationSystem::new();
    lab.start(DemoKind::Projectile);
    let mut frames = 0;
    while lab.clock_state(DemoKind::Projectile) == ClockState::Running {
        system.step(&mut lab, FRAME);
        frames += 1;
        assert!(frames < 2000);
    }
    let range = lab.projectile.state().solution.range;
    let distance = lab.projectile.model().horizontal_distance().unwrap();
    let tick_delta = lab.projectile.params().launch().initial_velocity().x * DEFAULT_PROJECTILE_DT;
    assert!(
        (distance - range).abs() <= tick_delta,
        "landed at {} m, closed form {} m",
        distance,
        range
    );
}

#[test]
fn test_riemann_runs_to_completion() {
    let mut lab = lab();
    let mut system = SimulationSystem::new();
    lab.start(DemoKind::Riemann);
    for _ in 0..40 {
        system.step(&mut lab, 0.2);
    }
    assert_eq!(lab.clock_state(DemoKind::Riemann), ClockState::Idle);
    assert_eq!(lab.riemann.state().consumed, 20);
}

#[test]
fn test_pause_and_reset_through_lab() {
    let mut lab = lab();
    let mut system = SimulationSystem::new();
    lab.start(DemoKind::Tangent);
    system.step(&mut lab, 0.05);
    assert!(lab.pause(DemoKind::Tangent));
    let x = lab.tangent.state().point.x;
    system.step(&mut lab, 0.25);
    assert_eq!(lab.tangent.state().point.x, x);

    lab.reset(DemoKind::Tangent);
    assert_eq!(lab.tangent.state().point.x, 0.0);
    assert_eq!(lab.clock_state(DemoKind::Tangent), ClockState::Idle);
}

#[test]
fn test_override_refused_while_running() {
    let mut lab = lab();
    lab.start(DemoKind::Projectile);
    assert!(lab.apply_override("projectile.angle=30").is_err());
    assert_eq!(lab.projectile.params().angle, 45.0);
    assert!(lab.apply_override("block.force=20").is_ok());
}

#[test]
fn test_summaries_mention_state() {
    let lab = lab();
    for kind in DemoKind::ALL {
        let summary = lab.summary(kind);
        assert!(summary.starts_with(kind.name()), "{}", summary);
        assert!(summary.contains("[idle]"), "{}", summary);
    }
}
