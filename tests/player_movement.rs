//! Player controller behaviour driven through whole simulation ticks.
use approx::assert_relative_eq;
use flipside::prelude::*;
use flipside::WallContact;
use rstest::rstest;
use test_utils::{run_ticks, run_until, LevelBuilder};

fn simulation(level: LevelDescriptor) -> Simulation {
    Simulation::new(level, PhysicsConfig::default(), 7).expect("level should be valid")
}

fn booster_runway() -> LevelDescriptor {
    LevelBuilder::new(60, 6)
        .platform(0..60, 5, SurfaceTag::Booster)
        .spawn_on(1, 4)
        .build()
}

#[test]
fn booster_doubles_run_speed_then_friction_stops_the_player() {
    let mut sim = simulation(booster_runway());

    let ramp = run_until(&mut sim, InputIntent::holding_right(), 12, |sim| {
        sim.player().body.velocity.x >= 12.0
    });
    assert_eq!(ramp, Some(10));
    assert_relative_eq!(sim.player().speed_multiplier, 2.0);

    let stop = run_until(&mut sim, InputIntent::IDLE, 60, |sim| {
        sim.player().body.velocity.x < f64::EPSILON
    });
    assert_eq!(stop, Some(46));
    assert!(sim.player().body.grounded);
}

#[test]
fn jump_on_landing_tick_uses_booster() {
    let level = LevelBuilder::new(10, 6)
        .platform(0..10, 5, SurfaceTag::Booster)
        .spawn_at(IVec2::new(125, 60))
        .build();
    let mut sim = simulation(level);

    let landed = run_until(&mut sim, InputIntent::IDLE, 60, |sim| {
        sim.player().body.grounded
    });
    assert!(landed.is_some(), "player never landed");

    sim.step(InputIntent::IDLE.with_jump_pressed());
    assert_relative_eq!(sim.player().body.velocity.y, -20.0);
}

#[test]
fn normal_floor_caps_run_speed() {
    let level = LevelBuilder::new(60, 6)
        .platform(0..60, 5, SurfaceTag::Normal)
        .spawn_on(1, 4)
        .build();
    let mut sim = simulation(level);
    run_ticks(&mut sim, InputIntent::holding_right(), 30);
    assert_relative_eq!(sim.player().body.velocity.x, 6.0);
    assert_relative_eq!(sim.player().speed_multiplier, 1.0);
}

#[test]
fn wall_slide_then_wall_jump_pushes_away() {
    let level = LevelBuilder::new(10, 6)
        .wall(5, 0..5)
        .platform(0..10, 5, SurfaceTag::Normal)
        .spawn_at(IVec2::new(170, 40))
        .build();
    let mut sim = simulation(level);

    run_ticks(&mut sim, InputIntent::holding_right(), 10);
    let body = &sim.player().body;
    assert_eq!(body.wall_contact, WallContact::Right);
    assert_eq!(body.box_position.x, 170);
    assert_relative_eq!(body.velocity.y, 1.0);

    sim.step(InputIntent::holding_right().with_jump_pressed());
    let player = sim.player();
    assert_relative_eq!(player.body.velocity.x, -6.0);
    assert_relative_eq!(player.body.velocity.y, -14.6, epsilon = 1e-9);
    assert_eq!(player.body.wall_contact, WallContact::None);
    assert_eq!(player.wall_jump_cooldown, 9);
}

#[rstest]
#[case::released_while_rising(InputIntent::IDLE.with_jump_released(), -3.6)]
#[case::held(InputIntent::IDLE, -9.6)]
fn releasing_jump_cuts_ascent(#[case] third_tick: InputIntent, #[case] expected_vy: f64) {
    let level = LevelBuilder::new(10, 6)
        .platform(0..10, 5, SurfaceTag::Normal)
        .spawn_on(3, 4)
        .build();
    let mut sim = simulation(level);

    sim.step(InputIntent::IDLE);
    sim.step(InputIntent::IDLE.with_jump_pressed());
    assert_relative_eq!(sim.player().body.velocity.y, -10.0);
    sim.step(third_tick);
    assert_relative_eq!(sim.player().body.velocity.y, expected_vy, epsilon = 1e-9);
}

#[test]
fn restart_is_idempotent() {
    let mut sim = simulation(booster_runway());

    run_ticks(&mut sim, InputIntent::holding_right(), 25);
    sim.restart();
    let first = sim.player().clone();

    run_ticks(&mut sim, InputIntent::IDLE.with_jump_pressed(), 3);
    run_ticks(&mut sim, InputIntent::holding_left(), 7);
    sim.restart();

    assert_eq!(sim.player(), &first);
    assert_eq!(sim.player_view().position, sim.spawn());
    assert!(!first.has_key);
}
