//! Gravity switches and the flip transition.

use anyhow::{ensure, Context, Result};
use approx::assert_relative_eq;
use flipside::gravity::GravityPhase;
use flipside::prelude::*;
use rstest::{fixture, rstest};
use test_utils::{assert_event, run_ticks, run_until, LevelBuilder};

/// A closed box with a switch in the tile the player spawns on.
#[fixture]
fn switch_room() -> LevelDescriptor {
    LevelBuilder::new(10, 6)
        .platform(0..10, 0, SurfaceTag::Normal)
        .platform(0..10, 5, SurfaceTag::Normal)
        .switch(3, 4)
        .spawn_on(3, 4)
        .build()
}

#[rstest]
fn switch_flips_gravity_after_transition(switch_room: LevelDescriptor) -> Result<()> {
    let mut sim = Simulation::new(switch_room, PhysicsConfig::default(), 1)?;

    let first = sim.step(InputIntent::IDLE);
    assert_event(&first, |event| {
        matches!(
            event,
            SimEvent::GravityFlipStarted {
                target: GravityDirection::Up,
                ..
            }
        )
    });
    ensure!(sim.switches().count() == 0, "switch should be consumed");
    ensure!(sim.gravity_view().phase == GravityPhase::Transitioning);

    for tick in 2..=30 {
        let events = sim.step(InputIntent::IDLE);
        ensure!(events.is_empty(), "tick {tick} emitted {events:?}");
        ensure!(sim.gravity().current() == GravityDirection::Down);
    }
    let view = sim.gravity_view();
    ensure!(view.rotation_degrees > 0.0 && view.rotation_degrees < 180.0);

    let commit = sim.step(InputIntent::IDLE);
    ensure!(
        commit
            == vec![SimEvent::GravityCommitted {
                direction: GravityDirection::Up
            }],
        "unexpected commit events {commit:?}"
    );

    sim.step(InputIntent::IDLE);
    assert_relative_eq!(sim.player().body.velocity.y, -0.4);

    let landed = run_until(&mut sim, InputIntent::IDLE, 120, |sim| {
        sim.player().body.grounded
    })
    .context("player never reached the ceiling")?;
    ensure!(landed > 0);
    ensure!(sim.player_view().position.y == 40);
    assert_relative_eq!(sim.gravity_view().rotation_degrees, 180.0);
    Ok(())
}

#[test]
fn second_switch_is_ignored_mid_transition() -> Result<()> {
    let level = LevelBuilder::new(10, 6)
        .platform(0..10, 0, SurfaceTag::Normal)
        .platform(0..10, 5, SurfaceTag::Normal)
        .switch(3, 4)
        .switch(4, 4)
        .spawn_at(IVec2::new(145, 170))
        .build();
    let mut sim = Simulation::new(level, PhysicsConfig::default(), 1)?;

    let first = sim.step(InputIntent::IDLE);
    let started = first
        .iter()
        .filter(|event| matches!(event, SimEvent::GravityFlipStarted { .. }))
        .count();
    ensure!(started == 1, "expected one flip, got {first:?}");
    ensure!(sim.switches().count() == 1);

    let rest = run_ticks(&mut sim, InputIntent::IDLE, 29);
    ensure!(
        !rest
            .iter()
            .any(|event| matches!(event, SimEvent::GravityFlipStarted { .. })),
        "flip restarted mid-transition: {rest:?}"
    );
    ensure!(sim.switches().count() == 1, "second switch was consumed");
    Ok(())
}

#[rstest]
fn frozen_world_holds_still_during_transition(switch_room: LevelDescriptor) -> Result<()> {
    let config = PhysicsConfig {
        freeze_world_during_transition: true,
        ..PhysicsConfig::default()
    };
    let mut sim = Simulation::new(switch_room, config, 1)?;

    sim.step(InputIntent::IDLE);
    let before = sim.player().clone();
    run_ticks(&mut sim, InputIntent::holding_right(), 29);
    ensure!(sim.player() == &before, "player moved while frozen");

    let commit = sim.step(InputIntent::holding_right());
    assert_event(&commit, |event| {
        matches!(event, SimEvent::GravityCommitted { .. })
    });
    ensure!(sim.player().body.box_position == before.body.box_position);
    ensure!(!sim.player().body.grounded, "grounding should follow the new gravity");

    sim.step(InputIntent::holding_right());
    ensure!(sim.player().body.box_position != before.body.box_position);
    Ok(())
}

#[rstest]
fn instant_transition_commits_on_the_same_tick(switch_room: LevelDescriptor) -> Result<()> {
    let config = PhysicsConfig {
        gravity_transition_ticks: 0,
        ..PhysicsConfig::default()
    };
    let mut sim = Simulation::new(switch_room, config, 1)?;

    let events = sim.step(InputIntent::IDLE);
    ensure!(events.len() == 2, "expected flip and commit, got {events:?}");
    ensure!(matches!(events[0], SimEvent::GravityFlipStarted { .. }));
    ensure!(
        events[1]
            == SimEvent::GravityCommitted {
                direction: GravityDirection::Up
            }
    );
    ensure!(sim.gravity().current() == GravityDirection::Up);
    Ok(())
}
