//! Deaths, pickups, the goal and restarting a level.

use anyhow::{ensure, Context, Result};
use flipside::gravity::GravityPhase;
use flipside::prelude::*;
use flipside::{ConfigError, DeathCause, LevelError, SimulationError};
use rstest::rstest;
use test_utils::{assert_event, run_ticks, run_until, LevelBuilder};

fn floor_level() -> LevelBuilder {
    LevelBuilder::new(10, 6).platform(0..10, 5, SurfaceTag::Normal)
}

/// Steps until the simulation stops running and returns the events of the
/// final tick.
fn run_to_end(sim: &mut Simulation, input: InputIntent, limit: u32) -> Vec<SimEvent> {
    for _ in 0..limit {
        let events = sim.step(input);
        if sim.status() != SimulationStatus::Running {
            return events;
        }
    }
    Vec::new()
}

#[test]
fn level_without_spawn_is_rejected() {
    let result = Simulation::new(floor_level().build(), PhysicsConfig::default(), 0);
    assert!(matches!(
        result,
        Err(SimulationError::Level(LevelError::MissingSpawn))
    ));
}

#[rstest]
#[case::friction(PhysicsConfig { friction: 1.5, ..PhysicsConfig::default() })]
#[case::player_size(PhysicsConfig { player_size: IVec2::new(0, 30), ..PhysicsConfig::default() })]
#[case::negative_gravity(PhysicsConfig { gravity: -0.4, ..PhysicsConfig::default() })]
fn unusable_config_is_rejected(#[case] config: PhysicsConfig) {
    let level = floor_level().spawn_on(1, 4).build();
    let result = Simulation::new(level, config, 0);
    assert!(matches!(result, Err(SimulationError::Config(_))));
}

#[test]
fn config_error_names_the_field() {
    let config = PhysicsConfig {
        cut_jump_damping: 1.0,
        ..PhysicsConfig::default()
    };
    let Err(ConfigError::FractionOutOfRange { field, .. }) = config.validate() else {
        panic!("expected a fraction error");
    };
    assert_eq!(field, "cut_jump_damping");
}

#[test]
fn falling_out_of_the_level_kills() -> Result<()> {
    let level = LevelBuilder::new(10, 6).spawn_on(3, 4).build();
    let mut sim = Simulation::new(level, PhysicsConfig::default(), 0)?;

    let last = run_to_end(&mut sim, InputIntent::IDLE, 60);
    ensure!(
        last == vec![SimEvent::PlayerDied {
            cause: DeathCause::OutOfBounds
        }],
        "unexpected final events {last:?}"
    );
    ensure!(sim.player_view().position.y > 240);
    Ok(())
}

#[test]
fn key_unlocks_goal() -> Result<()> {
    let level = floor_level().key(3, 4).goal(6, 4).spawn_on(1, 4).build();
    let mut sim = Simulation::new(level, PhysicsConfig::default(), 0)?;

    let events = run_ticks(&mut sim, InputIntent::holding_right(), 60);
    let key = events
        .iter()
        .position(|event| matches!(event, SimEvent::KeyCollected { .. }));
    let cleared = events
        .iter()
        .position(|event| matches!(event, SimEvent::LevelCleared));
    ensure!(
        matches!((key, cleared), (Some(k), Some(c)) if k < c),
        "events out of order: {events:?}"
    );
    ensure!(sim.status() == SimulationStatus::Cleared);
    ensure!(sim.keys().count() == 0);
    ensure!(sim.player().has_key);
    Ok(())
}

#[test]
fn key_is_collected_by_its_silhouette_not_its_box() -> Result<()> {
    let level = LevelBuilder::new(10, 6)
        .platform(0..3, 4, SurfaceTag::Normal)
        .key(3, 3)
        .spawn_at(IVec2::new(104, 130))
        .build();
    let mut sim = Simulation::new(level, PhysicsConfig::default(), 0)?;

    let events = run_ticks(&mut sim, InputIntent::IDLE, 5);
    let player_box = Aabb::from_origin_size(sim.player_view().position, sim.player_view().size);
    let (_, key_box) = sim.keys().next().context("key missing")?;
    ensure!(player_box.intersects(key_box), "boxes should overlap");
    ensure!(events.is_empty(), "unexpected events {events:?}");
    ensure!(!sim.player().has_key);

    let taken = run_until(&mut sim, InputIntent::holding_right(), 20, |sim| {
        sim.player().has_key
    });
    ensure!(taken.is_some(), "key never collected");
    ensure!(sim.keys().count() == 0);
    Ok(())
}

#[test]
fn goal_stays_shut_without_key() -> Result<()> {
    let level = floor_level().wall(9, 0..5).goal(6, 4).spawn_on(1, 4).build();
    let mut sim = Simulation::new(level, PhysicsConfig::default(), 0)?;

    let events = run_ticks(&mut sim, InputIntent::holding_right(), 90);
    ensure!(!events.contains(&SimEvent::LevelCleared));
    ensure!(sim.status() == SimulationStatus::Running);
    ensure!(sim.player_view().position.x > sim.goals()[0].right());
    Ok(())
}

#[test]
fn walking_into_a_spike_kills() -> Result<()> {
    let level = floor_level()
        .hazard(
            3,
            4,
            HazardDescriptor::Static {
                orientation: Orientation::Up,
            },
        )
        .spawn_on(1, 4)
        .build();
    let mut sim = Simulation::new(level, PhysicsConfig::default(), 0)?;

    let last = run_to_end(&mut sim, InputIntent::holding_right(), 60);
    assert_event(&last, |event| {
        matches!(
            event,
            SimEvent::PlayerDied {
                cause: DeathCause::Spike { .. }
            }
        )
    });
    ensure!(sim.status() == SimulationStatus::PlayerDead);
    Ok(())
}

#[test]
fn dead_simulation_ignores_steps() -> Result<()> {
    let level = LevelBuilder::new(10, 6).spawn_on(3, 4).build();
    let mut sim = Simulation::new(level, PhysicsConfig::default(), 0)?;
    run_to_end(&mut sim, InputIntent::IDLE, 60);

    let ticks = sim.tick_count();
    let position = sim.player_view().position;
    ensure!(sim.step(InputIntent::holding_right()).is_empty());
    ensure!(sim.tick_count() == ticks);
    ensure!(sim.player_view().position == position);
    Ok(())
}

#[test]
fn restart_restores_the_level() -> Result<()> {
    flipside::init_logging(true);
    let level = floor_level()
        .switch(1, 4)
        .hazard(
            3,
            4,
            HazardDescriptor::Static {
                orientation: Orientation::Up,
            },
        )
        .spawn_on(1, 4)
        .build();
    let mut sim = Simulation::new(level, PhysicsConfig::default(), 0)?;

    let first = sim.step(InputIntent::holding_right());
    assert_event(&first, |event| {
        matches!(event, SimEvent::GravityFlipStarted { .. })
    });
    run_to_end(&mut sim, InputIntent::holding_right(), 60);
    ensure!(sim.status() == SimulationStatus::PlayerDead);
    ensure!(sim.switches().count() == 0);
    ensure!(sim.gravity_view().phase == GravityPhase::Transitioning);

    sim.restart();
    ensure!(sim.status() == SimulationStatus::Running);
    ensure!(sim.switches().count() == 1);
    ensure!(sim.hazard_views().len() == 1);
    ensure!(sim.player_view().position == sim.spawn());
    let gravity = sim.gravity_view();
    ensure!(gravity.current == GravityDirection::Down);
    ensure!(gravity.phase == GravityPhase::Stable);

    let again = sim.step(InputIntent::holding_right());
    assert_event(&again, |event| {
        matches!(event, SimEvent::GravityFlipStarted { .. })
    });
    Ok(())
}
