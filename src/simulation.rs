//! Fixed-tick orchestration of one level instance.
//!
//! [`Simulation::step`] runs the phases of a tick in a fixed order:
//!
//! 1. advance a running gravity transition,
//! 2. move the player,
//! 3. wake falling spikes against the player's new position,
//! 4. move hazards and projectiles,
//! 5. resolve deaths, pickups, the goal and gravity switches,
//! 6. commit the gravity transition if it has run its course.
//!
//! Nothing in a tick can fail; outcomes are reported as [`SimEvent`]s.

use glam::IVec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::arena::Arena;
use crate::body::{KinematicBody, WallContact};
use crate::config::PhysicsConfig;
use crate::error::SimulationError;
use crate::geometry::{Aabb, Orientation, PixelMask};
use crate::gravity::{GravityDirection, GravityPhase, GravityState};
use crate::hazards::{HazardId, HazardSet};
use crate::input::InputIntent;
use crate::level::{
    goal_aabb, key_aabb, key_mask, switch_aabb, LevelDescriptor, PickupId, SwitchId,
};
use crate::player::Player;
use crate::resolver::update_grounding;
use crate::world::CollisionWorld;

/// Why the player died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// The player's box left the level rectangle.
    OutOfBounds,
    /// Hit by a launcher's projectile.
    Projectile,
    /// Touched a spike.
    Spike {
        /// The spike that killed.
        hazard: HazardId,
    },
}

/// Discrete outcome emitted by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// The player died; the simulation stops.
    PlayerDied {
        /// What killed the player.
        cause: DeathCause,
    },
    /// A key was picked up.
    KeyCollected {
        /// The key that was taken.
        pickup: PickupId,
    },
    /// The player reached a goal holding a key.
    LevelCleared,
    /// A switch was touched and a flip began.
    GravityFlipStarted {
        /// The consumed switch.
        switch: SwitchId,
        /// Direction gravity is flipping to.
        target: GravityDirection,
    },
    /// A flip finished and physics now uses `direction`.
    GravityCommitted {
        /// The new gravity direction.
        direction: GravityDirection,
    },
}

/// Whether a level is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationStatus {
    /// Ticks advance the world.
    #[default]
    Running,
    /// The player died; ticks are ignored until a restart.
    PlayerDead,
    /// The goal was reached; ticks are ignored until a restart.
    Cleared,
}

/// Render-facing snapshot of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyView {
    /// Top-left corner of the box.
    pub position: IVec2,
    /// Box size.
    pub size: IVec2,
    /// Resting along gravity.
    pub grounded: bool,
    /// Wall side, for slide animations.
    pub wall_contact: WallContact,
}

impl From<&KinematicBody> for BodyView {
    fn from(body: &KinematicBody) -> Self {
        Self {
            position: body.box_position,
            size: body.size,
            grounded: body.grounded,
            wall_contact: body.wall_contact,
        }
    }
}

/// Render-facing snapshot of a spike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardView {
    /// Spike id.
    pub id: HazardId,
    /// Tip direction.
    pub orientation: Orientation,
    /// `false` for an untriggered falling spike.
    pub active: bool,
    /// Spike box.
    pub body: BodyView,
}

/// Gravity state as the presentation layer needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityView {
    /// Direction physics uses.
    pub current: GravityDirection,
    /// Direction a running flip ends at.
    pub target: GravityDirection,
    /// Stable or transitioning.
    pub phase: GravityPhase,
    /// Flip progress in `[0, 1]`.
    pub progress: f64,
    /// Eased screen rotation in degrees.
    pub rotation_degrees: f64,
}

/// One running level: player, hazards, pickups and gravity.
#[derive(Debug)]
pub struct Simulation {
    config: PhysicsConfig,
    level: LevelDescriptor,
    spawn: IVec2,
    rng: StdRng,
    world: CollisionWorld,
    player: Player,
    player_mask: PixelMask,
    gravity: GravityState,
    hazards: HazardSet,
    switches: Arena<SwitchId, Aabb>,
    keys: Arena<PickupId, Aabb>,
    key_mask: PixelMask,
    goals: Vec<Aabb>,
    status: SimulationStatus,
    ticks: u64,
}

impl Simulation {
    /// Validates `config` and `level` and instantiates the level. Launcher
    /// timing is drawn from a generator seeded with `seed`.
    ///
    /// # Errors
    /// [`SimulationError::Config`] for unusable tuning values and
    /// [`SimulationError::Level`] for a structurally invalid level, most
    /// notably one without a spawn point.
    ///
    /// # Examples
    /// ```
    /// use flipside::{LevelDescriptor, PhysicsConfig, Simulation, SimulationError};
    ///
    /// let level = LevelDescriptor { width: 400, height: 400, ..LevelDescriptor::default() };
    /// let result = Simulation::new(level, PhysicsConfig::default(), 0);
    /// assert!(matches!(result, Err(SimulationError::Level(_))));
    /// ```
    pub fn new(
        level: LevelDescriptor,
        config: PhysicsConfig,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let spawn = level.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let world = build_world(&level, &config);
        let hazards = HazardSet::build(&level.hazards, &config, &mut rng);
        let mut simulation = Self {
            player: Player::new(spawn, config.player_size),
            player_mask: PixelMask::filled(config.player_size),
            gravity: GravityState::new(GravityDirection::Down, config.gravity_transition_ticks),
            switches: Arena::new(),
            keys: Arena::new(),
            key_mask: key_mask(),
            goals: Vec::new(),
            status: SimulationStatus::Running,
            ticks: 0,
            config,
            level,
            spawn,
            rng,
            world,
            hazards,
        };
        simulation.place_items();
        debug!(
            "level ready: {} colliders, {} hazards, {} switches, {} keys, {} goals",
            simulation.world.len(),
            simulation.level.hazards.len(),
            simulation.switches.len(),
            simulation.keys.len(),
            simulation.goals.len()
        );
        Ok(simulation)
    }

    /// Rebuilds every per-level entity from the stored descriptor and puts
    /// the player back at the spawn point under downward gravity.
    ///
    /// The random generator is not reseeded, so launcher timing differs from
    /// one attempt to the next.
    pub fn restart(&mut self) {
        self.world = build_world(&self.level, &self.config);
        self.hazards = HazardSet::build(&self.level.hazards, &self.config, &mut self.rng);
        self.place_items();
        self.player.reset(self.spawn);
        self.gravity.reset(GravityDirection::Down);
        self.status = SimulationStatus::Running;
        info!("level restarted");
    }

    /// Advances the level by one tick and returns what happened.
    ///
    /// Does nothing once the player has died or cleared the level.
    pub fn step(&mut self, input: InputIntent) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.status != SimulationStatus::Running {
            return events;
        }
        self.ticks += 1;

        self.gravity.advance();
        let frozen = self.config.freeze_world_during_transition && self.gravity.is_transitioning();
        if !frozen {
            let gravity = self.gravity.current();
            self.player.tick(input, &self.world, gravity, &self.config);
            let player_box = self.player.body.aabb();
            self.hazards.activate_triggered(&player_box, &self.config);
            self.hazards
                .advance(&self.world, gravity, &self.config, &mut self.rng);
            self.resolve_contacts(&mut events);
        }
        if let Some(direction) = self.gravity.commit_if_complete() {
            update_grounding(&mut self.player.body, &self.world, direction);
            self.player.refresh_multipliers(&self.world, &self.config);
            events.push(SimEvent::GravityCommitted { direction });
        }
        events
    }

    fn resolve_contacts(&mut self, events: &mut Vec<SimEvent>) {
        let player_box = self.player.body.aabb();
        if let Some(cause) = self.lethal_contact(&player_box) {
            info!("player died: {cause:?}");
            self.status = SimulationStatus::PlayerDead;
            events.push(SimEvent::PlayerDied { cause });
            return;
        }

        let collected: Vec<PickupId> = self
            .keys
            .iter()
            .filter(|(_, aabb)| {
                self.key_mask
                    .overlaps(aabb.origin, &self.player_mask, player_box.origin)
            })
            .map(|(id, _)| id)
            .collect();
        for pickup in collected {
            self.keys.remove(pickup);
            self.player.has_key = true;
            info!("key collected: {pickup}");
            events.push(SimEvent::KeyCollected { pickup });
        }

        if self.player.has_key && self.goals.iter().any(|goal| goal.intersects(&player_box)) {
            info!("level cleared after {} ticks", self.ticks);
            self.status = SimulationStatus::Cleared;
            events.push(SimEvent::LevelCleared);
            return;
        }

        let touched = self
            .switches
            .iter()
            .find(|(_, aabb)| aabb.intersects(&player_box))
            .map(|(id, _)| id);
        if let Some(switch) = touched {
            if self.gravity.request_flip() {
                self.switches.remove(switch);
                events.push(SimEvent::GravityFlipStarted {
                    switch,
                    target: self.gravity.target(),
                });
            } else {
                debug!("{switch} ignored while gravity is transitioning");
            }
        }
    }

    fn lethal_contact(&mut self, player_box: &Aabb) -> Option<DeathCause> {
        if self.world.bounds().fully_excludes(player_box) {
            return Some(DeathCause::OutOfBounds);
        }
        if self.hazards.take_projectile_hits(player_box) > 0 {
            return Some(DeathCause::Projectile);
        }
        self.hazards
            .spike_touching(player_box, &self.player_mask)
            .map(|hazard| DeathCause::Spike { hazard })
    }

    fn place_items(&mut self) {
        let tile = self.config.tile_size;
        self.switches = self
            .level
            .switches
            .iter()
            .map(|origin| switch_aabb(*origin, tile))
            .collect();
        self.keys = self
            .level
            .keys
            .iter()
            .map(|origin| key_aabb(*origin, tile))
            .collect();
        self.goals = self
            .level
            .goals
            .iter()
            .map(|origin| goal_aabb(*origin, tile))
            .collect();
    }

    /// Whether the level is still running.
    #[must_use]
    pub const fn status(&self) -> SimulationStatus {
        self.status
    }

    /// Ticks stepped since construction, including ticks before restarts.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Tuning in use.
    #[must_use]
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Where the player starts and restarts.
    #[must_use]
    pub const fn spawn(&self) -> IVec2 {
        self.spawn
    }

    /// Static level geometry.
    #[must_use]
    pub const fn world(&self) -> &CollisionWorld {
        &self.world
    }

    /// Player state.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Gravity state machine.
    #[must_use]
    pub const fn gravity(&self) -> &GravityState {
        &self.gravity
    }

    /// Spikes, launchers and projectiles.
    #[must_use]
    pub const fn hazards(&self) -> &HazardSet {
        &self.hazards
    }

    /// Player box for rendering.
    #[must_use]
    pub fn player_view(&self) -> BodyView {
        BodyView::from(&self.player.body)
    }

    /// Live spikes for rendering.
    #[must_use]
    pub fn hazard_views(&self) -> Vec<HazardView> {
        self.hazards
            .hazards()
            .map(|hazard| HazardView {
                id: hazard.id,
                orientation: hazard.orientation,
                active: hazard.is_active(),
                body: BodyView::from(&hazard.body),
            })
            .collect()
    }

    /// Projectiles in flight for rendering.
    #[must_use]
    pub fn projectile_views(&self) -> Vec<BodyView> {
        self.hazards
            .projectiles()
            .map(|(_, projectile)| BodyView::from(&projectile.body))
            .collect()
    }

    /// Gravity state for screen rotation.
    #[must_use]
    pub fn gravity_view(&self) -> GravityView {
        GravityView {
            current: self.gravity.current(),
            target: self.gravity.target(),
            phase: self.gravity.phase(),
            progress: self.gravity.progress(),
            rotation_degrees: self.gravity.visual_rotation_degrees(),
        }
    }

    /// Unconsumed gravity switches.
    pub fn switches(&self) -> impl Iterator<Item = (SwitchId, &Aabb)> + '_ {
        self.switches.iter()
    }

    /// Uncollected keys.
    pub fn keys(&self) -> impl Iterator<Item = (PickupId, &Aabb)> + '_ {
        self.keys.iter()
    }

    /// Goal doors.
    #[must_use]
    pub fn goals(&self) -> &[Aabb] {
        &self.goals
    }
}

fn build_world(level: &LevelDescriptor, config: &PhysicsConfig) -> CollisionWorld {
    CollisionWorld::new(
        level.bounds(),
        config.tile_size,
        level
            .colliders
            .iter()
            .map(|collider| (collider.aabb, collider.surface, collider.style)),
    )
}
