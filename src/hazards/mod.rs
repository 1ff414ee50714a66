//! Lethal hazards: spikes in their static, patrolling and falling variants,
//! plus projectile launchers.
//!
//! Every spike owns a [`KinematicBody`] and a triangular [`PixelMask`];
//! behaviour is a closed [`Behavior`] enum dispatched with `match`. Launchers
//! have no body and only emit [`Projectile`]s. All three kinds live in typed
//! arenas inside a [`HazardSet`], so removing a shattered spike or a spent
//! projectile never invalidates another entity's id.

mod falling;
mod launcher;
mod patrol;
mod spike;

use glam::IVec2;
use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::body::KinematicBody;
use crate::config::PhysicsConfig;
use crate::constants::FALLING_ACTIVATION_RADIUS;
use crate::error::LevelError;
use crate::geometry::{Aabb, Orientation, PixelMask};
use crate::gravity::GravityDirection;
use crate::world::CollisionWorld;

pub use falling::{FallOutcome, Falling};
pub use launcher::{LaunchDirection, Launcher, Projectile};
pub use patrol::Patrol;
pub use spike::spike_footprint;

crate::arena_id! {
    /// Index of a spike hazard in a [`HazardSet`].
    pub struct HazardId;
}

crate::arena_id! {
    /// Index of a launcher in a [`HazardSet`].
    pub struct LauncherId;
}

crate::arena_id! {
    /// Index of an in-flight projectile in a [`HazardSet`].
    pub struct ProjectileId;
}

const fn default_activation_radius() -> i32 {
    FALLING_ACTIVATION_RADIUS
}

/// Hazard kind as authored in a level.
///
/// `orientation` is always the direction the spike's tip points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HazardDescriptor {
    /// A spike that never moves.
    Static {
        /// Tip direction.
        orientation: Orientation,
    },
    /// A spike sliding back and forth along X.
    Patrolling {
        /// Distance covered before turning back.
        range: i32,
        /// Signed horizontal speed; the sign picks the first direction.
        speed: f64,
        /// Tip direction.
        orientation: Orientation,
    },
    /// A spike that launches when the player lines up with its tip.
    Falling {
        /// Tip direction, which is also the travel direction.
        orientation: Orientation,
        /// Trigger reach along the tip direction.
        #[serde(default = "default_activation_radius")]
        activation_radius: i32,
    },
    /// An emitter firing projectiles horizontally.
    ProjectileLauncher {
        /// Firing direction.
        direction: LaunchDirection,
        /// Shortest gap between shots, in ticks.
        min_interval: u32,
        /// Longest gap between shots, in ticks.
        max_interval: u32,
    },
}

impl HazardDescriptor {
    /// Rejects parameters that would make the hazard misbehave.
    ///
    /// # Errors
    /// Returns a [`LevelError`] naming the hazard's `index` in its level.
    pub fn validate(&self, index: usize) -> Result<(), LevelError> {
        match *self {
            Self::Static { .. } => Ok(()),
            Self::Patrolling { range, speed, .. } => {
                if range > 0 && speed.is_finite() && speed != 0.0 {
                    Ok(())
                } else {
                    Err(LevelError::InvalidPatrol { index })
                }
            }
            Self::Falling {
                activation_radius, ..
            } => {
                if activation_radius > 0 {
                    Ok(())
                } else {
                    Err(LevelError::InvalidActivationRadius { index })
                }
            }
            Self::ProjectileLauncher {
                min_interval,
                max_interval,
                ..
            } => {
                if min_interval >= 1 && min_interval <= max_interval {
                    Ok(())
                } else {
                    Err(LevelError::InvalidLauncherInterval {
                        index,
                        min: min_interval,
                        max: max_interval,
                    })
                }
            }
        }
    }
}

/// A hazard descriptor anchored to the tile whose top-left corner is
/// `position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardPlacement {
    /// Top-left corner of the tile.
    pub position: IVec2,
    /// What sits in the tile.
    #[serde(flatten)]
    pub hazard: HazardDescriptor,
}

/// Per-variant state of a spike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Never moves.
    Static,
    /// Bounces between two bounds.
    Patrolling(Patrol),
    /// Waits for the player, then flies.
    Falling(Falling),
}

/// A lethal spike with its own body.
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    /// Arena id.
    pub id: HazardId,
    /// Tip direction.
    pub orientation: Orientation,
    /// Moving box.
    pub body: KinematicBody,
    /// Variant state.
    pub behavior: Behavior,
    home: IVec2,
    mask: PixelMask,
}

impl Hazard {
    /// Builds a spike in the tile at `tile_origin`.
    #[must_use]
    pub fn new(
        id: HazardId,
        tile_origin: IVec2,
        orientation: Orientation,
        behavior: Behavior,
        tile_size: i32,
    ) -> Self {
        let (aabb, mask) = spike_footprint(tile_origin, tile_size, orientation);
        let mut hazard = Self {
            id,
            orientation,
            body: KinematicBody::new(aabb.origin, aabb.size),
            behavior,
            home: aabb.origin,
            mask,
        };
        hazard.reset();
        hazard
    }

    /// Current box.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        self.body.aabb()
    }

    /// Triangle mask relative to the box origin.
    #[must_use]
    pub const fn mask(&self) -> &PixelMask {
        &self.mask
    }

    /// `false` only for a falling spike that has not been triggered yet.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        match self.behavior {
            Behavior::Falling(falling) => falling.active,
            Behavior::Static | Behavior::Patrolling(_) => true,
        }
    }

    /// Pixel-accurate contact test against the player.
    #[must_use]
    pub fn touches(&self, player: &Aabb, player_mask: &PixelMask) -> bool {
        self.mask
            .overlaps(self.body.box_position, player_mask, player.origin)
    }

    /// Returns the spike to where and how it started.
    pub fn reset(&mut self) {
        self.body.place_at(self.home);
        match &mut self.behavior {
            Behavior::Static => {}
            Behavior::Patrolling(patrol) => patrol.reset(&mut self.body),
            Behavior::Falling(falling) => falling.active = false,
        }
    }
}

/// Every hazard of one level instance.
#[derive(Debug, Default)]
pub struct HazardSet {
    hazards: Arena<HazardId, Hazard>,
    launchers: Arena<LauncherId, Launcher>,
    projectiles: Arena<ProjectileId, Projectile>,
}

impl HazardSet {
    /// Instantiates `placements`. Launcher timers draw from `rng`.
    ///
    /// Descriptors are assumed to have passed
    /// [`HazardDescriptor::validate`].
    pub fn build(
        placements: &[HazardPlacement],
        config: &PhysicsConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let mut set = Self::default();
        for placement in placements {
            let tile = placement.position;
            let (orientation, behavior) = match placement.hazard {
                HazardDescriptor::Static { orientation } => (orientation, Behavior::Static),
                HazardDescriptor::Patrolling {
                    range,
                    speed,
                    orientation,
                } => {
                    let (aabb, _) = spike_footprint(tile, config.tile_size, orientation);
                    (
                        orientation,
                        Behavior::Patrolling(Patrol::new(aabb.left(), range, speed)),
                    )
                }
                HazardDescriptor::Falling {
                    orientation,
                    activation_radius,
                } => (
                    orientation,
                    Behavior::Falling(Falling::dormant(activation_radius)),
                ),
                HazardDescriptor::ProjectileLauncher {
                    direction,
                    min_interval,
                    max_interval,
                } => {
                    set.launchers.insert(Launcher::new(
                        tile,
                        direction,
                        (min_interval, max_interval),
                        config,
                        rng,
                    ));
                    continue;
                }
            };
            set.hazards
                .insert_with(|id| Hazard::new(id, tile, orientation, behavior, config.tile_size));
        }
        set
    }

    /// Live spikes in id order.
    pub fn hazards(&self) -> impl Iterator<Item = &Hazard> + '_ {
        self.hazards.values()
    }

    /// The spike with `id`, unless it was removed.
    #[must_use]
    pub fn hazard(&self, id: HazardId) -> Option<&Hazard> {
        self.hazards.get(id)
    }

    /// Every launcher.
    pub fn launchers(&self) -> impl Iterator<Item = &Launcher> + '_ {
        self.launchers.values()
    }

    /// Projectiles in flight.
    pub fn projectiles(&self) -> impl Iterator<Item = (ProjectileId, &Projectile)> + '_ {
        self.projectiles.iter()
    }

    /// Wakes every dormant falling spike whose predicate holds for `player`.
    /// Returns the spikes woken this call.
    pub fn activate_triggered(&mut self, player: &Aabb, config: &PhysicsConfig) -> Vec<HazardId> {
        let mut woken = Vec::new();
        for (id, hazard) in self.hazards.iter_mut() {
            let aabb = hazard.body.aabb();
            let Behavior::Falling(falling) = &mut hazard.behavior else {
                continue;
            };
            if !falling.active
                && falling.triggered_by(
                    &aabb,
                    hazard.orientation,
                    player,
                    config.falling_activation_band,
                )
            {
                falling.active = true;
                debug!("{id} triggered by player at {}", player.origin);
                woken.push(id);
            }
        }
        woken
    }

    /// Moves every hazard one tick: spikes first, then launchers fire, then
    /// all projectiles (including ones fired this tick) advance.
    pub fn advance(
        &mut self,
        world: &CollisionWorld,
        gravity: GravityDirection,
        config: &PhysicsConfig,
        rng: &mut impl Rng,
    ) {
        let mut spent = Vec::new();
        for (id, hazard) in self.hazards.iter_mut() {
            match hazard.behavior {
                Behavior::Static => {}
                Behavior::Patrolling(patrol) => patrol.advance(&mut hazard.body),
                Behavior::Falling(falling) => {
                    let outcome = falling.advance(
                        &mut hazard.body,
                        hazard.orientation,
                        gravity,
                        world,
                        config,
                    );
                    if outcome != FallOutcome::Moving {
                        debug!("{id} removed: {outcome:?}");
                        spent.push(id);
                    }
                }
            }
        }
        for id in spent {
            self.hazards.remove(id);
        }

        for launcher in self.launchers.values_mut() {
            if let Some(projectile) = launcher.tick(config, rng) {
                let id = self.projectiles.insert(projectile);
                trace!("{id} spawned");
            }
        }

        let destroyed: Vec<ProjectileId> = self
            .projectiles
            .iter_mut()
            .filter_map(|(id, projectile)| (!projectile.advance(world)).then_some(id))
            .collect();
        for id in destroyed {
            trace!("{id} destroyed");
            self.projectiles.remove(id);
        }
    }

    /// Removes every projectile touching `player` and returns how many there
    /// were.
    pub fn take_projectile_hits(&mut self, player: &Aabb) -> usize {
        let hits: Vec<ProjectileId> = self
            .projectiles
            .iter()
            .filter(|(_, projectile)| projectile.body.aabb().intersects(player))
            .map(|(id, _)| id)
            .collect();
        for id in &hits {
            self.projectiles.remove(*id);
        }
        hits.len()
    }

    /// First spike whose mask overlaps the player's.
    #[must_use]
    pub fn spike_touching(&self, player: &Aabb, player_mask: &PixelMask) -> Option<HazardId> {
        self.hazards
            .iter()
            .find(|(_, hazard)| hazard.touches(player, player_mask))
            .map(|(id, _)| id)
    }
}
