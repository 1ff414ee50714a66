//! Projectile launchers and the projectiles they fire.
//!
//! Launchers are timed emitters with no body of their own. Spawn intervals
//! are drawn from a caller-supplied [`Rng`] so runs can be replayed from a
//! seed.

use glam::IVec2;
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::body::KinematicBody;
use crate::config::PhysicsConfig;
use crate::constants::LAUNCHER_SIZE;
use crate::geometry::Aabb;
use crate::resolver::resolve_horizontal;
use crate::world::CollisionWorld;

/// Horizontal firing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaunchDirection {
    /// Fires towards negative X.
    Left,
    /// Fires towards positive X.
    Right,
}

impl LaunchDirection {
    /// `-1` or `+1` along X.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// A static emitter firing projectiles at randomised intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    aabb: Aabb,
    direction: LaunchDirection,
    min_interval: u32,
    max_interval: u32,
    countdown: u32,
}

impl Launcher {
    /// Places a launcher in the tile at `tile_origin`, flush with the tile
    /// edge behind its muzzle and centred vertically.
    ///
    /// The first shot comes after one interval plus up to
    /// `launcher_initial_jitter_ticks` extra ticks.
    pub fn new(
        tile_origin: IVec2,
        direction: LaunchDirection,
        interval: (u32, u32),
        config: &PhysicsConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let y = tile_origin.y + config.tile_size / 2 - LAUNCHER_SIZE / 2;
        let x = match direction {
            LaunchDirection::Right => tile_origin.x,
            LaunchDirection::Left => tile_origin.x + config.tile_size - LAUNCHER_SIZE,
        };
        let (min_interval, max_interval) = interval;
        let mut launcher = Self {
            aabb: Aabb::new(x, y, LAUNCHER_SIZE, LAUNCHER_SIZE),
            direction,
            min_interval,
            max_interval,
            countdown: 0,
        };
        let jitter = rng.gen_range(0..=config.launcher_initial_jitter_ticks);
        launcher.countdown = launcher.next_interval(rng).saturating_add(jitter);
        launcher
    }

    /// Launcher box.
    #[must_use]
    pub const fn aabb(&self) -> Aabb {
        self.aabb
    }

    /// Firing direction.
    #[must_use]
    pub const fn direction(&self) -> LaunchDirection {
        self.direction
    }

    /// Ticks until the next shot.
    #[must_use]
    pub const fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Counts down one tick and fires when the countdown runs out.
    pub fn tick(&mut self, config: &PhysicsConfig, rng: &mut impl Rng) -> Option<Projectile> {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return None;
        }
        self.countdown = self.next_interval(rng);
        let projectile = self.fire(config);
        trace!(
            "launcher at {} fired, next shot in {} ticks",
            self.aabb.origin, self.countdown
        );
        Some(projectile)
    }

    fn next_interval(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.min_interval..=self.max_interval).max(1)
    }

    /// Spawns a projectile one pixel beyond the muzzle on the centre line.
    #[must_use]
    pub fn fire(&self, config: &PhysicsConfig) -> Projectile {
        let size = config.projectile_size;
        let y = self.aabb.center().y - size.y / 2;
        let x = match self.direction {
            LaunchDirection::Right => self.aabb.right() + 1,
            LaunchDirection::Left => self.aabb.left() - size.x - 1,
        };
        Projectile::new(IVec2::new(x, y), size, self.direction, config.projectile_speed)
    }
}

/// A constant-velocity body destroyed by the first thing it touches.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Moving box.
    pub body: KinematicBody,
    /// Direction of travel.
    pub direction: LaunchDirection,
}

impl Projectile {
    /// A projectile at `position` already moving at `speed`.
    #[must_use]
    pub fn new(position: IVec2, size: IVec2, direction: LaunchDirection, speed: f64) -> Self {
        let mut body = KinematicBody::new(position, size);
        body.velocity.x = f64::from(direction.sign()) * speed;
        Self { body, direction }
    }

    /// Moves one tick. Returns `false` once the projectile hit geometry or
    /// left the level and should be removed.
    pub fn advance(&mut self, world: &CollisionWorld) -> bool {
        let speed = self.body.velocity.x;
        if resolve_horizontal(&mut self.body, world, speed).collided() {
            return false;
        }
        !world.bounds().fully_excludes(&self.body.aabb())
    }
}
