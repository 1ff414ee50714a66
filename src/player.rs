//! Player controller.
//!
//! Turns an [`InputIntent`] into velocity changes on the player's
//! [`KinematicBody`] and integrates it through the resolver. Vertical speed
//! is always reasoned about along the active gravity direction, so the same
//! code handles floors and ceilings.

use glam::IVec2;
use log::debug;

use crate::body::{KinematicBody, WallContact};
use crate::config::PhysicsConfig;
use crate::gravity::GravityDirection;
use crate::input::InputIntent;
use crate::resolver::{move_and_collide, MoveOutcome};
use crate::world::{CollisionWorld, SurfaceTag};

/// Which kind of jump [`Player::jump`] performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// Jumped off the floor along gravity.
    Ground,
    /// Jumped off a wall.
    Wall,
}

/// The player's body plus controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Player box and motion.
    pub body: KinematicBody,
    /// Holding a key.
    pub has_key: bool,
    /// Run speed factor from the surface underfoot.
    pub speed_multiplier: f64,
    /// Jump factor from the surface underfoot.
    pub jump_multiplier: f64,
    /// Ticks left during which horizontal input is ignored after a wall jump.
    pub wall_jump_cooldown: u32,
}

impl Player {
    /// Creates a player at rest with its box's top-left corner at `spawn`.
    #[must_use]
    pub fn new(spawn: IVec2, size: IVec2) -> Self {
        Self {
            body: KinematicBody::new(spawn, size),
            has_key: false,
            speed_multiplier: 1.0,
            jump_multiplier: 1.0,
            wall_jump_cooldown: 0,
        }
    }

    /// Runs one full controller tick: jump edges first, then movement.
    pub fn tick(
        &mut self,
        input: InputIntent,
        world: &CollisionWorld,
        gravity: GravityDirection,
        config: &PhysicsConfig,
    ) -> MoveOutcome {
        if input.jump_pressed {
            self.jump(input, gravity, config);
        }
        if input.jump_released {
            self.cut_jump(gravity, config);
        }
        self.update(input, world, gravity, config)
    }

    /// Applies run control and gravity, then moves the body.
    ///
    /// Surface multipliers are refreshed from the new grounding once the body
    /// has moved, so a jump on the next tick already sees the surface the
    /// player landed on.
    pub fn update(
        &mut self,
        input: InputIntent,
        world: &CollisionWorld,
        gravity: GravityDirection,
        config: &PhysicsConfig,
    ) -> MoveOutcome {
        self.wall_jump_cooldown = self.wall_jump_cooldown.saturating_sub(1);
        self.apply_run(input, config);
        self.apply_gravity(gravity, config);
        let outcome = move_and_collide(&mut self.body, world, gravity);
        self.refresh_multipliers(world, config);
        outcome
    }

    /// Starts a ground jump, or a wall jump when airborne against a wall and
    /// pushing into it. Returns what happened, if anything.
    pub fn jump(
        &mut self,
        input: InputIntent,
        gravity: GravityDirection,
        config: &PhysicsConfig,
    ) -> Option<JumpKind> {
        let up = -gravity.sign();
        if self.body.grounded {
            self.body.velocity.y = up * config.jump_strength * self.jump_multiplier;
            return Some(JumpKind::Ground);
        }

        let wall = self.body.wall_contact;
        if wall == WallContact::None || input.horizontal_axis() != wall.sign() {
            return None;
        }
        self.body.velocity.y = up * config.wall_jump_vertical;
        self.body.velocity.x = -f64::from(wall.sign()) * config.wall_jump_horizontal;
        self.wall_jump_cooldown = config.wall_jump_cooldown_ticks;
        self.body.wall_contact = WallContact::None;
        debug!("wall jump off {wall:?}");
        Some(JumpKind::Wall)
    }

    /// Shortens a jump in progress when the jump key is released.
    pub fn cut_jump(&mut self, gravity: GravityDirection, config: &PhysicsConfig) {
        if self.body.velocity.y * gravity.sign() < 0.0 {
            self.body.velocity.y *= config.cut_jump_damping;
        }
    }

    /// Puts the player back at `spawn` with every piece of state cleared.
    pub fn reset(&mut self, spawn: IVec2) {
        self.body.place_at(spawn);
        self.has_key = false;
        self.speed_multiplier = 1.0;
        self.jump_multiplier = 1.0;
        self.wall_jump_cooldown = 0;
    }

    /// Sets the speed and jump multipliers from the current `standing_on`.
    pub fn refresh_multipliers(&mut self, world: &CollisionWorld, config: &PhysicsConfig) {
        let boosted = self.body.grounded
            && world.any_has_surface(&self.body.standing_on, SurfaceTag::Booster);
        if boosted {
            self.speed_multiplier = config.booster_speed_multiplier;
            self.jump_multiplier = config.booster_jump_multiplier;
        } else {
            self.speed_multiplier = 1.0;
            self.jump_multiplier = 1.0;
        }
    }

    fn apply_run(&mut self, input: InputIntent, config: &PhysicsConfig) {
        let axis = if self.wall_jump_cooldown == 0 {
            input.horizontal_axis()
        } else {
            0
        };
        let limit = config.max_run_speed * self.speed_multiplier;
        let mut vx = self.body.velocity.x;

        if axis == 0 {
            vx *= 1.0 - config.friction;
        } else {
            let target = f64::from(axis) * limit;
            vx += (target - vx) * config.run_acceleration;
            if (target - vx).abs() < config.velocity_snap {
                vx = target;
            }
        }

        vx = vx.clamp(-limit, limit);
        if vx.abs() < config.velocity_snap {
            vx = 0.0;
        }
        self.body.velocity.x = vx;
    }

    fn apply_gravity(&mut self, gravity: GravityDirection, config: &PhysicsConfig) {
        if self.body.grounded {
            return;
        }
        let sign = gravity.sign();
        let mut along = self.body.velocity.y * sign;
        if self.body.wall_contact != WallContact::None && along > 0.0 {
            along = (along + config.gravity).min(config.wall_slide_speed);
        } else {
            along = (along + config.gravity).min(config.max_fall_speed);
        }
        self.body.velocity.y = along * sign;
    }
}
