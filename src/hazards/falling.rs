//! Dormant spikes that launch once the player lines up with their tip.

use log::debug;

use crate::body::KinematicBody;
use crate::config::PhysicsConfig;
use crate::geometry::{Aabb, Orientation};
use crate::gravity::GravityDirection;
use crate::resolver::{resolve_horizontal, resolve_vertical};
use crate::world::CollisionWorld;

/// Dormant/active state of a falling spike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Falling {
    /// Set once the player has triggered the spike.
    pub active: bool,
    /// How far along the tip direction the trigger reaches.
    pub activation_radius: i32,
}

/// Whether a falling spike should stop advancing this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    /// Still in flight, or dormant.
    Moving,
    /// Hit level geometry.
    Shattered,
    /// Left the level rectangle.
    Lost,
}

impl Falling {
    /// An untriggered spike.
    #[must_use]
    pub const fn dormant(activation_radius: i32) -> Self {
        Self {
            active: false,
            activation_radius,
        }
    }

    /// Tests the activation predicate against the player's post-move box.
    ///
    /// The player must sit on the tip's side of the spike, within `band`
    /// pixels of its centre line across the travel axis and closer than the
    /// activation radius along it.
    #[must_use]
    pub fn triggered_by(&self, spike: &Aabb, tip: Orientation, player: &Aabb, band: i32) -> bool {
        let (spike_centre, player_centre) = (spike.center(), player.center());
        let (aligned, gap) = match tip {
            Orientation::Down => (
                (player_centre.x - spike_centre.x).abs() < band,
                player.top() - spike.bottom(),
            ),
            Orientation::Up => (
                (player_centre.x - spike_centre.x).abs() < band,
                spike.top() - player.bottom(),
            ),
            Orientation::Left => (
                (player_centre.y - spike_centre.y).abs() < band,
                spike.left() - player.right(),
            ),
            Orientation::Right => (
                (player_centre.y - spike_centre.y).abs() < band,
                player.left() - spike.right(),
            ),
        };
        aligned && gap > 0 && gap < self.activation_radius
    }

    /// Accelerates an active spike along its tip and moves it through the
    /// world. Any contact with geometry ends its flight.
    pub fn advance(
        &self,
        body: &mut KinematicBody,
        tip: Orientation,
        gravity: GravityDirection,
        world: &CollisionWorld,
        config: &PhysicsConfig,
    ) -> FallOutcome {
        if !self.active {
            return FallOutcome::Moving;
        }
        accelerate(body, tip, gravity, config);

        if body.velocity.x != 0.0 && resolve_horizontal(body, world, body.velocity.x).collided() {
            return FallOutcome::Shattered;
        }
        if resolve_vertical(body, world, body.velocity.y, gravity).collided() {
            return FallOutcome::Shattered;
        }
        if world.bounds().fully_excludes(&body.aabb()) {
            debug!("falling spike left the level at {}", body.box_position);
            return FallOutcome::Lost;
        }
        FallOutcome::Moving
    }
}

fn accelerate(
    body: &mut KinematicBody,
    tip: Orientation,
    gravity: GravityDirection,
    config: &PhysicsConfig,
) {
    let max = config.falling_max_speed;
    match tip {
        Orientation::Up | Orientation::Down => {
            let direction = f64::from(tip.unit().y);
            let pull = if tip.unit() == gravity.unit() {
                config.gravity
            } else {
                config.gravity * config.falling_counter_gravity_factor
            };
            body.velocity.x = 0.0;
            body.velocity.y = (body.velocity.y + direction * pull).clamp(-max, max);
        }
        Orientation::Left | Orientation::Right => {
            body.velocity.x = f64::from(tip.unit().x) * config.falling_lateral_speed;
            body.velocity.y = (body.velocity.y + gravity.sign() * config.gravity).clamp(-max, max);
        }
    }
}
