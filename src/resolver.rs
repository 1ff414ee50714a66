//! Swept, axis-separated movement against the static collider set.
//!
//! Bodies move one axis at a time. Each axis is split into sub-steps no
//! longer than the body's extent on that axis minus one pixel, and overlap
//! is tested after every sub-step, so a body can never skip a collider
//! thinner than itself however fast it travels. On contact the body's
//! leading edge is snapped flush against the nearest collider and its
//! velocity on that axis is zeroed.

use log::trace;

use crate::body::{KinematicBody, WallContact};
use crate::constants::SWEEP_EPSILON;
use crate::gravity::GravityDirection;
use crate::world::{ColliderId, CollisionWorld, StaticCollider};

/// Movement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Along X.
    Horizontal,
    /// Along Y.
    Vertical,
}

/// What a single-axis move ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisOutcome {
    /// Moved the full distance.
    #[default]
    Clear,
    /// Horizontal contact; the body now touches the collider's side.
    Wall {
        /// Collider that stopped the body.
        collider: ColliderId,
    },
    /// Vertical contact while travelling along gravity.
    Landed {
        /// Collider that stopped the body.
        collider: ColliderId,
    },
    /// Vertical contact while travelling against gravity.
    Ceiling {
        /// Collider that stopped the body.
        collider: ColliderId,
    },
}

impl AxisOutcome {
    /// Anything but `Clear`.
    #[must_use]
    pub const fn collided(self) -> bool {
        !matches!(self, Self::Clear)
    }

    /// The collider that was hit, if any.
    #[must_use]
    pub const fn collider(self) -> Option<ColliderId> {
        match self {
            Self::Clear => None,
            Self::Wall { collider } | Self::Landed { collider } | Self::Ceiling { collider } => {
                Some(collider)
            }
        }
    }
}

/// Result of moving a body along both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// Result of the X pass.
    pub horizontal: AxisOutcome,
    /// Result of the Y pass.
    pub vertical: AxisOutcome,
}

impl MoveOutcome {
    /// Either axis hit something.
    #[must_use]
    pub const fn collided(self) -> bool {
        self.horizontal.collided() || self.vertical.collided()
    }
}

/// Moves `body` by `delta` along `axis`, stopping at the first collider.
pub fn resolve_axis(
    body: &mut KinematicBody,
    world: &CollisionWorld,
    axis: Axis,
    delta: f64,
    gravity: GravityDirection,
) -> AxisOutcome {
    match axis {
        Axis::Horizontal => resolve_horizontal(body, world, delta),
        Axis::Vertical => resolve_vertical(body, world, delta, gravity),
    }
}

/// Horizontal pass. Clears `wall_contact`, then records the side hit.
pub fn resolve_horizontal(
    body: &mut KinematicBody,
    world: &CollisionWorld,
    delta: f64,
) -> AxisOutcome {
    body.wall_contact = WallContact::None;
    let step_limit = step_limit(body.size.x);
    let direction = delta.signum();
    let mut remaining = delta;

    while remaining.abs() > SWEEP_EPSILON {
        let step = remaining.abs().min(step_limit) * direction;
        body.true_position.x += step;
        body.sync_box_x();

        let hits = world.overlapping(&body.aabb());
        let nearest = if direction > 0.0 {
            hits.iter().min_by_key(|collider| collider.aabb.left())
        } else {
            hits.iter().max_by_key(|collider| collider.aabb.right())
        };
        if let Some(collider) = nearest {
            return clamp_horizontal(body, collider, direction);
        }
        remaining -= step;
    }
    AxisOutcome::Clear
}

fn clamp_horizontal(
    body: &mut KinematicBody,
    collider: &StaticCollider,
    direction: f64,
) -> AxisOutcome {
    if direction > 0.0 {
        body.snap_x(collider.aabb.left() - body.size.x);
        body.wall_contact = WallContact::Right;
    } else {
        body.snap_x(collider.aabb.right());
        body.wall_contact = WallContact::Left;
    }
    body.velocity.x = 0.0;
    trace!("horizontal contact with {} ({:?})", collider.id, body.wall_contact);
    AxisOutcome::Wall {
        collider: collider.id,
    }
}

/// Vertical pass. "Floor" and "ceiling" are relative to `gravity`; the
/// collider chosen is always the closest one in the direction of travel.
pub fn resolve_vertical(
    body: &mut KinematicBody,
    world: &CollisionWorld,
    delta: f64,
    gravity: GravityDirection,
) -> AxisOutcome {
    let step_limit = step_limit(body.size.y);
    let direction = delta.signum();
    let mut remaining = delta;

    while remaining.abs() > SWEEP_EPSILON {
        let step = remaining.abs().min(step_limit) * direction;
        body.true_position.y += step;
        body.sync_box_y();

        let hits = world.overlapping(&body.aabb());
        let nearest = if direction > 0.0 {
            hits.iter().min_by_key(|collider| collider.aabb.top())
        } else {
            hits.iter().max_by_key(|collider| collider.aabb.bottom())
        };
        if let Some(collider) = nearest {
            if direction > 0.0 {
                body.snap_y(collider.aabb.top() - body.size.y);
            } else {
                body.snap_y(collider.aabb.bottom());
            }
            body.velocity.y = 0.0;
            let id = collider.id;
            return if (direction > 0.0) == (gravity == GravityDirection::Down) {
                trace!("landed on {id}");
                AxisOutcome::Landed { collider: id }
            } else {
                trace!("bumped into {id}");
                AxisOutcome::Ceiling { collider: id }
            };
        }
        remaining -= step;
    }
    AxisOutcome::Clear
}

/// Recomputes `grounded` and `standing_on` from the body's box shifted one
/// pixel along `gravity`.
pub fn update_grounding(
    body: &mut KinematicBody,
    world: &CollisionWorld,
    gravity: GravityDirection,
) {
    let feet = body.aabb().translated(gravity.unit());
    body.standing_on.clear();
    for collider in world.overlapping(&feet) {
        body.standing_on.insert(collider.id);
    }
    body.grounded = !body.standing_on.is_empty();
}

/// Integrates `body.velocity` for one tick: X, then Y, then grounding.
pub fn move_and_collide(
    body: &mut KinematicBody,
    world: &CollisionWorld,
    gravity: GravityDirection,
) -> MoveOutcome {
    let horizontal = resolve_horizontal(body, world, body.velocity.x);
    let vertical = resolve_vertical(body, world, body.velocity.y, gravity);
    update_grounding(body, world, gravity);
    MoveOutcome {
        horizontal,
        vertical,
    }
}

fn step_limit(extent: i32) -> f64 {
    f64::from((extent - 1).max(1))
}
