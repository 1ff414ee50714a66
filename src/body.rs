//! Kinematic body state shared by the player and moving hazards.

use glam::{DVec2, IVec2};
use hashbrown::HashSet;

use crate::geometry::Aabb;
use crate::numeric::round_to_i32;
use crate::world::ColliderId;

/// Which side of the body is pressed against a wall this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallContact {
    /// Free on both sides.
    #[default]
    None,
    /// Touching a wall on the left.
    Left,
    /// Touching a wall on the right.
    Right,
}

impl WallContact {
    /// Horizontal sign pointing from the body into the wall (0 for `None`).
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Axis-aligned moving box with sub-pixel position tracking.
///
/// `true_position` accumulates fractional motion; `box_position` is its
/// rounded image and is what every collision test and renderer sees.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    /// Unrounded top-left corner.
    pub true_position: DVec2,
    /// Rounded top-left corner used for collision.
    pub box_position: IVec2,
    /// Pixels per tick.
    pub velocity: DVec2,
    /// Width and height in pixels.
    pub size: IVec2,
    /// Resting on a collider along the gravity direction.
    pub grounded: bool,
    /// Wall touched during the last horizontal move.
    pub wall_contact: WallContact,
    /// Colliders touched by the last grounding check.
    pub standing_on: HashSet<ColliderId>,
}

impl KinematicBody {
    /// Creates a body at rest with its top-left corner at `position`.
    ///
    /// # Examples
    /// ```
    /// use flipside::body::KinematicBody;
    /// use glam::IVec2;
    /// let body = KinematicBody::new(IVec2::new(10, 20), IVec2::new(30, 30));
    /// assert_eq!(body.aabb().bottom(), 50);
    /// assert!(!body.grounded);
    /// ```
    #[must_use]
    pub fn new(position: IVec2, size: IVec2) -> Self {
        Self {
            true_position: position.as_dvec2(),
            box_position: position,
            velocity: DVec2::ZERO,
            size,
            grounded: false,
            wall_contact: WallContact::None,
            standing_on: HashSet::new(),
        }
    }

    /// Collision box at the current rounded position.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_origin_size(self.box_position, self.size)
    }

    /// Re-derives the X box coordinate from the true position.
    pub fn sync_box_x(&mut self) {
        self.box_position.x = round_to_i32(self.true_position.x);
    }

    /// Re-derives the Y box coordinate from the true position.
    pub fn sync_box_y(&mut self) {
        self.box_position.y = round_to_i32(self.true_position.y);
    }

    /// Moves the box to a snapped X and drops any sub-pixel remainder.
    pub fn snap_x(&mut self, x: i32) {
        self.box_position.x = x;
        self.true_position.x = f64::from(x);
    }

    /// Moves the box to a snapped Y and drops any sub-pixel remainder.
    pub fn snap_y(&mut self, y: i32) {
        self.box_position.y = y;
        self.true_position.y = f64::from(y);
    }

    /// Teleports to `position`, clearing motion and contact state.
    pub fn place_at(&mut self, position: IVec2) {
        self.true_position = position.as_dvec2();
        self.box_position = position;
        self.velocity = DVec2::ZERO;
        self.grounded = false;
        self.wall_contact = WallContact::None;
        self.standing_on.clear();
    }
}
