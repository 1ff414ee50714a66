//! Finished level description handed over by the level loader.
//!
//! Tile-map parsing is someone else's job; this module only receives the
//! result, checks it and turns tile positions into the boxes the simulation
//! works with. Every position is a pixel coordinate, and for tile-anchored
//! items it is the tile's top-left corner.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{GOAL_HEIGHT, GOAL_WIDTH, KEY_SIZE, SWITCH_SIZE};
use crate::error::LevelError;
use crate::geometry::{Aabb, PixelMask};
use crate::hazards::HazardPlacement;
use crate::world::{PlatformStyle, SurfaceTag};

crate::arena_id! {
    /// Index of a gravity switch.
    pub struct SwitchId;
}

crate::arena_id! {
    /// Index of a key pickup.
    pub struct PickupId;
}

/// One static collider as authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColliderPlacement {
    /// Solid box in pixels.
    pub aabb: Aabb,
    /// Gameplay modifier.
    #[serde(default)]
    pub surface: SurfaceTag,
    /// Rendering hint only.
    #[serde(default)]
    pub style: PlatformStyle,
}

/// Everything needed to instantiate a level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Level width in pixels.
    pub width: i32,
    /// Level height in pixels.
    pub height: i32,
    /// Static level geometry.
    #[serde(default)]
    pub colliders: Vec<ColliderPlacement>,
    /// Spikes and launchers by tile.
    #[serde(default)]
    pub hazards: Vec<HazardPlacement>,
    /// Tiles holding a gravity switch.
    #[serde(default)]
    pub switches: Vec<IVec2>,
    /// Tiles holding a key.
    #[serde(default)]
    pub keys: Vec<IVec2>,
    /// Tiles whose floor a goal door stands on.
    #[serde(default)]
    pub goals: Vec<IVec2>,
    /// Top-left corner of the player's box at spawn.
    pub spawn: Option<IVec2>,
}

impl LevelDescriptor {
    /// Checks the level is playable and returns its spawn point.
    ///
    /// # Errors
    /// [`LevelError::MissingSpawn`] without a spawn point, otherwise the
    /// first structural problem found in bounds, colliders or hazards.
    ///
    /// # Examples
    /// ```
    /// use flipside::error::LevelError;
    /// use flipside::level::LevelDescriptor;
    ///
    /// let level = LevelDescriptor { width: 400, height: 400, ..LevelDescriptor::default() };
    /// assert_eq!(level.validate(), Err(LevelError::MissingSpawn));
    /// ```
    pub fn validate(&self) -> Result<IVec2, LevelError> {
        let spawn = self.spawn.ok_or(LevelError::MissingSpawn)?;
        if self.width <= 0 || self.height <= 0 {
            return Err(LevelError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        if let Some(index) = self
            .colliders
            .iter()
            .position(|collider| collider.aabb.is_degenerate())
        {
            return Err(LevelError::DegenerateCollider { index });
        }
        for (index, placement) in self.hazards.iter().enumerate() {
            placement.hazard.validate(index)?;
        }
        Ok(spawn)
    }

    /// The level rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        Aabb::new(0, 0, self.width, self.height)
    }
}

/// Switch box centred in its tile.
#[must_use]
pub fn switch_aabb(tile: IVec2, tile_size: i32) -> Aabb {
    Aabb::with_center(tile + IVec2::splat(tile_size / 2), IVec2::splat(SWITCH_SIZE))
}

/// Key box centred in its tile.
#[must_use]
pub fn key_aabb(tile: IVec2, tile_size: i32) -> Aabb {
    Aabb::with_center(tile + IVec2::splat(tile_size / 2), IVec2::splat(KEY_SIZE))
}

/// Key silhouette within its [`key_aabb`]: a ring at the top, a stem down
/// the middle and one tooth near the bottom.
///
/// # Examples
/// ```
/// let mask = flipside::level::key_mask();
/// assert!(mask.get(10, 15));
/// assert!(!mask.get(10, 6));
/// assert!(!mask.get(0, 19));
/// ```
#[must_use]
pub fn key_mask() -> PixelMask {
    PixelMask::from_fn(IVec2::splat(KEY_SIZE), |x, y| {
        let (dx, dy) = (x - 10, y - 6);
        let ring = (5..=25).contains(&(dx * dx + dy * dy));
        let stem = (8..12).contains(&x) && (10..20).contains(&y);
        let tooth = (8..15).contains(&x) && (17..19).contains(&y);
        ring || stem || tooth
    })
}

/// Door box standing on the bottom edge of its tile, flush with its left
/// edge. It is taller than a tile and extends into the tile above.
#[must_use]
pub fn goal_aabb(tile: IVec2, tile_size: i32) -> Aabb {
    Aabb::new(
        tile.x,
        tile.y + tile_size - GOAL_HEIGHT,
        GOAL_WIDTH,
        GOAL_HEIGHT,
    )
}

/// Spawn point that stands a player of `player_size` on the floor of
/// `tile`, centred horizontally.
#[must_use]
pub fn spawn_in_tile(tile: IVec2, tile_size: i32, player_size: IVec2) -> IVec2 {
    IVec2::new(
        tile.x + (tile_size - player_size.x) / 2,
        tile.y + tile_size - player_size.y,
    )
}
