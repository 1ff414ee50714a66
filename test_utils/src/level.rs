//! Tile-grid level construction for tests.

use flipside::constants::TILE_SIZE;
use flipside::level::spawn_in_tile;
use flipside::prelude::*;
use std::ops::Range;

/// Builds a [`LevelDescriptor`] from tile coordinates.
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    level: LevelDescriptor,
}

/// Pixel origin of tile `(col, row)`.
///
/// # Examples
/// ```
/// use test_utils::level::tile;
/// assert_eq!(tile(2, 3), glam::IVec2::new(80, 120));
/// ```
pub fn tile(col: i32, row: i32) -> IVec2 {
    IVec2::new(col, row) * TILE_SIZE
}

impl LevelBuilder {
    /// An empty level `cols` × `rows` tiles large, with no spawn point.
    ///
    /// # Examples
    /// ```
    /// use test_utils::LevelBuilder;
    /// let level = LevelBuilder::new(10, 5).build();
    /// assert_eq!((level.width, level.height), (400, 200));
    /// assert!(level.spawn.is_none());
    /// ```
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            level: LevelDescriptor {
                width: cols * TILE_SIZE,
                height: rows * TILE_SIZE,
                ..LevelDescriptor::default()
            },
        }
    }

    /// A single solid tile.
    pub fn block(mut self, col: i32, row: i32, surface: SurfaceTag) -> Self {
        let origin = tile(col, row);
        self.level.colliders.push(ColliderPlacement {
            aabb: Aabb::new(origin.x, origin.y, TILE_SIZE, TILE_SIZE),
            surface,
            style: PlatformStyle::Gray,
        });
        self
    }

    /// A horizontal run of solid tiles on `row`.
    pub fn platform(self, cols: Range<i32>, row: i32, surface: SurfaceTag) -> Self {
        cols.fold(self, |builder, col| builder.block(col, row, surface))
    }

    /// A vertical run of solid tiles in `col`.
    pub fn wall(self, col: i32, rows: Range<i32>) -> Self {
        rows.fold(self, |builder, row| builder.block(col, row, SurfaceTag::Normal))
    }

    /// Spawns a default-sized player standing on the floor of the tile.
    pub fn spawn_on(mut self, col: i32, row: i32) -> Self {
        let size = PhysicsConfig::default().player_size;
        self.level.spawn = Some(spawn_in_tile(tile(col, row), TILE_SIZE, size));
        self
    }

    /// Spawns the player with its box's top-left corner at `position`.
    pub fn spawn_at(mut self, position: IVec2) -> Self {
        self.level.spawn = Some(position);
        self
    }

    /// Places `hazard` in tile `(col, row)`.
    pub fn hazard(mut self, col: i32, row: i32, hazard: HazardDescriptor) -> Self {
        self.level.hazards.push(HazardPlacement {
            position: tile(col, row),
            hazard,
        });
        self
    }

    /// A gravity switch in tile `(col, row)`.
    pub fn switch(mut self, col: i32, row: i32) -> Self {
        self.level.switches.push(tile(col, row));
        self
    }

    /// A key in tile `(col, row)`.
    pub fn key(mut self, col: i32, row: i32) -> Self {
        self.level.keys.push(tile(col, row));
        self
    }

    /// A goal door standing on the floor of tile `(col, row)`.
    pub fn goal(mut self, col: i32, row: i32) -> Self {
        self.level.goals.push(tile(col, row));
        self
    }

    /// Finishes the level.
    pub fn build(self) -> LevelDescriptor {
        self.level
    }
}
