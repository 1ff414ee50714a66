//! Static level geometry and overlap queries.
//!
//! The collider set is built once per level instance and is read-only while
//! a tick runs; a restart replaces the whole [`CollisionWorld`]. Colliders
//! are bucketed on a tile-sized grid so a query only inspects the cells the
//! query box touches.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::geometry::Aabb;

crate::arena_id! {
    /// Stable index of a [`StaticCollider`] within its [`CollisionWorld`].
    pub struct ColliderId;
}

/// Gameplay modifier attached to a collider's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfaceTag {
    /// No effect.
    #[default]
    Normal,
    /// Doubles run speed and jump strength for bodies standing on it.
    Booster,
}

/// Presentation-only palette family; the simulation never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlatformStyle {
    /// Default palette.
    #[default]
    Gray,
    /// Purple palette.
    Purple,
    /// Yellow palette.
    Yellow,
    /// Cyan palette.
    Cyan,
    /// Orange palette.
    Orange,
    /// Red palette.
    Red,
    /// Blue palette.
    Blue,
    /// Green palette.
    Green,
}

/// Immutable, tile-aligned piece of level geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCollider {
    /// Arena id.
    pub id: ColliderId,
    /// Solid box.
    pub aabb: Aabb,
    /// Gameplay modifier.
    pub surface: SurfaceTag,
    /// Rendering hint.
    pub style: PlatformStyle,
}

/// Grid coordinate of a broad-phase bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridCoordinate {
    x: i32,
    y: i32,
}

impl From<(i32, i32)> for GridCoordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// The static collider set plus the level bounds.
#[derive(Debug)]
pub struct CollisionWorld {
    colliders: Arena<ColliderId, StaticCollider>,
    cells: HashMap<GridCoordinate, Vec<ColliderId>>,
    cell_size: i32,
    bounds: Aabb,
}

impl CollisionWorld {
    /// Builds the world, indexing every collider into `cell_size` buckets.
    ///
    /// # Examples
    /// ```
    /// use flipside::geometry::Aabb;
    /// use flipside::world::{CollisionWorld, PlatformStyle, SurfaceTag};
    ///
    /// let world = CollisionWorld::new(
    ///     Aabb::new(0, 0, 400, 400),
    ///     40,
    ///     [(Aabb::new(0, 360, 400, 40), SurfaceTag::Normal, PlatformStyle::Gray)],
    /// );
    /// assert!(world.any_overlap(&Aabb::new(10, 350, 30, 11)));
    /// assert!(!world.any_overlap(&Aabb::new(10, 330, 30, 30)));
    /// ```
    pub fn new(
        bounds: Aabb,
        cell_size: i32,
        colliders: impl IntoIterator<Item = (Aabb, SurfaceTag, PlatformStyle)>,
    ) -> Self {
        let mut world = Self {
            colliders: Arena::new(),
            cells: HashMap::new(),
            cell_size: cell_size.max(1),
            bounds,
        };
        for (aabb, surface, style) in colliders {
            let id = world.colliders.insert_with(|id| StaticCollider {
                id,
                aabb,
                surface,
                style,
            });
            for cell in world.cells_covering(&aabb) {
                world.cells.entry(cell).or_default().push(id);
            }
        }
        world
    }

    /// Level rectangle; bodies leaving it entirely are out of play.
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Looks up a collider by id.
    #[must_use]
    pub fn collider(&self, id: ColliderId) -> Option<&StaticCollider> {
        self.colliders.get(id)
    }

    /// Every collider in id order.
    pub fn colliders(&self) -> impl Iterator<Item = &StaticCollider> + '_ {
        self.colliders.values()
    }

    /// Number of colliders.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.colliders.len()
    }

    /// True for a level without geometry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Every collider overlapping `query`, ordered by id.
    #[must_use]
    pub fn overlapping(&self, query: &Aabb) -> Vec<&StaticCollider> {
        if query.is_degenerate() {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        let mut hits: Vec<&StaticCollider> = self
            .cells_covering(query)
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.colliders.get(*id))
            .filter(|collider| collider.aabb.intersects(query))
            .collect();
        hits.sort_by_key(|collider| collider.id);
        hits
    }

    /// Whether anything overlaps `query`.
    #[must_use]
    pub fn any_overlap(&self, query: &Aabb) -> bool {
        !self.overlapping(query).is_empty()
    }

    /// Returns `true` when any collider in `ids` carries `tag`.
    #[must_use]
    pub fn any_has_surface<S: std::hash::BuildHasher>(
        &self,
        ids: &HashSet<ColliderId, S>,
        tag: SurfaceTag,
    ) -> bool {
        ids.iter()
            .filter_map(|id| self.colliders.get(*id))
            .any(|collider| collider.surface == tag)
    }

    fn cells_covering(&self, aabb: &Aabb) -> impl Iterator<Item = GridCoordinate> {
        let size = self.cell_size;
        let x0 = aabb.left().div_euclid(size);
        let x1 = (aabb.right() - 1).div_euclid(size);
        let y0 = aabb.top().div_euclid(size);
        let y1 = (aabb.bottom() - 1).div_euclid(size);
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| GridCoordinate::from((x, y))))
    }
}
