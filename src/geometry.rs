//! Integer rectangles, compass orientations and pixel masks.
//!
//! Everything the resolver tests against lives on the integer pixel grid.
//! Rectangles follow the usual screen convention: `origin` is the top-left
//! corner, `right`/`bottom` are exclusive and positive Y points down.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned box on the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner.
    pub origin: IVec2,
    /// Width and height in pixels.
    pub size: IVec2,
}

impl Aabb {
    /// Creates a box from its top-left corner and extent.
    ///
    /// # Examples
    /// ```
    /// use flipside::geometry::Aabb;
    /// let b = Aabb::new(10, 20, 30, 40);
    /// assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (10, 20, 40, 60));
    /// ```
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    /// Creates a box from vector corner and extent.
    #[must_use]
    pub const fn from_origin_size(origin: IVec2, size: IVec2) -> Self {
        Self { origin, size }
    }

    /// Creates a box of `size` centred on `center` (integer halving, so odd
    /// sizes lean towards the top-left).
    #[must_use]
    pub fn with_center(center: IVec2, size: IVec2) -> Self {
        Self::from_origin_size(center - size / 2, size)
    }

    /// Leftmost column.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.origin.x
    }

    /// One past the rightmost column.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    /// Topmost row.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.origin.y
    }

    /// One past the bottom row.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    /// Centre point, rounded towards the top-left.
    #[must_use]
    pub fn center(&self) -> IVec2 {
        self.origin + self.size / 2
    }

    /// Returns `true` when the box has no area.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Strict overlap test: boxes that merely share an edge do not intersect.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Returns the overlapping region of two boxes, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        (left < right && top < bottom).then(|| Self::new(left, top, right - left, bottom - top))
    }

    /// The same box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: IVec2) -> Self {
        Self::from_origin_size(self.origin + offset, self.size)
    }

    /// Returns `true` when `other` lies completely outside this box.
    #[must_use]
    pub const fn fully_excludes(&self, other: &Self) -> bool {
        other.top() > self.bottom()
            || other.bottom() < self.top()
            || other.left() > self.right()
            || other.right() < self.left()
    }
}

/// Compass direction a shape points towards (a spike's tip, a launcher's
/// muzzle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Towards negative Y.
    Up,
    /// Towards positive Y.
    Down,
    /// Towards negative X.
    Left,
    /// Towards positive X.
    Right,
}

impl Orientation {
    /// Unit step in screen space (`Down` is +Y).
    #[must_use]
    pub const fn unit(self) -> IVec2 {
        match self {
            Self::Up => IVec2::new(0, -1),
            Self::Down => IVec2::new(0, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }

    /// Whether this is `Up` or `Down`.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Per-pixel occupancy for shapes whose bounding box overstates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    size: IVec2,
    bits: Vec<bool>,
}

impl PixelMask {
    /// A mask with every pixel set.
    #[must_use]
    pub fn filled(size: IVec2) -> Self {
        Self::from_fn(size, |_, _| true)
    }

    /// Builds a mask by evaluating `occupied` for every pixel.
    #[must_use]
    pub fn from_fn(size: IVec2, occupied: impl Fn(i32, i32) -> bool) -> Self {
        let extent = size.max(IVec2::ZERO);
        let bits = (0..extent.y)
            .flat_map(|y| (0..extent.x).map(move |x| (x, y)))
            .map(|(x, y)| occupied(x, y))
            .collect();
        Self { size: extent, bits }
    }

    /// Rasterises a triangle: a pixel is set when its centre lies inside the
    /// triangle or on one of its edges.
    ///
    /// # Examples
    /// ```
    /// use flipside::geometry::PixelMask;
    /// use glam::{DVec2, IVec2};
    /// let mask = PixelMask::triangle(
    ///     IVec2::new(4, 4),
    ///     [DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0), DVec2::new(0.0, 4.0)],
    /// );
    /// assert!(mask.get(0, 0));
    /// assert!(!mask.get(3, 3));
    /// ```
    #[must_use]
    pub fn triangle(size: IVec2, vertices: [DVec2; 3]) -> Self {
        let [a, b, c] = vertices;
        Self::from_fn(size, |x, y| {
            let p = DVec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let d1 = edge(a, b, p);
            let d2 = edge(b, c, p);
            let d3 = edge(c, a, p);
            let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
            let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
            !(has_neg && has_pos)
        })
    }

    /// Width and height of the mask.
    #[must_use]
    pub const fn size(&self) -> IVec2 {
        self.size
    }

    /// Returns whether the pixel at `(x, y)` is set; out-of-range is unset.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.size.x || y >= self.size.y {
            return false;
        }
        usize::try_from(y * self.size.x + x)
            .ok()
            .and_then(|index| self.bits.get(index).copied())
            .unwrap_or(false)
    }

    /// Number of set pixels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    /// Tests whether two masks placed at the given origins share a set pixel.
    #[must_use]
    pub fn overlaps(&self, origin: IVec2, other: &Self, other_origin: IVec2) -> bool {
        let mine = Aabb::from_origin_size(origin, self.size);
        let theirs = Aabb::from_origin_size(other_origin, other.size);
        let Some(shared) = mine.intersection(&theirs) else {
            return false;
        };
        (shared.top()..shared.bottom()).any(|y| {
            (shared.left()..shared.right()).any(|x| {
                self.get(x - origin.x, y - origin.y)
                    && other.get(x - other_origin.x, y - other_origin.y)
            })
        })
    }
}

fn edge(from: DVec2, to: DVec2, point: DVec2) -> f64 {
    (to - from).perp_dot(point - from)
}
