//! Spike footprint: the half tile a spike occupies and its triangle mask.

use glam::{DVec2, IVec2};

use crate::geometry::{Aabb, Orientation, PixelMask};

/// Collision box and pixel mask for a spike placed in the tile whose
/// top-left corner is `tile_origin`.
///
/// The spike sits on the half of the tile opposite its tip: a spike pointing
/// `Up` fills the bottom half, one pointing `Left` fills the right half. The
/// mask is the triangle from the two base corners to the tip at the tile
/// centre.
///
/// # Examples
/// ```
/// use flipside::geometry::{Aabb, Orientation};
/// use flipside::hazards::spike_footprint;
/// use glam::IVec2;
///
/// let (aabb, mask) = spike_footprint(IVec2::new(40, 80), 40, Orientation::Up);
/// assert_eq!(aabb, Aabb::new(40, 100, 40, 20));
/// assert!(mask.get(20, 19));
/// assert!(!mask.get(0, 0));
/// ```
#[must_use]
pub fn spike_footprint(tile_origin: IVec2, tile_size: i32, tip: Orientation) -> (Aabb, PixelMask) {
    let half = tile_size / 2;
    let (full, half_f) = (f64::from(tile_size), f64::from(half));
    let (offset, size, vertices) = match tip {
        Orientation::Up => (
            IVec2::new(0, half),
            IVec2::new(tile_size, tile_size - half),
            [
                DVec2::new(0.0, half_f),
                DVec2::new(full, half_f),
                DVec2::new(full / 2.0, 0.0),
            ],
        ),
        Orientation::Down => (
            IVec2::ZERO,
            IVec2::new(tile_size, half),
            [
                DVec2::new(0.0, 0.0),
                DVec2::new(full, 0.0),
                DVec2::new(full / 2.0, half_f),
            ],
        ),
        Orientation::Left => (
            IVec2::new(half, 0),
            IVec2::new(tile_size - half, tile_size),
            [
                DVec2::new(half_f, 0.0),
                DVec2::new(half_f, full),
                DVec2::new(0.0, full / 2.0),
            ],
        ),
        Orientation::Right => (
            IVec2::ZERO,
            IVec2::new(half, tile_size),
            [
                DVec2::new(0.0, 0.0),
                DVec2::new(0.0, full),
                DVec2::new(half_f, full / 2.0),
            ],
        ),
    };
    (
        Aabb::from_origin_size(tile_origin + offset, size),
        PixelMask::triangle(size, vertices),
    )
}
