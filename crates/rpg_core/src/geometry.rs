//! Integer geometry for the top-down map.
//!
//! Positions live on an integer grid measured in map units. Collision is
//! resolved with axis-aligned bounding boxes and ranges are measured with
//! plain Euclidean distance; the world holds tens of entities, so every
//! check is a brute-force scan.

use serde::{Deserialize, Serialize};

/// A point on the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (grows to the right).
    pub x: i32,
    /// Y coordinate (grows downwards).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Origin of the map.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        distance(self.x, self.y, other.x, other.y)
    }

    /// Offset this point by the given deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in map units.
    pub width: i32,
    /// Height in map units.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A square of side `2 * half_size` centered on `center`.
    #[must_use]
    pub const fn centered_square(center: Point, half_size: i32) -> Self {
        Self {
            x: center.x - half_size,
            y: center.y - half_size,
            width: half_size * 2,
            height: half_size * 2,
        }
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the point lies within `[x, x + width) x [y, y + height)`.
    #[must_use]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Whether two rectangles overlap.
    ///
    /// Overlap is strict on both axes: rectangles that only share an edge
    /// do not intersect.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Euclidean distance between two grid points.
#[must_use]
pub fn distance(x1: i32, y1: i32, x2: i32, y2: i32) -> f64 {
    let dx = f64::from(x2) - f64::from(x1);
    let dy = f64::from(y2) - f64::from(y1);
    (dx * dx + dy * dy).sqrt()
}
