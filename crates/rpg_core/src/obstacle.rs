//! Static map obstacles.

use serde::{Deserialize, Serialize};

use crate::data::{ObstacleKind, ObstacleStats};
use crate::geometry::Rect;

/// An immutable rectangle of scenery.
///
/// Obstacles carry a passability notion through their kind's speed factor,
/// but player movement treats every obstacle as blocking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Occupied area.
    #[serde(flatten)]
    pub rect: Rect,
    /// Obstacle kind.
    #[serde(rename = "type")]
    pub kind: ObstacleKind,
    /// Whether the kind is declared solid.
    pub solid: bool,
}

impl Obstacle {
    /// Create an obstacle; solidity comes from the kind.
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32, kind: ObstacleKind) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind,
            solid: kind.stats().solid,
        }
    }

    /// Property row for this obstacle's kind.
    #[must_use]
    pub fn stats(&self) -> &'static ObstacleStats {
        self.kind.stats()
    }

    /// Whether a point lies inside the obstacle.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.contains(x, y)
    }

    /// Whether a rectangle overlaps the obstacle.
    #[must_use]
    pub const fn collides_with(&self, other: &Rect) -> bool {
        self.rect.intersects(other)
    }

    /// Movement speed multiplier declared for the kind.
    #[must_use]
    pub fn speed_factor(&self) -> f64 {
        self.stats().speed_factor
    }

    /// Whether the kind declares the obstacle crossable at all.
    #[must_use]
    pub fn is_passable(&self) -> bool {
        self.speed_factor() > 0.0
    }
}
