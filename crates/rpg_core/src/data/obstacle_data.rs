//! Obstacle kinds and their per-kind properties.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of obstacle kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObstacleKind {
    /// A large tree.
    Tree,
    /// A boulder.
    Rock,
    /// Low shrubbery.
    Bush,
    /// A building.
    House,
    /// Shallow water.
    Water,
}

/// Property row for one obstacle kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleStats {
    /// Display name.
    pub name: &'static str,
    /// Short flavor description.
    pub description: &'static str,
    /// Whether the obstacle is declared solid.
    pub solid: bool,
    /// Passage speed multiplier: 0.0 blocks, 1.0 is unhindered.
    pub speed_factor: f64,
    /// Render color.
    pub color: &'static str,
    /// Whether the obstacle could be destroyed.
    pub destructible: bool,
    /// Hit points if the obstacle were attacked; `None` means indestructible.
    pub hit_points: Option<u32>,
}

static OBSTACLE_TABLE: [ObstacleStats; 5] = [
    ObstacleStats {
        name: "Tree",
        description: "A tall tree that blocks the way",
        solid: true,
        speed_factor: 0.0,
        color: "#4CAF50",
        destructible: false,
        hit_points: Some(100),
    },
    ObstacleStats {
        name: "Rock",
        description: "A solid boulder that cannot be crossed",
        solid: true,
        speed_factor: 0.0,
        color: "#9E9E9E",
        destructible: false,
        hit_points: Some(200),
    },
    ObstacleStats {
        name: "Bush",
        description: "A bush that can be pushed through slowly",
        solid: false,
        speed_factor: 0.5,
        color: "#8BC34A",
        destructible: true,
        hit_points: Some(10),
    },
    ObstacleStats {
        name: "House",
        description: "A sturdy building",
        solid: true,
        speed_factor: 0.0,
        color: "#795548",
        destructible: false,
        hit_points: None,
    },
    ObstacleStats {
        name: "Water",
        description: "A stretch of water that slows movement",
        solid: false,
        speed_factor: 0.3,
        color: "#2196F3",
        destructible: false,
        hit_points: None,
    },
];

impl ObstacleKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 5] = [Self::Tree, Self::Rock, Self::Bush, Self::House, Self::Water];

    const fn index(self) -> usize {
        match self {
            Self::Tree => 0,
            Self::Rock => 1,
            Self::Bush => 2,
            Self::House => 3,
            Self::Water => 4,
        }
    }

    /// The property row for this kind.
    #[must_use]
    pub fn stats(self) -> &'static ObstacleStats {
        &OBSTACLE_TABLE[self.index()]
    }
}

impl fmt::Display for ObstacleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stats().name)
    }
}
