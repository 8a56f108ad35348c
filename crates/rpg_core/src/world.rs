//! The world aggregate: everything the simulation owns.
//!
//! A [`World`] holds the player, the live enemy roster, the obstacles and
//! some meta state used for client feedback. The starting layout is fixed
//! and rebuilt from the tables below whenever the world is reset.

use serde::{Deserialize, Serialize};

use crate::components::EnemyId;
use crate::config::{SimulationConfig, ZONES_PER_AXIS};
use crate::data::{EnemyKind, ObstacleKind};
use crate::enemy::Enemy;
use crate::geometry::{Point, Rect};
use crate::obstacle::Obstacle;
use crate::player::Player;

/// Enemies present at the start of every game: `(id, x, y, kind)`.
pub const ENEMY_SPAWNS: [(EnemyId, i32, i32, EnemyKind); 7] = [
    (1, 100, 80, EnemyKind::Goblin),
    (2, 400, 100, EnemyKind::Troll),
    (3, 650, 120, EnemyKind::Rabbit),
    (4, 80, 300, EnemyKind::Goblin),
    (5, 350, 250, EnemyKind::Rabbit),
    (6, 700, 280, EnemyKind::Troll),
    (7, 120, 480, EnemyKind::Troll),
];

/// Obstacles of the fixed map: `(x, y, width, height, kind)`.
pub const OBSTACLE_LAYOUT: [(i32, i32, i32, i32, ObstacleKind); 7] = [
    (50, 50, 32, 32, ObstacleKind::Tree),
    (350, 60, 48, 48, ObstacleKind::Rock),
    (600, 80, 64, 32, ObstacleKind::House),
    (80, 250, 32, 32, ObstacleKind::Bush),
    (650, 220, 48, 48, ObstacleKind::Rock),
    (100, 420, 32, 32, ObstacleKind::Bush),
    (420, 450, 48, 48, ObstacleKind::Rock),
];

/// A cell of the coarse 3x3 grid the map is divided into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Zone {
    /// Column, `0..3`.
    pub x: i32,
    /// Row, `0..3`.
    pub y: i32,
}

impl Zone {
    /// Create a zone reference.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The zone a point falls in, clamped to the grid.
    #[must_use]
    pub fn containing(point: Point, map_width: i32, map_height: i32) -> Self {
        let zone_width = (map_width / ZONES_PER_AXIS).max(1);
        let zone_height = (map_height / ZONES_PER_AXIS).max(1);
        let last = ZONES_PER_AXIS - 1;
        Self {
            x: (point.x / zone_width).clamp(0, last),
            y: (point.y / zone_height).clamp(0, last),
        }
    }

    /// Manhattan distance between two zones.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// The single live game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// The player character.
    pub player: Player,
    /// Live enemies in spawn order. Dead enemies are removed immediately.
    pub enemies: Vec<Enemy>,
    /// Static scenery.
    pub obstacles: Vec<Obstacle>,
    /// Map width.
    pub width: i32,
    /// Map height.
    pub height: i32,
    /// Number of ticks applied since the world was built.
    pub elapsed_ticks: u64,
    /// False once the game has been stopped.
    pub running: bool,
    /// While set, ticks are ignored.
    pub paused: bool,
    /// Name of the last applied action.
    pub last_action: String,
    /// Human-readable outcome of the last action.
    pub message: String,
}

impl World {
    /// Build the starting layout for the given map configuration.
    ///
    /// The player starts centered with full starting stats.
    #[must_use]
    pub fn initial(config: &SimulationConfig) -> Self {
        let (width, height) = (config.map_width, config.map_height);
        let player = Player::starting_at(Point::new(width / 2, height / 2));

        let enemies = ENEMY_SPAWNS
            .iter()
            .map(|&(id, x, y, kind)| {
                let position = Point::new(x, y);
                Enemy::new(id, position, kind, Zone::containing(position, width, height))
            })
            .collect();

        let obstacles = OBSTACLE_LAYOUT
            .iter()
            .map(|&(x, y, w, h, kind)| Obstacle::new(x, y, w, h, kind))
            .collect();

        Self::from_parts(player, enemies, obstacles, width, height)
    }

    /// Assemble a world from explicit parts, e.g. for scenarios.
    #[must_use]
    pub fn from_parts(
        player: Player,
        enemies: Vec<Enemy>,
        obstacles: Vec<Obstacle>,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            player,
            enemies,
            obstacles,
            width,
            height,
            elapsed_ticks: 0,
            running: true,
            paused: false,
            last_action: String::new(),
            message: String::new(),
        }
    }

    /// Look up a live enemy by ID.
    #[must_use]
    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    /// Look up a live enemy by ID for mutation.
    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    /// Number of enemies with hit points left.
    #[must_use]
    pub fn alive_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|enemy| enemy.is_alive()).count()
    }

    /// Drop every enemy at 0 hp. Returns the removed IDs.
    pub fn remove_dead_enemies(&mut self) -> Vec<EnemyId> {
        let dead: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|enemy| !enemy.is_alive())
            .map(|enemy| enemy.id)
            .collect();
        self.enemies.retain(Enemy::is_alive);
        dead
    }

    /// The game is over once stopped or once the player has died.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self.running || !self.player.is_alive()
    }

    /// The game is won while running with no enemies left.
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.running && self.alive_enemy_count() == 0
    }

    /// Whether a point lies on the map, edges included.
    #[must_use]
    pub const fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x <= self.width && point.y >= 0 && point.y <= self.height
    }

    /// First obstacle overlapping the given area, if any.
    #[must_use]
    pub fn blocking_obstacle(&self, area: &Rect) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|obstacle| obstacle.collides_with(area))
    }

    /// The zone the player currently stands in.
    #[must_use]
    pub fn player_zone(&self) -> Zone {
        Zone::containing(self.player.position, self.width, self.height)
    }

    /// Whether a zone is the player's zone or shares an edge with it.
    #[must_use]
    pub fn is_zone_adjacent(&self, zone_x: i32, zone_y: i32) -> bool {
        self.player_zone()
            .manhattan_distance(Zone::new(zone_x, zone_y))
            <= 1
    }

    /// Panic if the roster holds a dead enemy or a duplicate ID, or the
    /// player has left the map.
    #[cfg(feature = "debug-validation")]
    pub fn assert_invariants(&self) {
        let mut ids: Vec<EnemyId> = self.enemies.iter().map(|enemy| enemy.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), self.enemies.len(), "duplicate enemy IDs");
        assert!(
            self.enemies.iter().all(Enemy::is_alive),
            "dead enemy left in roster"
        );
        assert!(
            self.in_bounds(self.player.position),
            "player outside the map at {:?}",
            self.player.position
        );
    }

    /// Record the outcome of an action for clients.
    pub fn record(&mut self, action: &str, message: impl Into<String>) {
        self.last_action.clear();
        self.last_action.push_str(action);
        self.message = message.into();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::initial(&SimulationConfig::default())
    }
}
