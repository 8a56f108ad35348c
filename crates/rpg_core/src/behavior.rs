//! Per-tick enemy decision making.
//!
//! Behavior is a pure function of the enemy's kind, its position and the
//! player's position. Nothing is remembered between ticks apart from the
//! position itself, so there is no mode field to keep in sync.
//!
//! | Behavior | Within aggro distance | Otherwise |
//! |---|---|---|
//! | Aggressive | step toward the player, then try to hit | stand still |
//! | Patrol | same as Aggressive | occasional random unit wander |
//! | Flee | step directly away from the player | stand still |
//!
//! Enemies ignore obstacles, map bounds and each other.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::enemy_attack;
use crate::components::EnemyId;
use crate::config::SimulationConfig;
use crate::data::Behavior;
use crate::enemy::Enemy;
use crate::geometry::Point;
use crate::player::Player;

/// What an enemy decided to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EnemyAction {
    /// Stayed put.
    Idle,
    /// Moved toward the player.
    Chase,
    /// Moved away from the player.
    Flee,
    /// Took a random idle step.
    Wander {
        /// Horizontal step, `-1..=1`.
        dx: i32,
        /// Vertical step, `-1..=1`.
        dy: i32,
    },
}

/// Outcome of one enemy's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTurn {
    /// Enemy that acted.
    pub enemy_id: EnemyId,
    /// Movement decision.
    pub action: EnemyAction,
    /// Damage dealt to the player, if it attacked.
    pub damage_dealt: Option<u32>,
}

/// Integer step of length `speed` along the direction from `from` to `to`.
///
/// Each component is truncated toward zero, so slow enemies may not move
/// on diagonals. Returns `(0, 0)` when the points coincide.
#[must_use]
pub fn step_toward(from: Point, to: Point, speed: f64) -> (i32, i32) {
    let dx = f64::from(to.x) - f64::from(from.x);
    let dy = f64::from(to.y) - f64::from(from.y);
    let distance = (dx * dx + dy * dy).sqrt();
    if distance <= 0.0 {
        return (0, 0);
    }
    ((dx / distance * speed) as i32, (dy / distance * speed) as i32)
}

/// Move an enemy one step toward a point.
pub fn move_toward(enemy: &mut Enemy, target: Point) {
    let (dx, dy) = step_toward(enemy.position, target, enemy.speed);
    enemy.position = enemy.position.offset(dx, dy);
}

/// Move an enemy one step directly away from a point.
pub fn move_away(enemy: &mut Enemy, threat: Point) {
    let (dx, dy) = step_toward(enemy.position, threat, enemy.speed);
    enemy.position = enemy.position.offset(-dx, -dy);
}

/// Run one enemy's turn against the player.
pub fn update_enemy<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    player: &mut Player,
    config: &SimulationConfig,
    rng: &mut R,
) -> EnemyTurn {
    let target = player.position;
    let distance = enemy.distance_to(target);
    let engaged = distance < enemy.stats().aggro_distance;

    let (action, damage_dealt) = match enemy.kind.behavior() {
        Behavior::Aggressive | Behavior::Patrol if engaged => {
            move_toward(enemy, target);
            (EnemyAction::Chase, enemy_attack(enemy, player, distance))
        }
        Behavior::Patrol => (wander(enemy, config, rng), None),
        Behavior::Flee if engaged => {
            move_away(enemy, target);
            (EnemyAction::Flee, None)
        }
        Behavior::Aggressive | Behavior::Flee => (EnemyAction::Idle, None),
    };

    EnemyTurn {
        enemy_id: enemy.id,
        action,
        damage_dealt,
    }
}

fn wander<R: Rng + ?Sized>(enemy: &mut Enemy, config: &SimulationConfig, rng: &mut R) -> EnemyAction {
    if rng.gen_range(0..100) >= config.patrol_wander_percent {
        return EnemyAction::Idle;
    }
    let dx = rng.gen_range(-1..=1);
    let dy = rng.gen_range(-1..=1);
    enemy.position = enemy.position.offset(dx, dy);
    EnemyAction::Wander { dx, dy }
}
