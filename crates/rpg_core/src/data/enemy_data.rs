//! Enemy species and their per-kind stat table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Behavior class an enemy follows each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Pursues and attacks the player once within aggro distance.
    Aggressive,
    /// Idles with an occasional wander, engages like [`Behavior::Aggressive`] up close.
    Patrol,
    /// Runs directly away from the player once within aggro distance.
    Flee,
}

/// The closed set of enemy species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnemyKind {
    /// Fast, aggressive melee enemy.
    Goblin,
    /// Slow, heavy patroller.
    Troll,
    /// Skittish critter that flees.
    Rabbit,
}

/// Full stat row for one enemy kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyStats {
    /// Display name.
    pub name: &'static str,
    /// Short flavor description.
    pub description: &'static str,
    /// Maximum (and starting) hit points.
    pub max_hp: u32,
    /// Raw attack before the player's defense is applied.
    pub attack: u32,
    /// Movement per tick when chasing or fleeing (fractional).
    pub speed: f64,
    /// Distance under which the enemy reacts to the player.
    pub aggro_distance: f64,
    /// Body size in map units (render hint).
    pub size: i32,
    /// Distance at or under which the enemy can hit the player.
    pub attack_range: f64,
    /// Minimum time between attacks, in milliseconds.
    pub attack_cooldown_ms: u64,
    /// Render color.
    pub color: &'static str,
    /// Behavior class evaluated every tick.
    pub behavior: Behavior,
    /// Experience granted to the player on kill.
    pub exp_reward: u32,
    /// Score granted to the player on kill.
    pub score_reward: u32,
}

static ENEMY_TABLE: [EnemyStats; 3] = [
    EnemyStats {
        name: "Goblin",
        description: "Aggressive enemy that chases the player",
        max_hp: 40,
        attack: 15,
        speed: 1.5,
        aggro_distance: 100.0,
        size: 16,
        attack_range: 25.0,
        attack_cooldown_ms: 1000,
        color: "#FF5722",
        behavior: Behavior::Aggressive,
        exp_reward: 20,
        score_reward: 100,
    },
    EnemyStats {
        name: "Troll",
        description: "Patrols its area and attacks when the player comes close",
        max_hp: 120,
        attack: 30,
        speed: 0.5,
        aggro_distance: 80.0,
        size: 32,
        attack_range: 40.0,
        attack_cooldown_ms: 2000,
        color: "#9C27B0",
        behavior: Behavior::Patrol,
        exp_reward: 50,
        score_reward: 250,
    },
    EnemyStats {
        name: "Rabbit",
        description: "Timid creature that runs away when the player approaches",
        max_hp: 25,
        attack: 8,
        speed: 2.5,
        aggro_distance: 70.0,
        size: 12,
        attack_range: 15.0,
        attack_cooldown_ms: 800,
        color: "#8BC34A",
        behavior: Behavior::Flee,
        exp_reward: 15,
        score_reward: 50,
    },
];

impl EnemyKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 3] = [Self::Goblin, Self::Troll, Self::Rabbit];

    const fn index(self) -> usize {
        match self {
            Self::Goblin => 0,
            Self::Troll => 1,
            Self::Rabbit => 2,
        }
    }

    /// The stat row for this kind.
    #[must_use]
    pub fn stats(self) -> &'static EnemyStats {
        &ENEMY_TABLE[self.index()]
    }

    /// The behavior class for this kind.
    #[must_use]
    pub fn behavior(self) -> Behavior {
        self.stats().behavior
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stats().name)
    }
}

impl FromStr for EnemyKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.stats().name.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownEnemyKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_line_up_with_kinds() {
        for kind in EnemyKind::ALL {
            assert_eq!(kind.to_string(), kind.stats().name);
        }
    }

    #[test]
    fn test_goblin_row() {
        let stats = EnemyKind::Goblin.stats();
        assert_eq!(stats.max_hp, 40);
        assert_eq!(stats.attack, 15);
        assert!((stats.speed - 1.5).abs() < f64::EPSILON);
        assert_eq!(stats.attack_cooldown_ms, 1000);
        assert_eq!((stats.exp_reward, stats.score_reward), (20, 100));
        assert_eq!(EnemyKind::Goblin.behavior(), Behavior::Aggressive);
    }

    #[test]
    fn test_troll_row() {
        let stats = EnemyKind::Troll.stats();
        assert_eq!(stats.max_hp, 120);
        assert_eq!(stats.attack, 30);
        assert!((stats.speed - 0.5).abs() < f64::EPSILON);
        assert!((stats.attack_range - 40.0).abs() < f64::EPSILON);
        assert_eq!((stats.exp_reward, stats.score_reward), (50, 250));
        assert_eq!(EnemyKind::Troll.behavior(), Behavior::Patrol);
    }

    #[test]
    fn test_rabbit_row() {
        let stats = EnemyKind::Rabbit.stats();
        assert_eq!(stats.max_hp, 25);
        assert_eq!(stats.attack, 8);
        assert!((stats.speed - 2.5).abs() < f64::EPSILON);
        assert!((stats.aggro_distance - 70.0).abs() < f64::EPSILON);
        assert_eq!((stats.exp_reward, stats.score_reward), (15, 50));
        assert_eq!(EnemyKind::Rabbit.behavior(), Behavior::Flee);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("troll".parse::<EnemyKind>(), Ok(EnemyKind::Troll));
        assert_eq!("RABBIT".parse::<EnemyKind>(), Ok(EnemyKind::Rabbit));
        assert_eq!(
            "dragon".parse::<EnemyKind>(),
            Err(GameError::UnknownEnemyKind("dragon".to_string()))
        );
    }
}
