//! Enemy records.
//!
//! An enemy's numbers always come from its kind's row in
//! [`EnemyKind::stats`]. Only position, current hit points and the attack
//! bookkeeping vary per instance.

use serde::{Deserialize, Serialize};

use crate::components::{EnemyId, Health};
use crate::data::{EnemyKind, EnemyStats};
use crate::geometry::Point;
use crate::world::Zone;

/// A live enemy on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique ID, assigned in spawn order.
    pub id: EnemyId,
    /// Current position.
    #[serde(flatten)]
    pub position: Point,
    /// Current and maximum hit points.
    #[serde(flatten)]
    pub health: Health,
    /// Attack copied from the stat table.
    pub attack: u32,
    /// Movement speed copied from the stat table.
    pub speed: f64,
    /// Species.
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    /// Zone the enemy was spawned in.
    pub home_zone: Zone,
    /// Set only while an attack on the player is being resolved.
    pub attacking: bool,
    /// Timestamp of the last landed attack, in milliseconds.
    pub last_attack_ms: u64,
}

impl Enemy {
    /// Spawn an enemy with full stats for its kind.
    #[must_use]
    pub fn new(id: EnemyId, position: Point, kind: EnemyKind, home_zone: Zone) -> Self {
        let stats = kind.stats();
        Self {
            id,
            position,
            health: Health::new(stats.max_hp),
            attack: stats.attack,
            speed: stats.speed,
            kind,
            home_zone,
            attacking: false,
            last_attack_ms: 0,
        }
    }

    /// Stat row for this enemy's kind.
    #[must_use]
    pub fn stats(&self) -> &'static EnemyStats {
        self.kind.stats()
    }

    /// Change species, re-deriving every stat from the table.
    ///
    /// Hit points are restored to the new maximum.
    pub fn set_kind(&mut self, kind: EnemyKind) {
        let stats = kind.stats();
        self.kind = kind;
        self.health = Health::new(stats.max_hp);
        self.attack = stats.attack;
        self.speed = stats.speed;
    }

    /// Whether the enemy still has hit points.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    /// Take unmitigated damage. Returns the damage actually applied.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.health.apply_damage(damage)
    }

    /// Whether the per-kind cooldown has elapsed at `now_ms`.
    ///
    /// The active attack path does not consult this; attacks are gated only
    /// by distance and the `attacking` flag.
    #[must_use]
    pub fn can_attack(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_attack_ms) > self.stats().attack_cooldown_ms
    }

    /// Distance from this enemy to a point.
    #[must_use]
    pub fn distance_to(&self, point: Point) -> f64 {
        self.position.distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> Enemy {
        Enemy::new(1, Point::new(100, 80), EnemyKind::Goblin, Zone::new(0, 0))
    }

    #[test]
    fn test_spawn_uses_table() {
        let enemy = goblin();
        assert_eq!(enemy.health, Health::new(40));
        assert_eq!(enemy.attack, 15);
        assert!((enemy.speed - 1.5).abs() < f64::EPSILON);
        assert!(!enemy.attacking);
        assert_eq!(enemy.last_attack_ms, 0);
    }

    #[test]
    fn test_damage_has_no_mitigation() {
        let mut enemy = goblin();
        assert_eq!(enemy.take_damage(7), 7);
        assert_eq!(enemy.health.current, 33);
        assert_eq!(enemy.take_damage(1000), 33);
        assert_eq!(enemy.health.current, 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_set_kind_rederives_all_stats() {
        let mut enemy = goblin();
        enemy.take_damage(10);
        enemy.set_kind(EnemyKind::Troll);

        assert_eq!(enemy.kind, EnemyKind::Troll);
        assert_eq!(enemy.health, Health::new(120));
        assert_eq!(enemy.attack, 30);
        assert!((enemy.speed - 0.5).abs() < f64::EPSILON);
        assert_eq!(enemy.stats().attack_cooldown_ms, 2000);
    }

    #[test]
    fn test_can_attack_after_cooldown() {
        let mut enemy = goblin();
        enemy.last_attack_ms = 5_000;
        assert!(!enemy.can_attack(5_500));
        assert!(!enemy.can_attack(6_000));
        assert!(enemy.can_attack(6_001));
    }
}
