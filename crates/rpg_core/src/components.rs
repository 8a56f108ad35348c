//! Building blocks shared by the player and enemy records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Unique identifier of an enemy within one world.
pub type EnemyId = u32;

/// Hit points for damageable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Health {
    /// Current health points.
    #[serde(rename = "hp")]
    pub current: u32,
    /// Maximum health points.
    #[serde(rename = "max_hp")]
    pub max: u32,
}

impl Health {
    /// Create new health at full.
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Check if the entity is dead (health == 0).
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Check if the entity is at full health.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Apply damage, returning actual damage dealt.
    /// Uses saturating subtraction to prevent underflow.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current = self.current.saturating_sub(actual);
        actual
    }

    /// Heal, returning actual amount healed.
    /// Never exceeds the maximum.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let headroom = self.max.saturating_sub(self.current);
        let actual = amount.min(headroom);
        self.current = self.current.saturating_add(actual);
        actual
    }

    /// Raise the maximum and refill to it.
    pub fn raise_max_and_refill(&mut self, bonus: u32) {
        self.max = self.max.saturating_add(bonus);
        self.current = self.max;
    }

    /// Whole-number share of max hit points left, 0 to 100.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.max == 0 {
            return 0;
        }
        let share = u64::from(self.current) * 100 / u64::from(self.max);
        u32::try_from(share).unwrap_or(100)
    }
}

/// One of the four movement directions accepted from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards y = 0.
    Up,
    /// Towards the bottom edge.
    #[default]
    Down,
    /// Towards x = 0.
    Left,
    /// Towards the right edge.
    Right,
}

impl Direction {
    /// Every direction, in client menu order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit step along this direction as `(dx, dy)`.
    #[must_use]
    pub const fn unit(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Lowercase name as clients spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Parses a direction, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_saturates() {
        let mut health = Health::new(30);
        assert_eq!(health.apply_damage(12), 12);
        assert_eq!(health.current, 18);
        assert_eq!(health.apply_damage(100), 18);
        assert!(health.is_dead());
    }

    #[test]
    fn test_health_heal_caps_at_max() {
        let mut health = Health::new(100);
        health.apply_damage(50);
        assert_eq!(health.heal(30), 30);
        assert_eq!(health.heal(100), 20);
        assert!(health.is_full());
        assert_eq!(health.percentage(), 100);
    }

    #[test]
    fn test_percentage_of_large_pools() {
        let mut health = Health::new(u32::MAX);
        assert_eq!(health.percentage(), 100);
        health.apply_damage(u32::MAX / 2 + 1);
        assert_eq!(health.percentage(), 49);
        assert_eq!(Health { current: 0, max: 0 }.percentage(), 0);
    }

    #[test]
    fn test_raise_max_refills() {
        let mut health = Health::new(100);
        health.apply_damage(70);
        health.raise_max_and_refill(20);
        assert_eq!(health, Health::new(120));
    }

    #[test]
    fn test_direction_parse_ignores_case() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert!(matches!(
            "north".parse::<Direction>(),
            Err(GameError::InvalidDirection(_))
        ));
    }

    #[test]
    fn test_direction_units_are_axis_aligned() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.unit();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }
}
