//! The player character and its progression rules.

use serde::{Deserialize, Serialize};

use crate::components::{Direction, Health};
use crate::geometry::Point;

/// Experience needed to gain one level.
pub const EXP_PER_LEVEL: u32 = 100;

/// Max HP gained per level.
pub const LEVEL_UP_MAX_HP: u32 = 20;

/// Attack gained per level.
pub const LEVEL_UP_ATTACK: u32 = 5;

/// Defense gained per level.
pub const LEVEL_UP_DEFENSE: u32 = 2;

/// Starting max HP of a fresh player.
pub const STARTING_MAX_HP: u32 = 100;

/// Starting attack of a fresh player.
pub const STARTING_ATTACK: u32 = 25;

/// Starting defense of a fresh player.
pub const STARTING_DEFENSE: u32 = 5;

/// The single player character.
///
/// The player is never removed from the world; death is `hp == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Center of the player's collision square.
    #[serde(flatten)]
    pub position: Point,
    /// Current and maximum hit points.
    #[serde(flatten)]
    pub health: Health,
    /// Base attack before the per-swing roll.
    pub attack: u32,
    /// Flat reduction applied to incoming hits.
    pub defense: u32,
    /// Current level, starting at 1 and never decreasing.
    pub level: u32,
    /// Experience accumulated towards the next level.
    pub exp: u32,
    /// Total score earned from kills.
    pub score: u32,
    /// Direction the player last asked to move in.
    pub facing: Direction,
    /// Set only while an attack is being resolved.
    pub attacking: bool,
}

impl Player {
    /// Create a level-1 player with the given stats at full health.
    #[must_use]
    pub fn new(position: Point, max_hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            position,
            health: Health::new(max_hp),
            attack,
            defense,
            level: 1,
            exp: 0,
            score: 0,
            facing: Direction::Down,
            attacking: false,
        }
    }

    /// A fresh player with the default starting stats.
    #[must_use]
    pub fn starting_at(position: Point) -> Self {
        Self::new(position, STARTING_MAX_HP, STARTING_ATTACK, STARTING_DEFENSE)
    }

    /// Current hit points.
    #[must_use]
    pub const fn hp(&self) -> u32 {
        self.health.current
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max_hp(&self) -> u32 {
        self.health.max
    }

    /// Whether the player still has hit points.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    /// Take a hit, reduced by defense but never below 1.
    ///
    /// Returns the damage actually applied.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let effective = damage.saturating_sub(self.defense).max(1);
        self.health.apply_damage(effective)
    }

    /// Restore hit points up to the maximum. Returns the amount healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health.heal(amount)
    }

    /// Add experience and apply every level-up it pays for.
    ///
    /// Surplus experience carries into the next level, so one large reward
    /// can grant several levels. Returns the number of levels gained.
    pub fn gain_exp(&mut self, points: u32) -> u32 {
        self.exp = self.exp.saturating_add(points);
        let mut gained = 0;
        while self.exp >= EXP_PER_LEVEL {
            self.exp -= EXP_PER_LEVEL;
            self.level_up();
            gained += 1;
        }
        gained
    }

    /// Add to the running score.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Experience still missing for the next level.
    #[must_use]
    pub const fn exp_to_next_level(&self) -> u32 {
        EXP_PER_LEVEL.saturating_sub(self.exp)
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.health.raise_max_and_refill(LEVEL_UP_MAX_HP);
        self.attack += LEVEL_UP_ATTACK;
        self.defense += LEVEL_UP_DEFENSE;
        tracing::info!(level = self.level, max_hp = self.health.max, "Player levelled up");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_player() -> Player {
        Player::new(Point::new(100, 100), 100, 25, 5)
    }

    #[test]
    fn test_alive_and_dead() {
        let mut player = test_player();
        assert!(player.is_alive());
        player.health.current = 0;
        assert!(!player.is_alive());
    }

    #[test]
    fn test_heal_does_not_exceed_max() {
        let mut player = test_player();
        player.health.current = 50;
        player.heal(100);
        assert_eq!(player.hp(), player.max_hp());
    }

    #[test]
    fn test_heal_works() {
        let mut player = test_player();
        player.health.current = 50;
        assert_eq!(player.heal(30), 30);
        assert_eq!(player.hp(), 80);
    }

    #[test]
    fn test_damage_reduced_by_defense() {
        let mut player = test_player();
        assert_eq!(player.take_damage(20), 15);
        assert_eq!(player.hp(), 85);
    }

    #[test]
    fn test_damage_is_at_least_one() {
        let mut player = test_player();
        // 3 - 5 defense would be negative
        assert_eq!(player.take_damage(3), 1);
        assert_eq!(player.take_damage(0), 1);
        assert_eq!(player.hp(), 98);
    }

    #[test]
    fn test_hp_floors_at_zero() {
        let mut player = test_player();
        player.take_damage(500);
        assert_eq!(player.hp(), 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_exact_threshold_levels_up_and_resets_exp() {
        let mut player = test_player();
        player.exp = 99;
        assert_eq!(player.gain_exp(1), 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.exp, 0);
    }

    #[test]
    fn test_level_up_raises_stats_and_refills() {
        let mut player = test_player();
        player.health.current = 10;
        player.exp = 100;
        player.gain_exp(0);

        assert_eq!(player.level, 2);
        assert_eq!(player.max_hp(), 120);
        assert_eq!(player.hp(), 120);
        assert_eq!(player.attack, 30);
        assert_eq!(player.defense, 7);
    }

    #[test]
    fn test_large_reward_grants_several_levels() {
        let mut player = test_player();
        assert_eq!(player.gain_exp(250), 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.exp, 50);
        assert_eq!(player.exp_to_next_level(), 50);
    }

    #[test]
    fn test_defaults() {
        let player = Player::starting_at(Point::new(400, 300));
        assert_eq!(player.facing, Direction::Down);
        assert!(!player.attacking);
        assert_eq!((player.hp(), player.max_hp()), (100, 100));
        assert_eq!((player.level, player.exp, player.score), (1, 0, 0));
    }
}
