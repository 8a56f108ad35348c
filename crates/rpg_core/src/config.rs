//! Tunable simulation constants.
//!
//! The defaults are the reference game rules; servers may load overrides
//! from a data file.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Map width in map units.
pub const MAP_WIDTH: i32 = 800;

/// Map height in map units.
pub const MAP_HEIGHT: i32 = 600;

/// Distance the player covers per move.
pub const PLAYER_STEP: i32 = 3;

/// Half the side of the player's collision square.
pub const PLAYER_HALF_SIZE: i32 = 8;

/// Reach of the player's attack, center to center.
pub const ATTACK_RADIUS: f64 = 50.0;

/// Lowest offset added to the player's attack per hit.
pub const DAMAGE_ROLL_MIN: i32 = -5;

/// Highest offset added to the player's attack per hit.
pub const DAMAGE_ROLL_MAX: i32 = 4;

/// Chance per tick, in percent, that an idle patroller wanders.
pub const PATROL_WANDER_PERCENT: u32 = 5;

/// Number of zones along each axis of the map.
pub const ZONES_PER_AXIS: i32 = 3;

/// Configuration for one simulation instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Map width; valid x positions are `0..=map_width`.
    pub map_width: i32,
    /// Map height; valid y positions are `0..=map_height`.
    pub map_height: i32,
    /// Distance the player covers per move.
    pub player_step: i32,
    /// Half the side of the player's collision square.
    pub player_half_size: i32,
    /// Reach of the player's attack.
    pub attack_radius: f64,
    /// Lowest per-hit damage offset.
    pub damage_roll_min: i32,
    /// Highest per-hit damage offset (inclusive).
    pub damage_roll_max: i32,
    /// Per-tick idle wander chance for patrollers, in percent.
    pub patrol_wander_percent: u32,
    /// Seed for the simulation RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            player_step: PLAYER_STEP,
            player_half_size: PLAYER_HALF_SIZE,
            attack_radius: ATTACK_RADIUS,
            damage_roll_min: DAMAGE_ROLL_MIN,
            damage_roll_max: DAMAGE_ROLL_MAX,
            patrol_wander_percent: PATROL_WANDER_PERCENT,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Default rules with a fixed RNG seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check that the values describe a playable map.
    pub fn validate(&self) -> Result<()> {
        if self.map_width <= 0 || self.map_height <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "map must have a positive size, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.player_step <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "player_step must be positive, got {}",
                self.player_step
            )));
        }
        if self.player_half_size < 0 {
            return Err(GameError::InvalidConfig(format!(
                "player_half_size must not be negative, got {}",
                self.player_half_size
            )));
        }
        if self.attack_radius.is_nan() || self.attack_radius < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "attack_radius must not be negative, got {}",
                self.attack_radius
            )));
        }
        if self.damage_roll_min > self.damage_roll_max {
            return Err(GameError::InvalidConfig(format!(
                "damage roll range is empty: {}..={}",
                self.damage_roll_min, self.damage_roll_max
            )));
        }
        if self.patrol_wander_percent > 100 {
            return Err(GameError::InvalidConfig(format!(
                "patrol_wander_percent must be at most 100, got {}",
                self.patrol_wander_percent
            )));
        }
        Ok(())
    }
}
