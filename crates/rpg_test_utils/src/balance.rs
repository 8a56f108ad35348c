//! Encounter statistics for balance testing.
//!
//! Runs many seeded one-on-one fights between a fresh player and a single
//! enemy to check that the stat tables produce the intended difficulty.
//! Each round the player swings once, then the enemy takes its turn.

use std::ops::Range;

use rpg_core::data::EnemyKind;
use serde::{Deserialize, Serialize};

use crate::fixtures::{simulation_with_enemy, PLAYER_START};

/// Outcome of one simulated encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterResult {
    /// The opponent.
    pub kind: EnemyKind,
    /// Whether the enemy died before the player.
    pub player_won: bool,
    /// Swings the player made.
    pub swings: u32,
    /// Total damage the player took.
    pub damage_taken: u32,
}

/// Statistics for a set of encounters against one kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterStats {
    /// Total encounters run.
    pub encounters: u32,
    /// Encounters the player won.
    pub player_wins: u32,
    /// Average swings per encounter.
    pub avg_swings: f64,
    /// Average damage taken per encounter.
    pub avg_damage_taken: f64,
    /// Fewest swings any won encounter needed.
    pub min_swings_to_win: Option<u32>,
    /// Most swings any won encounter needed.
    pub max_swings_to_win: Option<u32>,
}

impl EncounterStats {
    /// Fraction of encounters the player won (0.0 to 1.0).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.encounters == 0 {
            return 0.0;
        }
        f64::from(self.player_wins) / f64::from(self.encounters)
    }

    fn record(&mut self, result: &EncounterResult) {
        let n = f64::from(self.encounters);
        self.avg_swings = (self.avg_swings * n + f64::from(result.swings)) / (n + 1.0);
        self.avg_damage_taken =
            (self.avg_damage_taken * n + f64::from(result.damage_taken)) / (n + 1.0);
        self.encounters += 1;

        if result.player_won {
            self.player_wins += 1;
            self.min_swings_to_win = Some(
                self.min_swings_to_win
                    .map_or(result.swings, |min| min.min(result.swings)),
            );
            self.max_swings_to_win = Some(
                self.max_swings_to_win
                    .map_or(result.swings, |max| max.max(result.swings)),
            );
        }
    }
}

/// Fight one enemy standing on the player's start position.
///
/// Stops when either side dies or after `max_rounds` rounds.
#[must_use]
pub fn run_encounter(kind: EnemyKind, seed: u64, max_rounds: u32) -> EncounterResult {
    let mut sim = simulation_with_enemy(seed, kind, PLAYER_START);
    let mut result = EncounterResult {
        kind,
        player_won: false,
        swings: 0,
        damage_taken: 0,
    };

    for _ in 0..max_rounds {
        if sim.resolve_attack().is_none() {
            break;
        }
        result.swings += 1;
        if sim.get_state().enemies.is_empty() {
            result.player_won = true;
            break;
        }

        if let Some(report) = sim.advance() {
            result.damage_taken += report.damage_taken;
        }
        if !sim.get_state().player.is_alive() {
            break;
        }
    }

    tracing::debug!(
        %kind,
        seed,
        won = result.player_won,
        swings = result.swings,
        damage_taken = result.damage_taken,
        "Encounter finished"
    );
    result
}

/// Run one encounter per seed and aggregate the results.
#[must_use]
pub fn run_encounters(kind: EnemyKind, seeds: Range<u64>, max_rounds: u32) -> EncounterStats {
    let mut stats = EncounterStats::default();
    for seed in seeds {
        stats.record(&run_encounter(kind, seed, max_rounds));
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rabbit_falls_in_one_or_two_swings() {
        let stats = run_encounters(EnemyKind::Rabbit, 0..200, 20);
        assert_eq!(stats.encounters, 200);
        assert_eq!(stats.player_wins, 200);
        assert!((stats.avg_damage_taken).abs() < f64::EPSILON);
        assert!(stats.min_swings_to_win >= Some(1));
        assert!(stats.max_swings_to_win <= Some(2));
    }

    #[test]
    fn test_goblin_always_takes_two_swings() {
        // 40 hp against hits of 20..=29
        let stats = run_encounters(EnemyKind::Goblin, 0..100, 20);
        assert!((stats.win_rate() - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.min_swings_to_win, Some(2));
        assert_eq!(stats.max_swings_to_win, Some(2));
        // One goblin turn between the swings: 15 attack - 5 defense
        assert!((stats.avg_damage_taken - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lone_troll_beats_fresh_player() {
        // Four swings top out at 116 damage; the troll needs four turns
        // of 25 to finish a 100 hp player.
        let stats = run_encounters(EnemyKind::Troll, 0..50, 20);
        assert_eq!(stats.player_wins, 0);
        assert!((stats.win_rate()).abs() < f64::EPSILON);
        assert!((stats.avg_swings - 4.0).abs() < f64::EPSILON);
        assert!((stats.avg_damage_taken - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_limit_stops_encounter() {
        let result = run_encounter(EnemyKind::Troll, 1, 1);
        assert!(!result.player_won);
        assert_eq!(result.swings, 1);
        assert_eq!(result.damage_taken, 25);
    }

    #[test]
    fn test_empty_stats() {
        let stats = EncounterStats::default();
        assert!((stats.win_rate()).abs() < f64::EPSILON);
        assert_eq!(stats.min_swings_to_win, None);
    }
}
