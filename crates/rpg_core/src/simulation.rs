//! The simulation controller.
//!
//! [`Simulation`] owns the one live [`World`] together with the RNG and the
//! rules it runs under. Transport layers hold a `Simulation` and call the
//! action API one request at a time:
//!
//! - [`Simulation::get_state`] - current world
//! - [`Simulation::move_player`] - one player step
//! - [`Simulation::attack`] - one player swing
//! - [`Simulation::tick`] - one round of enemy behavior
//! - [`Simulation::reset`] - rebuild the starting world
//!
//! Every action is total: preconditions that do not hold (dead player,
//! unknown direction, blocked move, attack already in progress) turn the
//! call into a no-op rather than an error.
//!
//! # Snapshots
//!
//! Actions return a shared borrow of the live world. The borrow checker
//! guarantees a caller cannot hold that reference across the next
//! mutation; callers that need to keep a snapshot clone it.
//!
//! # Example
//!
//! ```
//! use rpg_core::config::SimulationConfig;
//! use rpg_core::simulation::Simulation;
//!
//! let mut sim = Simulation::with_config(SimulationConfig::seeded(7)).unwrap();
//!
//! sim.move_player("up");
//! sim.move_player("up");
//! sim.move_player("up");
//! assert_eq!(sim.get_state().player.position.y, 291);
//!
//! sim.tick();
//! assert_eq!(sim.get_state().elapsed_ticks, 1);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::behavior::{update_enemy, EnemyTurn};
use crate::combat::{player_attack, AttackReport};
use crate::components::{Direction, EnemyId};
use crate::config::SimulationConfig;
use crate::data::{EnemyKind, ObstacleKind};
use crate::enemy::Enemy;
use crate::error::{GameError, Result};
use crate::geometry::{Point, Rect};
use crate::world::World;

/// Result of a movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The player moved.
    Moved {
        /// Position before the move.
        from: Point,
        /// Position after the move.
        to: Point,
    },
    /// The destination overlaps an obstacle.
    Blocked {
        /// Kind of the first obstacle in the way.
        obstacle: ObstacleKind,
    },
    /// The destination is off the map.
    OutOfBounds,
    /// Dead players do not move.
    PlayerDead,
    /// The direction was not recognized.
    InvalidDirection,
}

impl MoveOutcome {
    /// Whether the position changed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Events generated during one applied tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick counter after this tick.
    pub tick: u64,
    /// Each enemy's turn, in roster order.
    pub turns: Vec<EnemyTurn>,
    /// Total damage the player took.
    pub damage_taken: u32,
}

/// The core game simulation.
///
/// Owns the world, the rules and the RNG used for damage rolls and idle
/// wandering. A transport layer serving concurrent clients must wrap the
/// whole `Simulation` in a single lock held for each action.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    world: World,
    rng: StdRng,
}

impl Simulation {
    /// Create a simulation with the reference rules and an entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        let config = SimulationConfig::default();
        let world = World::initial(&config);
        Self {
            rng: make_rng(config.seed),
            config,
            world,
        }
    }

    /// Create a simulation with custom rules.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] if the configuration fails validation.
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let world = World::initial(&config);
        Ok(Self {
            rng: make_rng(config.seed),
            config,
            world,
        })
    }

    /// Rules this simulation runs under.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The live world.
    #[must_use]
    pub const fn get_state(&self) -> &World {
        &self.world
    }

    /// Mutable access to the live world, for scenario setup and admin tools.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Move the player one step in a direction given by name.
    ///
    /// Names are matched case-insensitively; unknown names leave the world
    /// unchanged.
    pub fn move_player(&mut self, direction: &str) -> &World {
        self.request_move(direction);
        &self.world
    }

    /// Parse a direction name and move the player one step along it.
    pub fn request_move(&mut self, direction: &str) -> MoveOutcome {
        match direction.parse::<Direction>() {
            Ok(direction) => self.step_player(direction),
            Err(err) => {
                tracing::debug!(%err, "Ignoring move");
                MoveOutcome::InvalidDirection
            }
        }
    }

    /// Move the player one step and report what happened.
    ///
    /// The candidate position is rejected if it leaves the map or if the
    /// player's collision square there overlaps any obstacle, whatever its
    /// kind.
    pub fn step_player(&mut self, direction: Direction) -> MoveOutcome {
        let player = &mut self.world.player;
        if !player.is_alive() {
            return MoveOutcome::PlayerDead;
        }
        player.facing = direction;

        let from = player.position;
        let (ux, uy) = direction.unit();
        let to = from.offset(ux * self.config.player_step, uy * self.config.player_step);

        let footprint = Rect::centered_square(to, self.config.player_half_size);
        let blocker = self
            .world
            .blocking_obstacle(&footprint)
            .map(|obstacle| obstacle.kind);

        let outcome = if !self.world.in_bounds(to) {
            MoveOutcome::OutOfBounds
        } else if let Some(obstacle) = blocker {
            MoveOutcome::Blocked { obstacle }
        } else {
            self.world.player.position = to;
            MoveOutcome::Moved { from, to }
        };

        match outcome {
            MoveOutcome::Moved { .. } => {
                self.world.record("move", format!("Moved {direction}"));
            }
            rejected => tracing::debug!(%direction, ?from, ?to, ?rejected, "Move rejected"),
        }
        outcome
    }

    /// Swing at every enemy in range.
    pub fn attack(&mut self) -> &World {
        self.resolve_attack();
        &self.world
    }

    /// Swing at every enemy in range and report hits and kills.
    ///
    /// Returns `None` when the player is dead or already attacking.
    pub fn resolve_attack(&mut self) -> Option<AttackReport> {
        let report = player_attack(&mut self.world, &self.config, &mut self.rng)?;

        let message = match (report.hits.len(), report.kills.len()) {
            (0, _) => "The attack hit nothing".to_string(),
            (hits, 0) => format!("{hits} enemies hit"),
            (hits, kills) => format!(
                "{hits} enemies hit, {kills} defeated (+{} exp, +{} score)",
                report.exp_gained(),
                report.score_gained()
            ),
        };
        if report.levels_gained > 0 {
            self.world.record(
                "attack",
                format!("{message}. Reached level {}!", self.world.player.level),
            );
        } else {
            self.world.record("attack", message);
        }

        #[cfg(feature = "debug-validation")]
        self.world.assert_invariants();

        Some(report)
    }

    /// Let every live enemy act once.
    pub fn tick(&mut self) -> &World {
        self.advance();
        &self.world
    }

    /// Let every live enemy act once and report their turns.
    ///
    /// Returns `None` while the player is dead or the game is paused.
    pub fn advance(&mut self) -> Option<TickReport> {
        if !self.world.player.is_alive() || self.world.paused {
            return None;
        }

        let hp_before = self.world.player.hp();
        let World {
            player, enemies, ..
        } = &mut self.world;
        let turns: Vec<EnemyTurn> = enemies
            .iter_mut()
            .map(|enemy| update_enemy(enemy, player, &self.config, &mut self.rng))
            .collect();

        self.world.elapsed_ticks += 1;
        let damage_taken = hp_before - self.world.player.hp();
        let tick = self.world.elapsed_ticks;

        if self.world.player.is_alive() {
            let message = if damage_taken > 0 {
                format!("Took {damage_taken} damage")
            } else {
                String::new()
            };
            self.world.record("tick", message);
        } else {
            tracing::info!(tick, "Player died");
            self.world.record("tick", "You have been defeated");
        }

        #[cfg(feature = "debug-validation")]
        self.world.assert_invariants();

        #[cfg(debug_assertions)]
        {
            let hash = self.state_hash();
            tracing::debug!(tick, state_hash = hash, "Simulation state hash");
        }

        Some(TickReport {
            tick,
            turns,
            damage_taken,
        })
    }

    /// Discard the world and rebuild the starting layout.
    ///
    /// The RNG stream is not reseeded.
    pub fn reset(&mut self) -> &World {
        self.world = World::initial(&self.config);
        self.world.record("reset", "New game started");
        tracing::info!(
            enemies = self.world.enemies.len(),
            obstacles = self.world.obstacles.len(),
            "World reset"
        );
        &self.world
    }

    /// Pause or resume enemy ticks.
    pub fn set_paused(&mut self, paused: bool) -> &World {
        if self.world.paused != paused {
            self.world.paused = paused;
            let action = if paused { "pause" } else { "resume" };
            self.world.record(action, "");
        }
        &self.world
    }

    /// Look up a live enemy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EnemyNotFound`] if no live enemy has this ID.
    pub fn enemy(&self, id: EnemyId) -> Result<&Enemy> {
        self.world.enemy(id).ok_or(GameError::EnemyNotFound(id))
    }

    /// Change a live enemy's species, re-deriving its stats.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EnemyNotFound`] if no live enemy has this ID.
    pub fn set_enemy_kind(&mut self, id: EnemyId, kind: EnemyKind) -> Result<()> {
        let enemy = self
            .world
            .enemy_mut(id)
            .ok_or(GameError::EnemyNotFound(id))?;
        enemy.set_kind(kind);
        Ok(())
    }

    /// Hash of the gameplay-relevant state.
    ///
    /// Two simulations with equal hashes hold the same player, roster and
    /// tick counter.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        let world = &self.world;

        world.elapsed_ticks.hash(&mut hasher);

        let player = &world.player;
        player.position.hash(&mut hasher);
        player.health.hash(&mut hasher);
        (player.attack, player.defense).hash(&mut hasher);
        (player.level, player.exp, player.score).hash(&mut hasher);

        world.enemies.len().hash(&mut hasher);
        for enemy in &world.enemies {
            enemy.id.hash(&mut hasher);
            enemy.kind.hash(&mut hasher);
            enemy.position.hash(&mut hasher);
            enemy.health.hash(&mut hasher);
        }

        hasher.finish()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
