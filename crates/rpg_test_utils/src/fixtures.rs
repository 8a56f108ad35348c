//! Test fixtures and helpers.
//!
//! Pre-built simulations and scripted action sequences for consistent
//! testing. Every fixture takes an explicit seed so failures reproduce.

use rpg_core::components::Direction;
use rpg_core::config::SimulationConfig;
use rpg_core::data::EnemyKind;
use rpg_core::enemy::Enemy;
use rpg_core::geometry::Point;
use rpg_core::simulation::Simulation;
use rpg_core::world::{World, Zone};
use serde::{Deserialize, Serialize};

/// Where the player starts on the reference map.
pub const PLAYER_START: Point = Point::new(400, 300);

/// A fresh reference game with a fixed seed.
///
/// # Panics
///
/// Panics if the reference rules fail validation.
#[must_use]
pub fn fresh_simulation(seed: u64) -> Simulation {
    simulation_with_config(SimulationConfig::seeded(seed))
}

/// A fresh game under custom rules.
///
/// # Panics
///
/// Panics if `config` fails validation.
#[must_use]
pub fn simulation_with_config(config: SimulationConfig) -> Simulation {
    match Simulation::with_config(config) {
        Ok(sim) => sim,
        Err(err) => panic!("fixture config rejected: {err}"),
    }
}

/// A reference game with the player moved to `position`.
#[must_use]
pub fn simulation_with_player_at(seed: u64, position: Point) -> Simulation {
    let mut sim = fresh_simulation(seed);
    sim.world_mut().player.position = position;
    sim
}

/// An empty arena holding only the player at the map center and one enemy.
///
/// Obstacles are removed so nothing interferes with movement.
#[must_use]
pub fn simulation_with_enemy(seed: u64, kind: EnemyKind, position: Point) -> Simulation {
    let mut sim = fresh_simulation(seed);
    let world = sim.world_mut();
    let zone = Zone::containing(position, world.width, world.height);
    world.enemies = vec![Enemy::new(1, position, kind, zone)];
    world.obstacles.clear();
    sim
}

/// A reference game whose player has already died.
#[must_use]
pub fn dead_player(seed: u64) -> Simulation {
    let mut sim = fresh_simulation(seed);
    sim.world_mut().player.health.current = 0;
    sim
}

/// A reference game with every enemy already defeated.
#[must_use]
pub fn cleared_world(seed: u64) -> Simulation {
    let mut sim = fresh_simulation(seed);
    sim.world_mut().enemies.clear();
    sim
}

/// One client action, replayable against any simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptedAction {
    /// Step the player.
    Move {
        /// Direction of the step.
        direction: Direction,
    },
    /// Swing at nearby enemies.
    Attack,
    /// Let the enemies act.
    Tick,
    /// Start a new game.
    Reset,
}

impl ScriptedAction {
    /// Apply this action and return the resulting world.
    pub fn apply(self, sim: &mut Simulation) -> &World {
        match self {
            Self::Move { direction } => sim.move_player(direction.as_str()),
            Self::Attack => sim.attack(),
            Self::Tick => sim.tick(),
            Self::Reset => sim.reset(),
        }
    }
}

/// Apply a whole script in order.
pub fn run_script(sim: &mut Simulation, script: &[ScriptedAction]) {
    for action in script {
        action.apply(sim);
    }
}
