//! # RPG Core
//!
//! Server-authoritative simulation core for Emberwood, a top-down action RPG.
//!
//! This crate contains **only** game rules:
//! - No rendering
//! - No networking
//! - No file IO
//!
//! Randomness comes from a single RNG owned by the [`simulation::Simulation`],
//! so a fixed seed reproduces a game exactly. Transport layers (see
//! `rpg_server`) wrap the simulation and forward client actions to it.
//!
//! ## Crate Structure
//!
//! - [`simulation`] - The controller and its action API
//! - [`world`] - World aggregate and starting layout
//! - [`player`] - Player character and leveling
//! - [`enemy`] - Enemy instances
//! - [`obstacle`] - Static scenery and collision
//! - [`behavior`] - Per-tick enemy decisions
//! - [`combat`] - Damage resolution and rewards
//! - [`data`] - Static stat tables
//! - [`config`] - Tunable rules
//! - [`geometry`] - Integer points and rectangles

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod behavior;
pub mod combat;
pub mod components;
pub mod config;
pub mod data;
pub mod enemy;
pub mod error;
pub mod geometry;
pub mod obstacle;
pub mod player;
pub mod simulation;
pub mod world;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::behavior::{EnemyAction, EnemyTurn};
    pub use crate::combat::{AttackReport, Hit, Kill};
    pub use crate::components::*;
    pub use crate::config::SimulationConfig;
    pub use crate::data::{Behavior, EnemyKind, EnemyStats, ObstacleKind, ObstacleStats};
    pub use crate::enemy::Enemy;
    pub use crate::error::{GameError, Result};
    pub use crate::geometry::{Point, Rect};
    pub use crate::obstacle::Obstacle;
    pub use crate::player::Player;
    pub use crate::simulation::{MoveOutcome, Simulation, TickReport};
    pub use crate::world::{World, Zone};
}
