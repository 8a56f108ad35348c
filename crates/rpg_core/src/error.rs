//! Error types for the game simulation.
//!
//! The action API itself never fails: rejected actions are no-ops that
//! leave the world untouched. These errors only surface at lookup and
//! parsing seams, where the caller decides how to degrade.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all game simulation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A movement direction that is not one of up/down/left/right.
    #[error("Invalid direction: {0:?}")]
    InvalidDirection(String),

    /// No live enemy carries the requested ID.
    #[error("Enemy not found: {0}")]
    EnemyNotFound(u32),

    /// An enemy kind name that is not part of the roster.
    #[error("Unknown enemy kind: {0:?}")]
    UnknownEnemyKind(String),

    /// Simulation configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
