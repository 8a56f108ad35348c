//! Server error types.

use thiserror::Error;

/// Errors raised by the transport layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket or file IO failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The RON configuration file could not be parsed.
    #[error("invalid config file: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// A request or response could not be (de)serialized.
    #[error("protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    /// The simulation rejected the configuration.
    #[error(transparent)]
    Game(#[from] rpg_core::error::GameError),
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
