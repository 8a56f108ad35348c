//! Server configuration, loaded from a RON file.
//!
//! ```ron
//! (
//!     bind_address: "0.0.0.0",
//!     port: 7777,
//!     max_ticks_per_request: 1000,
//!     simulation: (seed: Some(42)),
//! )
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::path::Path;

use rpg_core::config::SimulationConfig;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default TCP port.
pub const DEFAULT_PORT: u16 = 7777;

/// Default cap on `count` for one tick request.
pub const DEFAULT_MAX_TICKS_PER_REQUEST: u32 = 1000;

/// Default cap on the length of one request line, newline excluded.
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    pub bind_address: String,
    /// Port to listen on.
    pub port: u16,
    /// Largest tick count one request may ask for.
    pub max_ticks_per_request: u32,
    /// Longest request line accepted from a client.
    pub max_line_bytes: usize,
    /// Rules for the hosted game.
    pub simulation: SimulationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            max_ticks_per_request: DEFAULT_MAX_TICKS_PER_REQUEST,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a configuration from RON text and validate its rules.
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.simulation.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&text)?;
        tracing::info!(path = %path.display(), "Loaded server config");
        Ok(config)
    }

    /// `address:port` string for binding.
    #[must_use]
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
