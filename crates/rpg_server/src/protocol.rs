//! JSON-lines wire protocol.
//!
//! Clients send one JSON object per line and receive exactly one JSON
//! object per line in reply:
//!
//! **Requests** are tagged with `"cmd"`.
//! **Responses** are tagged with `"type"`.
//!
//! # Example Session
//!
//! ```text
//! -> {"cmd":"state"}
//! <- {"type":"state","tick":0,"player":{"x":400,"y":300,...},"enemies":[...],...}
//! -> {"cmd":"move","direction":"up"}
//! <- {"type":"state","tick":0,"player":{"x":400,"y":297,...},...}
//! -> {"cmd":"tick","count":10}
//! <- {"type":"state","tick":10,...}
//! -> {"cmd":"fly"}
//! <- {"type":"error","message":"unknown variant `fly`, ..."}
//! ```

use rpg_core::enemy::Enemy;
use rpg_core::obstacle::Obstacle;
use rpg_core::player::Player;
use rpg_core::world::{World, Zone};
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ============================================================================
// Requests (client -> server)
// ============================================================================

/// Requests a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    /// Fetch the current world without changing it.
    State,

    /// Step the player once.
    Move {
        /// `up`, `down`, `left` or `right`, any case.
        direction: String,
    },

    /// Swing at every enemy in range.
    Attack,

    /// Advance enemy behavior N times (default: 1).
    Tick {
        /// Number of ticks to apply.
        #[serde(default = "default_tick_count")]
        count: u32,
    },

    /// Start a new game.
    Reset,

    /// Pause or resume enemy ticks.
    Pause {
        /// `true` to pause, `false` to resume.
        paused: bool,
    },
}

fn default_tick_count() -> u32 {
    1
}

impl Request {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Move { .. } => "move",
            Self::Attack => "attack",
            Self::Tick { .. } => "tick",
            Self::Reset => "reset",
            Self::Pause { .. } => "pause",
        }
    }
}

// ============================================================================
// Responses (server -> client)
// ============================================================================

/// Responses the server sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// The world after the request was applied.
    State(WorldView),

    /// The request could not be understood.
    Error {
        /// What went wrong.
        message: String,
    },
}

/// Everything a client needs to render the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldView {
    /// Ticks applied since the last reset.
    pub tick: u64,
    /// Map width.
    pub width: i32,
    /// Map height.
    pub height: i32,
    /// The player.
    pub player: Player,
    /// Zone the player stands in.
    pub player_zone: Zone,
    /// Live enemies.
    pub enemies: Vec<Enemy>,
    /// Scenery.
    pub obstacles: Vec<Obstacle>,
    /// Whether the game is running.
    pub running: bool,
    /// Whether ticks are paused.
    pub paused: bool,
    /// Last applied action.
    pub last_action: String,
    /// Human-readable outcome of the last action.
    pub message: String,
    /// Set once the player has died or the game stopped.
    pub game_over: bool,
    /// Set once every enemy is defeated.
    pub victory: bool,
}

impl From<&World> for WorldView {
    fn from(world: &World) -> Self {
        Self {
            tick: world.elapsed_ticks,
            width: world.width,
            height: world.height,
            player: world.player.clone(),
            player_zone: world.player_zone(),
            enemies: world.enemies.clone(),
            obstacles: world.obstacles.clone(),
            running: world.running,
            paused: world.paused,
            last_action: world.last_action.clone(),
            message: world.message.clone(),
            game_over: world.is_game_over(),
            victory: world.is_victory(),
        }
    }
}

// ============================================================================
// Line codec
// ============================================================================

/// Parse one request line.
pub fn parse_request(line: &str) -> Result<Request> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Encode a response as a single newline-terminated line.
pub fn encode_response(response: &Response) -> Result<String> {
    let mut line = serde_json::to_string(response)?;
    line.push('\n');
    Ok(line)
}
