//! # RPG Dedicated Server
//!
//! Hosts one live game and exposes it to clients as JSON lines over TCP.
//!
//! The server carries no game rules: every request is forwarded to the
//! [`rpg_core::simulation::Simulation`] inside a [`session::GameSession`],
//! which serializes all operations through one lock.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod error;
pub mod network;
pub mod protocol;
pub mod session;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use session::GameSession;
