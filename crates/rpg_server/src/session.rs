//! The hosted game session.
//!
//! One [`GameSession`] owns the single live [`Simulation`]. Every request
//! locks it for the whole operation, so concurrent clients see actions
//! applied one at a time and every reply reflects a complete action.
//! Tick requests above the session's limit are refused before the lock is
//! taken, so no single request can hold the game for long.

use std::sync::Arc;

use rpg_core::config::SimulationConfig;
use rpg_core::simulation::Simulation;
use tokio::sync::Mutex;

use crate::config::DEFAULT_MAX_TICKS_PER_REQUEST;
use crate::error::Result;
use crate::protocol::{parse_request, Request, Response, WorldView};

/// Shared handle to the live game. Cloning yields another handle to the
/// same game.
#[derive(Debug, Clone)]
pub struct GameSession {
    simulation: Arc<Mutex<Simulation>>,
    max_ticks: u32,
}

impl GameSession {
    /// Start a session running a fresh game under `config`.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let simulation = Simulation::with_config(config)?;
        Ok(Self::from_simulation(simulation))
    }

    /// Host an existing simulation.
    #[must_use]
    pub fn from_simulation(simulation: Simulation) -> Self {
        Self {
            simulation: Arc::new(Mutex::new(simulation)),
            max_ticks: DEFAULT_MAX_TICKS_PER_REQUEST,
        }
    }

    /// Cap the tick count a single request may ask for.
    #[must_use]
    pub fn with_tick_limit(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Apply one request and build the reply.
    pub async fn handle(&self, request: Request) -> Response {
        if let Request::Tick { count } = request {
            if count > self.max_ticks {
                tracing::warn!(count, limit = self.max_ticks, "Tick request over limit");
                return Response::Error {
                    message: format!("tick count {count} exceeds the limit of {}", self.max_ticks),
                };
            }
        }

        let mut sim = self.simulation.lock().await;
        let world = match request {
            Request::State => sim.get_state(),
            Request::Move { direction } => sim.move_player(&direction),
            Request::Attack => sim.attack(),
            Request::Tick { count } => {
                for _ in 1..count {
                    sim.tick();
                }
                if count == 0 {
                    sim.get_state()
                } else {
                    sim.tick()
                }
            }
            Request::Reset => sim.reset(),
            Request::Pause { paused } => sim.set_paused(paused),
        };
        Response::State(WorldView::from(world))
    }

    /// Parse and apply one request line. Malformed lines yield an error
    /// response and leave the game untouched.
    pub async fn handle_line(&self, line: &str) -> Response {
        match parse_request(line) {
            Ok(request) => {
                tracing::debug!(cmd = request.name(), "Handling request");
                self.handle(request).await
            }
            Err(err) => {
                tracing::warn!(%err, "Malformed request");
                Response::Error {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Copy of the current state hash, for diagnostics.
    pub async fn state_hash(&self) -> u64 {
        self.simulation.lock().await.state_hash()
    }
}

#[cfg(test)]
mod tests {
    use rpg_test_utils::fixtures::{dead_player, fresh_simulation};

    use super::*;

    fn session() -> GameSession {
        GameSession::from_simulation(fresh_simulation(3))
    }

    fn expect_state(response: Response) -> WorldView {
        match response {
            Response::State(view) => view,
            Response::Error { message } => panic!("unexpected error response: {message}"),
        }
    }

    #[tokio::test]
    async fn test_state_request() {
        let view = expect_state(session().handle(Request::State).await);
        assert_eq!(view.tick, 0);
        assert_eq!(view.enemies.len(), 7);
        assert_eq!(view.obstacles.len(), 7);
        assert!(!view.game_over);
    }

    #[tokio::test]
    async fn test_moves_are_applied_in_order() {
        let session = session();
        for _ in 0..3 {
            session.handle_line(r#"{"cmd":"move","direction":"up"}"#).await;
        }
        let view = expect_state(session.handle(Request::State).await);
        assert_eq!((view.player.position.x, view.player.position.y), (400, 291));
    }

    #[tokio::test]
    async fn test_tick_count() {
        let session = session();
        let view = expect_state(session.handle(Request::Tick { count: 5 }).await);
        assert_eq!(view.tick, 5);

        let view = expect_state(session.handle(Request::Tick { count: 0 }).await);
        assert_eq!(view.tick, 5);
    }

    #[tokio::test]
    async fn test_tick_count_over_limit_is_refused() {
        let session = session().with_tick_limit(10);

        let response = session.handle(Request::Tick { count: 11 }).await;
        assert!(matches!(response, Response::Error { .. }));
        let view = expect_state(session.handle(Request::State).await);
        assert_eq!(view.tick, 0);

        let view = expect_state(session.handle(Request::Tick { count: 10 }).await);
        assert_eq!(view.tick, 10);
    }

    #[tokio::test]
    async fn test_huge_tick_line_does_not_hold_the_game() {
        let session = session();
        let before = session.state_hash().await;

        let response = session.handle_line(r#"{"cmd":"tick","count":4294967295}"#).await;

        let Response::Error { message } = response else {
            panic!("expected the tick count to be refused");
        };
        assert!(message.contains("1000"));
        assert_eq!(session.state_hash().await, before);
    }

    #[tokio::test]
    async fn test_pause_blocks_ticks() {
        let session = session();
        session.handle(Request::Pause { paused: true }).await;
        let view = expect_state(session.handle(Request::Tick { count: 3 }).await);
        assert!(view.paused);
        assert_eq!(view.tick, 0);
    }

    #[tokio::test]
    async fn test_malformed_line_is_error_and_noop() {
        let session = session();
        let before = session.state_hash().await;

        let response = session.handle_line("{\"cmd\":").await;

        assert!(matches!(response, Response::Error { .. }));
        assert_eq!(session.state_hash().await, before);
    }

    #[tokio::test]
    async fn test_unknown_direction_still_returns_state() {
        let session = session();
        let view = expect_state(session.handle_line(r#"{"cmd":"move","direction":"north"}"#).await);
        assert_eq!((view.player.position.x, view.player.position.y), (400, 300));
    }

    #[tokio::test]
    async fn test_dead_player_reports_game_over() {
        let session = GameSession::from_simulation(dead_player(3));
        let view = expect_state(session.handle(Request::Attack).await);
        assert!(view.game_over);

        let view = expect_state(session.handle(Request::Reset).await);
        assert!(!view.game_over);
        assert_eq!(view.player.hp(), 100);
    }

    #[tokio::test]
    async fn test_concurrent_handles_share_one_game() {
        let session = session();
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let session = session.clone();
                tokio::spawn(async move { session.handle(Request::Tick { count: 1 }).await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.is_ok());
        }
        let view = expect_state(session.handle(Request::State).await);
        assert_eq!(view.tick, 8);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            map_height: -1,
            ..SimulationConfig::default()
        };
        assert!(GameSession::new(config).is_err());
    }
}
