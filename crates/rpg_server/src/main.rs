//! Emberwood RPG - Dedicated Server

use std::path::PathBuf;

use clap::Parser;
use rpg_server::{network, GameSession, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line options.
#[derive(Parser, Debug)]
#[command(name = "rpg_server")]
#[command(about = "Emberwood RPG dedicated server", long_about = None)]
struct Args {
    /// RON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// RNG seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> rpg_server::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }

    tracing::info!(seed = ?config.simulation.seed, "Starting Emberwood RPG Dedicated Server");

    let session =
        GameSession::new(config.simulation.clone())?.with_tick_limit(config.max_ticks_per_request);
    let listener = network::bind(&config).await?;

    tokio::select! {
        result = network::serve(listener, session, config.max_line_bytes) => result,
        signal = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
            Ok(signal?)
        }
    }
}
