//! Actor - Self-play episode generator for 15x15 connect-five
//!
//! A long-running process that:
//! 1. Loads configuration from config.toml, environment and CLI
//! 2. Plays games against itself with an MCTS planner
//! 3. Labels every move with the final outcome under all 8 board symmetries
//! 4. Logs running statistics until the episode limit or Ctrl+C

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use actor::{Actor, Config};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let max_episode_description = match config.episode_limit() {
        Some(n) => n.to_string(),
        None => "unlimited".to_string(),
    };
    info!(
        max_episodes = config.max_episodes,
        "Actor will run {} episodes", max_episode_description
    );
    info!("Starting actor {}", config.actor_id);

    let actor = Arc::new(Actor::new(config)?);

    // Setup graceful shutdown
    let shutdown_actor = Arc::clone(&actor);
    let shutdown_handle = tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, stopping actor...");
                shutdown_actor.shutdown();
            }
            Err(e) => error!("Failed to listen for ctrl+c: {}", e),
        }
    });

    let run_result = actor.run().await;
    shutdown_handle.abort();

    match run_result {
        Ok(_) => {
            info!("Actor completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Actor failed: {}", e);
            Err(e)
        }
    }
}
