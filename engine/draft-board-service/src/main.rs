//! Draft Board Service
//!
//! Loads the beer sheet once, builds the ranking board and serves it until
//! Ctrl+C or SIGTERM. A sheet that cannot be read, or a player without a value,
//! stops the process before the port is bound.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use draft_board_service::{initialize_logging, shutdown_signal, Cli, ServiceState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.load_config().context("Failed to load configuration")?;

    // Initialize logging first
    initialize_logging(&config.logging)?;

    info!("Starting Draft Board Service v{}", env!("CARGO_PKG_VERSION"));

    let state = match ServiceState::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to build ranking board: {:#}", e);
            return Err(e);
        }
    };
    info!("Ranking board built with {} players", state.board.len());

    state.serve(shutdown_signal()).await?;

    info!("Draft Board Service shutdown complete");
    Ok(())
}
