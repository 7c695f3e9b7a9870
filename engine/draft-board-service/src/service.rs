//! Service state: the ranking board built at startup and the gateway serving it

use anyhow::{Context, Result};
use beer_sheet::{CellGrid, RankingBoard};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

use crate::config::ServiceConfig;

/// Everything the running service holds
pub struct ServiceState {
    pub config: ServiceConfig,
    pub board: Arc<RankingBoard>,
}

impl ServiceState {
    /// Load the sheet and build the ranking board
    ///
    /// Any error here is fatal: the gateway is never started with a partial board.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let layout = config.load_layout()?;

        info!("Loading beer sheet from {:?} ({})", config.sheet.path, config.sheet.sheet_name);
        let grid = CellGrid::open(&config.sheet.path, &config.sheet.sheet_name)
            .with_context(|| format!("Failed to load beer sheet {:?}", config.sheet.path))?;

        let board =
            RankingBoard::build(&grid, &layout).context("Failed to build ranking board")?;

        Ok(Self { config, board: Arc::new(board) })
    }

    /// Serve the board until `shutdown` resolves
    pub async fn serve<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let gateway_config = self.config.gateway_config();
        info!(
            "Starting RankingsGateway on {}:{}",
            gateway_config.server.host, gateway_config.server.port
        );

        rankings_gateway::serve(&gateway_config, self.board.clone(), shutdown)
            .await
            .context("RankingsGateway failed")
    }
}
