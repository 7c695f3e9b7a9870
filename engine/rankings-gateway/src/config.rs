//! Configuration for the RankingsGateway

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main configuration for the RankingsGateway
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// `/players` response configuration
    #[serde(default)]
    pub response: ResponseConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Shape of the `/players` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Scoring format label reported with the rankings
    pub format: String,

    /// Report `time_updated` as the literal "now" instead of the board build time
    pub legacy_time_updated: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: crate::DEFAULT_PORT }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self { format: crate::DEFAULT_FORMAT.to_string(), legacy_time_updated: false }
    }
}

impl GatewayConfig {
    /// Get the server address
    pub fn server_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
