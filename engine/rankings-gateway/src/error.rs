//! Error types for the RankingsGateway

use thiserror::Error;

/// Errors that can occur in the RankingsGateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid server address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Failed to bind server: {0}")]
    Bind(#[from] warp::Error),
}

/// Result type for RankingsGateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
