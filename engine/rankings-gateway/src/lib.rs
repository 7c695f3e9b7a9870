//! RankingsGateway - REST API over the draft ranking board
//!
//! Serves the ranking board built at startup. The board is immutable, so the
//! handlers share it through an `Arc` without locking.

pub mod config;
pub mod error;
pub mod rest_api;

pub use config::{GatewayConfig, ResponseConfig, ServerConfig};
pub use error::{GatewayError, GatewayResult};
pub use rest_api::{create_routes, serve};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Default ranking format label
pub const DEFAULT_FORMAT: &str = "standard";
