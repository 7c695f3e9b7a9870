//! Draft Board Service Library
//!
//! Wires the beer sheet pipeline to the RankingsGateway: configuration,
//! logging, the one-shot board build and serving until shutdown.

pub mod cli;
pub mod config;
pub mod logging;
pub mod service;
pub mod signals;

pub use cli::Cli;
pub use config::ServiceConfig;
pub use logging::initialize_logging;
pub use service::ServiceState;
pub use signals::shutdown_signal;
