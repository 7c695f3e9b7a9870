//! Service configuration management

use anyhow::{Context, Result};
use beer_sheet::SheetLayout;
use rankings_gateway::{GatewayConfig, ResponseConfig, ServerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Beer sheet source
    pub sheet: SheetConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// `/players` response configuration
    pub response: ResponseConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where the beer sheet lives and how it is laid out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Workbook (.xlsx/.xls/.ods) or CSV export of the beer sheet
    pub path: PathBuf,

    /// Worksheet to read from a workbook
    pub sheet_name: String,

    /// TOML layout file; the reference beer sheet layout when unset
    pub layout: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json, compact)
    pub format: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(
                "./data/2017-07-12 10 TM 0 PPR 1QB 2RB 2WR 1TE 1FLX 4 PaTD Snake.xlsx",
            ),
            sheet_name: beer_sheet::DEFAULT_SHEET_NAME.to_string(),
            layout: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl ServiceConfig {
    /// Gateway view of the configuration
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig { server: self.server.clone(), response: self.response.clone() }
    }

    /// Sheet layout to extract with
    pub fn load_layout(&self) -> Result<SheetLayout> {
        match &self.sheet.layout {
            Some(path) => SheetLayout::load_from_file(path)
                .with_context(|| format!("Failed to load sheet layout {:?}", path)),
            None => Ok(SheetLayout::beer_sheet()),
        }
    }
}

/// Load configuration from an optional TOML file and environment variables
pub fn load_config(config_file: Option<&Path>) -> Result<ServiceConfig> {
    let mut config = match config_file {
        Some(path) => {
            tracing::debug!("Loading configuration from file: {:?}", path);
            load_from_file(path)?
        }
        None => ServiceConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path) -> Result<ServiceConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {:?}", path))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse configuration file: {:?}", path))
}

/// Override configuration from `DRAFT_BOARD_*` variables
pub fn apply_env<F>(config: &mut ServiceConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup("DRAFT_BOARD_SHEET_PATH") {
        config.sheet.path = PathBuf::from(path);
    }

    if let Some(sheet_name) = lookup("DRAFT_BOARD_SHEET_NAME") {
        config.sheet.sheet_name = sheet_name;
    }

    if let Some(layout) = lookup("DRAFT_BOARD_LAYOUT") {
        config.sheet.layout = Some(PathBuf::from(layout));
    }

    if let Some(host) = lookup("DRAFT_BOARD_HOST") {
        config.server.host = host;
    }

    if let Some(port) = lookup("DRAFT_BOARD_PORT") {
        config.server.port =
            port.parse().with_context(|| format!("Invalid DRAFT_BOARD_PORT: {}", port))?;
    }

    if let Some(level) = lookup("DRAFT_BOARD_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(format) = lookup("DRAFT_BOARD_LOG_FORMAT") {
        config.logging.format = format;
    }

    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    // Validate log level
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    // Validate log format
    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    // Validate server port
    if config.server.port == 0 {
        return Err(anyhow::anyhow!("Invalid server port: {}", config.server.port));
    }

    if config.sheet.sheet_name.is_empty() {
        return Err(anyhow::anyhow!("Sheet name must not be empty"));
    }

    Ok(())
}
