//! # Command Line Interface

use crate::config::{self, ServiceConfig};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Serve beer sheet draft rankings over HTTP
#[derive(Parser, Debug, Default)]
#[command(name = "draft-board")]
#[command(about = "Serve beer sheet draft rankings as a JSON draft board")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "DRAFT_BOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Beer sheet workbook or CSV export
    #[arg(short, long)]
    pub sheet: Option<PathBuf>,

    /// Worksheet to read from the workbook
    #[arg(long)]
    pub sheet_name: Option<String>,

    /// TOML sheet layout file
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Resolve the configuration: file, then environment, then flags
    pub fn load_config(&self) -> Result<ServiceConfig> {
        let mut config = config::load_config(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config::validate_config(&config)?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ServiceConfig) {
        if let Some(sheet) = &self.sheet {
            config.sheet.path = sheet.clone();
        }
        if let Some(sheet_name) = &self.sheet_name {
            config.sheet.sheet_name = sheet_name.clone();
        }
        if let Some(layout) = &self.layout {
            config.sheet.layout = Some(layout.clone());
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
