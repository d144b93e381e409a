//! Server configuration.
//!
//! Settings come from an optional `rupaya.yaml` next to the binary (or at
//! `RUPAYA_CONFIG`), with individual environment-variable overrides on top.
//! Everything has a sensible default so a bare `rupaya-server` starts up.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Root directory of the record store
    pub data_dir: PathBuf,
    /// Address the REST API binds to
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rupaya");
        Self {
            data_dir,
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("RUPAYA_CONFIG").unwrap_or_else(|_| "rupaya.yaml".to_string());

        let mut config = if std::path::Path::new(&config_path).exists() {
            let raw = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path))?;
            let parsed: ServerConfig = serde_yaml::from_str(&raw)
                .with_context(|| format!("parsing {}", config_path))?;
            info!("Loaded configuration from {}", config_path);
            parsed
        } else {
            ServerConfig::default()
        };

        if let Ok(data_dir) = std::env::var("RUPAYA_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(bind_addr) = std::env::var("RUPAYA_BIND_ADDR") {
            config.bind_addr = bind_addr;
        }
        Ok(config)
    }
}
