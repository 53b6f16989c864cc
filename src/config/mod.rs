//! Configuration system for mlserve
//!
//! AppConfig is read once at startup (from a YAML/JSON file, then CLI and
//! environment overrides) and is never mutated afterwards.

mod model;
mod processing;
mod server;

pub use model::{ModelConfig, ModelKind};
pub use processing::ProcessingConfig;
pub use server::ServerConfig;

use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// mlserve configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Service name reported by the health endpoint
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Service version
    #[serde(default = "default_app_version")]
    pub app_version: String,

    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Model adapter settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Pre/postprocessing settings
    #[serde(default)]
    pub processing: ProcessingConfig,
}

fn default_app_name() -> String {
    "MCP Prediction Server".to_string()
}

fn default_app_version() -> String {
    "1.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_version: default_app_version(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, picking the format from the file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(path),
            Some("json") => Self::from_json(path),
            other => Err(anyhow!(
                "Unsupported config format: {} (expected .yaml, .yml or .json)",
                other.unwrap_or("<none>")
            )),
        }
    }

    /// Check values that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.model.version.is_empty() {
            return Err(anyhow!("model.version cannot be empty"));
        }
        if self.processing.output_format.is_empty() {
            return Err(anyhow!("processing.output_format cannot be empty"));
        }
        Ok(())
    }
}
