//! CLI commands

mod predict;
mod serve;

pub use predict::predict;
pub use serve::serve;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, ModelKind};

/// mlserve - HTTP prediction server for pluggable models
#[derive(Parser)]
#[command(name = "mlserve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the prediction server
    Serve {
        /// Host to bind to
        #[arg(long, env = "MLSERVE_HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(long, env = "MLSERVE_PORT")]
        port: Option<u16>,
    },

    /// Run a single prediction without starting the server
    Predict {
        /// Features as a JSON object, e.g. '{"product_id": "ABC123"}'
        #[arg(long, short, conflicts_with = "input", required_unless_present = "input")]
        features: Option<String>,

        /// Read the features from a JSON file instead
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
}

/// Settings shared by every command, overriding the config file
#[derive(Args, Debug, Default)]
pub struct Settings {
    /// Configuration file (.yaml, .yml or .json)
    #[arg(long, short, global = true, env = "MLSERVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model adapter to use
    #[arg(long, global = true, env = "MODEL_TYPE", value_enum)]
    pub model_type: Option<ModelKind>,

    /// Path to the model artifact
    #[arg(long, global = true, env = "MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Model version label
    #[arg(long, global = true, env = "MODEL_VERSION")]
    pub model_version: Option<String>,

    /// Device for the torch adapter
    #[arg(long, global = true, env = "TORCH_DEVICE")]
    pub device: Option<String>,

    /// Output format label added to predictions
    #[arg(long, global = true, env = "OUTPUT_FORMAT")]
    pub output_format: Option<String>,

    /// JSON file mapping request feature names to model feature names
    #[arg(long, global = true, env = "FEATURE_MAPPING_FILE")]
    pub feature_mapping_file: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, env = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Settings {
    /// Load the config file (or defaults) and apply overrides on top
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(kind) = self.model_type {
            config.model.kind = kind;
        }
        if let Some(path) = &self.model_path {
            config.model.path = path.clone();
        }
        if let Some(version) = &self.model_version {
            config.model.version = version.clone();
        }
        if let Some(device) = &self.device {
            config.model.device = device.clone();
        }
        if let Some(format) = &self.output_format {
            config.processing.output_format = format.clone();
        }
        if let Some(file) = &self.feature_mapping_file {
            config.processing.feature_mapping_file = Some(file.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_apply_over_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "model:\n  kind: torch\n  version: v1.2.0").unwrap();

        let settings = Settings {
            config: Some(file.path().to_path_buf()),
            model_version: Some("v2.0.0".to_string()),
            output_format: Some("array".to_string()),
            ..Default::default()
        };
        let config = settings.resolve().unwrap();
        assert_eq!(config.model.kind, ModelKind::Torch);
        assert_eq!(config.model.version, "v2.0.0");
        assert_eq!(config.processing.output_format, "array");
    }

    #[test]
    fn test_resolve_rejects_empty_version() {
        let settings = Settings {
            model_version: Some(String::new()),
            ..Default::default()
        };
        assert!(settings.resolve().is_err());
    }

    #[test]
    fn test_parse_predict_command() {
        let cli = Cli::try_parse_from([
            "mlserve",
            "predict",
            "--model-type",
            "torch",
            "--features",
            r#"{"product_id": "A"}"#,
        ])
        .unwrap();
        assert_eq!(cli.settings.model_type, Some(ModelKind::Torch));
        assert!(matches!(
            cli.command,
            Commands::Predict { features: Some(_), input: None }
        ));
    }

    #[test]
    fn test_predict_requires_input() {
        assert!(Cli::try_parse_from(["mlserve", "predict"]).is_err());
    }
}
