//! Model adapter configuration

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which inference adapter to construct at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// TorchScript model
    Torch,
    /// Scikit-learn model exported with joblib/pickle
    Sklearn,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Torch => f.write_str("torch"),
            ModelKind::Sklearn => f.write_str("sklearn"),
        }
    }
}

/// Model selection and location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Adapter to use
    #[serde(default = "default_kind")]
    pub kind: ModelKind,

    /// Path to the model artifact
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Version label reported in every response
    #[serde(default = "default_version")]
    pub version: String,

    /// Device string for the torch adapter ("cpu", "cuda:0")
    #[serde(default = "default_device")]
    pub device: String,
}

fn default_kind() -> ModelKind {
    ModelKind::Sklearn
}

fn default_path() -> PathBuf {
    PathBuf::from("./models/model.pkl")
}

fn default_version() -> String {
    "v1.0.0".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            path: default_path(),
            version: default_version(),
            device: default_device(),
        }
    }
}
