//! Inference adapters
//!
//! One adapter per supported model kind. Neither backend ships with this
//! build: both adapters resolve their artifact and then report that the
//! model could not be loaded, which the pipeline surfaces as a
//! `ModelPredictionError`.

mod sklearn;
mod torch;

pub use sklearn::SklearnModel;
pub use torch::TorchModel;

use std::path::{Path, PathBuf};

use crate::config::{ModelConfig, ModelKind};
use crate::domain::{BoxedModel, DomainError};

/// Construct the adapter selected by configuration
pub fn build_model(config: &ModelConfig) -> BoxedModel {
    match config.kind {
        ModelKind::Torch => {
            tracing::info!("Creating PyTorch model from {}", config.path.display());
            Box::new(TorchModel::new(
                config.path.clone(),
                config.version.clone(),
                config.device.clone(),
            ))
        }
        ModelKind::Sklearn => {
            tracing::info!("Creating scikit-learn model from {}", config.path.display());
            Box::new(SklearnModel::new(
                config.path.clone(),
                config.version.clone(),
            ))
        }
    }
}

/// Check that a model artifact exists and is a file
///
/// `framework` names the backend in the error message.
fn resolve_artifact(path: &Path, framework: &str) -> Result<PathBuf, DomainError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    let details = if path.exists() {
        format!("Model path is not a file: {}", path.display())
    } else {
        format!("Model file not found: {}", path.display())
    };
    tracing::error!("Failed to load {} model: {}", framework, details);
    Err(DomainError::model_not_loaded(format!("Failed to load {} model", framework))
        .with_details(details))
}
