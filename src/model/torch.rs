//! PyTorch (TorchScript) model adapter

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::resolve_artifact;
use crate::domain::{DomainError, Model};

const FRAMEWORK: &str = "PyTorch";

/// TorchScript model adapter
///
/// Expects a model saved with `torch.jit.save` and tensor-shaped input.
/// No TorchScript runtime is linked into this build, so every prediction
/// fails with `ModelNotLoadedError` once the artifact has been located.
pub struct TorchModel {
    path: PathBuf,
    version: String,
    device: String,
}

impl TorchModel {
    pub fn new(path: PathBuf, version: String, device: String) -> Self {
        Self {
            path,
            version,
            device,
        }
    }

    /// Device inference would run on
    pub fn device(&self) -> &str {
        &self.device
    }
}

#[async_trait]
impl Model for TorchModel {
    async fn predict(&self, _input: Value) -> Result<Value> {
        let path = resolve_artifact(&self.path, FRAMEWORK)?;
        tracing::info!(device = %self.device, "Executing PyTorch model prediction");

        Err(DomainError::model_not_loaded("Failed to load PyTorch model")
            .with_details(format!(
                "PyTorch backend is not available in this build (model: {})",
                path.display()
            ))
            .into())
    }

    fn version(&self) -> &str {
        &self.version
    }
}
