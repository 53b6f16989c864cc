//! Scikit-learn model adapter

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::resolve_artifact;
use crate::domain::{DomainError, Model};

const FRAMEWORK: &str = "scikit-learn";

/// Scikit-learn estimator adapter (joblib/pickle artifacts)
pub struct SklearnModel {
    path: PathBuf,
    version: String,
}

impl SklearnModel {
    pub fn new(path: PathBuf, version: String) -> Self {
        Self { path, version }
    }
}

#[async_trait]
impl Model for SklearnModel {
    async fn predict(&self, _input: Value) -> Result<Value> {
        let path = resolve_artifact(&self.path, FRAMEWORK)?;
        tracing::info!("Executing scikit-learn model prediction");

        // TODO: load estimators exported to ONNX once an ONNX runtime is added
        Err(DomainError::model_not_loaded("Failed to load scikit-learn model")
            .with_details(format!(
                "pickle/joblib artifacts cannot be loaded outside Python (model: {})",
                path.display()
            ))
            .into())
    }

    fn version(&self) -> &str {
        &self.version
    }
}
