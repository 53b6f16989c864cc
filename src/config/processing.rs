//! Pre/postprocessing configuration

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings for the default preprocessor and postprocessor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Label written into every prediction payload as `format`
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// JSON file mapping request feature names to model feature names
    #[serde(default)]
    pub feature_mapping_file: Option<PathBuf>,

    /// Features that must be present and non-null
    #[serde(default = "default_required_features")]
    pub required_features: Vec<String>,
}

fn default_output_format() -> String {
    "json".to_string()
}

fn default_required_features() -> Vec<String> {
    vec!["product_id".to_string()]
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            feature_mapping_file: None,
            required_features: default_required_features(),
        }
    }
}

impl ProcessingConfig {
    /// Load the feature name mapping, empty when no file is configured
    pub fn load_feature_mapping(&self) -> Result<HashMap<String, String>> {
        let Some(path) = &self.feature_mapping_file else {
            return Ok(HashMap::new());
        };

        tracing::info!("Loading feature mapping from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read feature mapping {}", path.display()))?;
        let mapping: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid feature mapping {}", path.display()))?;
        Ok(mapping)
    }
}
