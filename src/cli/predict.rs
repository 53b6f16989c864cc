//! One-shot prediction command

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde_json::{json, Map, Value};

use crate::config::AppConfig;
use crate::domain::{PredictionRequest, PredictionService};
use crate::engine::PredictionPipeline;

/// Run one prediction through the configured pipeline and print the result
pub async fn predict(
    config: AppConfig,
    features: Option<String>,
    input: Option<PathBuf>,
) -> Result<()> {
    let features = read_features(features, input)?;
    let request = PredictionRequest::new(features)?;

    let pipeline = PredictionPipeline::from_config(&config)?;

    match pipeline.predict(request).await {
        Ok(response) => {
            let output = json!({
                "prediction": response.prediction(),
                "confidence": response.confidence(),
                "model_version": response.model_version(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            let output = json!({
                "error": e.kind().name(),
                "message": e.message(),
                "details": e.details(),
            });
            eprintln!("{}", serde_json::to_string_pretty(&output)?);
            Err(anyhow!("{}: {}", e.kind(), e.summary()))
        }
    }
}

fn read_features(features: Option<String>, input: Option<PathBuf>) -> Result<Map<String, Value>> {
    let text = match (features, input) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => return Err(anyhow!("Either --features or --input is required")),
    };

    match serde_json::from_str::<Value>(&text).context("Features are not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow!("Features must be a JSON object")),
    }
}
