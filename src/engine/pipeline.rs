//! Prediction pipeline
//!
//! Runs preprocess -> infer -> postprocess -> score -> assemble, one step
//! after another, and classifies a failure by the step it came from.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::AppConfig;
use crate::domain::{
    BoxedModel, BoxedPostprocessor, BoxedPreprocessor, DomainError, Model, Postprocessor,
    PredictionRequest, PredictionResponse, PredictionService, Preprocessor,
};
use crate::model::build_model;
use crate::processing::{DefaultPostprocessor, DefaultPreprocessor};

/// Confidence reported for every prediction until a model-specific score exists
pub const DEFAULT_CONFIDENCE: f64 = 0.8;

/// Confidence score for a prediction
///
/// Must stay a pure function of its inputs and return a value in `[0, 1]`.
pub fn score_confidence(_raw_output: &Value, _processed_output: &Map<String, Value>) -> f64 {
    DEFAULT_CONFIDENCE
}

/// Prediction orchestrator
///
/// Holds no per-call state; share it behind an `Arc` to serve concurrent
/// requests.
pub struct PredictionPipeline {
    model: BoxedModel,
    preprocessor: BoxedPreprocessor,
    postprocessor: BoxedPostprocessor,
}

impl PredictionPipeline {
    /// Create a new pipeline
    ///
    /// # Arguments
    /// * `model` - Inference adapter
    /// * `preprocessor` - Turns request features into model input
    /// * `postprocessor` - Turns raw model output into the response payload
    pub fn new(
        model: BoxedModel,
        preprocessor: BoxedPreprocessor,
        postprocessor: BoxedPostprocessor,
    ) -> Self {
        Self {
            model,
            preprocessor,
            postprocessor,
        }
    }

    /// Build the pipeline described by configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        tracing::info!("Initializing prediction service dependencies");

        let model = build_model(&config.model);

        let feature_mapping = config.processing.load_feature_mapping()?;
        let preprocessor = DefaultPreprocessor::new(
            config.processing.required_features.clone(),
            feature_mapping,
        );

        tracing::info!(
            "Creating postprocessor with {} format",
            config.processing.output_format
        );
        let postprocessor = DefaultPostprocessor::new(config.processing.output_format.clone());

        Ok(Self::new(model, Box::new(preprocessor), Box::new(postprocessor)))
    }

    /// Version label of the wrapped model
    pub fn model_version(&self) -> &str {
        self.model.version()
    }
}

#[async_trait]
impl PredictionService for PredictionPipeline {
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse, DomainError> {
        tracing::info!(
            feature_count = request.len(),
            "Starting prediction pipeline"
        );

        let processed_input = self
            .preprocessor
            .transform(request.features())
            .await
            .map_err(|e| {
                tracing::error!("Preprocessing failed: {:#}", e);
                DomainError::preprocessing("Failed to preprocess input features")
                    .with_details(describe(&e))
            })?;
        tracing::debug!("Input preprocessing completed successfully");

        let raw_output = self.model.predict(processed_input).await.map_err(|e| {
            tracing::error!("Model prediction failed: {:#}", e);
            DomainError::model_prediction("Failed to execute model prediction")
                .with_details(describe(&e))
        })?;
        let model_version = self.model.version().to_string();
        tracing::debug!(
            model_version = %model_version,
            "Model inference completed successfully"
        );

        let processed_output = self
            .postprocessor
            .transform(raw_output.clone())
            .await
            .map_err(|e| {
                tracing::error!("Postprocessing failed: {:#}", e);
                DomainError::postprocessing("Failed to postprocess model output")
                    .with_details(describe(&e))
            })?;
        tracing::debug!("Output postprocessing completed successfully");

        let confidence = score_confidence(&raw_output, &processed_output);

        let response =
            PredictionResponse::new(Value::Object(processed_output), confidence, model_version)
                .map_err(|e| {
                    tracing::error!("Unexpected error in prediction pipeline: {}", e);
                    DomainError::prediction_service("Unexpected error during prediction")
                        .with_details(e.to_string())
                })?;

        tracing::info!(
            confidence = response.confidence(),
            model_version = response.model_version(),
            "Prediction pipeline completed successfully"
        );

        Ok(response)
    }
}

/// Describe a step failure for the `details` field
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<DomainError>() {
        Some(domain) => domain.summary(),
        None => format!("{:#}", err),
    }
}
