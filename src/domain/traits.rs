//! Capability traits
//!
//! The pipeline only ever sees these traits, so any adapter that honours
//! the contract can be swapped in at the composition root.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{DomainError, PredictionRequest, PredictionResponse};

/// A model that turns preprocessed input into raw output
#[async_trait]
pub trait Model: Send + Sync {
    /// Run inference on preprocessed input
    async fn predict(&self, input: Value) -> Result<Value>;

    /// Version label of the loaded model
    fn version(&self) -> &str;
}

/// Turns raw request features into model input
#[async_trait]
pub trait Preprocessor: Send + Sync {
    async fn transform(&self, features: &Map<String, Value>) -> Result<Value>;
}

/// Turns raw model output into the response payload
///
/// Implementations must fail when the raw output is absent (`null`).
#[async_trait]
pub trait Postprocessor: Send + Sync {
    async fn transform(&self, raw_output: Value) -> Result<Map<String, Value>>;
}

/// The prediction use case as seen by the HTTP boundary
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse, DomainError>;
}

/// Boxed model type for use in the pipeline
pub type BoxedModel = Box<dyn Model>;

/// Boxed preprocessor type for use in the pipeline
pub type BoxedPreprocessor = Box<dyn Preprocessor>;

/// Boxed postprocessor type for use in the pipeline
pub type BoxedPostprocessor = Box<dyn Postprocessor>;
