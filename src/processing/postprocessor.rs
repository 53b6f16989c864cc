//! Shape-based output formatting

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use super::as_float;
use crate::domain::{DomainError, Postprocessor};

/// Default output postprocessor
///
/// Wraps the raw model output in an object according to its shape and tags
/// it with the configured output format.
pub struct DefaultPostprocessor {
    output_format: String,
}

impl DefaultPostprocessor {
    pub fn new(output_format: impl Into<String>) -> Self {
        Self {
            output_format: output_format.into(),
        }
    }

    pub fn output_format(&self) -> &str {
        &self.output_format
    }
}

impl Default for DefaultPostprocessor {
    fn default() -> Self {
        Self::new("json")
    }
}

#[async_trait]
impl Postprocessor for DefaultPostprocessor {
    async fn transform(&self, raw_output: Value) -> Result<Map<String, Value>> {
        tracing::debug!("Postprocessing output of type: {}", type_name(&raw_output));

        if raw_output.is_null() {
            return Err(DomainError::postprocessing("Model output cannot be null").into());
        }

        let mut formatted = format_output(raw_output);
        formatted.insert(
            "format".to_string(),
            Value::String(self.output_format.clone()),
        );
        Ok(formatted)
    }
}

fn format_output(output: Value) -> Map<String, Value> {
    let mut formatted = Map::new();
    match output {
        Value::Object(map) => return map,
        Value::Array(items) => {
            let forecast = items
                .iter()
                .map(|item| as_float(item).unwrap_or_else(|| item.clone()))
                .collect();
            formatted.insert("forecast".to_string(), Value::Array(forecast));
        }
        number @ Value::Number(_) => {
            let value = as_float(&number).unwrap_or(number);
            formatted.insert("prediction".to_string(), value);
        }
        Value::String(s) => {
            formatted.insert("result".to_string(), Value::String(s));
        }
        other => {
            formatted.insert("result".to_string(), Value::String(other.to_string()));
        }
    }
    formatted
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn run(raw: Value) -> Result<Value> {
        DefaultPostprocessor::default()
            .transform(raw)
            .await
            .map(Value::Object)
    }

    #[tokio::test]
    async fn test_array_becomes_forecast() {
        let output = run(json!([150, 180, 200])).await.unwrap();
        assert_eq!(
            output,
            json!({"forecast": [150.0, 180.0, 200.0], "format": "json"})
        );
    }

    #[tokio::test]
    async fn test_scalar_becomes_prediction() {
        let output = run(json!(42)).await.unwrap();
        assert_eq!(output, json!({"prediction": 42.0, "format": "json"}));
    }

    #[tokio::test]
    async fn test_object_passes_through() {
        let output = run(json!({"stock_forecast": [1, 2]})).await.unwrap();
        assert_eq!(
            output,
            json!({"stock_forecast": [1, 2], "format": "json"})
        );
    }

    #[tokio::test]
    async fn test_other_values_become_result() {
        assert_eq!(
            run(json!("restock")).await.unwrap(),
            json!({"result": "restock", "format": "json"})
        );
        assert_eq!(
            run(json!(true)).await.unwrap(),
            json!({"result": "true", "format": "json"})
        );
    }

    #[tokio::test]
    async fn test_null_output_fails() {
        let err = run(Value::Null).await.unwrap_err();
        let domain = err.downcast_ref::<DomainError>().unwrap();
        assert_eq!(domain.kind(), crate::domain::ErrorKind::Postprocessing);
        assert_eq!(domain.message(), "Model output cannot be null");
    }

    #[tokio::test]
    async fn test_custom_output_format() {
        let postprocessor = DefaultPostprocessor::new("array");
        let output = postprocessor.transform(json!([1])).await.unwrap();
        assert_eq!(output["format"], json!("array"));
        assert_eq!(postprocessor.output_format(), "array");
    }
}
