//! Feature validation, renaming and type coercion

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use super::as_float;
use crate::domain::{DomainError, Preprocessor};

/// Default input preprocessor
///
/// 1. checks that the required features are present and non-null
/// 2. renames features through the optional mapping
/// 3. normalizes values: numbers become floats, strings are lowercased,
///    arrays keep only their numeric elements (as floats)
pub struct DefaultPreprocessor {
    required_features: Vec<String>,
    feature_mapping: HashMap<String, String>,
}

impl DefaultPreprocessor {
    pub fn new(required_features: Vec<String>, feature_mapping: HashMap<String, String>) -> Self {
        Self {
            required_features,
            feature_mapping,
        }
    }

    fn validate(&self, features: &Map<String, Value>) -> Result<(), DomainError> {
        for name in &self.required_features {
            match features.get(name) {
                None => {
                    return Err(DomainError::preprocessing(format!(
                        "Required feature missing: {}",
                        name
                    )))
                }
                Some(Value::Null) => {
                    return Err(DomainError::invalid_feature(format!(
                        "Feature cannot be null: {}",
                        name
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn mapped_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.feature_mapping
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }
}

impl Default for DefaultPreprocessor {
    fn default() -> Self {
        Self::new(vec!["product_id".to_string()], HashMap::new())
    }
}

#[async_trait]
impl Preprocessor for DefaultPreprocessor {
    async fn transform(&self, features: &Map<String, Value>) -> Result<Value> {
        tracing::debug!(
            "Preprocessing features: {:?}",
            features.keys().collect::<Vec<_>>()
        );

        self.validate(features)?;

        let normalized = features
            .iter()
            .map(|(name, value)| (self.mapped_name(name).to_string(), normalize(value)))
            .collect::<Map<String, Value>>();

        Ok(Value::Object(normalized))
    }
}

fn normalize(value: &Value) -> Value {
    match value {
        Value::Number(_) => as_float(value).unwrap_or_else(|| value.clone()),
        Value::String(s) => Value::String(s.to_lowercase()),
        Value::Array(items) => Value::Array(items.iter().filter_map(as_float).collect()),
        // bool, object and null pass through untouched
        other => other.clone(),
    }
}
