//! Default pre/postprocessing adapters

mod postprocessor;
mod preprocessor;

pub use postprocessor::DefaultPostprocessor;
pub use preprocessor::DefaultPreprocessor;

use serde_json::Value;

/// Numeric JSON value as an `f64` number, `None` for anything else
fn as_float(value: &Value) -> Option<Value> {
    value.as_f64().map(Value::from)
}
