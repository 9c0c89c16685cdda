//! Parameter context
//!
//! The named values a composition runs against. Read-only while composing.

mod field_lookup;

use clause_core::{CoreError, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named values supplied by the caller for one composition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterContext {
    values: HashMap<String, Value>,
}

impl ParameterContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a JSON object
    pub fn from_json(json: serde_json::Value) -> Result<Self, CoreError> {
        match Value::from(json) {
            Value::Object(values) => Ok(Self { values }),
            other => Err(CoreError::TypeError {
                expected: "object",
                actual: other.type_name(),
            }),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Top-level parameter
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Value at a path of keys; `Value::Null` when any segment is missing
    pub fn get_path(&self, path: &[String]) -> Value {
        field_lookup::get_nested_value(&self.values, path)
    }

    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl From<HashMap<String, Value>> for ParameterContext {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}
