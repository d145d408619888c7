use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Candidate model parameters, keyed by parameter name.
pub type Parameters = BTreeMap<String, Value>;

/// The inbound request: field name to value, mixing numeric vitals,
/// categorical codes and free-text narrative fields.
///
/// Only ever grows within a run. Fields are merged in, never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestPayload(BTreeMap<String, Value>);

impl RequestPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy when assembling payloads by hand.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// True when the key is present with a non-null value.
    pub fn has_value(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| !v.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge fields extracted by the classifier.
    ///
    /// A field is taken only when the payload has no value for it (missing
    /// or `null`); an explicitly provided value always wins. Null incoming
    /// values and empty keys are ignored. Returns the keys that were
    /// merged, in key order.
    pub fn merge_absent(&mut self, fields: Parameters) -> Vec<String> {
        let mut merged = Vec::new();
        for (key, value) in fields {
            if key.is_empty() || value.is_null() || self.has_value(&key) {
                continue;
            }
            self.0.insert(key.clone(), value);
            merged.push(key);
        }
        merged
    }
}

impl TryFrom<Value> for RequestPayload {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Err(CoreError::MalformedPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        };

        if map.keys().any(|k| k.trim().is_empty()) {
            return Err(CoreError::MalformedPayload(
                "field names must not be empty".to_string(),
            ));
        }

        Ok(Self(map.into_iter().collect()))
    }
}

impl FromIterator<(String, Value)> for RequestPayload {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Free-text context split off the payload: history, symptoms, the
/// caller's question and similar fields that are never model inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    fields: BTreeMap<String, String>,
}

impl Narrative {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, text: impl Into<String>) {
        self.fields.insert(field.into(), text.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
