//! Payload normalisation: split a request into model parameters and
//! narrative text.
//!
//! The extractor never decides relevance. Anything outside the narrative
//! allow-list is a candidate parameter; the matcher decides which ones a
//! model actually uses.

use std::collections::BTreeSet;

use serde_json::Value;
use triage_core::models::payload::{Narrative, Parameters, RequestPayload};

/// Payload fields treated as free text rather than model inputs.
pub const DEFAULT_NARRATIVE_FIELDS: &[&str] = &[
    "history",
    "medical_history",
    "symptoms",
    "chief_complaint",
    "query",
    "question",
    "notes",
    "message",
    "free_text",
    "description",
];

/// Longest string value shown verbatim in a parameter summary.
const SUMMARY_VALUE_LIMIT: usize = 40;

/// The two halves of a payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub parameters: Parameters,
    pub narrative: Narrative,
}

#[derive(Debug, Clone)]
pub struct ParameterExtractor {
    narrative_fields: BTreeSet<String>,
}

impl Default for ParameterExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_NARRATIVE_FIELDS.iter().copied())
    }
}

impl ParameterExtractor {
    pub fn new<I, S>(narrative_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            narrative_fields: narrative_fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_narrative(&self, field: &str) -> bool {
        self.narrative_fields.contains(field)
    }

    /// Split `payload`. Never fails.
    ///
    /// Parameter values pass through untouched, except `null`, which counts
    /// as absent. Narrative strings are kept verbatim; other JSON values in
    /// a narrative field are rendered as JSON text.
    pub fn extract(&self, payload: &RequestPayload) -> Extraction {
        let mut extraction = Extraction::default();

        for (key, value) in payload.iter() {
            if value.is_null() {
                continue;
            }
            if self.is_narrative(key) {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                if !text.trim().is_empty() {
                    extraction.narrative.insert(key.clone(), text);
                }
            } else {
                extraction.parameters.insert(key.clone(), value.clone());
            }
        }

        extraction
    }
}

/// Render a short `key=value` summary of known parameters for the
/// classifier.
pub fn summarize(parameters: &Parameters) -> String {
    if parameters.is_empty() {
        return "no structured parameters".to_string();
    }

    parameters
        .iter()
        .map(|(key, value)| format!("{key}={}", render_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > SUMMARY_VALUE_LIMIT => {
            let head: String = s.chars().take(SUMMARY_VALUE_LIMIT).collect();
            format!("{head:?}…")
        }
        Value::String(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}
