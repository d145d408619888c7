//! Contracts for the external collaborators the router depends on.
//!
//! Each contract is a small object-safe trait so the router can hold
//! `Arc<dyn _>` handles built once at process start, and tests can
//! substitute deterministic doubles.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{BackendError, ClassifierError};
use crate::models::decision::{IntentDecision, UnknownDecision};
use crate::models::payload::{Narrative, Parameters};
use crate::models::prediction::PredictionResult;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Raw classifier output. `decision` is kept as the string the classifier
/// produced; the router decides what an unparseable value means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub decision: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted_fields: Parameters,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasoning: String,
}

impl Classification {
    pub fn intent(&self) -> Result<IntentDecision, UnknownDecision> {
        self.decision.parse()
    }
}

/// What a prediction backend returns for one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendPrediction {
    pub prediction: Value,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Structured output of the report-generation backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub report: String,
    #[serde(
        default,
        alias = "followUpQuestions",
        deserialize_with = "null_as_default"
    )]
    pub follow_up_questions: Vec<String>,
}

/// Models often send `null` for an empty field; treat it like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decides whether a request has enough data, and may pull structured
/// fields out of the narrative.
pub trait IntentClassifier: Send + Sync {
    fn classify<'a>(
        &'a self,
        narrative: &'a Narrative,
        summary: &'a str,
    ) -> BoxFuture<'a, Result<Classification, ClassifierError>>;
}

/// Remote endpoint serving one or more predictive models, addressed by
/// tool name.
pub trait PredictionBackend: Send + Sync {
    fn invoke<'a>(
        &'a self,
        tool: &'a str,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<BackendPrediction, BackendError>>;
}

/// Turns assembled context plus predictions into report text.
pub trait ReportBackend: Send + Sync {
    fn generate<'a>(
        &'a self,
        context: &'a str,
        predictions: &'a [PredictionResult],
    ) -> BoxFuture<'a, Result<GeneratedReport, BackendError>>;
}
