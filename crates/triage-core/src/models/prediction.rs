use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::backend::BackendPrediction;
use crate::error::BackendError;

/// Outcome of dispatching one eligible model.
///
/// Failed dispatches are kept (with `error` set) so the report can say
/// which models were unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionResult {
    pub model_name: String,
    pub raw_prediction: Value,
    pub probability: Option<f64>,
    pub explanation: Option<String>,
    pub error: Option<ErrorKind>,
}

impl PredictionResult {
    pub fn succeeded(model_name: impl Into<String>, prediction: BackendPrediction) -> Self {
        Self {
            model_name: model_name.into(),
            raw_prediction: prediction.prediction,
            probability: prediction.probability,
            explanation: prediction.explanation,
            error: None,
        }
    }

    pub fn failed(model_name: impl Into<String>, error: ErrorKind) -> Self {
        Self {
            model_name: model_name.into(),
            raw_prediction: Value::Null,
            probability: None,
            explanation: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Why a single model produced no prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
#[ts(export)]
pub enum ErrorKind {
    BackendUnavailable(String),
    BackendRejected(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::BackendUnavailable(detail) => write!(f, "backend unavailable: {detail}"),
            ErrorKind::BackendRejected(detail) => write!(f, "backend rejected: {detail}"),
        }
    }
}

impl From<BackendError> for ErrorKind {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Unavailable(detail) => ErrorKind::BackendUnavailable(detail),
            BackendError::Rejected(detail) => ErrorKind::BackendRejected(detail),
        }
    }
}
