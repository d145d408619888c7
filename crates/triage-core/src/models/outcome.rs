use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::decision::Decision;
use super::prediction::PredictionResult;

/// Terminal status reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Status {
    Complete,
    NeedMoreData,
    Error,
}

impl Status {
    /// Map a terminal decision to its caller-facing status.
    ///
    /// Returns `None` for `Pending` and `RouteToModels`, which are never
    /// observed outside a run.
    pub fn from_terminal(decision: Decision) -> Option<Self> {
        match decision {
            Decision::Complete => Some(Status::Complete),
            Decision::NeedMoreData => Some(Status::NeedMoreData),
            Decision::Error => Some(Status::Error),
            Decision::Pending | Decision::RouteToModels => None,
        }
    }
}

/// The caller-facing result of one orchestration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrchestrationResult {
    pub run_id: Uuid,
    pub status: Status,
    pub missing_parameters: Vec<String>,
    pub predictions: Vec<PredictionResult>,
    pub report: Option<String>,
    pub follow_up_questions: Vec<String>,
    pub trace: Vec<String>,
    /// Set only when `status` is `error`.
    pub error: Option<String>,
}

impl OrchestrationResult {
    /// A well-formed `error` result for input that could not be routed.
    pub fn rejected(run_id: Uuid, message: impl Into<String>, trace: Vec<String>) -> Self {
        Self {
            run_id,
            status: Status::Error,
            missing_parameters: Vec::new(),
            predictions: Vec::new(),
            report: None,
            follow_up_questions: Vec::new(),
            trace,
            error: Some(message.into()),
        }
    }
}
