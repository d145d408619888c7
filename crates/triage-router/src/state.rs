use std::fmt;

use triage_core::models::decision::Decision;
use triage_core::models::outcome::{OrchestrationResult, Status};
use triage_core::models::payload::RequestPayload;
use triage_core::models::prediction::PredictionResult;
use uuid::Uuid;

use crate::error::RouterError;

/// Named steps of a run, used to label trace entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Intake,
    Classify,
    Match,
    Dispatch,
    Report,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Intake => "intake",
            Stage::Classify => "classify",
            Stage::Match => "match",
            Stage::Dispatch => "dispatch",
            Stage::Report => "report",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run-scoped aggregate. Created per request, consumed into an
/// [`OrchestrationResult`] when the run ends; never shared or persisted.
#[derive(Debug)]
pub struct OrchestrationState {
    pub payload: RequestPayload,
    pub predictions: Vec<PredictionResult>,
    pub missing_parameters: Vec<String>,
    pub report: Option<String>,
    pub follow_up_questions: Vec<String>,
    decision: Decision,
    error: Option<String>,
    trace: Vec<String>,
    annotated: Vec<Stage>,
}

impl OrchestrationState {
    pub fn new(payload: RequestPayload) -> Self {
        Self {
            payload,
            predictions: Vec::new(),
            missing_parameters: Vec::new(),
            report: None,
            follow_up_questions: Vec::new(),
            decision: Decision::Pending,
            error: None,
            trace: Vec::new(),
            annotated: Vec::new(),
        }
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Move to `next`, refusing any edge the state machine does not allow.
    /// Terminal decisions are final.
    pub fn advance(&mut self, next: Decision) -> Result<(), RouterError> {
        if !self.decision.can_transition_to(next) {
            return Err(RouterError::InvalidTransition {
                from: self.decision,
                to: next,
            });
        }
        tracing::debug!(from = %self.decision, to = %next, "decision advanced");
        self.decision = next;
        Ok(())
    }

    /// End the run in `Error`. No-op if the run already terminated.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.decision.is_terminal() {
            return;
        }
        self.decision = Decision::Error;
        self.error = Some(message.into());
    }

    /// Append a trace line for `stage`. Each stage writes at most once;
    /// later writes for the same stage are dropped.
    pub fn annotate(&mut self, stage: Stage, message: impl fmt::Display) {
        if self.annotated.contains(&stage) {
            tracing::warn!(stage = %stage, "stage already annotated; dropping trace entry");
            return;
        }
        self.annotated.push(stage);
        self.trace.push(format!("{stage}: {message}"));
    }

    pub fn into_result(self, run_id: Uuid) -> OrchestrationResult {
        let Some(status) = Status::from_terminal(self.decision) else {
            return OrchestrationResult::rejected(
                run_id,
                format!("run ended in non-terminal state {}", self.decision),
                self.trace,
            );
        };

        OrchestrationResult {
            run_id,
            status,
            missing_parameters: self.missing_parameters,
            predictions: self.predictions,
            report: self.report,
            follow_up_questions: self.follow_up_questions,
            trace: self.trace,
            error: self.error,
        }
    }
}
