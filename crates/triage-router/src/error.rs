use thiserror::Error;
use triage_core::models::decision::Decision;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("orchestration cancelled")]
    Cancelled,

    #[error("illegal state transition {from} -> {to}")]
    InvalidTransition { from: Decision, to: Decision },
}
