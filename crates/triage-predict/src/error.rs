use thiserror::Error;
use triage_core::error::BackendError;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid prediction service URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid tool name: {0:?}")]
    InvalidTool(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("prediction service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("undecodable prediction response: {0}")]
    Decode(String),
}

impl From<PredictError> for BackendError {
    fn from(e: PredictError) -> Self {
        match e {
            PredictError::Transport(_) => BackendError::Unavailable(e.to_string()),
            // Timeouts and throttling are transient, not a verdict on the input.
            PredictError::Status { status, .. } if status >= 500 || status == 408 || status == 429 => {
                BackendError::Unavailable(e.to_string())
            }
            other => BackendError::Rejected(other.to_string()),
        }
    }
}
