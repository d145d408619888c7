use thiserror::Error;
use triage_core::error::{BackendError, ClassifierError};

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response did not conform to expected schema: {0}")]
    SchemaViolation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<BedrockError> for ClassifierError {
    fn from(e: BedrockError) -> Self {
        match e {
            BedrockError::Invocation(msg) => ClassifierError::Unavailable(msg),
            other => ClassifierError::MalformedResponse(other.to_string()),
        }
    }
}

impl From<BedrockError> for BackendError {
    fn from(e: BedrockError) -> Self {
        match e {
            BedrockError::Invocation(msg) => BackendError::Unavailable(msg),
            other => BackendError::Rejected(other.to_string()),
        }
    }
}
