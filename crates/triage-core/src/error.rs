use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed request payload: {0}")]
    MalformedPayload(String),
}

/// Failure of the intent classifier collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    #[error("intent classifier unavailable: {0}")]
    Unavailable(String),

    #[error("intent classifier returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Failure of a prediction or report-generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend rejected the request: {0}")]
    Rejected(String),
}
