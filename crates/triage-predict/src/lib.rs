//! triage-predict
//!
//! JSON-over-HTTP prediction backend. Each catalog tool is served at
//! `POST {base_url}/predict/{tool}`; the request body is the model's
//! parameter subset and the response is
//! `{"prediction": ..., "probability": ..., "explanation": ...}`.

pub mod error;

use reqwest::Client;
use tracing::{debug, warn};
use triage_core::backend::{BackendPrediction, BoxFuture, PredictionBackend};
use triage_core::error::BackendError;
use triage_core::models::payload::Parameters;

use crate::error::PredictError;

/// Longest error body kept in an error message.
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct HttpPredictionBackend {
    client: Client,
    base_url: String,
}

impl HttpPredictionBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, PredictError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured client (proxies, TLS roots, pooling).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Result<Self, PredictError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(PredictError::InvalidBaseUrl(base_url));
        }
        Ok(Self { client, base_url })
    }

    /// The URL a tool is served at.
    pub fn endpoint(&self, tool: &str) -> Result<String, PredictError> {
        let valid = !tool.is_empty()
            && tool
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(PredictError::InvalidTool(tool.to_string()));
        }
        Ok(format!("{}/predict/{tool}", self.base_url))
    }

    async fn call(
        &self,
        tool: &str,
        parameters: &Parameters,
    ) -> Result<BackendPrediction, PredictError> {
        let url = self.endpoint(tool)?;
        debug!(tool, fields = parameters.len(), "posting prediction request");

        let response = self.client.post(&url).json(parameters).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(PredictError::Status {
                status: status.as_u16(),
                body: truncate(text.trim()),
            });
        }

        serde_json::from_slice(&body).map_err(|e| PredictError::Decode(e.to_string()))
    }
}

impl PredictionBackend for HttpPredictionBackend {
    fn invoke<'a>(
        &'a self,
        tool: &'a str,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<BackendPrediction, BackendError>> {
        Box::pin(async move {
            self.call(tool, parameters).await.map_err(|e| {
                warn!(tool, error = %e, "prediction request failed");
                BackendError::from(e)
            })
        })
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= ERROR_BODY_LIMIT {
        return text.to_string();
    }
    let head: String = text.chars().take(ERROR_BODY_LIMIT).collect();
    format!("{head}…")
}
