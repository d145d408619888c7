//! Fan-out of eligible models to the prediction backend.
//!
//! Calls run concurrently, bounded per run by a semaphore, and are joined
//! in input order so the result sequence follows catalog order no matter
//! which backend answers first.

use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};
use triage_core::backend::{BackendPrediction, PredictionBackend};
use triage_core::models::model_spec::ModelSpec;
use triage_core::models::payload::Parameters;
use triage_core::models::prediction::{ErrorKind, PredictionResult};

use crate::settings::RouterSettings;

pub struct Dispatcher<'a> {
    backend: &'a dyn PredictionBackend,
    timeout: Duration,
    max_concurrent: usize,
}

impl<'a> Dispatcher<'a> {
    pub fn new(backend: &'a dyn PredictionBackend, settings: &RouterSettings) -> Self {
        Self {
            backend,
            timeout: settings.backend_timeout,
            max_concurrent: settings.max_concurrent_backend_calls.max(1),
        }
    }

    /// Invoke every model in `eligible` and return one result per model,
    /// in the same order.
    ///
    /// A failure on one model is recorded on its own result and never
    /// affects the others.
    pub async fn dispatch(
        &self,
        eligible: &[&ModelSpec],
        parameters: &Parameters,
    ) -> Vec<PredictionResult> {
        let permits = Semaphore::new(self.max_concurrent);

        let calls = eligible
            .iter()
            .map(|spec| self.invoke_one(spec, parameters, &permits));

        join_all(calls).await
    }

    async fn invoke_one(
        &self,
        spec: &ModelSpec,
        parameters: &Parameters,
        permits: &Semaphore,
    ) -> PredictionResult {
        let Ok(_permit) = permits.acquire().await else {
            return PredictionResult::failed(
                &spec.name,
                ErrorKind::BackendUnavailable("dispatch pool closed".to_string()),
            );
        };

        let subset = spec.select(parameters);
        let call = self.backend.invoke(&spec.backend_tool, &subset);

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(prediction)) => accept(spec, prediction),
            Ok(Err(e)) => {
                warn!(model = %spec.name, tool = %spec.backend_tool, error = %e, "prediction failed");
                PredictionResult::failed(&spec.name, e.into())
            }
            Err(_) => {
                warn!(
                    model = %spec.name,
                    tool = %spec.backend_tool,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "prediction timed out"
                );
                PredictionResult::failed(
                    &spec.name,
                    ErrorKind::BackendUnavailable(format!(
                        "timed out after {} ms",
                        self.timeout.as_millis()
                    )),
                )
            }
        }
    }
}

/// Reject probabilities outside `[0, 1]`; anything else is taken as-is.
fn accept(spec: &ModelSpec, prediction: BackendPrediction) -> PredictionResult {
    if let Some(p) = prediction.probability
        && !(0.0..=1.0).contains(&p)
    {
        warn!(model = %spec.name, probability = p, "probability out of range");
        return PredictionResult::failed(
            &spec.name,
            ErrorKind::BackendRejected(format!("probability {p} outside [0, 1]")),
        );
    }

    info!(model = %spec.name, tool = %spec.backend_tool, "prediction received");
    PredictionResult::succeeded(&spec.name, prediction)
}
