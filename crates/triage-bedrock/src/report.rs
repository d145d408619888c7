use aws_sdk_bedrockruntime::Client;
use tracing::{info, warn};
use triage_core::backend::{BoxFuture, GeneratedReport, ReportBackend};
use triage_core::error::BackendError;
use triage_core::models::prediction::PredictionResult;

use crate::converse::invoke_converse;
use crate::error::BedrockError;
use crate::parse::parse_structured;
use crate::prompt::{self, REPORT_SYSTEM_PROMPT};

/// Report generation backed by a Converse model.
pub struct BedrockReportBackend {
    client: Client,
    model_id: String,
}

impl BedrockReportBackend {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    async fn run(
        &self,
        context: &str,
        predictions: &[PredictionResult],
    ) -> Result<GeneratedReport, BedrockError> {
        let message = prompt::report_message(context, predictions)?;
        let text =
            invoke_converse(&self.client, &self.model_id, REPORT_SYSTEM_PROMPT, &message).await?;
        let report: GeneratedReport = parse_structured(&text, "report")?;
        if report.report.trim().is_empty() {
            return Err(BedrockError::SchemaViolation("report text is empty".to_string()));
        }
        info!(
            model = %self.model_id,
            follow_ups = report.follow_up_questions.len(),
            "report model responded"
        );
        Ok(report)
    }
}

impl ReportBackend for BedrockReportBackend {
    fn generate<'a>(
        &'a self,
        context: &'a str,
        predictions: &'a [PredictionResult],
    ) -> BoxFuture<'a, Result<GeneratedReport, BackendError>> {
        Box::pin(async move {
            self.run(context, predictions).await.map_err(|e| {
                warn!(model = %self.model_id, error = %e, "report call failed");
                BackendError::from(e)
            })
        })
    }
}
