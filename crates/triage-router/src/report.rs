//! Report assembly: wrap the narrative and every prediction into one
//! context block and hand it to the report backend.

use std::time::Duration;

use tracing::{info, warn};
use triage_core::backend::ReportBackend;
use triage_core::models::payload::Narrative;
use triage_core::models::prediction::PredictionResult;

/// Report text returned when generation fails. Predictions are still
/// delivered alongside it.
pub const REPORT_UNAVAILABLE: &str =
    "<generation error> The narrative report could not be generated; model predictions are included with this result.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledReport {
    pub report: String,
    pub follow_up_questions: Vec<String>,
    /// Why generation failed, when `report` is the placeholder.
    pub failure: Option<String>,
}

pub struct ReportAssembler<'a> {
    backend: &'a dyn ReportBackend,
    timeout: Duration,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(backend: &'a dyn ReportBackend, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Never fails: backend errors and timeouts become the placeholder
    /// report with no follow-up questions.
    pub async fn assemble(
        &self,
        narrative: &Narrative,
        predictions: &[PredictionResult],
    ) -> AssembledReport {
        let context = build_context(narrative, predictions);
        let call = self.backend.generate(&context, predictions);

        let failure = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(generated)) => {
                info!(
                    follow_ups = generated.follow_up_questions.len(),
                    "report generated"
                );
                return AssembledReport {
                    report: generated.report,
                    follow_up_questions: generated.follow_up_questions,
                    failure: None,
                };
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!("timed out after {} ms", self.timeout.as_millis()),
        };

        warn!(error = %failure, "report generation failed");
        AssembledReport {
            report: REPORT_UNAVAILABLE.to_string(),
            follow_up_questions: Vec::new(),
            failure: Some(failure),
        }
    }
}

/// Build the XML-style context block sent to the report backend.
///
/// Failed predictions are included and marked `unavailable` so the report
/// can acknowledge them.
pub fn build_context(narrative: &Narrative, predictions: &[PredictionResult]) -> String {
    let mut block = String::from("<assessment_context>\n");

    if !narrative.is_empty() {
        block.push_str("<narrative>\n");
        for (field, text) in narrative.iter() {
            block.push_str(&format!("<field name=\"{field}\">\n"));
            block.push_str(text);
            if !text.ends_with('\n') {
                block.push('\n');
            }
            block.push_str("</field>\n");
        }
        block.push_str("</narrative>\n");
    }

    block.push_str("<predictions>\n");
    for p in predictions {
        match &p.error {
            None => {
                block.push_str(&format!(
                    "<prediction model=\"{}\" status=\"ok\">\n",
                    p.model_name
                ));
                block.push_str(&format!("prediction: {}\n", p.raw_prediction));
                if let Some(probability) = p.probability {
                    block.push_str(&format!("probability: {probability}\n"));
                }
                if let Some(explanation) = &p.explanation {
                    block.push_str(&format!("explanation: {explanation}\n"));
                }
            }
            Some(error) => {
                block.push_str(&format!(
                    "<prediction model=\"{}\" status=\"unavailable\">\n",
                    p.model_name
                ));
                block.push_str(&format!("reason: {error}\n"));
            }
        }
        block.push_str("</prediction>\n");
    }
    block.push_str("</predictions>\n");

    block.push_str("</assessment_context>");
    block
}
