use aws_sdk_bedrockruntime::Client;
use tracing::{info, warn};
use triage_core::backend::{BoxFuture, Classification, IntentClassifier};
use triage_core::error::ClassifierError;
use triage_core::models::payload::Narrative;

use crate::converse::invoke_converse;
use crate::error::BedrockError;
use crate::parse::parse_structured;
use crate::prompt;

/// Intent classifier backed by a Converse model.
pub struct BedrockIntentClassifier {
    client: Client,
    model_id: String,
    system_prompt: String,
}

impl BedrockIntentClassifier {
    /// `vocabulary` is the set of parameter names the model may extract,
    /// usually the catalog's `parameter_names()`.
    pub fn new(client: Client, model_id: impl Into<String>, vocabulary: &[String]) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            system_prompt: prompt::classifier_system_prompt(vocabulary),
        }
    }

    async fn run(&self, narrative: &Narrative, summary: &str) -> Result<Classification, BedrockError> {
        let message = prompt::classifier_message(narrative, summary);
        let text =
            invoke_converse(&self.client, &self.model_id, &self.system_prompt, &message).await?;
        let classification: Classification = parse_structured(&text, "classification")?;
        info!(
            model = %self.model_id,
            decision = %classification.decision,
            extracted = classification.extracted_fields.len(),
            "classifier responded"
        );
        Ok(classification)
    }
}

impl IntentClassifier for BedrockIntentClassifier {
    fn classify<'a>(
        &'a self,
        narrative: &'a Narrative,
        summary: &'a str,
    ) -> BoxFuture<'a, Result<Classification, ClassifierError>> {
        Box::pin(async move {
            self.run(narrative, summary).await.map_err(|e| {
                warn!(model = %self.model_id, error = %e, "classifier call failed");
                ClassifierError::from(e)
            })
        })
    }
}
