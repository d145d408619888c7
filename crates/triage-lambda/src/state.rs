use std::sync::Arc;

use tracing::info;
use triage_bedrock::{BedrockIntentClassifier, BedrockReportBackend};
use triage_catalog::ModelCatalog;
use triage_catalog::extract::ParameterExtractor;
use triage_predict::HttpPredictionBackend;
use triage_router::{Collaborators, Orchestrator};

use crate::config::TriageConfig;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Load the catalog and wire the Bedrock and HTTP collaborators.
    /// Fails start-up on a bad catalog or prediction URL.
    pub async fn from_config(config: &TriageConfig) -> eyre::Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => ModelCatalog::load(path)?,
            None => {
                info!("no catalog path configured, using built-in catalog");
                ModelCatalog::builtin()?
            }
        };

        let bedrock = triage_bedrock::client::build_client_with_region(&config.region).await;
        let vocabulary: Vec<String> = catalog
            .parameter_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let collaborators = Collaborators {
            classifier: Arc::new(BedrockIntentClassifier::new(
                bedrock.clone(),
                &config.classifier_model_id,
                &vocabulary,
            )),
            predictions: Arc::new(HttpPredictionBackend::new(&config.prediction_url)?),
            reports: Arc::new(BedrockReportBackend::new(bedrock, &config.report_model_id)),
        };

        let extractor = match &config.narrative_fields {
            Some(fields) => ParameterExtractor::new(fields.iter().cloned()),
            None => ParameterExtractor::default(),
        };

        info!(
            models = catalog.len(),
            prediction_url = %config.prediction_url,
            classifier_model = %config.classifier_model_id,
            report_model = %config.report_model_id,
            "router configured"
        );

        let orchestrator = Orchestrator::new(Arc::new(catalog), collaborators)
            .with_settings(config.settings.clone())
            .with_extractor(extractor);

        Ok(Self::new(orchestrator))
    }
}
