use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::{Instrument, info, info_span, warn};
use triage_catalog::ModelCatalog;
use triage_catalog::extract::{self, Extraction, ParameterExtractor};
use triage_catalog::satisfaction::match_parameters;
use triage_core::backend::{IntentClassifier, PredictionBackend, ReportBackend};
use triage_core::models::decision::{Decision, IntentDecision};
use triage_core::models::outcome::OrchestrationResult;
use triage_core::models::payload::RequestPayload;
use uuid::Uuid;

use crate::dispatch::Dispatcher;
use crate::error::RouterError;
use crate::report::ReportAssembler;
use crate::settings::RouterSettings;
use crate::state::{OrchestrationState, Stage};

/// The external services a run talks to. Built once at process start.
#[derive(Clone)]
pub struct Collaborators {
    pub classifier: Arc<dyn IntentClassifier>,
    pub predictions: Arc<dyn PredictionBackend>,
    pub reports: Arc<dyn ReportBackend>,
}

/// Routes one request through classify → match/dispatch → report.
///
/// Holds only read-only shared state; every `invoke` builds its own
/// [`OrchestrationState`], so concurrent runs never interfere and a
/// resubmitted payload simply starts a fresh run.
pub struct Orchestrator {
    catalog: Arc<ModelCatalog>,
    extractor: ParameterExtractor,
    collaborators: Collaborators,
    settings: RouterSettings,
}

impl Orchestrator {
    pub fn new(catalog: Arc<ModelCatalog>, collaborators: Collaborators) -> Self {
        Self {
            catalog,
            extractor: ParameterExtractor::default(),
            collaborators,
            settings: RouterSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RouterSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_extractor(mut self, extractor: ParameterExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Run the state machine for one payload.
    ///
    /// Always yields a well-formed result. Dropping the returned future
    /// cancels the run, including any in-flight backend calls.
    pub async fn invoke(&self, payload: RequestPayload) -> OrchestrationResult {
        let run_id = Uuid::new_v4();
        self.run(run_id, payload)
            .instrument(info_span!("orchestration", run_id = %run_id))
            .await
    }

    /// Like [`invoke`](Self::invoke), for an untyped JSON value. Anything
    /// other than a JSON object yields an `error` result.
    pub async fn invoke_value(&self, value: Value) -> OrchestrationResult {
        match RequestPayload::try_from(value) {
            Ok(payload) => self.invoke(payload).await,
            Err(e) => reject(e.to_string()),
        }
    }

    /// Like [`invoke_value`](Self::invoke_value), for a raw request body.
    pub async fn invoke_json(&self, body: &[u8]) -> OrchestrationResult {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.invoke_value(value).await,
            Err(e) => reject(format!("request body is not valid JSON: {e}")),
        }
    }

    /// Run until finished or until `cancelled` resolves, whichever comes
    /// first. On cancellation the partially built state is discarded.
    pub async fn invoke_until<F>(
        &self,
        payload: RequestPayload,
        cancelled: F,
    ) -> Result<OrchestrationResult, RouterError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancelled => {
                info!("orchestration cancelled by caller");
                Err(RouterError::Cancelled)
            }
            result = self.invoke(payload) => Ok(result),
        }
    }

    async fn run(&self, run_id: Uuid, payload: RequestPayload) -> OrchestrationResult {
        let mut state = OrchestrationState::new(payload);
        info!(fields = state.payload.len(), "orchestration started");
        state.annotate(
            Stage::Intake,
            format!("{} field(s) received", state.payload.len()),
        );

        loop {
            let next = match state.decision() {
                Decision::Pending => self.classify(&mut state).await,
                Decision::RouteToModels => self.route(&mut state).await,
                Decision::NeedMoreData | Decision::Complete | Decision::Error => break,
            };
            if let Err(e) = state.advance(next) {
                warn!(error = %e, "state machine rejected transition");
                state.fail(e.to_string());
            }
        }

        info!(
            decision = %state.decision(),
            predictions = state.predictions.len(),
            missing = state.missing_parameters.len(),
            "orchestration finished"
        );
        state.into_result(run_id)
    }

    /// Stage 1: ask the classifier whether to route, merging any fields it
    /// extracted. Classifier trouble of any kind degrades to
    /// `NeedMoreData`.
    async fn classify(&self, state: &mut OrchestrationState) -> Decision {
        let extraction = self.extractor.extract(&state.payload);
        let summary = extract::summarize(&extraction.parameters);

        let call = self
            .collaborators
            .classifier
            .classify(&extraction.narrative, &summary);
        let classification = match tokio::time::timeout(self.settings.classifier_timeout, call).await
        {
            Ok(Ok(classification)) => classification,
            Ok(Err(e)) => {
                warn!(error = %e, "classifier failed, falling back to need_more_data");
                state.annotate(Stage::Classify, format!("{e}; falling back to need_more_data"));
                return self.surface_missing(state);
            }
            Err(_) => {
                let ms = self.settings.classifier_timeout.as_millis();
                warn!(timeout_ms = ms as u64, "classifier timed out, falling back to need_more_data");
                state.annotate(
                    Stage::Classify,
                    format!("classifier timed out after {ms} ms; falling back to need_more_data"),
                );
                return self.surface_missing(state);
            }
        };

        let intent = match classification.intent() {
            Ok(intent) => intent,
            Err(e) => {
                warn!(error = %e, "unparseable classifier decision, falling back to need_more_data");
                state.annotate(Stage::Classify, format!("{e}; falling back to need_more_data"));
                return self.surface_missing(state);
            }
        };

        tracing::debug!(reasoning = %classification.reasoning, "classifier reasoning");
        let merged = state.payload.merge_absent(classification.extracted_fields);
        info!(decision = %intent, merged = merged.len(), "intent classified");
        state.annotate(
            Stage::Classify,
            format!("decision={intent}; merged [{}]", merged.join(", ")),
        );

        match intent {
            IntentDecision::NeedMoreData => self.surface_missing(state),
            IntentDecision::RouteToModels | IntentDecision::Complete => Decision::RouteToModels,
        }
    }

    /// Report what is missing without dispatching anything.
    fn surface_missing(&self, state: &mut OrchestrationState) -> Decision {
        let extraction = self.extractor.extract(&state.payload);
        let report = match_parameters(&extraction.parameters, &self.catalog);
        state.missing_parameters = report.missing_union();
        state.annotate(
            Stage::Match,
            format!(
                "{} of {} model(s) eligible; missing [{}]",
                report.eligible().len(),
                self.catalog.len(),
                state.missing_parameters.join(", ")
            ),
        );
        Decision::NeedMoreData
    }

    /// Stage 2 (and 3): match, dispatch every eligible model, then build
    /// the report if anything succeeded.
    async fn route(&self, state: &mut OrchestrationState) -> Decision {
        let Extraction {
            parameters,
            narrative,
        } = self.extractor.extract(&state.payload);

        let satisfaction = match_parameters(&parameters, &self.catalog);
        let eligible = satisfaction.eligible();
        state.missing_parameters = satisfaction.missing_union();
        state.annotate(
            Stage::Match,
            format!(
                "{} of {} model(s) eligible; missing [{}]",
                eligible.len(),
                self.catalog.len(),
                state.missing_parameters.join(", ")
            ),
        );

        if eligible.is_empty() {
            info!(missing = state.missing_parameters.len(), "no eligible models");
            return Decision::NeedMoreData;
        }

        let dispatcher = Dispatcher::new(self.collaborators.predictions.as_ref(), &self.settings);
        let predictions = dispatcher.dispatch(&eligible, &parameters).await;

        let failed: Vec<&str> = predictions
            .iter()
            .filter(|p| !p.is_success())
            .map(|p| p.model_name.as_str())
            .collect();
        let succeeded = predictions.len() - failed.len();
        state.annotate(
            Stage::Dispatch,
            format!(
                "{succeeded} of {} model(s) returned a prediction; failed [{}]",
                predictions.len(),
                failed.join(", ")
            ),
        );
        state.predictions = predictions;

        if succeeded == 0 {
            warn!("every eligible model failed");
            return Decision::NeedMoreData;
        }

        let assembler =
            ReportAssembler::new(self.collaborators.reports.as_ref(), self.settings.report_timeout);
        let assembled = assembler.assemble(&narrative, &state.predictions).await;
        match &assembled.failure {
            Some(reason) => state.annotate(
                Stage::Report,
                format!("generation failed ({reason}); placeholder report returned"),
            ),
            None => state.annotate(
                Stage::Report,
                format!(
                    "generated with {} follow-up question(s)",
                    assembled.follow_up_questions.len()
                ),
            ),
        }
        state.report = Some(assembled.report);
        state.follow_up_questions = assembled.follow_up_questions;

        Decision::Complete
    }
}

fn reject(message: String) -> OrchestrationResult {
    let run_id = Uuid::new_v4();
    warn!(run_id = %run_id, error = %message, "request payload rejected");
    let trace = vec![format!("{}: {message}", Stage::Intake)];
    OrchestrationResult::rejected(run_id, message, trace)
}
