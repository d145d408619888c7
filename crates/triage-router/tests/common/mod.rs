//! Deterministic in-process doubles for the router's collaborators.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use triage_catalog::ModelCatalog;
use triage_core::backend::{
    BackendPrediction, BoxFuture, Classification, GeneratedReport, IntentClassifier,
    PredictionBackend, ReportBackend,
};
use triage_core::error::{BackendError, ClassifierError};
use triage_core::models::payload::{Narrative, Parameters, RequestPayload};
use triage_core::models::prediction::PredictionResult;
use triage_router::{Collaborators, Orchestrator, RouterSettings};

pub const CARDIO_PARAMETERS: [&str; 11] = [
    "age",
    "gender",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
];

pub fn cardio_catalog() -> ModelCatalog {
    catalog(&[("cardiovascular_risk", "cardio_tool", &CARDIO_PARAMETERS[..])])
}

pub fn catalog(models: &[(&str, &str, &[&str])]) -> ModelCatalog {
    let records: Vec<Value> = models
        .iter()
        .map(|(name, tool, params)| json!({"name": name, "tool": tool, "parameters": params}))
        .collect();
    ModelCatalog::from_slice(&serde_json::to_vec(&records).unwrap()).unwrap()
}

pub fn partial_cardio_payload() -> RequestPayload {
    RequestPayload::new()
        .with("age", 54)
        .with("gender", 2)
        .with("ap_hi", 145)
        .with("ap_lo", 95)
}

pub fn full_cardio_payload() -> RequestPayload {
    partial_cardio_payload()
        .with("height", 168)
        .with("weight", 81)
        .with("cholesterol", 2)
        .with("gluc", 1)
        .with("smoke", 0)
        .with("alco", 0)
        .with("active", 1)
}

pub fn prediction(value: Value, probability: f64) -> BackendPrediction {
    BackendPrediction {
        prediction: value,
        probability: Some(probability),
        explanation: None,
    }
}

// ── Classifier ───────────────────────────────────────────────────────────────

pub struct ScriptedClassifier {
    reply: Result<Classification, ClassifierError>,
    delay: Duration,
    pub calls: AtomicUsize,
    pub seen_summaries: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn deciding(decision: &str) -> Self {
        Self::replying(Ok(Classification {
            decision: decision.to_string(),
            extracted_fields: Parameters::new(),
            reasoning: "scripted".to_string(),
        }))
    }

    pub fn routing() -> Self {
        Self::deciding("route_to_models")
    }

    pub fn extracting(decision: &str, fields: Value) -> Self {
        Self::replying(Ok(Classification {
            decision: decision.to_string(),
            extracted_fields: serde_json::from_value(fields).unwrap(),
            reasoning: "scripted".to_string(),
        }))
    }

    pub fn failing() -> Self {
        Self::replying(Err(ClassifierError::Unavailable("connection refused".to_string())))
    }

    pub fn replying(reply: Result<Classification, ClassifierError>) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            seen_summaries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl IntentClassifier for ScriptedClassifier {
    fn classify<'a>(
        &'a self,
        _narrative: &'a Narrative,
        summary: &'a str,
    ) -> BoxFuture<'a, Result<Classification, ClassifierError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_summaries.lock().unwrap().push(summary.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply.clone()
        })
    }
}

// ── Prediction backend ───────────────────────────────────────────────────────

struct ToolScript {
    reply: Result<BackendPrediction, BackendError>,
    delay: Duration,
}

/// Per-tool scripted replies. Records every call and tracks how many calls
/// were in flight at once and how many were dropped before finishing.
#[derive(Default)]
pub struct ScriptedBackend {
    tools: HashMap<String, ToolScript>,
    pub calls: Mutex<Vec<(String, Parameters)>>,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
    pub abandoned: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, tool: &str, prediction: BackendPrediction) -> Self {
        self.script(tool, Ok(prediction), Duration::ZERO)
    }

    pub fn answer_after(self, tool: &str, prediction: BackendPrediction, delay: Duration) -> Self {
        self.script(tool, Ok(prediction), delay)
    }

    pub fn fail(self, tool: &str, error: BackendError) -> Self {
        self.script(tool, Err(error), Duration::ZERO)
    }

    fn script(
        mut self,
        tool: &str,
        reply: Result<BackendPrediction, BackendError>,
        delay: Duration,
    ) -> Self {
        self.tools.insert(tool.to_string(), ToolScript { reply, delay });
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, tool: &str) -> Vec<Parameters> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == tool)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

/// Counts a call as abandoned unless it is disarmed on completion.
struct DropGuard {
    counter: Arc<AtomicUsize>,
    armed: bool,
}

impl Drop for DropGuard {
    fn drop(&mut self) {
        if self.armed {
            self.counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl PredictionBackend for ScriptedBackend {
    fn invoke<'a>(
        &'a self,
        tool: &'a str,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<BackendPrediction, BackendError>> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push((tool.to_string(), parameters.clone()));

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            let mut guard = DropGuard {
                counter: self.abandoned.clone(),
                armed: true,
            };

            let result = match self.tools.get(tool) {
                Some(script) => {
                    if !script.delay.is_zero() {
                        tokio::time::sleep(script.delay).await;
                    }
                    script.reply.clone()
                }
                None => Err(BackendError::Rejected(format!("unknown tool {tool}"))),
            };

            guard.armed = false;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        })
    }
}

// ── Report backend ───────────────────────────────────────────────────────────

pub struct RecordingReports {
    reply: Result<GeneratedReport, BackendError>,
    delay: Duration,
    pub contexts: Mutex<Vec<String>>,
    pub prediction_counts: Mutex<Vec<usize>>,
}

impl RecordingReports {
    pub fn ok() -> Self {
        Self::replying(Ok(GeneratedReport {
            report: "Elevated cardiovascular risk; recommend lipid panel.".to_string(),
            follow_up_questions: vec!["Any family history of heart disease?".to_string()],
        }))
    }

    pub fn failing() -> Self {
        Self::replying(Err(BackendError::Unavailable("model throttled".to_string())))
    }

    pub fn replying(reply: Result<GeneratedReport, BackendError>) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            contexts: Mutex::new(Vec::new()),
            prediction_counts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.contexts.lock().unwrap().len()
    }
}

impl ReportBackend for RecordingReports {
    fn generate<'a>(
        &'a self,
        context: &'a str,
        predictions: &'a [PredictionResult],
    ) -> BoxFuture<'a, Result<GeneratedReport, BackendError>> {
        Box::pin(async move {
            self.contexts.lock().unwrap().push(context.to_string());
            self.prediction_counts.lock().unwrap().push(predictions.len());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply.clone()
        })
    }
}

// ── Wiring ───────────────────────────────────────────────────────────────────

pub struct Harness {
    pub orchestrator: Orchestrator,
    pub classifier: Arc<ScriptedClassifier>,
    pub backend: Arc<ScriptedBackend>,
    pub reports: Arc<RecordingReports>,
}

pub fn harness(
    catalog: ModelCatalog,
    classifier: ScriptedClassifier,
    backend: ScriptedBackend,
    reports: RecordingReports,
) -> Harness {
    harness_with(catalog, classifier, backend, reports, fast_settings())
}

pub fn harness_with(
    catalog: ModelCatalog,
    classifier: ScriptedClassifier,
    backend: ScriptedBackend,
    reports: RecordingReports,
    settings: RouterSettings,
) -> Harness {
    let classifier = Arc::new(classifier);
    let backend = Arc::new(backend);
    let reports = Arc::new(reports);

    let orchestrator = Orchestrator::new(
        Arc::new(catalog),
        Collaborators {
            classifier: classifier.clone(),
            predictions: backend.clone(),
            reports: reports.clone(),
        },
    )
    .with_settings(settings);

    Harness {
        orchestrator,
        classifier,
        backend,
        reports,
    }
}

pub fn fast_settings() -> RouterSettings {
    RouterSettings {
        classifier_timeout: Duration::from_millis(500),
        backend_timeout: Duration::from_millis(500),
        report_timeout: Duration::from_millis(500),
        max_concurrent_backend_calls: 4,
    }
}
