use std::collections::HashMap;
use std::time::Duration;

use triage_lambda::config::TriageConfig;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_when_nothing_is_set() {
    let config = TriageConfig::from_lookup(lookup(&[])).unwrap();

    assert!(config.catalog_path.is_none());
    assert_eq!(config.prediction_url, "http://localhost:8080");
    assert_eq!(config.region, "us-east-1");
    assert_eq!(config.report_model_id, config.classifier_model_id);
    assert!(config.narrative_fields.is_none());
    assert_eq!(config.settings.classifier_timeout, Duration::from_secs(10));
    assert_eq!(config.settings.backend_timeout, Duration::from_secs(15));
    assert_eq!(config.settings.report_timeout, Duration::from_secs(60));
    assert_eq!(config.settings.max_concurrent_backend_calls, 4);
}

#[test]
fn environment_overrides_are_read() {
    let config = TriageConfig::from_lookup(lookup(&[
        ("TRIAGE_CATALOG_PATH", "/opt/catalog.json"),
        ("TRIAGE_PREDICTION_URL", "https://models.internal"),
        ("TRIAGE_REPORT_MODEL_ID", "us.anthropic.claude-opus-4-20250514-v1:0"),
        ("AWS_REGION", "eu-west-1"),
        ("TRIAGE_NARRATIVE_FIELDS", "history, symptoms,,notes "),
        ("TRIAGE_BACKEND_TIMEOUT_MS", "2500"),
        ("TRIAGE_MAX_CONCURRENCY", "8"),
    ]))
    .unwrap();

    assert_eq!(
        config.catalog_path.as_deref(),
        Some(std::path::Path::new("/opt/catalog.json"))
    );
    assert_eq!(config.prediction_url, "https://models.internal");
    assert_eq!(config.report_model_id, "us.anthropic.claude-opus-4-20250514-v1:0");
    assert_eq!(config.region, "eu-west-1");
    assert_eq!(
        config.narrative_fields,
        Some(vec!["history".to_string(), "symptoms".to_string(), "notes".to_string()])
    );
    assert_eq!(config.settings.backend_timeout, Duration::from_millis(2500));
    assert_eq!(config.settings.max_concurrent_backend_calls, 8);
}

#[test]
fn blank_values_count_as_unset() {
    let config = TriageConfig::from_lookup(lookup(&[("TRIAGE_CATALOG_PATH", "  ")])).unwrap();
    assert!(config.catalog_path.is_none());
}

#[test]
fn unparseable_numbers_fail_start_up() {
    let err = TriageConfig::from_lookup(lookup(&[("TRIAGE_REPORT_TIMEOUT_MS", "soon")]))
        .unwrap_err();
    assert!(err.to_string().contains("TRIAGE_REPORT_TIMEOUT_MS"));
}
