use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use eyre::WrapErr;
use triage_router::RouterSettings;

const DEFAULT_PREDICTION_URL: &str = "http://localhost:8080";
const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";
const DEFAULT_REGION: &str = "us-east-1";

/// Process configuration, read once at cold start.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Catalog file; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    pub prediction_url: String,
    pub classifier_model_id: String,
    pub report_model_id: String,
    pub region: String,
    /// Overrides the default narrative allow-list when set.
    pub narrative_fields: Option<Vec<String>>,
    pub settings: RouterSettings,
}

impl TriageConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = RouterSettings::default();

        let narrative_fields = get("TRIAGE_NARRATIVE_FIELDS").map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect()
        });

        let settings = RouterSettings {
            classifier_timeout: millis(&get, "TRIAGE_CLASSIFIER_TIMEOUT_MS")?
                .unwrap_or(defaults.classifier_timeout),
            backend_timeout: millis(&get, "TRIAGE_BACKEND_TIMEOUT_MS")?
                .unwrap_or(defaults.backend_timeout),
            report_timeout: millis(&get, "TRIAGE_REPORT_TIMEOUT_MS")?
                .unwrap_or(defaults.report_timeout),
            max_concurrent_backend_calls: parsed(&get, "TRIAGE_MAX_CONCURRENCY")?
                .unwrap_or(defaults.max_concurrent_backend_calls),
        };

        let classifier_model_id =
            get("TRIAGE_CLASSIFIER_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());
        let report_model_id = get("TRIAGE_REPORT_MODEL_ID").unwrap_or_else(|| classifier_model_id.clone());

        Ok(Self {
            catalog_path: get("TRIAGE_CATALOG_PATH").map(PathBuf::from),
            prediction_url: get("TRIAGE_PREDICTION_URL")
                .unwrap_or_else(|| DEFAULT_PREDICTION_URL.to_string()),
            classifier_model_id,
            report_model_id,
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            narrative_fields,
            settings,
        })
    }
}

fn parsed<T, G>(get: &G, key: &str) -> eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .wrap_err_with(|| format!("{key} must be a non-negative integer, got {raw:?}"))
        })
        .transpose()
}

fn millis<G>(get: &G, key: &str) -> eyre::Result<Option<Duration>>
where
    G: Fn(&str) -> Option<String>,
{
    Ok(parsed::<u64, G>(get, key)?.map(Duration::from_millis))
}
