use tracing_subscriber::EnvFilter;

use triage_lambda::config::TriageConfig;
use triage_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = TriageConfig::from_env()?;
    let state = AppState::from_config(&config).await?;

    lambda_http::run(triage_lambda::router(state))
        .await
        .map_err(|e| eyre::eyre!(e))
}
