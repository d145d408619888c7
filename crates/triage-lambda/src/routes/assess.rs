use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use triage_core::models::outcome::{OrchestrationResult, Status};

use crate::state::AppState;

/// Run one assessment. The body is the raw request payload.
///
/// Always answers with an `OrchestrationResult`; `error` results are sent
/// as 400, everything else as 200.
pub async fn assess(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<OrchestrationResult>) {
    let result = state.orchestrator.invoke_json(&body).await;

    let status = match result.status {
        Status::Error => StatusCode::BAD_REQUEST,
        Status::Complete | Status::NeedMoreData => StatusCode::OK,
    };
    (status, Json(result))
}
