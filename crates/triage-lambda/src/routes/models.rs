use axum::Json;
use axum::extract::{Path, State};
use triage_core::models::model_spec::ModelSpec;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_models(State(state): State<AppState>) -> Json<Vec<ModelSpec>> {
    Json(state.orchestrator.catalog().all().to_vec())
}

pub async fn get_model(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ModelSpec>, ApiError> {
    let spec = state
        .orchestrator
        .catalog()
        .lookup(&name)
        .ok_or_else(|| ApiError::NotFound(format!("model not found: {name}")))?;

    Ok(Json(spec.clone()))
}
