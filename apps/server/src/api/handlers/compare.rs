//! Hospital comparison endpoint

use crate::{
    models::{CompareRequest, CompareResponse},
    services::compare,
    state::AppState,
    Result,
};
use axum::{extract::State, Json};

/// POST /api/compare
pub async fn compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>> {
    let response = compare::compare(state.store.as_ref(), request)
        .await
        .map_err(|e| e.or_internal("Failed to perform comparison"))?;
    Ok(Json(response))
}
