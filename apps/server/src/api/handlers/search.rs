//! Unified search endpoint

use crate::{
    models::{SearchRequest, SearchResponse},
    state::AppState,
    Result,
};
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /api/search
///
/// Runs the full pipeline and records the query for analytics off the
/// request path; a failed recording never fails the search.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let query = request.query.trim().to_string();

    let response = state
        .search
        .search(request)
        .await
        .map_err(|e| e.or_internal("Failed to perform search"))?;

    if !query.is_empty() {
        let store = Arc::clone(&state.store);
        tokio::spawn(async move {
            if let Err(err) = store.record_search(&query).await {
                tracing::warn!(error = %err, query = %query, "Failed to record search query");
            }
        });
    }

    Ok(Json(response))
}
