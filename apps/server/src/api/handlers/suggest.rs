//! Autocomplete endpoint

use crate::{services::suggest, state::AppState, Result};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub struct AutocompleteParams {
    /// Accepts both `q` and `query` for the search prefix.
    #[serde(default, alias = "query")]
    pub q: String,
}

/// GET /api/search/autocomplete?q=...
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<serde_json::Value>> {
    let suggestions = suggest::suggest(
        state.store.as_ref(),
        &params.q,
        state.config.search.autocomplete_limit,
    )
    .await
    .map_err(|e| e.or_internal("Failed to fetch suggestions"))?;

    Ok(Json(json!({ "suggestions": suggestions })))
}
