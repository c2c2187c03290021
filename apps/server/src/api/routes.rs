//! Route tables for the public API surface

use crate::{api::handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Public routes nested under `/api`. The admin sub-router is attached by
/// the caller so the auth layer can be applied with state.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(handlers::search::search))
        .route("/search/autocomplete", get(handlers::suggest::autocomplete))
        .route("/compare", post(handlers::compare::compare))
        .route("/hospitals", get(handlers::catalog::list_hospitals))
        .route("/hospitals/:id", get(handlers::catalog::get_hospital))
        .route("/tests", get(handlers::catalog::list_tests))
        .route("/tests/:id", get(handlers::catalog::get_test))
        .route("/categories", get(handlers::catalog::list_categories))
}
