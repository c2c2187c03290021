//! Public catalog reads

use crate::{state::AppState, Error, Result};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// GET /api/hospitals
pub async fn list_hospitals(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let hospitals = state
        .store
        .list_hospitals()
        .await
        .map_err(|e| e.or_internal("Failed to fetch hospitals"))?;
    Ok(Json(json!({ "hospitals": hospitals })))
}

/// GET /api/hospitals/:id, the hospital with its priced services.
pub async fn get_hospital(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let hospital = state
        .store
        .hospital_by_id(id)
        .await
        .map_err(|e| e.or_internal("Failed to fetch hospitals"))?
        .ok_or_else(|| Error::NotFound("Hospital not found".into()))?;

    let services = state
        .store
        .offers_for_hospital(id, None)
        .await
        .map_err(|e| e.or_internal("Failed to fetch hospitals"))?;

    Ok(Json(json!({ "hospital": hospital, "services": services })))
}

/// GET /api/tests
pub async fn list_tests(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let tests = state
        .store
        .list_tests()
        .await
        .map_err(|e| e.or_internal("Failed to fetch medical tests"))?;
    Ok(Json(json!({ "tests": tests })))
}

/// GET /api/tests/:id, the test with its offers across hospitals.
pub async fn get_test(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let test = state
        .store
        .test_by_id(id)
        .await
        .map_err(|e| e.or_internal("Failed to fetch medical tests"))?
        .ok_or_else(|| Error::NotFound("Medical test not found".into()))?;

    let offers = state
        .store
        .offers_for_test(id)
        .await
        .map_err(|e| e.or_internal("Failed to fetch medical tests"))?;

    Ok(Json(json!({ "test": test, "prices": offers })))
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let categories = state
        .store
        .list_categories()
        .await
        .map_err(|e| e.or_internal("Failed to fetch categories"))?;
    Ok(Json(json!({ "categories": categories })))
}
