//! Admin back-office handlers
//!
//! CRUD for the three catalog resources goes through one generic handler
//! set; each resource implements [`AdminResource`] to bind its store calls
//! and public messages. Bulk price updates and search analytics live here
//! too. The admin router is gated by [`crate::auth::admin_middleware`].

use crate::{
    db::CatalogStore,
    models::{
        Hospital, HospitalInput, HospitalService, MedicalTest, MedicalTestInput, PriceUpdate,
        TestCategory, TestCategoryInput,
    },
    state::AppState,
    Error, Result,
};
use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use uuid::Uuid;

/// A catalog resource manageable through the generic admin CRUD surface.
#[async_trait]
pub trait AdminResource: Serialize + Sized + Send + 'static {
    type Input: DeserializeOwned + Send + 'static;

    /// Singular display name, used in not-found and delete messages.
    const SINGULAR: &'static str;
    /// Plural noun for generic failure messages.
    const PLURAL: &'static str;

    async fn list(store: &dyn CatalogStore) -> Result<Vec<Self>>;
    async fn find(store: &dyn CatalogStore, id: Uuid) -> Result<Option<Self>>;
    async fn create(store: &dyn CatalogStore, input: Self::Input) -> Result<Self>;
    async fn update(store: &dyn CatalogStore, id: Uuid, input: Self::Input)
        -> Result<Option<Self>>;
    async fn delete(store: &dyn CatalogStore, id: Uuid) -> Result<bool>;
}

#[async_trait]
impl AdminResource for Hospital {
    type Input = HospitalInput;

    const SINGULAR: &'static str = "Hospital";
    const PLURAL: &'static str = "hospitals";

    async fn list(store: &dyn CatalogStore) -> Result<Vec<Self>> {
        store.list_hospitals().await
    }
    async fn find(store: &dyn CatalogStore, id: Uuid) -> Result<Option<Self>> {
        store.hospital_by_id(id).await
    }
    async fn create(store: &dyn CatalogStore, input: Self::Input) -> Result<Self> {
        store.create_hospital(input).await
    }
    async fn update(
        store: &dyn CatalogStore,
        id: Uuid,
        input: Self::Input,
    ) -> Result<Option<Self>> {
        store.update_hospital(id, input).await
    }
    async fn delete(store: &dyn CatalogStore, id: Uuid) -> Result<bool> {
        store.delete_hospital(id).await
    }
}

#[async_trait]
impl AdminResource for MedicalTest {
    type Input = MedicalTestInput;

    const SINGULAR: &'static str = "Medical test";
    const PLURAL: &'static str = "medical tests";

    async fn list(store: &dyn CatalogStore) -> Result<Vec<Self>> {
        store.list_tests().await
    }
    async fn find(store: &dyn CatalogStore, id: Uuid) -> Result<Option<Self>> {
        store.test_by_id(id).await
    }
    async fn create(store: &dyn CatalogStore, input: Self::Input) -> Result<Self> {
        store.create_test(input).await
    }
    async fn update(
        store: &dyn CatalogStore,
        id: Uuid,
        input: Self::Input,
    ) -> Result<Option<Self>> {
        store.update_test(id, input).await
    }
    async fn delete(store: &dyn CatalogStore, id: Uuid) -> Result<bool> {
        store.delete_test(id).await
    }
}

#[async_trait]
impl AdminResource for TestCategory {
    type Input = TestCategoryInput;

    const SINGULAR: &'static str = "Test category";
    const PLURAL: &'static str = "test categories";

    async fn list(store: &dyn CatalogStore) -> Result<Vec<Self>> {
        store.list_categories().await
    }
    async fn find(store: &dyn CatalogStore, id: Uuid) -> Result<Option<Self>> {
        store.category_by_id(id).await
    }
    async fn create(store: &dyn CatalogStore, input: Self::Input) -> Result<Self> {
        store.create_category(input).await
    }
    async fn update(
        store: &dyn CatalogStore,
        id: Uuid,
        input: Self::Input,
    ) -> Result<Option<Self>> {
        store.update_category(id, input).await
    }
    async fn delete(store: &dyn CatalogStore, id: Uuid) -> Result<bool> {
        store.delete_category(id).await
    }
}

fn fetch_failed<R: AdminResource>() -> String {
    format!("Failed to fetch {}", R::PLURAL)
}

fn not_found<R: AdminResource>() -> Error {
    Error::NotFound(format!("{} not found", R::SINGULAR))
}

async fn list_resources<R: AdminResource>(State(state): State<AppState>) -> Result<Json<Vec<R>>> {
    let rows = R::list(state.store.as_ref())
        .await
        .map_err(|e| e.or_internal(&fetch_failed::<R>()))?;
    Ok(Json(rows))
}

async fn get_resource<R: AdminResource>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<R>> {
    let row = R::find(state.store.as_ref(), id)
        .await
        .map_err(|e| e.or_internal(&fetch_failed::<R>()))?
        .ok_or_else(not_found::<R>)?;
    Ok(Json(row))
}

async fn create_resource<R: AdminResource>(
    State(state): State<AppState>,
    Json(input): Json<R::Input>,
) -> Result<Json<R>> {
    let row = R::create(state.store.as_ref(), input)
        .await
        .map_err(|e| e.or_internal(&format!("Failed to create {}", R::SINGULAR.to_lowercase())))?;
    tracing::info!(resource = R::SINGULAR, "Admin created resource");
    Ok(Json(row))
}

async fn update_resource<R: AdminResource>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<R::Input>,
) -> Result<Json<R>> {
    let row = R::update(state.store.as_ref(), id, input)
        .await
        .map_err(|e| e.or_internal(&format!("Failed to update {}", R::SINGULAR.to_lowercase())))?
        .ok_or_else(not_found::<R>)?;
    tracing::info!(resource = R::SINGULAR, %id, "Admin updated resource");
    Ok(Json(row))
}

async fn delete_resource<R: AdminResource>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = R::delete(state.store.as_ref(), id)
        .await
        .map_err(|e| e.or_internal(&format!("Failed to delete {}", R::SINGULAR.to_lowercase())))?;
    if !deleted {
        return Err(not_found::<R>());
    }
    tracing::info!(resource = R::SINGULAR, %id, "Admin deleted resource");
    Ok(Json(json!({
        "message": format!("{} deleted successfully", R::SINGULAR)
    })))
}

/// CRUD routes for one resource, to be nested under its plural path.
pub fn resource_routes<R: AdminResource>() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_resources::<R>).post(create_resource::<R>),
        )
        .route(
            "/:id",
            get(get_resource::<R>)
                .put(update_resource::<R>)
                .delete(delete_resource::<R>),
        )
}

/// All priced offers for one test, for the price-management screen.
async fn list_test_prices(
    State(state): State<AppState>,
    Path(test_id): Path<Uuid>,
) -> Result<Json<Vec<HospitalService>>> {
    let offers = state
        .store
        .offers_for_test(test_id)
        .await
        .map_err(|e| e.or_internal("Failed to fetch prices"))?;
    Ok(Json(offers))
}

async fn bulk_update_prices(
    State(state): State<AppState>,
    Json(updates): Json<Vec<PriceUpdate>>,
) -> Result<Json<serde_json::Value>> {
    if updates.is_empty() {
        return Err(Error::Validation("updates must not be empty".into()));
    }

    let count = updates.len();
    state
        .store
        .apply_price_updates(&updates)
        .await
        .map_err(|e| e.or_internal("Failed to update prices"))?;

    tracing::info!(count, "Applied bulk price update");
    Ok(Json(json!({
        "message": "Bulk price update successful",
        "updated": count
    })))
}

/// Search analytics: the most frequent queries.
async fn analytics(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let popular = state
        .store
        .popular_searches(10)
        .await
        .map_err(|e| e.or_internal("Failed to fetch analytics"))?;
    Ok(Json(json!({ "popularSearches": popular })))
}

/// The `/api/admin` surface. Authentication is layered on by the caller.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .nest("/hospitals", resource_routes::<Hospital>())
        .nest("/tests", resource_routes::<MedicalTest>())
        .nest("/categories", resource_routes::<TestCategory>())
        .route("/prices", put(bulk_update_prices))
        .route("/prices/test/:test_id", get(list_test_prices))
        .route("/analytics", get(analytics))
}
