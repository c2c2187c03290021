//! Core storage trait for the catalog backend
//!
//! `CatalogStore` is the relational + full-text capability every pipeline
//! stage receives by injection. The production backend is Postgres
//! ([`crate::db::store::PostgresCatalogStore`]); tests run against an
//! in-memory implementation. The trait is object-safe so handlers and
//! services can hold an `Arc<dyn CatalogStore>`.

use crate::{
    models::{
        Hospital, HospitalInput, HospitalService, MedicalTest, MedicalTestInput, PriceUpdate,
        TestCategory, TestCategoryInput,
    },
    search::filter::{FacilityPredicates, PriceRange, TestPredicates},
    Result,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// One full-text candidate: entity id plus relevance rank.
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct RankedId {
    pub id: Uuid,
    pub rank: f32,
}

/// Location columns surfaced by autocomplete.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationRow {
    pub city: String,
    pub area: String,
    pub division: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PopularSearch {
    pub query: String,
    pub search_count: i64,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    // --- Full-text ranked search -------------------------------------------

    /// Ranked hospital candidates for a non-blank query, descending rank.
    async fn search_hospital_ids(&self, query: &str) -> Result<Vec<RankedId>>;

    /// Ranked test candidates for a non-blank query, descending rank.
    async fn search_test_ids(&self, query: &str) -> Result<Vec<RankedId>>;

    // --- Predicate-based fetch ---------------------------------------------

    async fn find_hospitals(&self, predicates: &FacilityPredicates) -> Result<Vec<Hospital>>;

    async fn find_tests(&self, predicates: &TestPredicates) -> Result<Vec<MedicalTest>>;

    // --- Categories --------------------------------------------------------

    /// Case-insensitive substring lookup by name. `Ok(None)` when no
    /// category matches; errors are transport failures only.
    async fn category_by_name(&self, name: &str) -> Result<Option<TestCategory>>;

    async fn category_by_id(&self, id: Uuid) -> Result<Option<TestCategory>>;

    // --- Offers ------------------------------------------------------------

    /// Prices of available offers for one test, with the price range pushed
    /// down. Applied to `price`, never `discounted_price`.
    async fn offer_prices(&self, test_id: Uuid, range: &PriceRange) -> Result<Vec<Decimal>>;

    /// All offers of one hospital, optionally narrowed to one test.
    async fn offers_for_hospital(
        &self,
        hospital_id: Uuid,
        test_id: Option<Uuid>,
    ) -> Result<Vec<HospitalService>>;

    /// All offers for one test (admin price listing).
    async fn offers_for_test(&self, test_id: Uuid) -> Result<Vec<HospitalService>>;

    // --- Single reads ------------------------------------------------------

    async fn hospital_by_id(&self, id: Uuid) -> Result<Option<Hospital>>;

    async fn test_by_id(&self, id: Uuid) -> Result<Option<MedicalTest>>;

    // --- Autocomplete ------------------------------------------------------

    async fn suggest_hospital_names(&self, query: &str, limit: i64) -> Result<Vec<String>>;

    async fn suggest_test_names(&self, query: &str, limit: i64) -> Result<Vec<String>>;

    async fn suggest_locations(&self, query: &str, limit: i64) -> Result<Vec<LocationRow>>;

    // --- Search analytics --------------------------------------------------

    /// Count one execution of `query` in the popular-search counters.
    async fn record_search(&self, query: &str) -> Result<()>;

    async fn popular_searches(&self, limit: i64) -> Result<Vec<PopularSearch>>;

    // --- Admin CRUD --------------------------------------------------------

    async fn list_hospitals(&self) -> Result<Vec<Hospital>>;
    async fn create_hospital(&self, input: HospitalInput) -> Result<Hospital>;
    async fn update_hospital(&self, id: Uuid, input: HospitalInput) -> Result<Option<Hospital>>;
    async fn delete_hospital(&self, id: Uuid) -> Result<bool>;

    async fn list_tests(&self) -> Result<Vec<MedicalTest>>;
    async fn create_test(&self, input: MedicalTestInput) -> Result<MedicalTest>;
    async fn update_test(&self, id: Uuid, input: MedicalTestInput) -> Result<Option<MedicalTest>>;
    async fn delete_test(&self, id: Uuid) -> Result<bool>;

    async fn list_categories(&self) -> Result<Vec<TestCategory>>;
    async fn create_category(&self, input: TestCategoryInput) -> Result<TestCategory>;
    async fn update_category(
        &self,
        id: Uuid,
        input: TestCategoryInput,
    ) -> Result<Option<TestCategory>>;
    async fn delete_category(&self, id: Uuid) -> Result<bool>;

    /// Apply a batch of partial offer updates. Unknown offer ids are
    /// ignored, matching upsert-by-id semantics.
    async fn apply_price_updates(&self, updates: &[PriceUpdate]) -> Result<()>;
}
