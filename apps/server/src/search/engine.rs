//! Query executors: predicate + text-constraint fetch per entity kind
//!
//! The facility and test pipelines touch disjoint predicate sets and run
//! concurrently. Results are unordered here; ordering happens in
//! [`crate::search::combine`]. Any store failure aborts the whole search;
//! partial results are never returned.

use crate::{
    db::CatalogStore,
    models::{Hospital, MedicalTest, SearchFilters},
    search::{
        filter::{self, CompiledFilters, PriceRange},
        text::{self, EntityKind},
    },
    Result,
};

/// Fetched candidates, each carrying its text-match rank (0 when no text
/// query was given).
#[derive(Debug, Default)]
pub struct EngineOutput {
    pub hospitals: Vec<(Hospital, f32)>,
    pub tests: Vec<(MedicalTest, f32)>,
    pub price: PriceRange,
}

/// Run filter compilation, text resolution and both entity fetches.
pub async fn run(
    store: &dyn CatalogStore,
    query: &str,
    filters: &SearchFilters,
) -> Result<EngineOutput> {
    let CompiledFilters {
        facility,
        test,
        price,
    } = filter::compile(filters, store).await?;

    let (hospitals, tests) = tokio::try_join!(
        fetch_hospitals(store, query, facility),
        fetch_tests(store, query, test),
    )?;

    Ok(EngineOutput {
        hospitals,
        tests,
        price,
    })
}

async fn fetch_hospitals(
    store: &dyn CatalogStore,
    query: &str,
    mut predicates: filter::FacilityPredicates,
) -> Result<Vec<(Hospital, f32)>> {
    let resolved = text::resolve(store, EntityKind::Facility, query).await?;
    let ranks = resolved.ranks();
    predicates.ids = std::mem::take(&mut predicates.ids).intersect(resolved.constraint());

    let hospitals = store.find_hospitals(&predicates).await?;
    Ok(hospitals
        .into_iter()
        .map(|h| {
            let rank = ranks.get(&h.id).copied().unwrap_or(0.0);
            (h, rank)
        })
        .collect())
}

async fn fetch_tests(
    store: &dyn CatalogStore,
    query: &str,
    mut predicates: filter::TestPredicates,
) -> Result<Vec<(MedicalTest, f32)>> {
    let resolved = text::resolve(store, EntityKind::Test, query).await?;
    let ranks = resolved.ranks();
    predicates.ids = std::mem::take(&mut predicates.ids).intersect(resolved.constraint());

    let tests = store.find_tests(&predicates).await?;
    Ok(tests
        .into_iter()
        .map(|t| {
            let rank = ranks.get(&t.id).copied().unwrap_or(0.0);
            (t, rank)
        })
        .collect())
}
