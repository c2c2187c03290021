//! Per-test price aggregation
//!
//! For each candidate test: fetch its available offers (price-range pushed
//! down), compute lowest/highest price and offering count, attach the
//! resolved category. A test with zero qualifying offers keeps 0/0 prices
//! and is dropped entirely when a price bound was requested: price
//! filtering is a post-fetch step and can exclude tests that matched every
//! other filter.
//!
//! Offer fetches run with bounded concurrency and preserve input order.

use crate::{
    db::CatalogStore,
    models::{api::TestHit, MedicalTest, TestCategory},
    search::filter::PriceRange,
    Result,
};
use futures::{stream, StreamExt, TryStreamExt};
use rust_decimal::Decimal;

pub async fn aggregate_tests(
    store: &dyn CatalogStore,
    tests: Vec<(MedicalTest, f32)>,
    range: &PriceRange,
    concurrency: usize,
) -> Result<Vec<TestHit>> {
    let aggregated: Vec<TestHit> = stream::iter(tests)
        .map(|(test, rank)| aggregate_one(store, test, rank, range))
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    // Post-fetch price exclusion: with a bound present, zero qualifying
    // offers removes the test from the result set.
    Ok(aggregated
        .into_iter()
        .filter(|hit| !(range.is_active() && hit.available_hospitals == 0))
        .collect())
}

async fn aggregate_one(
    store: &dyn CatalogStore,
    test: MedicalTest,
    rank: f32,
    range: &PriceRange,
) -> Result<TestHit> {
    let prices = store.offer_prices(test.id, range).await?;

    let lowest_price = prices.iter().min().copied().unwrap_or(Decimal::ZERO);
    let highest_price = prices.iter().max().copied().unwrap_or(Decimal::ZERO);
    let available_hospitals = prices.len();

    let category = store
        .category_by_id(test.category_id)
        .await?
        .unwrap_or_else(TestCategory::placeholder);

    Ok(TestHit {
        test,
        category,
        lowest_price,
        highest_price,
        available_hospitals,
        rank,
    })
}
