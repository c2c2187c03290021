//! Unified search: validation, pipeline orchestration, envelope assembly
//!
//! One request fans out into the facility and test pipelines, the test side
//! gains price aggregation, and both sets are combined, sorted and paginated
//! as a single sequence before being split back for the response envelope.

use crate::{
    config::Config,
    db::CatalogStore,
    models::{SearchFilters, SearchRequest, SearchResponse, SortKey},
    search::{aggregate, combine, engine},
    Error, Result,
};
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct SearchService {
    store: Arc<dyn CatalogStore>,
    config: Arc<Config>,
}

impl SearchService {
    pub fn new(store: Arc<dyn CatalogStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        let page = request.page.unwrap_or(1);
        let limit = request.limit.unwrap_or(self.config.search.default_limit);
        self.validate(page, limit, &request.filters)?;

        let sort = SortKey::parse(request.sort.as_deref());
        let query = request.query.trim();

        tracing::debug!(
            query = %query,
            page,
            limit,
            sort = ?sort,
            "Running catalog search"
        );

        let output = engine::run(self.store.as_ref(), query, &request.filters).await?;

        let tests = aggregate::aggregate_tests(
            self.store.as_ref(),
            output.tests,
            &output.price,
            self.config.search.offer_fetch_concurrency,
        )
        .await?;

        let combined = combine::combine_and_sort(output.hospitals, tests, sort);
        let (slice, total_results, pagination) = combine::paginate(combined, page, limit);
        let (hospitals, tests) = combine::split(slice);

        Ok(SearchResponse {
            hospitals,
            tests,
            total_results,
            pagination,
        })
    }

    fn validate(&self, page: u32, limit: u32, filters: &SearchFilters) -> Result<()> {
        if page < 1 {
            return Err(Error::Validation("page must be at least 1".into()));
        }
        if limit < 1 || limit > self.config.search.max_limit {
            return Err(Error::Validation(format!(
                "limit must be between 1 and {}",
                self.config.search.max_limit
            )));
        }
        if let Some(rating) = filters.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(Error::Validation(
                    "rating must be between 0 and 5".into(),
                ));
            }
        }
        if let Some(min) = filters.min_price {
            if min < Decimal::ZERO {
                return Err(Error::Validation("minPrice must not be negative".into()));
            }
        }
        if let Some(max) = filters.max_price {
            if max < Decimal::ZERO {
                return Err(Error::Validation("maxPrice must not be negative".into()));
            }
        }
        if let (Some(min), Some(max)) = (filters.min_price, filters.max_price) {
            if min > max {
                return Err(Error::Validation(
                    "minPrice must not exceed maxPrice".into(),
                ));
            }
        }
        Ok(())
    }
}
