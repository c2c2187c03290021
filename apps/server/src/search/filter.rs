//! Filter compilation: structured filters into typed predicate sets
//!
//! A `SearchFilters` object compiles into one predicate set per entity kind.
//! Absent fields contribute no predicate. The category *name* filter is
//! resolved to a category id here; a name that matches nothing compiles to
//! the impossible-match constraint, not to "ignore the filter".

use crate::{db::CatalogStore, models::SearchFilters, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Constraint on the id column of a fetch.
///
/// `Only(vec![])` is the impossible-match sentinel: a constraint guaranteed
/// to match zero rows. Downstream query execution needs no special casing
/// since `id = ANY('{}')` is naturally empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdConstraint {
    Unconstrained,
    Only(Vec<Uuid>),
}

impl IdConstraint {
    pub fn impossible() -> Self {
        IdConstraint::Only(Vec::new())
    }

    pub fn is_impossible(&self) -> bool {
        matches!(self, IdConstraint::Only(ids) if ids.is_empty())
    }

    pub fn matches(&self, id: Uuid) -> bool {
        match self {
            IdConstraint::Unconstrained => true,
            IdConstraint::Only(ids) => ids.contains(&id),
        }
    }

    /// Conjunction of two id constraints.
    pub fn intersect(self, other: IdConstraint) -> IdConstraint {
        match (self, other) {
            (IdConstraint::Unconstrained, other) => other,
            (this, IdConstraint::Unconstrained) => this,
            (IdConstraint::Only(a), IdConstraint::Only(b)) => {
                IdConstraint::Only(a.into_iter().filter(|id| b.contains(id)).collect())
            }
        }
    }
}

impl Default for IdConstraint {
    fn default() -> Self {
        IdConstraint::Unconstrained
    }
}

/// Compiled predicates for facility fetches.
#[derive(Debug, Clone, Default)]
pub struct FacilityPredicates {
    /// Case-insensitive substring matches.
    pub city: Option<String>,
    pub division: Option<String>,
    pub area: Option<String>,
    /// `rating >= min_rating`.
    pub min_rating: Option<f64>,
    pub home_collection: Option<bool>,
    /// The facility's label set must be a superset of each list.
    pub facilities: Vec<String>,
    pub insurance: Vec<String>,
    pub ids: IdConstraint,
}

/// Compiled predicates for test fetches.
#[derive(Debug, Clone, Default)]
pub struct TestPredicates {
    pub category_id: Option<Uuid>,
    pub ids: IdConstraint,
}

/// Inclusive price-range filter, applied to offer `price` (never the
/// discounted price).
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Whether either bound was specified.
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, price: Decimal) -> bool {
        if let Some(min) = self.min {
            if price < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if price > max {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    pub facility: FacilityPredicates,
    pub test: TestPredicates,
    pub price: PriceRange,
}

/// Compile a filter object into per-kind predicate sets.
///
/// Resolving the category name requires the store. Zero matching categories
/// compiles the test predicates to the impossible constraint; a store
/// failure propagates and aborts the search.
pub async fn compile(filters: &SearchFilters, store: &dyn CatalogStore) -> Result<CompiledFilters> {
    let facility = FacilityPredicates {
        city: filters.city.clone().filter(|s| !s.trim().is_empty()),
        division: filters.division.clone().filter(|s| !s.trim().is_empty()),
        area: filters.area.clone().filter(|s| !s.trim().is_empty()),
        min_rating: filters.rating,
        home_collection: filters.home_collection,
        facilities: filters.facilities.clone(),
        insurance: filters.insurance.clone(),
        ids: IdConstraint::Unconstrained,
    };

    let mut test = TestPredicates::default();
    if let Some(name) = filters
        .test_category
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        match store.category_by_name(name).await? {
            Some(category) => test.category_id = Some(category.id),
            None => test.ids = IdConstraint::impossible(),
        }
    }

    Ok(CompiledFilters {
        facility,
        test,
        price: PriceRange {
            min: filters.min_price,
            max: filters.max_price,
        },
    })
}
