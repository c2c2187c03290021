//! Result combining, ranking and pagination
//!
//! Facility and test result sets merge into one tagged sequence, a single
//! sort strategy is applied, pagination slices the combined order, and the
//! slice is split back into per-kind arrays preserving combined order.
//!
//! Every sort is stable: price sorts only compare test-vs-test, the rating
//! sort only compares facility-vs-facility, and cross-kind comparisons are
//! equal by definition, so unrelated entries never reorder.

use crate::models::{
    api::{HospitalHit, Pagination, TestHit},
    Hospital, SortKey,
};
use std::cmp::Ordering;

#[derive(Debug)]
pub enum CombinedEntry {
    Hospital { hospital: Hospital, rank: f32 },
    Test(TestHit),
}

impl CombinedEntry {
    fn rank(&self) -> f32 {
        match self {
            CombinedEntry::Hospital { rank, .. } => *rank,
            CombinedEntry::Test(hit) => hit.rank,
        }
    }
}

/// Merge both result sets (facilities first, as fetched) and apply the
/// requested sort strategy.
pub fn combine_and_sort(
    hospitals: Vec<(Hospital, f32)>,
    tests: Vec<TestHit>,
    sort: SortKey,
) -> Vec<CombinedEntry> {
    let mut combined: Vec<CombinedEntry> = hospitals
        .into_iter()
        .map(|(hospital, rank)| CombinedEntry::Hospital { hospital, rank })
        .chain(tests.into_iter().map(CombinedEntry::Test))
        .collect();

    match sort {
        SortKey::PriceAsc => combined.sort_by(|a, b| match (a, b) {
            (CombinedEntry::Test(x), CombinedEntry::Test(y)) => {
                x.lowest_price.cmp(&y.lowest_price)
            }
            _ => Ordering::Equal,
        }),
        SortKey::PriceDesc => combined.sort_by(|a, b| match (a, b) {
            (CombinedEntry::Test(x), CombinedEntry::Test(y)) => {
                y.lowest_price.cmp(&x.lowest_price)
            }
            _ => Ordering::Equal,
        }),
        SortKey::RatingDesc => combined.sort_by(|a, b| match (a, b) {
            (
                CombinedEntry::Hospital { hospital: x, .. },
                CombinedEntry::Hospital { hospital: y, .. },
            ) => y.rating.partial_cmp(&x.rating).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        }),
        SortKey::Relevance => combined.sort_by(|a, b| {
            b.rank()
                .partial_cmp(&a.rank())
                .unwrap_or(Ordering::Equal)
        }),
    }

    combined
}

/// Slice the combined sequence for one page. Returns the page slice, the
/// pre-pagination total and the pagination envelope.
pub fn paginate(
    mut combined: Vec<CombinedEntry>,
    page: u32,
    limit: u32,
) -> (Vec<CombinedEntry>, usize, Pagination) {
    let total = combined.len();
    let start = ((page - 1) as usize).saturating_mul(limit as usize);
    let end = (page as usize).saturating_mul(limit as usize);

    let slice = if start >= total {
        Vec::new()
    } else {
        combined.drain(start..end.min(total)).collect()
    };

    let pagination = Pagination {
        page,
        limit,
        total_pages: total.div_ceil(limit as usize),
    };

    (slice, total, pagination)
}

/// Split a page slice back into per-kind arrays, preserving combined order
/// within each.
pub fn split(entries: Vec<CombinedEntry>) -> (Vec<HospitalHit>, Vec<TestHit>) {
    let mut hospitals = Vec::new();
    let mut tests = Vec::new();

    for entry in entries {
        match entry {
            CombinedEntry::Hospital { hospital, rank } => hospitals.push(HospitalHit {
                hospital,
                relevance_score: rank,
                matching_tests: Vec::new(),
            }),
            CombinedEntry::Test(hit) => tests.push(hit),
        }
    }

    (hospitals, tests)
}
