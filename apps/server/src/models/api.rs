//! Request/response contracts for the public API
//!
//! The envelope mirrors the original web client contract: camelCase request
//! and computed fields, raw entity rows embedded as-is.

use crate::models::catalog::{Hospital, HospitalService, MedicalTest, TestCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// POST /api/search request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    /// Free-text query. Blank means "no text constraint".
    pub query: String,
    pub filters: SearchFilters,
    /// Raw sort key; unrecognized values fall back to relevance.
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub city: Option<String>,
    pub division: Option<String>,
    pub area: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Minimum rating (inclusive).
    pub rating: Option<f64>,
    pub facilities: Vec<String>,
    pub insurance: Vec<String>,
    /// Category *name*, resolved by case-insensitive substring match.
    pub test_category: Option<String>,
    pub home_collection: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    RatingDesc,
    Relevance,
}

impl SortKey {
    /// Unknown keys (including the legacy `distance`/`popularity`) sort by
    /// relevance, matching the original API's switch default.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("price_asc") => SortKey::PriceAsc,
            Some("price_desc") => SortKey::PriceDesc,
            Some("rating_desc") => SortKey::RatingDesc,
            _ => SortKey::Relevance,
        }
    }
}

/// A hospital in the search result set.
#[derive(Debug, Clone, Serialize)]
pub struct HospitalHit {
    #[serde(flatten)]
    pub hospital: Hospital,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: f32,
    /// Always empty; kept for wire compatibility with the original client.
    #[serde(rename = "matchingTests")]
    pub matching_tests: Vec<serde_json::Value>,
}

/// A test in the search result set, enriched with price aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct TestHit {
    #[serde(flatten)]
    pub test: MedicalTest,
    pub category: TestCategory,
    #[serde(rename = "lowestPrice")]
    pub lowest_price: Decimal,
    #[serde(rename = "highestPrice")]
    pub highest_price: Decimal,
    #[serde(rename = "availableHospitals")]
    pub available_hospitals: usize,
    #[serde(skip)]
    pub rank: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub hospitals: Vec<HospitalHit>,
    pub tests: Vec<TestHit>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// POST /api/compare request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[serde(default)]
    pub hospital_ids: Vec<Uuid>,
    #[serde(default)]
    pub test_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareResponse {
    pub hospitals: Vec<CompareHospital>,
    #[serde(rename = "testComparison", skip_serializing_if = "Option::is_none")]
    pub test_comparison: Option<TestComparison>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareHospital {
    #[serde(flatten)]
    pub hospital: Hospital,
    pub services: Vec<CompareService>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareService {
    #[serde(flatten)]
    pub service: HospitalService,
    pub test: Option<MedicalTest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestComparison {
    pub test: MedicalTest,
    pub prices: Vec<TestPrice>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPrice {
    pub hospital_id: Uuid,
    pub hospital_name: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<Decimal>,
    pub home_collection_fee: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_falls_back_to_relevance() {
        assert_eq!(SortKey::parse(Some("price_asc")), SortKey::PriceAsc);
        assert_eq!(SortKey::parse(Some("price_desc")), SortKey::PriceDesc);
        assert_eq!(SortKey::parse(Some("rating_desc")), SortKey::RatingDesc);
        assert_eq!(SortKey::parse(Some("relevance")), SortKey::Relevance);
        assert_eq!(SortKey::parse(Some("distance")), SortKey::Relevance);
        assert_eq!(SortKey::parse(Some("popularity")), SortKey::Relevance);
        assert_eq!(SortKey::parse(Some("garbage")), SortKey::Relevance);
        assert_eq!(SortKey::parse(None), SortKey::Relevance);
    }

    #[test]
    fn search_request_accepts_minimal_body() {
        let req: SearchRequest = serde_json::from_str(r#"{"query": "", "filters": {}}"#).unwrap();
        assert!(req.query.is_empty());
        assert!(req.filters.city.is_none());
        assert!(req.page.is_none());
    }
}
