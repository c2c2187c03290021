//! Domain models for the carelens server

pub mod api;
pub mod catalog;

pub use api::{
    CompareHospital, CompareRequest, CompareResponse, CompareService, Pagination, SearchFilters,
    SearchRequest, SearchResponse, SortKey, TestComparison, TestPrice,
};
pub use catalog::{
    Gender, Hospital, HospitalInput, HospitalService, MedicalTest, MedicalTestInput, PriceUpdate,
    TestCategory, TestCategoryInput,
};
