//! Catalog entities: hospitals, medical tests, categories and priced offers
//!
//! These mirror the relational schema (see `migrations/`). Entity rows keep
//! their snake_case column names on the wire; computed/envelope fields in
//! `models::api` use camelCase.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Gender applicability for a medical test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Both,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Both
    }
}

/// A hospital or diagnostic-center facility.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub division: String,
    pub area: String,
    pub road: Option<String>,
    pub house_number: Option<String>,
    pub full_address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    /// Average review rating, 0.0..=5.0.
    pub rating: f64,
    pub total_reviews: i32,
    /// Free-text facility labels ("ICU", "Pharmacy", ...). Order-irrelevant.
    pub facilities: Vec<String>,
    pub insurance_accepted: Vec<String>,
    #[sqlx(json)]
    pub operating_hours: HashMap<String, String>,
    pub emergency_service: bool,
    pub home_collection: bool,
    pub parking_available: bool,
    pub wheelchair_accessible: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub verified: bool,
    pub featured: bool,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub established_year: Option<i32>,
    pub total_beds: Option<i32>,
    pub departments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A diagnostic test offered by hospitals.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MedicalTest {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub description: Option<String>,
    pub purpose: Option<String>,
    pub preparation_instructions: Option<String>,
    pub fasting_required: bool,
    pub normal_range: Option<String>,
    pub turnaround_time: Option<String>,
    pub sample_type: Option<String>,
    pub aliases: Vec<String>,
    pub keywords: Vec<String>,
    pub common_symptoms: Vec<String>,
    pub age_restrictions: Option<String>,
    pub gender_specific: Gender,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TestCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub parent_category_id: Option<Uuid>,
    pub sort_order: i32,
}

impl TestCategory {
    /// Fallback used when a test references a category that cannot be
    /// resolved; mirrors the empty category the original API returned.
    pub fn placeholder() -> Self {
        Self {
            id: Uuid::nil(),
            name: String::new(),
            description: None,
            icon: None,
            parent_category_id: None,
            sort_order: 0,
        }
    }
}

/// A priced offer: one hospital offering one test.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HospitalService {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub test_id: Uuid,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
    pub available: bool,
    pub home_collection_available: bool,
    pub home_collection_fee: Decimal,
    pub report_delivery_time: Option<String>,
    pub online_report: bool,
    pub emergency_available: bool,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Create/update payload for a hospital (admin back-office).
#[derive(Debug, Clone, Deserialize)]
pub struct HospitalInput {
    pub name: String,
    pub city: String,
    pub division: String,
    pub area: String,
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub house_number: Option<String>,
    pub full_address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_reviews: i32,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub insurance_accepted: Vec<String>,
    #[serde(default)]
    pub operating_hours: HashMap<String, String>,
    #[serde(default)]
    pub emergency_service: bool,
    #[serde(default)]
    pub home_collection: bool,
    #[serde(default)]
    pub parking_available: bool,
    #[serde(default)]
    pub wheelchair_accessible: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub established_year: Option<i32>,
    #[serde(default)]
    pub total_beds: Option<i32>,
    #[serde(default)]
    pub departments: Vec<String>,
}

/// Create/update payload for a medical test (admin back-office).
#[derive(Debug, Clone, Deserialize)]
pub struct MedicalTestInput {
    pub name: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub preparation_instructions: Option<String>,
    #[serde(default)]
    pub fasting_required: bool,
    #[serde(default)]
    pub normal_range: Option<String>,
    #[serde(default)]
    pub turnaround_time: Option<String>,
    #[serde(default)]
    pub sample_type: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub common_symptoms: Vec<String>,
    #[serde(default)]
    pub age_restrictions: Option<String>,
    #[serde(default)]
    pub gender_specific: Gender,
}

/// Create/update payload for a test category (admin back-office).
#[derive(Debug, Clone, Deserialize)]
pub struct TestCategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub parent_category_id: Option<Uuid>,
    #[serde(default)]
    pub sort_order: i32,
}

/// One entry of an admin bulk price update. Absent fields keep the stored
/// value.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceUpdate {
    pub id: Uuid,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub discounted_price: Option<Decimal>,
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub home_collection_available: Option<bool>,
    #[serde(default)]
    pub home_collection_fee: Option<Decimal>,
    #[serde(default)]
    pub report_delivery_time: Option<String>,
    #[serde(default)]
    pub online_report: Option<bool>,
    #[serde(default)]
    pub emergency_available: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}
