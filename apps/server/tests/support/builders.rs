//! Entity builders for seeding the in-memory catalog.

use carelens::models::{Gender, Hospital, HospitalService, MedicalTest, TestCategory};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

pub fn hospital(name: &str) -> Hospital {
    let now = Utc::now();
    Hospital {
        id: Uuid::new_v4(),
        name: name.to_string(),
        city: "Dhaka".to_string(),
        division: "Dhaka".to_string(),
        area: "Dhanmondi".to_string(),
        road: None,
        house_number: None,
        full_address: format!("{name}, Dhanmondi, Dhaka"),
        phone: None,
        email: None,
        website: None,
        rating: 4.0,
        total_reviews: 10,
        facilities: vec!["Pharmacy".to_string()],
        insurance_accepted: Vec::new(),
        operating_hours: HashMap::new(),
        emergency_service: false,
        home_collection: false,
        parking_available: false,
        wheelchair_accessible: false,
        latitude: None,
        longitude: None,
        verified: true,
        featured: false,
        images: Vec::new(),
        description: None,
        established_year: None,
        total_beds: None,
        departments: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn category(name: &str) -> TestCategory {
    TestCategory {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        icon: None,
        parent_category_id: None,
        sort_order: 0,
    }
}

pub fn medical_test(name: &str, category_id: Uuid) -> MedicalTest {
    MedicalTest {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category_id,
        description: None,
        purpose: None,
        preparation_instructions: None,
        fasting_required: false,
        normal_range: None,
        turnaround_time: None,
        sample_type: None,
        aliases: Vec::new(),
        keywords: Vec::new(),
        common_symptoms: Vec::new(),
        age_restrictions: None,
        gender_specific: Gender::Both,
        created_at: Utc::now(),
    }
}

pub fn offer(hospital_id: Uuid, test_id: Uuid, price: i64) -> HospitalService {
    let now = Utc::now();
    HospitalService {
        id: Uuid::new_v4(),
        hospital_id,
        test_id,
        price: Decimal::from(price),
        discounted_price: None,
        discount_percentage: None,
        available: true,
        home_collection_available: false,
        home_collection_fee: Decimal::ZERO,
        report_delivery_time: None,
        online_report: false,
        emergency_available: false,
        notes: None,
        last_updated: now,
        created_at: now,
    }
}
