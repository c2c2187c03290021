//! In-memory `CatalogStore` used by the integration tests.
//!
//! Search semantics are a simplified stand-in for the Postgres full-text
//! backend: case-insensitive substring matching over names, aliases and
//! keywords, ranked higher for name matches. A fail flag lets tests inject
//! a dependency failure on every store call.

use async_trait::async_trait;
use carelens::{
    db::{CatalogStore, LocationRow, PopularSearch, RankedId},
    models::{
        Hospital, HospitalInput, HospitalService, MedicalTest, MedicalTestInput, PriceUpdate,
        TestCategory, TestCategoryInput,
    },
    search::{FacilityPredicates, PriceRange, TestPredicates},
    Error, Result,
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard,
    },
};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    hospitals: HashMap<Uuid, Hospital>,
    tests: HashMap<Uuid, MedicalTest>,
    categories: HashMap<Uuid, TestCategory>,
    services: HashMap<Uuid, HospitalService>,
    searches: HashMap<String, i64>,
}

#[derive(Default)]
pub struct MemoryCatalog {
    inner: Mutex<Inner>,
    fail: AtomicBool,
}

impl MemoryCatalog {
    /// Make every subsequent store call fail, simulating a lost backend.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn insert_hospital(&self, hospital: Hospital) {
        self.inner
            .lock()
            .unwrap()
            .hospitals
            .insert(hospital.id, hospital);
    }

    pub fn insert_test(&self, test: MedicalTest) {
        self.inner.lock().unwrap().tests.insert(test.id, test);
    }

    pub fn insert_category(&self, category: TestCategory) {
        self.inner
            .lock()
            .unwrap()
            .categories
            .insert(category.id, category);
    }

    pub fn insert_service(&self, service: HospitalService) {
        self.inner
            .lock()
            .unwrap()
            .services
            .insert(service.id, service);
    }

    pub fn search_count(&self, query: &str) -> i64 {
        self.inner
            .lock()
            .unwrap()
            .searches
            .get(query)
            .copied()
            .unwrap_or(0)
    }

    fn guard(&self) -> Result<MutexGuard<'_, Inner>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Internal("injected store failure".into()));
        }
        Ok(self.inner.lock().unwrap())
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn ranked(mut candidates: Vec<(RankedId, String)>) -> Vec<RankedId> {
    candidates.sort_by(|a, b| {
        b.0.rank
            .partial_cmp(&a.0.rank)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });
    candidates.into_iter().map(|(r, _)| r).collect()
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn search_hospital_ids(&self, query: &str) -> Result<Vec<RankedId>> {
        let inner = self.guard()?;
        let candidates = inner
            .hospitals
            .values()
            .filter_map(|h| {
                let rank = if contains_ci(&h.name, query) {
                    1.0
                } else if contains_ci(&h.city, query)
                    || contains_ci(&h.area, query)
                    || h.departments.iter().any(|d| contains_ci(d, query))
                {
                    0.5
                } else {
                    return None;
                };
                Some((RankedId { id: h.id, rank }, h.name.clone()))
            })
            .collect();
        Ok(ranked(candidates))
    }

    async fn search_test_ids(&self, query: &str) -> Result<Vec<RankedId>> {
        let inner = self.guard()?;
        let candidates = inner
            .tests
            .values()
            .filter_map(|t| {
                let rank = if contains_ci(&t.name, query) {
                    1.0
                } else if t.aliases.iter().any(|a| contains_ci(a, query))
                    || t.keywords.iter().any(|k| contains_ci(k, query))
                {
                    0.5
                } else {
                    return None;
                };
                Some((RankedId { id: t.id, rank }, t.name.clone()))
            })
            .collect();
        Ok(ranked(candidates))
    }

    async fn find_hospitals(&self, predicates: &FacilityPredicates) -> Result<Vec<Hospital>> {
        let inner = self.guard()?;
        let mut rows: Vec<Hospital> = inner
            .hospitals
            .values()
            .filter(|h| {
                predicates.ids.matches(h.id)
                    && predicates
                        .city
                        .as_deref()
                        .map_or(true, |c| contains_ci(&h.city, c))
                    && predicates
                        .division
                        .as_deref()
                        .map_or(true, |d| contains_ci(&h.division, d))
                    && predicates
                        .area
                        .as_deref()
                        .map_or(true, |a| contains_ci(&h.area, a))
                    && predicates.min_rating.map_or(true, |r| h.rating >= r)
                    && predicates
                        .home_collection
                        .map_or(true, |hc| h.home_collection == hc)
                    && predicates
                        .facilities
                        .iter()
                        .all(|f| h.facilities.contains(f))
                    && predicates
                        .insurance
                        .iter()
                        .all(|i| h.insurance_accepted.contains(i))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_tests(&self, predicates: &TestPredicates) -> Result<Vec<MedicalTest>> {
        let inner = self.guard()?;
        let mut rows: Vec<MedicalTest> = inner
            .tests
            .values()
            .filter(|t| {
                predicates.ids.matches(t.id)
                    && predicates
                        .category_id
                        .map_or(true, |c| t.category_id == c)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn category_by_name(&self, name: &str) -> Result<Option<TestCategory>> {
        let inner = self.guard()?;
        let matches: Vec<&TestCategory> = inner
            .categories
            .values()
            .filter(|c| contains_ci(&c.name, name))
            .collect();
        // An ambiguous name resolves to no category, same as an unknown one.
        match matches.as_slice() {
            [only] => Ok(Some((*only).clone())),
            _ => Ok(None),
        }
    }

    async fn category_by_id(&self, id: Uuid) -> Result<Option<TestCategory>> {
        Ok(self.guard()?.categories.get(&id).cloned())
    }

    async fn offer_prices(&self, test_id: Uuid, range: &PriceRange) -> Result<Vec<Decimal>> {
        let inner = self.guard()?;
        Ok(inner
            .services
            .values()
            .filter(|s| s.test_id == test_id && s.available && range.contains(s.price))
            .map(|s| s.price)
            .collect())
    }

    async fn offers_for_hospital(
        &self,
        hospital_id: Uuid,
        test_id: Option<Uuid>,
    ) -> Result<Vec<HospitalService>> {
        let inner = self.guard()?;
        let mut rows: Vec<HospitalService> = inner
            .services
            .values()
            .filter(|s| s.hospital_id == hospital_id && test_id.map_or(true, |t| s.test_id == t))
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.id);
        Ok(rows)
    }

    async fn offers_for_test(&self, test_id: Uuid) -> Result<Vec<HospitalService>> {
        let inner = self.guard()?;
        let mut rows: Vec<HospitalService> = inner
            .services
            .values()
            .filter(|s| s.test_id == test_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(rows)
    }

    async fn hospital_by_id(&self, id: Uuid) -> Result<Option<Hospital>> {
        Ok(self.guard()?.hospitals.get(&id).cloned())
    }

    async fn test_by_id(&self, id: Uuid) -> Result<Option<MedicalTest>> {
        Ok(self.guard()?.tests.get(&id).cloned())
    }

    async fn suggest_hospital_names(&self, query: &str, limit: i64) -> Result<Vec<String>> {
        let inner = self.guard()?;
        let mut names: Vec<String> = inner
            .hospitals
            .values()
            .filter(|h| contains_ci(&h.name, query))
            .map(|h| h.name.clone())
            .collect();
        names.sort();
        names.truncate(limit as usize);
        Ok(names)
    }

    async fn suggest_test_names(&self, query: &str, limit: i64) -> Result<Vec<String>> {
        let inner = self.guard()?;
        let mut names: Vec<String> = inner
            .tests
            .values()
            .filter(|t| contains_ci(&t.name, query))
            .map(|t| t.name.clone())
            .collect();
        names.sort();
        names.truncate(limit as usize);
        Ok(names)
    }

    async fn suggest_locations(&self, query: &str, limit: i64) -> Result<Vec<LocationRow>> {
        let inner = self.guard()?;
        let mut rows: Vec<LocationRow> = inner
            .hospitals
            .values()
            .filter(|h| {
                contains_ci(&h.city, query)
                    || contains_ci(&h.area, query)
                    || contains_ci(&h.division, query)
            })
            .map(|h| LocationRow {
                city: h.city.clone(),
                area: h.area.clone(),
                division: h.division.clone(),
            })
            .collect();
        rows.sort_by(|a, b| (&a.city, &a.area).cmp(&(&b.city, &b.area)));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn record_search(&self, query: &str) -> Result<()> {
        let mut inner = self.guard()?;
        *inner.searches.entry(query.to_string()).or_insert(0) += 1;
        Ok(())
    }

    async fn popular_searches(&self, limit: i64) -> Result<Vec<PopularSearch>> {
        let inner = self.guard()?;
        let mut rows: Vec<PopularSearch> = inner
            .searches
            .iter()
            .map(|(query, count)| PopularSearch {
                query: query.clone(),
                search_count: *count,
            })
            .collect();
        rows.sort_by(|a, b| b.search_count.cmp(&a.search_count).then(a.query.cmp(&b.query)));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn list_hospitals(&self) -> Result<Vec<Hospital>> {
        self.find_hospitals(&FacilityPredicates::default()).await
    }

    async fn create_hospital(&self, input: HospitalInput) -> Result<Hospital> {
        let hospital = hospital_from_input(Uuid::new_v4(), input);
        self.guard()?.hospitals.insert(hospital.id, hospital.clone());
        Ok(hospital)
    }

    async fn update_hospital(&self, id: Uuid, input: HospitalInput) -> Result<Option<Hospital>> {
        let mut inner = self.guard()?;
        if !inner.hospitals.contains_key(&id) {
            return Ok(None);
        }
        let hospital = hospital_from_input(id, input);
        inner.hospitals.insert(id, hospital.clone());
        Ok(Some(hospital))
    }

    async fn delete_hospital(&self, id: Uuid) -> Result<bool> {
        Ok(self.guard()?.hospitals.remove(&id).is_some())
    }

    async fn list_tests(&self) -> Result<Vec<MedicalTest>> {
        self.find_tests(&TestPredicates::default()).await
    }

    async fn create_test(&self, input: MedicalTestInput) -> Result<MedicalTest> {
        let test = test_from_input(Uuid::new_v4(), input);
        self.guard()?.tests.insert(test.id, test.clone());
        Ok(test)
    }

    async fn update_test(&self, id: Uuid, input: MedicalTestInput) -> Result<Option<MedicalTest>> {
        let mut inner = self.guard()?;
        if !inner.tests.contains_key(&id) {
            return Ok(None);
        }
        let test = test_from_input(id, input);
        inner.tests.insert(id, test.clone());
        Ok(Some(test))
    }

    async fn delete_test(&self, id: Uuid) -> Result<bool> {
        Ok(self.guard()?.tests.remove(&id).is_some())
    }

    async fn list_categories(&self) -> Result<Vec<TestCategory>> {
        let inner = self.guard()?;
        let mut rows: Vec<TestCategory> = inner.categories.values().cloned().collect();
        rows.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(rows)
    }

    async fn create_category(&self, input: TestCategoryInput) -> Result<TestCategory> {
        let category = category_from_input(Uuid::new_v4(), input);
        self.guard()?
            .categories
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        input: TestCategoryInput,
    ) -> Result<Option<TestCategory>> {
        let mut inner = self.guard()?;
        if !inner.categories.contains_key(&id) {
            return Ok(None);
        }
        let category = category_from_input(id, input);
        inner.categories.insert(id, category.clone());
        Ok(Some(category))
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        Ok(self.guard()?.categories.remove(&id).is_some())
    }

    async fn apply_price_updates(&self, updates: &[PriceUpdate]) -> Result<()> {
        let mut inner = self.guard()?;
        for update in updates {
            let Some(service) = inner.services.get_mut(&update.id) else {
                continue;
            };
            if let Some(price) = update.price {
                service.price = price;
            }
            if let Some(discounted) = update.discounted_price {
                service.discounted_price = Some(discounted);
            }
            if let Some(percentage) = update.discount_percentage {
                service.discount_percentage = Some(percentage);
            }
            if let Some(available) = update.available {
                service.available = available;
            }
            if let Some(hc) = update.home_collection_available {
                service.home_collection_available = hc;
            }
            if let Some(fee) = update.home_collection_fee {
                service.home_collection_fee = fee;
            }
            if let Some(delivery) = &update.report_delivery_time {
                service.report_delivery_time = Some(delivery.clone());
            }
            if let Some(online) = update.online_report {
                service.online_report = online;
            }
            if let Some(emergency) = update.emergency_available {
                service.emergency_available = emergency;
            }
            if let Some(notes) = &update.notes {
                service.notes = Some(notes.clone());
            }
            service.last_updated = Utc::now();
        }
        Ok(())
    }
}

fn hospital_from_input(id: Uuid, input: HospitalInput) -> Hospital {
    let now = Utc::now();
    Hospital {
        id,
        name: input.name,
        city: input.city,
        division: input.division,
        area: input.area,
        road: input.road,
        house_number: input.house_number,
        full_address: input.full_address,
        phone: input.phone,
        email: input.email,
        website: input.website,
        rating: input.rating,
        total_reviews: input.total_reviews,
        facilities: input.facilities,
        insurance_accepted: input.insurance_accepted,
        operating_hours: input.operating_hours,
        emergency_service: input.emergency_service,
        home_collection: input.home_collection,
        parking_available: input.parking_available,
        wheelchair_accessible: input.wheelchair_accessible,
        latitude: input.latitude,
        longitude: input.longitude,
        verified: input.verified,
        featured: input.featured,
        images: input.images,
        description: input.description,
        established_year: input.established_year,
        total_beds: input.total_beds,
        departments: input.departments,
        created_at: now,
        updated_at: now,
    }
}

fn test_from_input(id: Uuid, input: MedicalTestInput) -> MedicalTest {
    MedicalTest {
        id,
        name: input.name,
        category_id: input.category_id,
        description: input.description,
        purpose: input.purpose,
        preparation_instructions: input.preparation_instructions,
        fasting_required: input.fasting_required,
        normal_range: input.normal_range,
        turnaround_time: input.turnaround_time,
        sample_type: input.sample_type,
        aliases: input.aliases,
        keywords: input.keywords,
        common_symptoms: input.common_symptoms,
        age_restrictions: input.age_restrictions,
        gender_specific: input.gender_specific,
        created_at: Utc::now(),
    }
}

fn category_from_input(id: Uuid, input: TestCategoryInput) -> TestCategory {
    TestCategory {
        id,
        name: input.name,
        description: input.description,
        icon: input.icon,
        parent_category_id: input.parent_category_id,
        sort_order: input.sort_order,
    }
}
