//! Postgres-backed catalog store
//!
//! Predicates are pushed down into SQL: ILIKE substring matches, `>=` on
//! rating, `@>` array containment for label supersets, `= ANY(...)` for id
//! constraints (the impossible sentinel binds an empty array and matches no
//! rows). Full-text search runs over trigger-maintained `tsvector` columns
//! ranked with `ts_rank`.

use crate::{
    db::{
        escape::contains_pattern,
        traits::{CatalogStore, LocationRow, PopularSearch, RankedId},
    },
    models::{
        Hospital, HospitalInput, HospitalService, MedicalTest, MedicalTestInput, PriceUpdate,
        TestCategory, TestCategoryInput,
    },
    search::filter::{FacilityPredicates, IdConstraint, PriceRange, TestPredicates},
    Result,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn search_hospital_ids(&self, query: &str) -> Result<Vec<RankedId>> {
        let ranked = sqlx::query_as::<_, RankedId>(
            r#"
            SELECT id, ts_rank(search_vector, websearch_to_tsquery('simple', $1)) AS rank
            FROM hospitals
            WHERE search_vector @@ websearch_to_tsquery('simple', $1)
            ORDER BY rank DESC, id
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;
        Ok(ranked)
    }

    async fn search_test_ids(&self, query: &str) -> Result<Vec<RankedId>> {
        let ranked = sqlx::query_as::<_, RankedId>(
            r#"
            SELECT id, ts_rank(search_vector, websearch_to_tsquery('simple', $1)) AS rank
            FROM medical_tests
            WHERE search_vector @@ websearch_to_tsquery('simple', $1)
            ORDER BY rank DESC, id
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;
        Ok(ranked)
    }

    async fn find_hospitals(&self, predicates: &FacilityPredicates) -> Result<Vec<Hospital>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM hospitals WHERE 1=1");

        if let Some(city) = &predicates.city {
            qb.push(" AND city ILIKE ").push_bind(contains_pattern(city));
        }
        if let Some(division) = &predicates.division {
            qb.push(" AND division ILIKE ")
                .push_bind(contains_pattern(division));
        }
        if let Some(area) = &predicates.area {
            qb.push(" AND area ILIKE ").push_bind(contains_pattern(area));
        }
        if let Some(min_rating) = predicates.min_rating {
            qb.push(" AND rating >= ").push_bind(min_rating);
        }
        if let Some(home_collection) = predicates.home_collection {
            qb.push(" AND home_collection = ").push_bind(home_collection);
        }
        if !predicates.facilities.is_empty() {
            qb.push(" AND facilities @> ")
                .push_bind(predicates.facilities.clone());
        }
        if !predicates.insurance.is_empty() {
            qb.push(" AND insurance_accepted @> ")
                .push_bind(predicates.insurance.clone());
        }
        if let IdConstraint::Only(ids) = &predicates.ids {
            qb.push(" AND id = ANY(").push_bind(ids.clone()).push(")");
        }

        qb.push(" ORDER BY name, id");

        let hospitals = qb
            .build_query_as::<Hospital>()
            .fetch_all(&self.pool)
            .await?;
        Ok(hospitals)
    }

    async fn find_tests(&self, predicates: &TestPredicates) -> Result<Vec<MedicalTest>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM medical_tests WHERE 1=1");

        if let Some(category_id) = predicates.category_id {
            qb.push(" AND category_id = ").push_bind(category_id);
        }
        if let IdConstraint::Only(ids) = &predicates.ids {
            qb.push(" AND id = ANY(").push_bind(ids.clone()).push(")");
        }

        qb.push(" ORDER BY name, id");

        let tests = qb
            .build_query_as::<MedicalTest>()
            .fetch_all(&self.pool)
            .await?;
        Ok(tests)
    }

    async fn category_by_name(&self, name: &str) -> Result<Option<TestCategory>> {
        // Ambiguous names resolve to no category at all, so the search
        // excludes every test rather than guessing which match was meant.
        let mut matches = sqlx::query_as::<_, TestCategory>(
            "SELECT * FROM test_categories WHERE name ILIKE $1 LIMIT 2",
        )
        .bind(contains_pattern(name))
        .fetch_all(&self.pool)
        .await?;
        if matches.len() == 1 {
            Ok(matches.pop())
        } else {
            Ok(None)
        }
    }

    async fn category_by_id(&self, id: Uuid) -> Result<Option<TestCategory>> {
        let category =
            sqlx::query_as::<_, TestCategory>("SELECT * FROM test_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(category)
    }

    async fn offer_prices(&self, test_id: Uuid, range: &PriceRange) -> Result<Vec<Decimal>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT price FROM hospital_services WHERE available = TRUE AND test_id = ");
        qb.push_bind(test_id);

        if let Some(min) = range.min {
            qb.push(" AND price >= ").push_bind(min);
        }
        if let Some(max) = range.max {
            qb.push(" AND price <= ").push_bind(max);
        }

        let prices = qb
            .build_query_scalar::<Decimal>()
            .fetch_all(&self.pool)
            .await?;
        Ok(prices)
    }

    async fn offers_for_hospital(
        &self,
        hospital_id: Uuid,
        test_id: Option<Uuid>,
    ) -> Result<Vec<HospitalService>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM hospital_services WHERE hospital_id = ");
        qb.push_bind(hospital_id);
        if let Some(test_id) = test_id {
            qb.push(" AND test_id = ").push_bind(test_id);
        }

        let services = qb
            .build_query_as::<HospitalService>()
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    async fn offers_for_test(&self, test_id: Uuid) -> Result<Vec<HospitalService>> {
        let services = sqlx::query_as::<_, HospitalService>(
            "SELECT * FROM hospital_services WHERE test_id = $1 ORDER BY price",
        )
        .bind(test_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    async fn hospital_by_id(&self, id: Uuid) -> Result<Option<Hospital>> {
        let hospital = sqlx::query_as::<_, Hospital>("SELECT * FROM hospitals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hospital)
    }

    async fn test_by_id(&self, id: Uuid) -> Result<Option<MedicalTest>> {
        let test = sqlx::query_as::<_, MedicalTest>("SELECT * FROM medical_tests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(test)
    }

    async fn suggest_hospital_names(&self, query: &str, limit: i64) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM hospitals WHERE name ILIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(contains_pattern(query))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn suggest_test_names(&self, query: &str, limit: i64) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM medical_tests WHERE name ILIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(contains_pattern(query))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn suggest_locations(&self, query: &str, limit: i64) -> Result<Vec<LocationRow>> {
        let locations = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT DISTINCT city, area, division
            FROM hospitals
            WHERE city ILIKE $1 OR area ILIKE $1 OR division ILIKE $1
            LIMIT $2
            "#,
        )
        .bind(contains_pattern(query))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    async fn record_search(&self, query: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO popular_searches (query, search_count, last_searched_at)
            VALUES ($1, 1, now())
            ON CONFLICT (query) DO UPDATE
            SET search_count = popular_searches.search_count + 1,
                last_searched_at = now()
            "#,
        )
        .bind(query)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn popular_searches(&self, limit: i64) -> Result<Vec<PopularSearch>> {
        let searches = sqlx::query_as::<_, PopularSearch>(
            "SELECT query, search_count FROM popular_searches ORDER BY search_count DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(searches)
    }

    async fn list_hospitals(&self) -> Result<Vec<Hospital>> {
        let hospitals = sqlx::query_as::<_, Hospital>("SELECT * FROM hospitals ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(hospitals)
    }

    async fn create_hospital(&self, input: HospitalInput) -> Result<Hospital> {
        let hospital = sqlx::query_as::<_, Hospital>(
            r#"
            INSERT INTO hospitals (
                name, city, division, area, road, house_number, full_address,
                phone, email, website, rating, total_reviews, facilities,
                insurance_accepted, operating_hours, emergency_service,
                home_collection, parking_available, wheelchair_accessible,
                latitude, longitude, verified, featured, images, description,
                established_year, total_beds, departments
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26,
                $27, $28
            )
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.division)
        .bind(&input.area)
        .bind(&input.road)
        .bind(&input.house_number)
        .bind(&input.full_address)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.website)
        .bind(input.rating)
        .bind(input.total_reviews)
        .bind(&input.facilities)
        .bind(&input.insurance_accepted)
        .bind(sqlx::types::Json(&input.operating_hours))
        .bind(input.emergency_service)
        .bind(input.home_collection)
        .bind(input.parking_available)
        .bind(input.wheelchair_accessible)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.verified)
        .bind(input.featured)
        .bind(&input.images)
        .bind(&input.description)
        .bind(input.established_year)
        .bind(input.total_beds)
        .bind(&input.departments)
        .fetch_one(&self.pool)
        .await?;
        Ok(hospital)
    }

    async fn update_hospital(&self, id: Uuid, input: HospitalInput) -> Result<Option<Hospital>> {
        let hospital = sqlx::query_as::<_, Hospital>(
            r#"
            UPDATE hospitals SET
                name = $2, city = $3, division = $4, area = $5, road = $6,
                house_number = $7, full_address = $8, phone = $9, email = $10,
                website = $11, rating = $12, total_reviews = $13,
                facilities = $14, insurance_accepted = $15,
                operating_hours = $16, emergency_service = $17,
                home_collection = $18, parking_available = $19,
                wheelchair_accessible = $20, latitude = $21, longitude = $22,
                verified = $23, featured = $24, images = $25,
                description = $26, established_year = $27, total_beds = $28,
                departments = $29, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.division)
        .bind(&input.area)
        .bind(&input.road)
        .bind(&input.house_number)
        .bind(&input.full_address)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.website)
        .bind(input.rating)
        .bind(input.total_reviews)
        .bind(&input.facilities)
        .bind(&input.insurance_accepted)
        .bind(sqlx::types::Json(&input.operating_hours))
        .bind(input.emergency_service)
        .bind(input.home_collection)
        .bind(input.parking_available)
        .bind(input.wheelchair_accessible)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.verified)
        .bind(input.featured)
        .bind(&input.images)
        .bind(&input.description)
        .bind(input.established_year)
        .bind(input.total_beds)
        .bind(&input.departments)
        .fetch_optional(&self.pool)
        .await?;
        Ok(hospital)
    }

    async fn delete_hospital(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM hospitals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_tests(&self) -> Result<Vec<MedicalTest>> {
        let tests = sqlx::query_as::<_, MedicalTest>("SELECT * FROM medical_tests ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(tests)
    }

    async fn create_test(&self, input: MedicalTestInput) -> Result<MedicalTest> {
        let test = sqlx::query_as::<_, MedicalTest>(
            r#"
            INSERT INTO medical_tests (
                name, category_id, description, purpose,
                preparation_instructions, fasting_required, normal_range,
                turnaround_time, sample_type, aliases, keywords,
                common_symptoms, age_restrictions, gender_specific
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.category_id)
        .bind(&input.description)
        .bind(&input.purpose)
        .bind(&input.preparation_instructions)
        .bind(input.fasting_required)
        .bind(&input.normal_range)
        .bind(&input.turnaround_time)
        .bind(&input.sample_type)
        .bind(&input.aliases)
        .bind(&input.keywords)
        .bind(&input.common_symptoms)
        .bind(&input.age_restrictions)
        .bind(input.gender_specific)
        .fetch_one(&self.pool)
        .await?;
        Ok(test)
    }

    async fn update_test(&self, id: Uuid, input: MedicalTestInput) -> Result<Option<MedicalTest>> {
        let test = sqlx::query_as::<_, MedicalTest>(
            r#"
            UPDATE medical_tests SET
                name = $2, category_id = $3, description = $4, purpose = $5,
                preparation_instructions = $6, fasting_required = $7,
                normal_range = $8, turnaround_time = $9, sample_type = $10,
                aliases = $11, keywords = $12, common_symptoms = $13,
                age_restrictions = $14, gender_specific = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.category_id)
        .bind(&input.description)
        .bind(&input.purpose)
        .bind(&input.preparation_instructions)
        .bind(input.fasting_required)
        .bind(&input.normal_range)
        .bind(&input.turnaround_time)
        .bind(&input.sample_type)
        .bind(&input.aliases)
        .bind(&input.keywords)
        .bind(&input.common_symptoms)
        .bind(&input.age_restrictions)
        .bind(input.gender_specific)
        .fetch_optional(&self.pool)
        .await?;
        Ok(test)
    }

    async fn delete_test(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM medical_tests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_categories(&self) -> Result<Vec<TestCategory>> {
        let categories = sqlx::query_as::<_, TestCategory>(
            "SELECT * FROM test_categories ORDER BY sort_order, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn create_category(&self, input: TestCategoryInput) -> Result<TestCategory> {
        let category = sqlx::query_as::<_, TestCategory>(
            r#"
            INSERT INTO test_categories (name, description, icon, parent_category_id, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(input.parent_category_id)
        .bind(input.sort_order)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        input: TestCategoryInput,
    ) -> Result<Option<TestCategory>> {
        let category = sqlx::query_as::<_, TestCategory>(
            r#"
            UPDATE test_categories SET
                name = $2, description = $3, icon = $4,
                parent_category_id = $5, sort_order = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(input.parent_category_id)
        .bind(input.sort_order)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM test_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn apply_price_updates(&self, updates: &[PriceUpdate]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for update in updates {
            sqlx::query(
                r#"
                UPDATE hospital_services SET
                    price = COALESCE($2, price),
                    discounted_price = COALESCE($3, discounted_price),
                    discount_percentage = COALESCE($4, discount_percentage),
                    available = COALESCE($5, available),
                    home_collection_available = COALESCE($6, home_collection_available),
                    home_collection_fee = COALESCE($7, home_collection_fee),
                    report_delivery_time = COALESCE($8, report_delivery_time),
                    online_report = COALESCE($9, online_report),
                    emergency_available = COALESCE($10, emergency_available),
                    notes = COALESCE($11, notes),
                    last_updated = now()
                WHERE id = $1
                "#,
            )
            .bind(update.id)
            .bind(update.price)
            .bind(update.discounted_price)
            .bind(update.discount_percentage)
            .bind(update.available)
            .bind(update.home_collection_available)
            .bind(update.home_collection_fee)
            .bind(&update.report_delivery_time)
            .bind(update.online_report)
            .bind(update.emergency_available)
            .bind(&update.notes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
