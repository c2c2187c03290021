//! Side-by-side hospital comparison
//!
//! Resolves each requested hospital with its priced services; unknown ids
//! are skipped rather than failing the whole comparison. When a test id is
//! given, a per-hospital price table for that test is added, with price 0
//! for hospitals that do not offer it.

use crate::{
    db::CatalogStore,
    models::{
        CompareHospital, CompareRequest, CompareResponse, CompareService, TestComparison,
        TestPrice,
    },
    Error, Result,
};
use rust_decimal::Decimal;

pub async fn compare(store: &dyn CatalogStore, request: CompareRequest) -> Result<CompareResponse> {
    if request.hospital_ids.is_empty() {
        return Err(Error::Validation("hospitalIds must not be empty".into()));
    }

    let mut hospitals = Vec::with_capacity(request.hospital_ids.len());
    for id in &request.hospital_ids {
        let Some(hospital) = store.hospital_by_id(*id).await? else {
            tracing::debug!(hospital_id = %id, "Skipping unknown hospital in comparison");
            continue;
        };

        let offers = store.offers_for_hospital(*id, request.test_id).await?;
        let mut services = Vec::with_capacity(offers.len());
        for offer in offers {
            let test = store.test_by_id(offer.test_id).await?;
            services.push(CompareService {
                service: offer,
                test,
            });
        }

        hospitals.push(CompareHospital { hospital, services });
    }

    let test_comparison = match request.test_id {
        Some(test_id) => build_test_comparison(store, test_id, &hospitals).await?,
        None => None,
    };

    Ok(CompareResponse {
        hospitals,
        test_comparison,
    })
}

async fn build_test_comparison(
    store: &dyn CatalogStore,
    test_id: uuid::Uuid,
    hospitals: &[CompareHospital],
) -> Result<Option<TestComparison>> {
    let Some(test) = store.test_by_id(test_id).await? else {
        return Ok(None);
    };

    let prices = hospitals
        .iter()
        .map(|entry| {
            let offer = entry
                .services
                .iter()
                .find(|s| s.service.test_id == test_id);
            TestPrice {
                hospital_id: entry.hospital.id,
                hospital_name: entry.hospital.name.clone(),
                price: offer.map(|s| s.service.price).unwrap_or(Decimal::ZERO),
                discounted_price: offer.and_then(|s| s.service.discounted_price),
                home_collection_fee: offer
                    .map(|s| s.service.home_collection_fee)
                    .unwrap_or(Decimal::ZERO),
                delivery_time: offer.and_then(|s| s.service.report_delivery_time.clone()),
            }
        })
        .collect();

    Ok(Some(TestComparison { test, prices }))
}
