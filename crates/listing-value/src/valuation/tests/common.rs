use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::valuation::{
    Cohort, Listing, ListingId, ListingRepository, ListingRow, RepositoryError, ValuationConfig,
    ValuationEngine, ValuationReport, ValuationService,
};

pub(super) const FULL_KEY: &str = "Honda Civic EX";
pub(super) const YEAR: i32 = 2020;
pub(super) const Y_PRED: f64 = 22_000.0;

pub(super) fn listing_row(id: &str) -> ListingRow {
    ListingRow {
        listing_id: Some(id.to_string()),
        full_key: Some(FULL_KEY.to_string()),
        year: Some(YEAR),
        url: Some(format!(
            "https://www.cargurus.ca/Cars/inventorylisting/viewDetailsFilterViewInventoryListing.action#listing={id}"
        )),
        price_saving: Some(0.0),
        actual_price: Some(Y_PRED),
        mileage_saving: Some(0.0),
        y_pred: Some(Y_PRED),
        next_bin_avg_price: Some(next_bin_for_rate(0.03)),
        expected_depreciation: None,
        mileage: Some(55_000.0),
        mileage_y_pred: Some(Y_PRED),
        price_per_km: Some(0.08),
        heat_rank: Some(400.0),
        mileage_bin: Some("50000-60000".to_string()),
        certified: None,
        accident_free: None,
        carfax: None,
        as_is: None,
        options: Vec::new(),
        safety_features: Vec::new(),
    }
}

pub(super) fn next_bin_for_rate(rate: f64) -> f64 {
    Y_PRED * (1.0 - rate)
}

pub(super) fn with_rate(mut row: ListingRow, rate: f64) -> ListingRow {
    row.next_bin_avg_price = Some(next_bin_for_rate(rate));
    row
}

/// Peers that all look exactly like [`listing_row`].
pub(super) fn identical_peers(count: usize) -> Vec<ListingRow> {
    (0..count)
        .map(|index| listing_row(&format!("{}", 9_000 + index)))
        .collect()
}

/// Peers with evenly spread metrics: price saving `100 * i`, mileage saving `10 * i`,
/// depreciation rate `0.02 + 0.001 * i`.
pub(super) fn spread_peers(count: usize) -> Vec<ListingRow> {
    (0..count)
        .map(|index| {
            let mut row = listing_row(&format!("{}", 8_000 + index));
            row.price_saving = Some(100.0 * index as f64);
            row.mileage_saving = Some(10.0 * index as f64);
            row.heat_rank = Some(100.0 + index as f64);
            with_rate(row, 0.02 + 0.001 * index as f64)
        })
        .collect()
}

pub(super) fn listing(row: &ListingRow) -> Listing {
    Listing::try_from_row(row).expect("valid listing")
}

pub(super) fn cohort(rows: &[ListingRow]) -> Cohort {
    Cohort::from_rows(rows).expect("valid cohort")
}

pub(super) fn engine() -> ValuationEngine {
    ValuationEngine::new(ValuationConfig::default())
}

pub(super) fn evaluate(target: &ListingRow, peers: &[ListingRow]) -> ValuationReport {
    engine().evaluate(target, peers).expect("evaluation succeeds")
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    rows: Vec<ListingRow>,
}

impl MemoryRepository {
    pub(super) fn with_rows(rows: Vec<ListingRow>) -> Self {
        Self { rows }
    }
}

impl ListingRepository for MemoryRepository {
    fn fetch(&self, id: &ListingId) -> Result<Option<ListingRow>, RepositoryError> {
        Ok(self
            .rows
            .iter()
            .find(|row| row.listing_id.as_deref() == Some(id.0.as_str()))
            .cloned())
    }

    fn cohort(&self, full_key: &str, year: i32) -> Result<Vec<ListingRow>, RepositoryError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.full_key.as_deref() == Some(full_key) && row.year == Some(year))
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl ListingRepository for UnavailableRepository {
    fn fetch(&self, _id: &ListingId) -> Result<Option<ListingRow>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn cohort(&self, _full_key: &str, _year: i32) -> Result<Vec<ListingRow>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }
}

/// Repository holding 25 spread peers plus listing `1001`, and a handful of unrelated rows.
pub(super) fn stocked_repository() -> MemoryRepository {
    let mut rows = spread_peers(25);

    let mut target = listing_row("1001");
    target.price_saving = Some(2_300.0);
    target.mileage_saving = Some(150.0);
    rows.push(with_rate(target, 0.05));

    for index in 0..4 {
        let mut other_year = listing_row(&format!("{}", 7_000 + index));
        other_year.year = Some(2019);
        rows.push(other_year);

        let mut other_model = listing_row(&format!("{}", 7_100 + index));
        other_model.full_key = Some("Honda Civic LX".to_string());
        rows.push(other_model);
    }

    MemoryRepository::with_rows(rows)
}

pub(super) fn build_service<R>(repository: R) -> Arc<ValuationService<R>>
where
    R: ListingRepository + 'static,
{
    Arc::new(ValuationService::new(
        Arc::new(repository),
        ValuationConfig::default(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
