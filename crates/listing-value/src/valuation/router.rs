use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, warn};

use super::domain::ListingId;
use super::report::ValuationReport;
use super::repository::ListingRepository;
use super::service::{ValuationService, ValuationServiceError};
use crate::error::AppError;

/// Body accepted by `POST /api/evaluate`.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub url: String,
}

/// Router builder exposing the evaluation endpoints.
pub fn valuation_router<R>(service: Arc<ValuationService<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    Router::new()
        .route("/api/evaluate", post(evaluate_url_handler::<R>))
        .route("/api/evaluate/:listing_id", get(evaluate_id_handler::<R>))
        .with_state(service)
}

pub(crate) async fn evaluate_url_handler<R>(
    State(service): State<Arc<ValuationService<R>>>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<ValuationReport>, AppError>
where
    R: ListingRepository + 'static,
{
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "evaluation body rejected");
        AppError::Payload(rejection)
    })?;
    service
        .evaluate_from_url(&request.url)
        .map(Json)
        .map_err(reject)
}

pub(crate) async fn evaluate_id_handler<R>(
    State(service): State<Arc<ValuationService<R>>>,
    Path(listing_id): Path<String>,
) -> Result<Json<ValuationReport>, AppError>
where
    R: ListingRepository + 'static,
{
    service
        .evaluate_by_listing_id(&ListingId(listing_id))
        .map(Json)
        .map_err(reject)
}

fn reject(err: ValuationServiceError) -> AppError {
    if err.is_client_fault() {
        warn!(error = %err, "evaluation request rejected");
    } else {
        error!(error = %err, "evaluation failed");
    }
    AppError::Valuation(err)
}
