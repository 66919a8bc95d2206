use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::domain::{Cohort, Listing, ListingId, ValuationError};
use super::engine::{ValuationConfig, ValuationEngine};
use super::report::ValuationReport;
use super::repository::{ListingRepository, RepositoryError};

static LISTING_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#&?]listing=(\d+)").expect("listing id pattern is valid"));

/// Pulls the numeric listing id out of a marketplace URL (`...#listing=123`).
pub fn listing_id_from_url(url: &str) -> Result<ListingId, ValuationServiceError> {
    LISTING_ID_PATTERN
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| ListingId(id.as_str().to_string()))
        .ok_or_else(|| ValuationServiceError::InvalidUrl(url.to_string()))
}

/// Service composing the listing repository and the valuation engine.
pub struct ValuationService<R> {
    repository: Arc<R>,
    engine: Arc<ValuationEngine>,
}

impl<R> ValuationService<R>
where
    R: ListingRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ValuationConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(ValuationEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Resolve the listing behind a URL and evaluate it.
    pub fn evaluate_from_url(&self, url: &str) -> Result<ValuationReport, ValuationServiceError> {
        let listing_id = listing_id_from_url(url)?;
        self.evaluate_by_listing_id(&listing_id)
    }

    /// Evaluate a listing against every peer sharing its grouping key and year.
    pub fn evaluate_by_listing_id(
        &self,
        listing_id: &ListingId,
    ) -> Result<ValuationReport, ValuationServiceError> {
        let row = self
            .repository
            .fetch(listing_id)?
            .ok_or_else(|| ValuationServiceError::ListingNotFound(listing_id.clone()))?;
        let target = Listing::try_from_row(&row)?;

        let peers = self.repository.cohort(&target.full_key, target.year)?;
        let cohort = Cohort::from_rows(&peers)?;

        info!(
            listing_id = %target.listing_id,
            full_key = %target.full_key,
            year = target.year,
            cohort_size = cohort.len(),
            "evaluating listing"
        );

        let report = self.engine.evaluate_listing(&target, &cohort)?;

        info!(
            listing_id = %report.listing_id,
            verdict = report.verdict.label(),
            wins = report.wins,
            hot = report.flags.hot_ok,
            "evaluation complete"
        );

        Ok(report)
    }
}

/// Error raised by the valuation service.
#[derive(Debug, thiserror::Error)]
pub enum ValuationServiceError {
    #[error("invalid URL: listing id not found in {0}")]
    InvalidUrl(String),
    #[error("no listing found with listing_id = {0}")]
    ListingNotFound(ListingId),
    #[error(transparent)]
    Validation(#[from] ValuationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ValuationServiceError {
    /// Whether the caller supplied something unusable, as opposed to a backend fault.
    pub fn is_client_fault(&self) -> bool {
        match self {
            Self::InvalidUrl(_) | Self::ListingNotFound(_) | Self::Validation(_) => true,
            Self::Repository(RepositoryError::NotFound) => true,
            Self::Repository(RepositoryError::Unavailable(_)) => false,
        }
    }
}
