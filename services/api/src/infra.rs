use listing_value::error::AppError;
use listing_value::valuation::{
    ListingCsvImporter, ListingId, ListingRepository, ListingRow, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) listings: usize,
}

/// Read-only listing source hydrated once from a ranked export.
#[derive(Debug, Default)]
pub(crate) struct InMemoryListingRepository {
    rows: Vec<ListingRow>,
    by_id: HashMap<ListingId, usize>,
}

impl InMemoryListingRepository {
    /// Rows without an id cannot be addressed or ranked and are dropped. The first row
    /// wins when an id repeats.
    pub(crate) fn from_rows(rows: Vec<ListingRow>) -> Self {
        let mut repository = Self::default();
        let mut anonymous = 0usize;

        for row in rows {
            let Some(id) = row
                .listing_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| ListingId(id.to_string()))
            else {
                anonymous += 1;
                continue;
            };

            if repository.by_id.contains_key(&id) {
                warn!(listing_id = %id.0, "duplicate listing id in export; keeping the first row");
                continue;
            }
            repository.by_id.insert(id, repository.rows.len());
            repository.rows.push(row);
        }

        if anonymous > 0 {
            warn!(skipped = anonymous, "dropped listing rows without an id");
        }
        repository
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

impl ListingRepository for InMemoryListingRepository {
    fn fetch(&self, id: &ListingId) -> Result<Option<ListingRow>, RepositoryError> {
        Ok(self.by_id.get(id).map(|index| self.rows[*index].clone()))
    }

    fn cohort(&self, full_key: &str, year: i32) -> Result<Vec<ListingRow>, RepositoryError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| {
                row.year == Some(year) && row.full_key.as_deref().map(str::trim) == Some(full_key)
            })
            .cloned()
            .collect())
    }
}

pub(crate) fn load_repository(path: Option<&Path>) -> Result<InMemoryListingRepository, AppError> {
    let Some(path) = path else {
        warn!("no listing export configured (APP_LISTINGS_CSV); every lookup will miss");
        return Ok(InMemoryListingRepository::default());
    };

    let repository = InMemoryListingRepository::from_rows(ListingCsvImporter::from_path(path)?);
    info!(path = %path.display(), listings = repository.len(), "listing export loaded");
    Ok(repository)
}
