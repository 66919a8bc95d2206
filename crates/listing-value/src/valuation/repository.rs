use super::domain::{ListingId, ListingRow};

/// Listing source abstraction so the service can be exercised without a database.
pub trait ListingRepository: Send + Sync {
    fn fetch(&self, id: &ListingId) -> Result<Option<ListingRow>, RepositoryError>;
    /// Every listing sharing the grouping key and model year, the target included.
    fn cohort(&self, full_key: &str, year: i32) -> Result<Vec<ListingRow>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
