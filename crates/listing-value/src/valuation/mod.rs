//! Listing valuation: cohort ranking, factor evaluation, the recommendation rubric and
//! the narrative that explains it.
//!
//! Everything under [`engine`] is pure and synchronous. The repository, service and
//! router wrap it for the HTTP layer.

pub mod decision;
pub mod domain;
pub mod engine;
pub mod factors;
pub mod import;
pub mod locale;
pub mod narrative;
pub mod ranking;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use decision::{Decision, DecisionBasis, DecisionConfig, DecisionFlags, Thresholds, Verdict};
pub use domain::{Cohort, Listing, ListingId, ListingRow, TrustSignals, ValuationError};
pub use engine::{ValuationConfig, ValuationEngine};
pub use factors::{
    Evaluations, FactorConfig, FactorDetail, FactorKind, FactorResult, FactorStatus, FactorValue,
};
pub use import::{ListingCsvImporter, ListingImportError};
pub use locale::Locale;
pub use narrative::{Narrative, NarrativeConfig, Powertrain, Summary};
pub use report::ValuationReport;
pub use repository::{ListingRepository, RepositoryError};
pub use router::valuation_router;
pub use service::{listing_id_from_url, ValuationService, ValuationServiceError};
