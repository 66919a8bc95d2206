//! Cohort-relative valuation of used vehicle listings.
//!
//! The [`valuation`] module holds the pure scoring engine (ranker, factor evaluators,
//! decision policy, narrative composer) together with the thin collaborators that feed
//! it: a CSV listing importer, a repository port, and the service/router pair used by the
//! HTTP layer.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod valuation;
