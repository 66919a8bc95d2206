use serde::{Deserialize, Serialize};

use super::decision::{decide, DecisionConfig};
use super::domain::{Cohort, Listing, ListingRow, ValuationError};
use super::factors::{evaluate_all, FactorConfig};
use super::locale::Locale;
use super::narrative::{compose, NarrativeConfig, NarrativeInput};
use super::report::ValuationReport;

/// Everything that tunes an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    pub locale: Locale,
    pub factors: FactorConfig,
    pub decision: DecisionConfig,
    pub narrative: NarrativeConfig,
}

/// Stateless evaluator: factors, then the decision rubric, then the narrative.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Validates raw rows and evaluates. Any invalid row fails the whole call.
    pub fn evaluate(
        &self,
        target: &ListingRow,
        cohort: &[ListingRow],
    ) -> Result<ValuationReport, ValuationError> {
        let target = Listing::try_from_row(target)?;
        let cohort = Cohort::from_rows(cohort)?;
        self.evaluate_listing(&target, &cohort)
    }

    pub fn evaluate_listing(
        &self,
        target: &Listing,
        cohort: &Cohort,
    ) -> Result<ValuationReport, ValuationError> {
        let depreciation_rate =
            target
                .depreciation_rate()
                .ok_or_else(|| ValuationError::NonPositivePrediction {
                    listing_id: target.listing_id.0.clone(),
                    y_pred: target.y_pred,
                })?;

        let locale = self.config.locale;
        let evaluations = evaluate_all(target, cohort, &self.config.factors, locale)?;
        let decision = decide(target, cohort, &self.config.decision)?;

        let narrative = compose(
            &NarrativeInput {
                listing_id: &target.listing_id.0,
                full_key: &target.full_key,
                price_saving: target.price_saving,
                mileage_saving: target.mileage_saving,
                depreciation_rate: Some(depreciation_rate),
                heat_rank: target.heat_rank,
            },
            &decision,
            &self.config.narrative,
            locale,
        );

        Ok(ValuationReport::assemble(
            target,
            cohort,
            evaluations,
            &decision,
            narrative,
        ))
    }
}
