//! Per-factor scorers. Each factor declares up front whether it compares the target
//! against the cohort; the dispatcher only hands the cohort to those that do.

mod condition;
mod market;
mod pricing;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Cohort, Listing, ValuationError};
use super::locale::Locale;

/// Factor thresholds shared by the rank-based evaluators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorConfig {
    pub min_rank_sample: usize,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self { min_rank_sample: 5 }
    }
}

/// The seven evaluated factors, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    PriceSaving,
    MileageSaving,
    ExpectedDepreciation,
    HeatRank,
    Trustworthiness,
    Options,
    SafetyFeatures,
}

impl FactorKind {
    pub const ALL: [FactorKind; 7] = [
        FactorKind::PriceSaving,
        FactorKind::MileageSaving,
        FactorKind::ExpectedDepreciation,
        FactorKind::HeatRank,
        FactorKind::Trustworthiness,
        FactorKind::Options,
        FactorKind::SafetyFeatures,
    ];

    pub const fn field_name(self) -> &'static str {
        match self {
            Self::PriceSaving => "price_saving",
            Self::MileageSaving => "mileage_saving",
            Self::ExpectedDepreciation => "expected_depreciation",
            Self::HeatRank => "heat_rank",
            Self::Trustworthiness => "trustworthiness",
            Self::Options => "options",
            Self::SafetyFeatures => "safety_features",
        }
    }

    pub fn cohort_requirement(self) -> CohortRequirement {
        match entry_for(self).evaluator {
            Evaluator::Ranked(_) => CohortRequirement::Ranked,
            Evaluator::TargetOnly(_) => CohortRequirement::None,
        }
    }
}

/// Whether a factor needs the peer table at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohortRequirement {
    /// Ranks the target within the cohort; degrades below the minimum sample.
    Ranked,
    None,
}

/// Cohort view handed to rank-based evaluators.
pub(crate) struct RankContext<'a> {
    pub cohort: &'a Cohort,
    pub min_sample: usize,
    pub locale: Locale,
}

impl RankContext<'_> {
    pub(crate) fn total(&self) -> usize {
        self.cohort.len()
    }

    pub(crate) fn has_sample(&self) -> bool {
        self.cohort.len() >= self.min_sample
    }
}

type RankedEvaluator = fn(&Listing, &RankContext<'_>) -> Result<FactorResult, ValuationError>;
type TargetEvaluator = fn(&Listing, Locale) -> FactorResult;

enum Evaluator {
    Ranked(RankedEvaluator),
    TargetOnly(TargetEvaluator),
}

struct FactorEntry {
    kind: FactorKind,
    evaluator: Evaluator,
}

static FACTOR_TABLE: [FactorEntry; 7] = [
    FactorEntry {
        kind: FactorKind::PriceSaving,
        evaluator: Evaluator::Ranked(pricing::price_saving),
    },
    FactorEntry {
        kind: FactorKind::MileageSaving,
        evaluator: Evaluator::Ranked(pricing::mileage_saving),
    },
    FactorEntry {
        kind: FactorKind::ExpectedDepreciation,
        evaluator: Evaluator::Ranked(pricing::expected_depreciation),
    },
    FactorEntry {
        kind: FactorKind::HeatRank,
        evaluator: Evaluator::TargetOnly(market::heat_rank),
    },
    FactorEntry {
        kind: FactorKind::Trustworthiness,
        evaluator: Evaluator::TargetOnly(condition::trustworthiness),
    },
    FactorEntry {
        kind: FactorKind::Options,
        evaluator: Evaluator::TargetOnly(condition::options),
    },
    FactorEntry {
        kind: FactorKind::SafetyFeatures,
        evaluator: Evaluator::TargetOnly(condition::safety_features),
    },
];

fn entry_for(kind: FactorKind) -> &'static FactorEntry {
    // The table lists every kind in declaration order.
    &FACTOR_TABLE[kind as usize]
}

/// Evaluate a single factor for the target.
pub fn evaluate_factor(
    kind: FactorKind,
    target: &Listing,
    cohort: &Cohort,
    config: &FactorConfig,
    locale: Locale,
) -> Result<FactorResult, ValuationError> {
    let entry = entry_for(kind);
    debug_assert_eq!(entry.kind, kind);
    match entry.evaluator {
        Evaluator::Ranked(evaluate) => evaluate(
            target,
            &RankContext {
                cohort,
                min_sample: config.min_rank_sample,
                locale,
            },
        ),
        Evaluator::TargetOnly(evaluate) => Ok(evaluate(target, locale)),
    }
}

/// Evaluate every factor, failing on the first validation error.
pub fn evaluate_all(
    target: &Listing,
    cohort: &Cohort,
    config: &FactorConfig,
    locale: Locale,
) -> Result<Evaluations, ValuationError> {
    FactorKind::ALL
        .into_iter()
        .map(|kind| evaluate_factor(kind, target, cohort, config, locale).map(|res| (kind, res)))
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(Evaluations)
}

/// How a factor result relates to the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorStatus {
    Ranked,
    InsufficientSample,
    Unranked,
}

/// Raw metric reported for a factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FactorValue {
    Amount(f64),
    Position(i64),
    Features(Vec<String>),
}

/// Factor-specific context, flattened next to the common fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FactorDetail {
    PriceSaving {
        y_pred: f64,
        actual_price: Option<f64>,
    },
    MileageSaving {
        mileage: f64,
        mileage_y_pred: f64,
        price_per_km: f64,
    },
    Depreciation {
        depreciation_rate: f64,
        y_pred: f64,
        next_bin_avg_price: f64,
    },
    Heat {
        mileage_bin: String,
    },
    Trust {
        trusted: bool,
        as_is: bool,
        display: Vec<String>,
    },
    Features {
        count: usize,
        display: Vec<String>,
    },
}

/// Uniform per-factor outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorResult {
    pub value: FactorValue,
    pub status: FactorStatus,
    pub rank: Option<usize>,
    pub total: Option<usize>,
    pub msg: String,
    #[serde(flatten)]
    pub detail: FactorDetail,
}

/// Factor results keyed by field name, serialized in reporting order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Evaluations(BTreeMap<FactorKind, FactorResult>);

impl Evaluations {
    pub fn get(&self, kind: FactorKind) -> Option<&FactorResult> {
        self.0.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FactorKind, &FactorResult)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
