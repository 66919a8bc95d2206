use serde::{Deserialize, Serialize};

/// Quantile positions used for one trust tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileBands {
    pub price_saving: f64,
    pub mileage_saving: f64,
    pub depreciation_rate: f64,
}

/// Recommendation rubric: sample floor, per-tier quantiles and the heat window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    pub min_samples: usize,
    pub untrusted: QuantileBands,
    /// Relaxed bars for listings carrying at least one trust signal.
    pub trusted: QuantileBands,
    /// Share of the cohort size used as the hot heat-rank cutoff.
    pub hot_share: f64,
}

impl DecisionConfig {
    pub(crate) fn bands(&self, has_trust: bool) -> &QuantileBands {
        if has_trust {
            &self.trusted
        } else {
            &self.untrusted
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            min_samples: 20,
            untrusted: QuantileBands {
                price_saving: 0.75,
                mileage_saving: 0.40,
                depreciation_rate: 0.60,
            },
            trusted: QuantileBands {
                price_saving: 0.70,
                mileage_saving: 0.35,
                depreciation_rate: 0.65,
            },
            hot_share: 0.10,
        }
    }
}
