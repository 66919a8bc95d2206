//! Recommendation policy layered on top of the factor evaluations.

mod config;
mod policy;
mod thresholds;

use serde::Serialize;

pub use config::{DecisionConfig, QuantileBands};
pub use policy::{decide, hot_cutoff};
pub use thresholds::{quantile, Thresholds};

/// Final outcome of the rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Recommended,
    /// One criterion met and the listing is hot.
    Conditional,
    NotRecommended,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Conditional => "conditional",
            Self::NotRecommended => "not_recommended",
        }
    }

    pub const fn is_recommended(self) -> bool {
        matches!(self, Self::Recommended | Self::Conditional)
    }
}

/// Per-criterion outcomes. All false when the rubric short-circuits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecisionFlags {
    pub ok_price: bool,
    pub ok_mile: bool,
    pub ok_depr: bool,
    pub hot_ok: bool,
}

impl DecisionFlags {
    /// Count of the three scored criteria met. Heat is not a win.
    pub fn wins(&self) -> u8 {
        [self.ok_price, self.ok_mile, self.ok_depr]
            .into_iter()
            .filter(|met| *met)
            .count() as u8
    }

    /// Names of the factors worth surfacing, in reporting order.
    pub fn highlights(&self) -> Vec<&'static str> {
        [
            (self.ok_price, "price_saving"),
            (self.ok_mile, "mileage_saving"),
            (self.ok_depr, "expected_depreciation"),
            (self.hot_ok, "heat_rank"),
        ]
        .into_iter()
        .filter_map(|(met, name)| met.then_some(name))
        .collect()
    }
}

/// Why the verdict came out the way it did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionBasis {
    InsufficientSample { sample_size: usize },
    AsIsVeto,
    Scored { thresholds: Thresholds },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub wins: u8,
    pub flags: DecisionFlags,
    pub basis: DecisionBasis,
}

impl Decision {
    fn rejected(basis: DecisionBasis) -> Self {
        Self {
            verdict: Verdict::NotRecommended,
            wins: 0,
            flags: DecisionFlags::default(),
            basis,
        }
    }

    pub fn is_recommended(&self) -> bool {
        self.verdict.is_recommended()
    }

    pub fn highlights(&self) -> Vec<&'static str> {
        self.flags.highlights()
    }
}
