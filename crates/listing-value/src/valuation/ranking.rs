use super::domain::{Cohort, Listing};

/// Which end of a metric counts as better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    fn beats(self, candidate: f64, target: f64) -> bool {
        match self {
            Self::HigherIsBetter => candidate > target,
            Self::LowerIsBetter => candidate < target,
        }
    }
}

/// Numeric listing fields that can be ranked directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankedField {
    PriceSaving,
    MileageSaving,
}

impl RankedField {
    pub fn read(self, listing: &Listing) -> f64 {
        match self {
            Self::PriceSaving => listing.price_saving,
            Self::MileageSaving => listing.mileage_saving,
        }
    }
}

/// 1-based rank: one plus the number of values strictly better than `target`.
///
/// Ties never push the target down, so several tied values all share the best
/// position among them.
pub fn rank_of<I>(values: I, target: f64, direction: Direction) -> usize
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| direction.beats(*value, target))
        .count()
        + 1
}

pub fn rank(cohort: &Cohort, target_value: f64, field: RankedField, direction: Direction) -> usize {
    rank_of(
        cohort.members().iter().map(|member| field.read(member)),
        target_value,
        direction,
    )
}
