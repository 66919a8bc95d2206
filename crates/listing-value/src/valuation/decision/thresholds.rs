use super::super::domain::Cohort;
use super::config::QuantileBands;
use serde::Serialize;

/// Cut points the target was compared against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thresholds {
    pub trusted: bool,
    pub price_saving: Option<f64>,
    pub mileage_saving: Option<f64>,
    pub depreciation_rate: Option<f64>,
}

impl Thresholds {
    pub(crate) fn from_cohort(cohort: &Cohort, bands: &QuantileBands, trusted: bool) -> Self {
        let prices: Vec<f64> = cohort.members().iter().map(|m| m.price_saving).collect();
        let mileages: Vec<f64> = cohort.members().iter().map(|m| m.mileage_saving).collect();

        Self {
            trusted,
            price_saving: quantile(prices, bands.price_saving),
            mileage_saving: quantile(mileages, bands.mileage_saving),
            depreciation_rate: quantile(cohort.depreciation_rates(), bands.depreciation_rate),
        }
    }
}

/// Linear-interpolated quantile at position `q * (n - 1)` of the sorted values.
pub fn quantile(mut values: Vec<f64>, q: f64) -> Option<f64> {
    values.retain(|value| value.is_finite());
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let q = q.clamp(0.0, 1.0);
    let position = q * (values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(values[lower] + (values[upper] - values[lower]) * fraction)
}
