use super::super::domain::{Cohort, Listing, ValuationError};
use super::config::DecisionConfig;
use super::thresholds::Thresholds;
use super::{Decision, DecisionBasis, DecisionFlags, Verdict};

/// Applies the recommendation rubric to a validated target and its cohort.
///
/// Short-circuits, in order: cohort below the sample floor, then an AS-IS listing.
/// Otherwise the target must beat the trust-adjusted quantiles on at least two of
/// price saving, mileage saving and depreciation rate; exactly one win passes only
/// when the listing is also among the hottest in the cohort.
pub fn decide(
    target: &Listing,
    cohort: &Cohort,
    config: &DecisionConfig,
) -> Result<Decision, ValuationError> {
    let sample_size = cohort.len();
    if sample_size < config.min_samples {
        return Ok(Decision::rejected(DecisionBasis::InsufficientSample { sample_size }));
    }
    if target.trust.as_is {
        return Ok(Decision::rejected(DecisionBasis::AsIsVeto));
    }

    let rate = target
        .depreciation_rate()
        .ok_or_else(|| ValuationError::NonPositivePrediction {
            listing_id: target.listing_id.0.clone(),
            y_pred: target.y_pred,
        })?;

    let trusted = target.trust.has_trust();
    let thresholds = Thresholds::from_cohort(cohort, config.bands(trusted), trusted);

    let flags = DecisionFlags {
        ok_price: thresholds
            .price_saving
            .is_some_and(|cut| target.price_saving >= cut),
        ok_mile: thresholds
            .mileage_saving
            .is_some_and(|cut| target.mileage_saving >= cut),
        ok_depr: thresholds
            .depreciation_rate
            .is_some_and(|cut| rate <= cut),
        hot_ok: target.heat_rank <= hot_cutoff(sample_size, config.hot_share),
    };

    let wins = flags.wins();
    let verdict = match wins {
        w if w >= 2 => Verdict::Recommended,
        1 if flags.hot_ok => Verdict::Conditional,
        _ => Verdict::NotRecommended,
    };

    Ok(Decision {
        verdict,
        wins,
        flags,
        basis: DecisionBasis::Scored { thresholds },
    })
}

/// Largest heat rank still counted as hot: `max(1, floor(share * n))`.
pub fn hot_cutoff(sample_size: usize, share: f64) -> i64 {
    ((share * sample_size as f64).floor() as i64).max(1)
}
