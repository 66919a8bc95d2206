use super::super::domain::{Listing, ValuationError};
use super::super::locale::{format_money, Locale};
use super::super::ranking::{self, Direction, RankedField};
use super::{FactorDetail, FactorResult, FactorStatus, FactorValue, RankContext};

pub(super) fn price_saving(
    target: &Listing,
    ctx: &RankContext<'_>,
) -> Result<FactorResult, ValuationError> {
    let value = target.price_saving;
    let (status, rank) = ranked_position(ctx, || {
        ranking::rank(ctx.cohort, value, RankedField::PriceSaving, Direction::HigherIsBetter)
    });

    let msg = match (rank, ctx.locale) {
        (Some(rank), Locale::En) => format!(
            "price saving {}, ranked {rank}/{}",
            format_money(value),
            ctx.total()
        ),
        (Some(rank), Locale::Zh) => {
            format!("价格回血 {}，排 {rank}/{}", format_money(value), ctx.total())
        }
        (None, locale) => insufficient_sample_msg(locale, ctx.total()),
    };

    Ok(FactorResult {
        value: FactorValue::Amount(value),
        status,
        rank,
        total: Some(ctx.total()),
        msg,
        detail: FactorDetail::PriceSaving {
            y_pred: target.y_pred,
            actual_price: target.actual_price,
        },
    })
}

pub(super) fn mileage_saving(
    target: &Listing,
    ctx: &RankContext<'_>,
) -> Result<FactorResult, ValuationError> {
    let value = target.mileage_saving;
    let (status, rank) = ranked_position(ctx, || {
        ranking::rank(ctx.cohort, value, RankedField::MileageSaving, Direction::HigherIsBetter)
    });

    let msg = match (rank, ctx.locale) {
        (Some(rank), Locale::En) => format!(
            "mileage saving {}, ranked {rank}/{}",
            format_money(value),
            ctx.total()
        ),
        (Some(rank), Locale::Zh) => {
            format!("里程回血 {}，排 {rank}/{}", format_money(value), ctx.total())
        }
        (None, locale) => insufficient_sample_msg(locale, ctx.total()),
    };

    Ok(FactorResult {
        value: FactorValue::Amount(value),
        status,
        rank,
        total: Some(ctx.total()),
        msg,
        detail: FactorDetail::MileageSaving {
            mileage: target.mileage,
            mileage_y_pred: target.mileage_y_pred,
            price_per_km: target.price_per_km,
        },
    })
}

pub(super) fn expected_depreciation(
    target: &Listing,
    ctx: &RankContext<'_>,
) -> Result<FactorResult, ValuationError> {
    let rate = target
        .depreciation_rate()
        .ok_or_else(|| ValuationError::NonPositivePrediction {
            listing_id: target.listing_id.0.clone(),
            y_pred: target.y_pred,
        })?;

    let (status, rank) = ranked_position(ctx, || {
        ranking::rank_of(ctx.cohort.depreciation_rates(), rate, Direction::LowerIsBetter)
    });

    let value = target.expected_depreciation;
    let msg = match (rank, ctx.locale) {
        (Some(rank), Locale::En) => format!(
            "expected depreciation {} ({:.2}%), ranked {rank}/{}",
            format_money(value),
            rate * 100.0,
            ctx.total()
        ),
        (Some(rank), Locale::Zh) => format!(
            "贬值 {}，贬值率 {:.2}%，排 {rank}/{}",
            format_money(value),
            rate * 100.0,
            ctx.total()
        ),
        (None, locale) => insufficient_sample_msg(locale, ctx.total()),
    };

    Ok(FactorResult {
        value: FactorValue::Amount(value),
        status,
        rank,
        total: Some(ctx.total()),
        msg,
        detail: FactorDetail::Depreciation {
            depreciation_rate: round_to(rate, 4),
            y_pred: target.y_pred,
            next_bin_avg_price: target.next_bin_avg_price,
        },
    })
}

fn ranked_position<F>(ctx: &RankContext<'_>, compute: F) -> (FactorStatus, Option<usize>)
where
    F: FnOnce() -> usize,
{
    if ctx.has_sample() {
        (FactorStatus::Ranked, Some(compute()))
    } else {
        (FactorStatus::InsufficientSample, None)
    }
}

fn insufficient_sample_msg(locale: Locale, total: usize) -> String {
    match locale {
        Locale::En => format!("only {total} comparable listing(s); not enough to rank"),
        Locale::Zh => format!("样本数不足（{total} 台车），无法判断"),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
