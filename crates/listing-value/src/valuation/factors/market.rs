use super::super::domain::Listing;
use super::super::locale::Locale;
use super::{FactorDetail, FactorResult, FactorStatus, FactorValue};

/// Heat rank is ranked globally upstream; it is reported as-is.
pub(super) fn heat_rank(target: &Listing, locale: Locale) -> FactorResult {
    let value = target.heat_rank;
    let msg = match locale {
        Locale::En => format!("market heat rank #{value} overall"),
        Locale::Zh => format!("全量热度排名：第 {value} 名"),
    };

    FactorResult {
        value: FactorValue::Position(value),
        status: FactorStatus::Unranked,
        rank: None,
        total: None,
        msg,
        detail: FactorDetail::Heat {
            mileage_bin: target.mileage_bin.clone(),
        },
    }
}
