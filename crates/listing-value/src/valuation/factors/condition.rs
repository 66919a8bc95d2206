use super::super::domain::Listing;
use super::super::locale::{
    lookup, FeatureLabel, Locale, HIGH_VALUE_OPTIONS, KEY_SAFETY_FEATURES, TRUST_ACCIDENT_FREE,
    TRUST_AS_IS, TRUST_CARFAX, TRUST_CERTIFIED,
};
use super::{FactorDetail, FactorResult, FactorStatus, FactorValue};

const EMPTY_MARK: &str = "—";

pub(super) fn trustworthiness(target: &Listing, locale: Locale) -> FactorResult {
    let trust = target.trust;
    let positives: Vec<&'static FeatureLabel> = [
        (trust.certified, &TRUST_CERTIFIED),
        (trust.accident_free, &TRUST_ACCIDENT_FREE),
        (trust.carfax, &TRUST_CARFAX),
    ]
    .into_iter()
    .filter_map(|(present, label)| present.then_some(label))
    .collect();

    let prefix = match locale {
        Locale::En => "trust: ",
        Locale::Zh => "可信度：",
    };

    let (value, display, msg) = if trust.as_is {
        let risk = match locale {
            Locale::En => format!("{prefix}risk ({})", TRUST_AS_IS.display(locale)),
            Locale::Zh => format!("{prefix}风险（{}）", TRUST_AS_IS.display(locale)),
        };
        (Vec::new(), Vec::new(), risk)
    } else if positives.is_empty() {
        (Vec::new(), Vec::new(), format!("{prefix}{EMPTY_MARK}"))
    } else {
        let value: Vec<String> = positives
            .iter()
            .map(|label| label.canonical.to_string())
            .collect();
        let display: Vec<String> = positives
            .iter()
            .map(|label| label.display(locale).to_string())
            .collect();
        let msg = format!("{prefix}{}", display.join(locale.list_separator()));
        (value, display, msg)
    };

    FactorResult {
        value: FactorValue::Features(value),
        status: FactorStatus::Unranked,
        rank: None,
        total: None,
        msg,
        detail: FactorDetail::Trust {
            trusted: trust.has_trust() && !trust.as_is,
            as_is: trust.as_is,
            display,
        },
    }
}

pub(super) fn options(target: &Listing, locale: Locale) -> FactorResult {
    let prefix = match locale {
        Locale::En => "high-value options: ",
        Locale::Zh => "高价值配置：",
    };
    allow_listed(&target.options, HIGH_VALUE_OPTIONS, prefix, locale)
}

pub(super) fn safety_features(target: &Listing, locale: Locale) -> FactorResult {
    let prefix = match locale {
        Locale::En => "key safety features: ",
        Locale::Zh => "关键安全配置：",
    };
    allow_listed(&target.safety_features, KEY_SAFETY_FEATURES, prefix, locale)
}

/// Keeps only allow-listed features, in listing order, without duplicates.
fn allow_listed(
    features: &[String],
    table: &'static [FeatureLabel],
    prefix: &str,
    locale: Locale,
) -> FactorResult {
    let mut matched: Vec<&'static FeatureLabel> = Vec::new();
    for feature in features {
        if let Some(label) = lookup(table, feature.trim()) {
            if !matched.iter().any(|seen| seen.canonical == label.canonical) {
                matched.push(label);
            }
        }
    }

    let value: Vec<String> = matched
        .iter()
        .map(|label| label.canonical.to_string())
        .collect();
    let display: Vec<String> = matched
        .iter()
        .map(|label| label.display(locale).to_string())
        .collect();
    let msg = if display.is_empty() {
        format!("{prefix}{EMPTY_MARK}")
    } else {
        format!("{prefix}{}", display.join(locale.list_separator()))
    };

    FactorResult {
        value: FactorValue::Features(value),
        status: FactorStatus::Unranked,
        rank: None,
        total: None,
        msg,
        detail: FactorDetail::Features {
            count: matched.len(),
            display,
        },
    }
}
