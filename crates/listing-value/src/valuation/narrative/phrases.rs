use super::super::locale::Locale;

/// Interchangeable templates for one kind of statement.
pub(crate) struct Bank {
    en: &'static [&'static str],
    zh: &'static [&'static str],
}

impl Bank {
    pub(crate) const fn get(&self, locale: Locale) -> &'static [&'static str] {
        match locale {
            Locale::En => self.en,
            Locale::Zh => self.zh,
        }
    }
}

/// A single fixed sentence per locale.
pub(crate) struct Line {
    en: &'static str,
    zh: &'static str,
}

impl Line {
    pub(crate) const fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Zh => self.zh,
        }
    }
}

pub(crate) static PRICE_SAVED: Bank = Bank {
    en: &[
        "a {scale} saving of about {amt}",
        "about {amt} cheaper than comparable listings",
        "about {amt} below the predicted price",
    ],
    zh: &["价格{scale}省了≈{amt}", "比同款便宜≈{amt}", "比预估价低≈{amt}"],
};

pub(crate) static PRICE_OVER: Bank = Bank {
    en: &[
        "a {scale} premium of about {amt}",
        "about {amt} above the market",
        "you would pay about {amt} more",
    ],
    zh: &["价格{scale}偏高≈{amt}", "比行情高≈{amt}", "需要多付≈{amt}"],
};

pub(crate) static MILEAGE_SAVED: Bank = Bank {
    en: &[
        "mileage advantage worth about {amt}",
        "low mileage, a {scale} equivalent saving of about {amt}",
        "better value on mileage by about {amt}",
    ],
    zh: &[
        "里程有优势，等效省≈{amt}",
        "里程偏低，等效省≈{amt}",
        "里程方面更划算≈{amt}",
    ],
};

pub(crate) static MILEAGE_OVER: Bank = Bank {
    en: &[
        "mileage drags the value down by about {amt}",
        "high mileage, a {scale} equivalent cost of about {amt}",
        "mileage disadvantage of about {amt}",
    ],
    zh: &[
        "里程拖后腿，等效多花≈{amt}",
        "里程偏高，等效多花≈{amt}",
        "里程劣势，多付≈{amt}",
    ],
};

pub(crate) static PRICE_REASONABLE: Line = Line {
    en: "price looks reasonable",
    zh: "价格基本合理",
};

pub(crate) static MILEAGE_REASONABLE: Line = Line {
    en: "mileage looks reasonable",
    zh: "里程基本合理",
};

pub(crate) static DEPRECIATION_LOW: Bank = Bank {
    en: &[
        "expected short-term depreciation about {pct} (low pressure)",
        "expected short-term depreciation about {pct}, not much pressure",
    ],
    zh: &["预计短期贬值≈{pct}（压力不大）", "预计短期贬值≈{pct}，压力不大"],
};

pub(crate) static DEPRECIATION_MID: Bank = Bank {
    en: &[
        "expected short-term depreciation about {pct} (normal range)",
        "expected short-term depreciation about {pct}, broadly normal",
    ],
    zh: &["预计短期贬值≈{pct}（正常范围）", "预计短期贬值≈{pct}，大体正常"],
};

pub(crate) static DEPRECIATION_HIGH: Bank = Bank {
    en: &[
        "expected short-term depreciation about {pct} (on the high side)",
        "expected short-term depreciation about {pct}, fairly high",
    ],
    zh: &["预计短期贬值≈{pct}（偏高）", "预计短期贬值≈{pct}，偏高"],
};

pub(crate) static HEAT_STRONG: Bank = Bank {
    en: &["very popular (#{rank} overall)", "in high demand (#{rank} overall)"],
    zh: &["热度很高（全量第 {rank} 名）", "热门车源（全量第 {rank} 名）"],
};

pub(crate) static HEAT_GOOD: Bank = Bank {
    en: &["ranks well on heat (#{rank} overall)", "drawing solid interest (#{rank})"],
    zh: &["热度靠前（全量第 {rank} 名）", "关注度不错（第 {rank} 名）"],
};

pub(crate) static HEAT_OK: Bank = Bank {
    en: &["drawing good interest (near the top overall)"],
    zh: &["热度不错（全量靠前）"],
};

pub(crate) static NO_CLEAR_ADVANTAGE: Line = Line {
    en: "no clear advantage",
    zh: "暂无明显优势",
};

/// Magnitude words: small, noticeable, significant.
pub(crate) static SCALE_WORDS: [Line; 3] = [
    Line { en: "small", zh: "小幅" },
    Line { en: "noticeable", zh: "明显" },
    Line { en: "significant", zh: "显著" },
];

pub(crate) static RECOMMENDED: Line = Line {
    en: "{emoji}Recommended: {head}. {tail}",
    zh: "{emoji}推荐：{head}。{tail}",
};

pub(crate) static CONDITIONAL: Line = Line {
    en: "{emoji}Recommended with caution: {head}. {tail}",
    zh: "{emoji}谨慎推荐：{head}。{tail}",
};

pub(crate) static NOT_RECOMMENDED: Line = Line {
    en: "{emoji}Not recommended: only {wins}/3 core advantages. Wait, or widen the search.",
    zh: "{emoji}暂不推荐：核心优势不足（{wins}/3）。建议先观望或扩大筛选范围。",
};

pub(crate) static INSUFFICIENT_SAMPLE: Line = Line {
    en: "{emoji}Not recommended: only {n} comparable listings, too few to judge. Widen the search or check back later.",
    zh: "{emoji}暂不推荐：同款样本仅 {n} 台，数据不足以判断。建议扩大筛选范围或稍后再看。",
};

pub(crate) static AS_IS_VETO: Line = Line {
    en: "{emoji}Not recommended: sold AS-IS with no warranty or inspection guarantee. Only consider it after an independent inspection.",
    zh: "{emoji}暂不推荐：该车按现状出售（AS-IS），无质保或检测保障。如仍考虑，请先做第三方检测。",
};

/// Fills `{name}` placeholders; unknown placeholders are left as-is.
pub(crate) fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_every_occurrence() {
        let text = fill("{a} and {a} but {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(text, "x and x but y");
        assert_eq!(fill("{missing}", &[("a", "x")]), "{missing}");
    }

    #[test]
    fn banks_are_populated_for_both_locales() {
        for bank in [
            &PRICE_SAVED,
            &PRICE_OVER,
            &MILEAGE_SAVED,
            &MILEAGE_OVER,
            &DEPRECIATION_LOW,
            &DEPRECIATION_MID,
            &DEPRECIATION_HIGH,
            &HEAT_STRONG,
            &HEAT_GOOD,
            &HEAT_OK,
        ] {
            assert!(!bank.get(Locale::En).is_empty());
            assert!(!bank.get(Locale::Zh).is_empty());
        }
    }
}
