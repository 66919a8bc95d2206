use serde::{Deserialize, Serialize};

/// Language used for factor messages, display labels and narrative text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Some(Self::En),
            "zh" | "zh-cn" | "chinese" => Some(Self::Zh),
            _ => None,
        }
    }

    /// Separator used when joining phrases into one sentence.
    pub const fn list_separator(self) -> &'static str {
        match self {
            Self::En => ", ",
            Self::Zh => "，",
        }
    }
}

/// Canonical feature name with its display labels.
pub(crate) struct FeatureLabel {
    pub canonical: &'static str,
    pub en: &'static str,
    pub zh: &'static str,
}

impl FeatureLabel {
    pub(crate) const fn display(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Zh => self.zh,
        }
    }
}

pub(crate) const HIGH_VALUE_OPTIONS: &[FeatureLabel] = &[
    FeatureLabel { canonical: "Leather Seats", en: "leather seats", zh: "真皮座椅" },
    FeatureLabel { canonical: "Navigation System", en: "navigation", zh: "导航系统" },
    FeatureLabel { canonical: "Sunroof/Moonroof", en: "sunroof", zh: "天窗" },
    FeatureLabel { canonical: "Heated Seats", en: "heated front seats", zh: "前排座椅加热" },
    FeatureLabel { canonical: "Heated Steering Wheel", en: "heated steering wheel", zh: "方向盘加热" },
    FeatureLabel { canonical: "Remote Start", en: "remote start", zh: "远程启动" },
    FeatureLabel { canonical: "Third Row Seating", en: "third-row seating", zh: "第三排座椅" },
    FeatureLabel { canonical: "Premium Sound System", en: "premium audio", zh: "高级音响" },
    FeatureLabel { canonical: "Adaptive Cruise Control", en: "adaptive cruise", zh: "自适应巡航" },
    FeatureLabel { canonical: "Ventilated Seats", en: "ventilated seats", zh: "座椅通风" },
    FeatureLabel { canonical: "Heads-Up Display", en: "heads-up display", zh: "抬头显示" },
    FeatureLabel { canonical: "Multi Zone Climate Control", en: "multi-zone climate", zh: "分区空调" },
];

pub(crate) const KEY_SAFETY_FEATURES: &[FeatureLabel] = &[
    FeatureLabel { canonical: "Automatic Emergency Braking", en: "automatic emergency braking", zh: "主动刹车" },
    FeatureLabel { canonical: "Lane Departure Warning", en: "lane departure warning", zh: "车道偏离预警" },
    FeatureLabel { canonical: "Blind Spot Monitoring", en: "blind spot monitoring", zh: "盲点监测" },
    FeatureLabel { canonical: "Rear Cross Traffic Alert", en: "rear cross-traffic alert", zh: "后方交叉来车预警" },
    FeatureLabel { canonical: "Adaptive Cruise Control", en: "adaptive cruise", zh: "自适应巡航" },
    FeatureLabel { canonical: "Parking Sensors", en: "parking sensors", zh: "倒车雷达/驻车雷达" },
    FeatureLabel { canonical: "Backup Camera", en: "backup camera", zh: "倒车影像" },
    FeatureLabel { canonical: "Curtain Airbags", en: "curtain airbags", zh: "侧气帘" },
    FeatureLabel { canonical: "Frontal Collision Warning", en: "forward collision warning", zh: "前方碰撞预警" },
    FeatureLabel { canonical: "ABS Brakes", en: "ABS", zh: "防抱死制动" },
];

pub(crate) static TRUST_CERTIFIED: FeatureLabel =
    FeatureLabel { canonical: "certified", en: "certified pre-owned", zh: "认证车" };
pub(crate) static TRUST_ACCIDENT_FREE: FeatureLabel =
    FeatureLabel { canonical: "accident_free", en: "accident-free", zh: "无事故" };
pub(crate) static TRUST_CARFAX: FeatureLabel =
    FeatureLabel { canonical: "carfax", en: "Carfax report", zh: "Carfax 记录" };
pub(crate) static TRUST_AS_IS: FeatureLabel =
    FeatureLabel { canonical: "as_is", en: "sold AS-IS", zh: "按现状出售（AS-IS）" };

pub(crate) fn lookup(table: &'static [FeatureLabel], canonical: &str) -> Option<&'static FeatureLabel> {
    table.iter().find(|label| label.canonical == canonical)
}

/// Rounds to whole currency units and groups thousands, e.g. `-12,345`.
pub(crate) fn format_money(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_rounded_and_grouped() {
        assert_eq!(format_money(0.4), "0");
        assert_eq!(format_money(999.5), "1,000");
        assert_eq!(format_money(1234567.0), "1,234,567");
        assert_eq!(format_money(-2500.2), "-2,500");
    }

    #[test]
    fn locale_parsing_is_lenient_about_case() {
        assert_eq!(Locale::parse("ZH"), Some(Locale::Zh));
        assert_eq!(Locale::parse(" en-US "), Some(Locale::En));
        assert_eq!(Locale::parse("fr"), None);
    }

    #[test]
    fn lookup_matches_canonical_names_exactly() {
        assert!(lookup(HIGH_VALUE_OPTIONS, "Remote Start").is_some());
        assert!(lookup(HIGH_VALUE_OPTIONS, "remote start").is_none());
        assert_eq!(
            lookup(KEY_SAFETY_FEATURES, "ABS Brakes").map(|label| label.display(Locale::Zh)),
            Some("防抱死制动")
        );
    }
}
