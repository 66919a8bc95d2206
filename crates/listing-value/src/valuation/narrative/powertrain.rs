use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::super::locale::Locale;

/// Drivetrain family inferred from the grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Powertrain {
    Electric,
    /// Includes plug-in hybrids.
    Hybrid,
    Diesel,
    Gasoline,
    Unknown,
}

// `_` counts as a separator because exported keys join trims with underscores.
static FAMILY_PATTERNS: Lazy<[(Powertrain, Regex); 4]> = Lazy::new(|| {
    let family = |pattern: &str| Regex::new(pattern).expect("powertrain pattern is valid");
    [
        (
            Powertrain::Electric,
            family(r"electric|(?:^|[^a-z0-9])ev(?:[^a-z0-9]|$)"),
        ),
        (Powertrain::Hybrid, family(r"phev|plug-in|hybrid|_hev")),
        (
            Powertrain::Diesel,
            family(r"diesel|(?:^|[^a-z0-9])tdi(?:[^a-z0-9]|$)"),
        ),
        (
            Powertrain::Gasoline,
            family(r"gasoline|(?:^|[^a-z0-9])(?:petrol|gas)(?:[^a-z0-9]|$)"),
        ),
    ]
});

impl Powertrain {
    /// Pattern match on the lowercased key, first family wins. Short tokens such as `ev`
    /// only count as whole words so trims like "Evoque" stay unclassified.
    pub fn detect(full_key: &str) -> Self {
        let key = full_key.to_lowercase();
        FAMILY_PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.is_match(&key))
            .map(|(family, _)| *family)
            .unwrap_or(Self::Unknown)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Electric => "electric",
            Self::Hybrid => "hybrid",
            Self::Diesel => "diesel",
            Self::Gasoline => "gasoline",
            Self::Unknown => "unknown",
        }
    }

    /// Inspection checklist for a viewing.
    pub fn next_actions(self, locale: Locale) -> &'static [&'static str] {
        match (self, locale) {
            (Self::Electric, Locale::En) => &[
                "Book a viewing and check Carfax, service records and odometer consistency",
                "Review high-voltage battery health and warranty; test charging speed and range",
                "Inspect tires, brakes and underbody; confirm the charging cable and both keys",
                "If condition checks out, negotiate a small discount",
            ],
            (Self::Electric, Locale::Zh) => &[
                "预约看车并核对 Carfax/保养/里程一致性",
                "查看高压电池健康/保修条款，实测充电速率与续航",
                "检查轮胎/刹车/底盘；确认随车充电枪与两把钥匙",
                "车况正常可小幅议价",
            ],
            (Self::Hybrid, Locale::En) => &[
                "Book a viewing and check Carfax, service and recall records",
                "Test drive the engine/motor handover and scan for battery or inverter codes",
                "Look for leaks; check tire and brake wear",
                "If condition checks out, negotiate a little or keep comparing the same model",
            ],
            (Self::Hybrid, Locale::Zh) => &[
                "预约看车并核对 Carfax/保养与召回记录",
                "路试发动机-电机切换并读码排查电池/逆变器",
                "检查是否渗漏；查看轮胎/刹车磨损",
                "车况正常可小幅议价，或继续对比同款",
            ],
            (Self::Gasoline, Locale::En) => &[
                "Book a viewing and check Carfax, service records and odometer consistency",
                "Cold start and test drive: listen for rough idle, harsh shifts or noises",
                "Check the engine bay and underbody for leaks; check tire and brake wear",
                "Confirm both keys and the tool kit; if condition checks out, negotiate a little",
            ],
            (Self::Gasoline, Locale::Zh) => &[
                "预约看车并核对 Carfax/保养记录/里程一致性",
                "冷车启动与路试：注意怠速、换挡是否顺畅、是否有异响",
                "检查机舱/底盘是否渗漏；查看轮胎与刹车磨损",
                "确认两把钥匙与随车工具；车况正常可小幅议价",
            ],
            (Self::Diesel, Locale::En) => &[
                "Cold start and test drive: watch exhaust smoke, vibration and pull",
                "Look for leaks; ask for DPF and maintenance history",
                "Check brakes and tires; confirm both keys and the tool kit",
                "If condition checks out, negotiate a small discount",
            ],
            (Self::Diesel, Locale::Zh) => &[
                "冷车启动与路试：观察烟色/抖动/动力",
                "检查是否渗漏；了解 DPF/维护记录",
                "检查刹车与轮胎；确认两把钥匙与随车工具",
                "车况正常可小幅议价",
            ],
            (Self::Unknown, Locale::En) => &[
                "Book a viewing, check the records, and do a test drive and routine inspection",
                "If condition checks out, negotiate a small discount",
            ],
            (Self::Unknown, Locale::Zh) => &[
                "预约看车并核对记录；完成路试与常规检查",
                "车况正常可小幅议价",
            ],
        }
    }

    /// Closing action appended to a positive decision sentence.
    pub const fn tail(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Electric, Locale::En) => "Book a viewing soon, verify the records and battery health, test charging, check tires and brakes, and negotiate a little if all is well.",
            (Self::Electric, Locale::Zh) => "建议尽快预约看车，核对记录与电池健康，实测充电；检查轮胎/刹车；车况正常可小幅议价。",
            (Self::Hybrid, Locale::En) => "Book a viewing soon, verify records and recalls, test the engine/motor handover with a code scan, check tires and brakes, and negotiate a little if all is well.",
            (Self::Hybrid, Locale::Zh) => "建议尽快预约看车，核对记录与召回；路试发动机-电机切换并读码；检查轮胎/刹车；车况正常可小幅议价。",
            (Self::Gasoline, Locale::En) => "Book a viewing soon, verify the records, do a cold start and test drive, check for leaks and brake or tire wear, and negotiate a little if all is well.",
            (Self::Gasoline, Locale::Zh) => "建议尽快预约看车，核对记录；冷车启动与路试；检查机舱/底盘渗漏及轮胎/刹车；车况正常可小幅议价。",
            (Self::Diesel, Locale::En) => "Do a cold start and test drive, ask about DPF maintenance, check for leaks and brake or tire wear, and negotiate a little if all is well.",
            (Self::Diesel, Locale::Zh) => "建议冷车启动与路试；了解 DPF 维护；检查渗漏与轮胎/刹车；车况正常可小幅议价。",
            (Self::Unknown, Locale::En) => "Book a viewing and complete a routine inspection; negotiate a little if all is well.",
            (Self::Unknown, Locale::Zh) => "建议预约看车并完成常规检查，车况正常可小幅议价。",
        }
    }
}
