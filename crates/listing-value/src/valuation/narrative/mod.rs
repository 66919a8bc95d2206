//! Human-readable summary and decision sentence.
//!
//! Phrase choice is driven by a generator seeded from the listing identity, so the same
//! listing always reads the same way while different listings vary.

mod phrases;
mod powertrain;
mod seed;

use serde::{Deserialize, Serialize};

use super::decision::{Decision, DecisionBasis, DecisionFlags, Verdict};
use super::locale::{format_money, Locale};
use phrases::{fill, Bank};
use seed::PhrasePicker;

pub use powertrain::Powertrain;
pub use seed::narrative_seed;

const EMOJI_OK: &str = "✅ ";
const EMOJI_WARN: &str = "⚠️ ";
const ZERO_EPSILON: f64 = 1e-9;

/// Narrative thresholds and style switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// Points joined into the lead sentence.
    pub max_points: usize,
    pub use_emoji: bool,
    /// Below this absolute amount a saving is "small".
    pub price_small: f64,
    /// Below this it is "noticeable", otherwise "significant".
    pub price_medium: f64,
    /// Depreciation percent bands.
    pub depr_low: f64,
    pub depr_mid: f64,
    pub heat_strong: i64,
    pub heat_good: i64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            max_points: 3,
            use_emoji: false,
            price_small: 500.0,
            price_medium: 2000.0,
            depr_low: 3.0,
            depr_mid: 7.0,
            heat_strong: 10,
            heat_good: 50,
        }
    }
}

/// Facts the narrative speaks about.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeInput<'a> {
    pub listing_id: &'a str,
    pub full_key: &'a str,
    pub price_saving: f64,
    pub mileage_saving: f64,
    /// Fraction (`0.065`) or percent (`6.5`); see [`depreciation_percent`].
    pub depreciation_rate: Option<f64>,
    pub heat_rank: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub points: Vec<String>,
    pub next_actions: Vec<String>,
    pub powertrain: Powertrain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narrative {
    pub summary: Summary,
    pub decision_reason: String,
}

/// Values up to 1 are fractions; anything larger is already a percent.
pub fn depreciation_percent(rate: f64) -> f64 {
    if rate <= 1.0 {
        rate * 100.0
    } else {
        rate
    }
}

pub fn compose(
    input: &NarrativeInput<'_>,
    decision: &Decision,
    config: &NarrativeConfig,
    locale: Locale,
) -> Narrative {
    let mut picker = PhrasePicker::from_seed(narrative_seed(
        input.listing_id,
        input.full_key,
        input.heat_rank,
    ));

    let points = Composer {
        config,
        locale,
        picker: &mut picker,
    }
    .points(input, &decision.flags);

    let head = points
        .iter()
        .take(config.max_points.max(1))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(locale.list_separator());

    let powertrain = Powertrain::detect(input.full_key);
    let decision_reason = decision_sentence(decision, &head, powertrain, config, locale);

    Narrative {
        summary: Summary {
            points,
            next_actions: powertrain
                .next_actions(locale)
                .iter()
                .map(|action| action.to_string())
                .collect(),
            powertrain,
        },
        decision_reason,
    }
}

struct Composer<'a> {
    config: &'a NarrativeConfig,
    locale: Locale,
    picker: &'a mut PhrasePicker,
}

impl Composer<'_> {
    fn points(mut self, input: &NarrativeInput<'_>, flags: &DecisionFlags) -> Vec<String> {
        let mut points = Vec::new();

        points.extend(self.saving(
            input.price_saving,
            flags.ok_price,
            &phrases::PRICE_SAVED,
            &phrases::PRICE_OVER,
            phrases::PRICE_REASONABLE.get(self.locale),
        ));
        points.extend(self.saving(
            input.mileage_saving,
            flags.ok_mile,
            &phrases::MILEAGE_SAVED,
            &phrases::MILEAGE_OVER,
            phrases::MILEAGE_REASONABLE.get(self.locale),
        ));
        if let Some(rate) = input.depreciation_rate.filter(|rate| rate.is_finite()) {
            points.push(self.depreciation(rate));
        }
        points.extend(self.heat(input.heat_rank, flags.hot_ok));

        if points.is_empty() {
            points.push(phrases::NO_CLEAR_ADVANTAGE.get(self.locale).to_string());
        }
        points
    }

    fn saving(
        &mut self,
        amount: f64,
        criterion_met: bool,
        gains: &Bank,
        losses: &Bank,
        neutral: &str,
    ) -> Option<String> {
        let (emoji, bank) = if amount > ZERO_EPSILON {
            (EMOJI_OK, gains)
        } else if amount < -ZERO_EPSILON {
            (EMOJI_WARN, losses)
        } else if criterion_met {
            return Some(format!("{}{neutral}", self.emoji(EMOJI_OK)));
        } else {
            return None;
        };

        let template = self.picker.pick(bank.get(self.locale));
        let money = format_money(amount.abs());
        let text = fill(
            template,
            &[("scale", self.scale_word(amount)), ("amt", money.as_str())],
        );
        Some(format!("{}{text}", self.emoji(emoji)))
    }

    fn depreciation(&mut self, rate: f64) -> String {
        let percent = depreciation_percent(rate);
        let bank = if percent < self.config.depr_low {
            &phrases::DEPRECIATION_LOW
        } else if percent < self.config.depr_mid {
            &phrases::DEPRECIATION_MID
        } else {
            &phrases::DEPRECIATION_HIGH
        };
        let template = self.picker.pick(bank.get(self.locale));
        let shown = format!("{percent:.1}%");
        fill(template, &[("pct", shown.as_str())])
    }

    fn heat(&mut self, rank: i64, hot_ok: bool) -> Option<String> {
        if !hot_ok && rank > self.config.heat_good {
            return None;
        }
        let bank = if rank <= self.config.heat_strong {
            &phrases::HEAT_STRONG
        } else if rank <= self.config.heat_good {
            &phrases::HEAT_GOOD
        } else {
            &phrases::HEAT_OK
        };
        let template = self.picker.pick(bank.get(self.locale));
        let shown = rank.to_string();
        Some(fill(template, &[("rank", shown.as_str())]))
    }

    fn scale_word(&self, amount: f64) -> &'static str {
        let magnitude = amount.abs();
        let index = if magnitude < self.config.price_small {
            0
        } else if magnitude < self.config.price_medium {
            1
        } else {
            2
        };
        phrases::SCALE_WORDS[index].get(self.locale)
    }

    fn emoji(&self, emoji: &'static str) -> &'static str {
        if self.config.use_emoji {
            emoji
        } else {
            ""
        }
    }
}

fn decision_sentence(
    decision: &Decision,
    head: &str,
    powertrain: Powertrain,
    config: &NarrativeConfig,
    locale: Locale,
) -> String {
    let emoji = match (config.use_emoji, decision.is_recommended()) {
        (false, _) => "",
        (true, true) => EMOJI_OK,
        (true, false) => EMOJI_WARN,
    };

    match (&decision.basis, decision.verdict) {
        (DecisionBasis::InsufficientSample { sample_size }, _) => {
            let shown = sample_size.to_string();
            fill(
                phrases::INSUFFICIENT_SAMPLE.get(locale),
                &[("emoji", emoji), ("n", shown.as_str())],
            )
        }
        (DecisionBasis::AsIsVeto, _) => {
            fill(phrases::AS_IS_VETO.get(locale), &[("emoji", emoji)])
        }
        (DecisionBasis::Scored { .. }, Verdict::Recommended) => fill(
            phrases::RECOMMENDED.get(locale),
            &[("emoji", emoji), ("head", head), ("tail", powertrain.tail(locale))],
        ),
        (DecisionBasis::Scored { .. }, Verdict::Conditional) => fill(
            phrases::CONDITIONAL.get(locale),
            &[("emoji", emoji), ("head", head), ("tail", powertrain.tail(locale))],
        ),
        (DecisionBasis::Scored { .. }, Verdict::NotRecommended) => {
            let wins = decision.wins.to_string();
            fill(
                phrases::NOT_RECOMMENDED.get(locale),
                &[("emoji", emoji), ("wins", wins.as_str())],
            )
        }
    }
}
