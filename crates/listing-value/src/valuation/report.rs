use serde::Serialize;

use super::decision::{Decision, DecisionFlags, Verdict};
use super::domain::{Cohort, Listing, ListingId};
use super::factors::Evaluations;
use super::narrative::{Narrative, Summary};

/// Response for a single evaluation. Only `summary` and `evaluations` nest; the decision
/// flags sit at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationReport {
    pub listing_id: ListingId,
    pub full_key: String,
    pub year: i32,
    pub url: String,
    pub sample_size: usize,
    pub highlights: Vec<&'static str>,
    pub is_recommended: bool,
    pub verdict: Verdict,
    pub wins: u8,
    #[serde(flatten)]
    pub flags: DecisionFlags,
    pub decision_reason: String,
    pub summary: Summary,
    pub evaluations: Evaluations,
}

impl ValuationReport {
    pub(crate) fn assemble(
        target: &Listing,
        cohort: &Cohort,
        evaluations: Evaluations,
        decision: &Decision,
        narrative: Narrative,
    ) -> Self {
        Self {
            listing_id: target.listing_id.clone(),
            full_key: target.full_key.clone(),
            year: target.year,
            url: target.url.clone(),
            sample_size: cohort.len(),
            highlights: decision.highlights(),
            is_recommended: decision.is_recommended(),
            verdict: decision.verdict,
            wins: decision.wins,
            flags: decision.flags,
            decision_reason: narrative.decision_reason,
            summary: narrative.summary,
            evaluations,
        }
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let mut lines = vec![
            format!("{} {} (listing {})", self.year, self.full_key, self.listing_id),
            format!(
                "verdict: {} ({} of 3 core wins, {} comparable listings)",
                self.verdict.label(),
                self.wins,
                self.sample_size
            ),
            self.decision_reason.clone(),
            String::new(),
        ];
        lines.extend(self.summary.points.iter().map(|point| format!("- {point}")));
        lines.push(String::new());
        lines.extend(
            self.summary
                .next_actions
                .iter()
                .enumerate()
                .map(|(index, action)| format!("{}. {action}", index + 1)),
        );
        lines.push(String::new());
        lines.extend(
            self.evaluations
                .iter()
                .map(|(kind, result)| format!("{:<22} {}", kind.field_name(), result.msg)),
        );
        lines.join("\n")
    }
}
