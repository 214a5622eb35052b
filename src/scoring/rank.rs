use std::cmp::Ordering;

use tracing::debug;

use super::config::TieBreak;
use super::error::ScoringError;
use super::types::{Component, ComponentScore};

/// Order two components with equal scores.
pub(crate) fn tie_break_cmp(tie_break: TieBreak, a: &Component, b: &Component) -> Ordering {
    match tie_break {
        TieBreak::PartNumber => a
            .part_number
            .cmp(&b.part_number)
            .then_with(|| a.manufacturer.cmp(&b.manufacturer))
            .then_with(|| a.id.cmp(&b.id)),
        TieBreak::InputOrder => Ordering::Equal,
    }
}

/// Score descending, then the tie-break rule. `total_cmp` keeps the order
/// total even if a NaN slips through.
pub(crate) fn score_desc_cmp(
    tie_break: TieBreak,
    (score_a, a): (f64, &Component),
    (score_b, b): (f64, &Component),
) -> Ordering {
    score_b
        .total_cmp(&score_a)
        .then_with(|| tie_break_cmp(tie_break, a, b))
}

/// Sort by total score descending and number ranks 1..N.
///
/// Returns a new list; the input is left as it was.
pub fn rank(scores: &[ComponentScore], tie_break: TieBreak) -> Vec<ComponentScore> {
    let mut ranked = scores.to_vec();
    // Stable sort, so InputOrder keeps first-seen order for ties
    ranked.sort_by(|a, b| {
        score_desc_cmp(
            tie_break,
            (a.total_score, &a.component),
            (b.total_score, &b.component),
        )
    });
    for (i, score) in ranked.iter_mut().enumerate() {
        score.rank = i + 1;
    }

    debug!(components = ranked.len(), ?tie_break, "ranked components");
    ranked
}

/// Find a ranked component by its id.
pub fn find_component<'a>(
    ranked: &'a [ComponentScore],
    component_id: &str,
) -> Result<&'a ComponentScore, ScoringError> {
    ranked
        .iter()
        .find(|s| s.component.id == component_id)
        .ok_or_else(|| ScoringError::UnknownComponent(component_id.to_string()))
}
