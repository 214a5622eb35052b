use tracing::debug;

use super::aggregate::checked_total_weight;
use super::config::TieBreak;
use super::error::ScoringError;
use super::rank::score_desc_cmp;
use super::types::{ComponentScore, Criterion, SensitivityResult};
use super::validation::{MAX_WEIGHT, MIN_WEIGHT};

/// Apply `delta` to a weight, clamped to the 1-10 weight scale.
pub fn adjusted_weight(original: f64, delta: f64) -> f64 {
    (original + delta).clamp(MIN_WEIGHT, MAX_WEIGHT)
}

/// Re-rank every component after moving one criterion's weight by `delta`.
///
/// Only the target criterion changes; scores are read from each component's
/// entries, a criterion the component has no entry for counts as zero. The
/// result is a throwaway projection: nothing passed in is modified.
///
/// The adjusted weights obey the same rules as [`total_weight`]: a
/// non-finite `delta` or any negative weight is `InvalidWeight`.
///
/// [`total_weight`]: super::aggregate::total_weight
pub fn analyze(
    criteria: &[Criterion],
    components: &[ComponentScore],
    criterion_name: &str,
    delta: f64,
    tie_break: TieBreak,
) -> Result<Vec<SensitivityResult>, ScoringError> {
    let target = criteria
        .iter()
        .find(|c| c.name == criterion_name)
        .ok_or_else(|| ScoringError::UnknownCriterion(criterion_name.to_string()))?;

    let new_weight = adjusted_weight(target.weight, delta);
    debug!(
        criterion = criterion_name,
        original = target.weight,
        adjusted = new_weight,
        delta,
        "running sensitivity pass"
    );

    let weights: Vec<(&str, f64)> = criteria
        .iter()
        .map(|c| {
            let weight = if c.name == criterion_name {
                new_weight
            } else {
                c.weight
            };
            (c.name.as_str(), weight)
        })
        .collect();

    let total_weight = checked_total_weight(weights.iter().copied())?;

    let mut projected: Vec<(&ComponentScore, f64)> = components
        .iter()
        .map(|component| {
            let weighted_sum: f64 = weights
                .iter()
                .map(|(name, weight)| component.score_for(name).unwrap_or(0.0) * weight)
                .sum();
            (component, weighted_sum / total_weight)
        })
        .collect();

    projected.sort_by(|(a, score_a), (b, score_b)| {
        score_desc_cmp(tie_break, (*score_a, &a.component), (*score_b, &b.component))
    });

    Ok(projected
        .into_iter()
        .map(|(component, adjusted_score)| SensitivityResult {
            component_id: component.component.id.clone(),
            label: component.label(),
            adjusted_score,
        })
        .collect())
}
