use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::error::ScoringError;
use super::types::{Component, ComponentScore, Criterion, CriterionEntry, CriterionScore};

/// What a (component, criterion) pair without a recorded score counts as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingScorePolicy {
    pub score: f64,
    pub rationale: &'static str,
}

/// Missing scores count as zero. The criterion's weight still enters the
/// denominator, so unscored criteria pull the total down.
pub const MISSING_SCORE_POLICY: MissingScorePolicy = MissingScorePolicy {
    score: 0.0,
    rationale: "No score available",
};

/// Lookup of scores by (component id, criterion id).
///
/// When a pair appears more than once the last record wins; boundary
/// validation reports such duplicates before they get here.
#[derive(Debug, Default)]
pub struct ScoreIndex<'a> {
    by_component: HashMap<&'a str, HashMap<&'a str, &'a CriterionScore>>,
}

impl<'a> ScoreIndex<'a> {
    pub fn new(scores: &'a [CriterionScore]) -> Self {
        let mut by_component: HashMap<&'a str, HashMap<&'a str, &'a CriterionScore>> =
            HashMap::new();
        for score in scores {
            by_component
                .entry(score.component_id.as_str())
                .or_default()
                .insert(score.criterion_id.as_str(), score);
        }
        Self { by_component }
    }

    pub fn get(&self, component_id: &str, criterion_id: &str) -> Option<&'a CriterionScore> {
        self.by_component
            .get(component_id)
            .and_then(|row| row.get(criterion_id))
            .copied()
    }
}

/// Sum of all criterion weights. Negative or non-finite weights, a zero sum
/// and a sum that overflows are errors.
pub fn total_weight(criteria: &[Criterion]) -> Result<f64, ScoringError> {
    checked_total_weight(criteria.iter().map(|c| (c.name.as_str(), c.weight)))
}

/// Sum `(criterion name, weight)` pairs under the rules of [`total_weight`].
pub(crate) fn checked_total_weight<'a>(
    weights: impl IntoIterator<Item = (&'a str, f64)>,
) -> Result<f64, ScoringError> {
    let mut total = 0.0;
    for (criterion, weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ScoringError::InvalidWeight {
                criterion: criterion.to_string(),
                weight,
            });
        }
        total += weight;
    }
    if !total.is_finite() {
        return Err(ScoringError::TotalWeightOverflow);
    }
    if total == 0.0 {
        return Err(ScoringError::ZeroTotalWeight);
    }
    Ok(total)
}

/// Weighted average of one component's scores over every criterion of the study.
///
/// `total = Σ(score × weight) / Σ(weight)`. Criteria without a recorded
/// score fall back to [`MISSING_SCORE_POLICY`]. The returned score is unranked.
pub fn aggregate(
    criteria: &[Criterion],
    component: &Component,
    scores: &ScoreIndex<'_>,
) -> Result<ComponentScore, ScoringError> {
    let total_weight = total_weight(criteria)?;

    let mut entries = BTreeMap::new();
    let mut weighted_sum = 0.0;
    let mut incomplete = false;

    for criterion in criteria {
        let entry = match scores.get(&component.id, &criterion.id) {
            Some(recorded) => CriterionEntry {
                score: recorded.score,
                rationale: recorded.rationale.clone().unwrap_or_default(),
                weight: criterion.weight,
                confidence: recorded.extraction_confidence,
                manually_adjusted: recorded.manually_adjusted,
                missing: false,
            },
            None => {
                incomplete = true;
                CriterionEntry {
                    score: MISSING_SCORE_POLICY.score,
                    rationale: MISSING_SCORE_POLICY.rationale.to_string(),
                    weight: criterion.weight,
                    confidence: None,
                    manually_adjusted: false,
                    missing: true,
                }
            }
        };
        weighted_sum += entry.score * entry.weight;
        entries.insert(criterion.name.clone(), entry);
    }

    Ok(ComponentScore {
        component: component.clone(),
        scores: entries,
        total_score: weighted_sum / total_weight,
        rank: 0,
        incomplete,
    })
}

/// Aggregate every component, stopping at the first failure.
pub fn aggregate_all(
    criteria: &[Criterion],
    components: &[Component],
    scores: &[CriterionScore],
) -> Result<Vec<ComponentScore>, ScoringError> {
    let index = ScoreIndex::new(scores);
    let results = components
        .iter()
        .map(|component| aggregate(criteria, component, &index))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        components = results.len(),
        criteria = criteria.len(),
        "aggregated component scores"
    );
    Ok(results)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Totals stay on the score scale whenever the inputs do.
        #[test]
        fn prop_total_within_score_range(
            cells in prop::collection::vec((1.0_f64..=10.0, prop::option::of(0.0_f64..=10.0)), 1..12)
        ) {
            let criteria: Vec<Criterion> = cells
                .iter()
                .enumerate()
                .map(|(i, (weight, _))| Criterion::new(format!("k{i}"), format!("K{i}"), *weight))
                .collect();
            let scores: Vec<CriterionScore> = cells
                .iter()
                .enumerate()
                .filter_map(|(i, (_, score))| score.map(|s| CriterionScore::new("c", format!("k{i}"), s)))
                .collect();
            let component = Component::new("c", "Acme", "X1");

            let result = aggregate(&criteria, &component, &ScoreIndex::new(&scores)).unwrap();
            prop_assert!(result.total_score >= 0.0);
            prop_assert!(result.total_score <= 10.0 + 1e-9);
        }
    }
}
