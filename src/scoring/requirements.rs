use serde::Serialize;
use tracing::warn;

use super::types::{Criterion, CriterionScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Minimum,
    Maximum,
}

/// A measured value that falls outside a criterion's hard limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementViolation {
    pub component_id: String,
    pub criterion: String,
    pub raw_value: f64,
    pub bound: Bound,
    pub limit: f64,
}

/// Compare every score's raw value against its criterion's requirements.
///
/// Scores without a raw value, or for criteria without limits, are skipped.
pub fn check_requirements(
    criteria: &[Criterion],
    scores: &[CriterionScore],
) -> Vec<RequirementViolation> {
    let mut violations = Vec::new();

    for score in scores {
        let Some(raw_value) = score.raw_value else {
            continue;
        };
        let Some(criterion) = criteria.iter().find(|c| c.id == score.criterion_id) else {
            continue;
        };

        let mut push = |bound, limit| {
            violations.push(RequirementViolation {
                component_id: score.component_id.clone(),
                criterion: criterion.name.clone(),
                raw_value,
                bound,
                limit,
            })
        };
        if let Some(min) = criterion.minimum_requirement {
            if raw_value < min {
                push(Bound::Minimum, min);
            }
        }
        if let Some(max) = criterion.maximum_requirement {
            if raw_value > max {
                push(Bound::Maximum, max);
            }
        }
    }

    violations
}

/// Scores whose extraction confidence is below `threshold`.
/// Manually adjusted scores are trusted regardless of confidence.
pub fn low_confidence_scores(scores: &[CriterionScore], threshold: f64) -> Vec<&CriterionScore> {
    let flagged: Vec<&CriterionScore> = scores
        .iter()
        .filter(|s| !s.manually_adjusted)
        .filter(|s| s.extraction_confidence.is_some_and(|c| c < threshold))
        .collect();

    for score in &flagged {
        warn!(
            component = %score.component_id,
            criterion = %score.criterion_id,
            confidence = ?score.extraction_confidence,
            "low confidence score"
        );
    }
    flagged
}
