use std::collections::HashSet;

use super::config::AnalysisConfig;
use super::types::{Component, Criterion, CriterionScore};

/// Lowest weight on the 1-10 scale.
pub const MIN_WEIGHT: f64 = 1.0;
/// Highest weight on the 1-10 scale.
pub const MAX_WEIGHT: f64 = 10.0;

/// Field names that bar and summary rows serialize next to the per-criterion
/// scores, so no criterion may use them as its name.
pub const RESERVED_CRITERION_NAMES: &[&str] = &[
    "name",
    "total",
    "rank",
    "manufacturer",
    "part_number",
    "total_score",
];

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Validate study records before they reach the engine.
/// Returns all validation errors at once (not just the first).
pub fn validate_study(
    criteria: &[Criterion],
    components: &[Component],
    scores: &[CriterionScore],
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if criteria.is_empty() {
        errors.push("criteria: at least one criterion is required".to_string());
    }

    let mut criterion_ids = HashSet::new();
    let mut criterion_names = HashSet::new();
    for (i, criterion) in criteria.iter().enumerate() {
        if criterion.id.trim().is_empty() {
            errors.push(format!("criteria[{}].id: must not be empty", i));
        } else if !criterion_ids.insert(criterion.id.as_str()) {
            errors.push(format!("criteria[{}].id: duplicate id '{}'", i, criterion.id));
        }

        if criterion.name.trim().is_empty() {
            errors.push(format!("criteria[{}].name: must not be empty", i));
        } else if RESERVED_CRITERION_NAMES.contains(&criterion.name.as_str()) {
            errors.push(format!(
                "criteria[{}].name: '{}' is reserved for export columns",
                i, criterion.name
            ));
        } else if !criterion_names.insert(criterion.name.as_str()) {
            errors.push(format!(
                "criteria[{}].name: duplicate name '{}'",
                i, criterion.name
            ));
        }

        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&criterion.weight) {
            errors.push(format!(
                "criteria[{}].weight: {} is outside {}-{}",
                i, criterion.weight, MIN_WEIGHT, MAX_WEIGHT
            ));
        }

        if let (Some(min), Some(max)) = (criterion.minimum_requirement, criterion.maximum_requirement) {
            if min > max {
                errors.push(format!(
                    "criteria[{}]: minimum_requirement {} exceeds maximum_requirement {}",
                    i, min, max
                ));
            }
        }
    }

    let mut component_ids = HashSet::new();
    for (i, component) in components.iter().enumerate() {
        if component.id.trim().is_empty() {
            errors.push(format!("components[{}].id: must not be empty", i));
        } else if !component_ids.insert(component.id.as_str()) {
            errors.push(format!(
                "components[{}].id: duplicate id '{}'",
                i, component.id
            ));
        }
        if component.part_number.trim().is_empty() {
            errors.push(format!("components[{}].part_number: must not be empty", i));
        }
    }

    let mut pairs = HashSet::new();
    for (i, score) in scores.iter().enumerate() {
        if !component_ids.contains(score.component_id.as_str()) {
            errors.push(format!(
                "scores[{}].component_id: unknown component '{}'",
                i, score.component_id
            ));
        }
        if !criterion_ids.contains(score.criterion_id.as_str()) {
            errors.push(format!(
                "scores[{}].criterion_id: unknown criterion '{}'",
                i, score.criterion_id
            ));
        }
        if !pairs.insert((score.component_id.as_str(), score.criterion_id.as_str())) {
            errors.push(format!(
                "scores[{}]: duplicate score for component '{}' on criterion '{}'",
                i, score.component_id, score.criterion_id
            ));
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&score.score) {
            errors.push(format!(
                "scores[{}].score: {} is outside {}-{}",
                i, score.score, MIN_SCORE, MAX_SCORE
            ));
        }
        if let Some(confidence) = score.extraction_confidence {
            if !(0.0..=1.0).contains(&confidence) {
                errors.push(format!(
                    "scores[{}].extraction_confidence: {} is outside 0-1",
                    i, confidence
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate analysis settings.
/// Returns all validation errors at once (not just the first).
pub fn validate_analysis(config: &AnalysisConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(delta) = config.delta {
        if !delta.is_finite() {
            errors.push("analysis.delta: must be a finite number".to_string());
        } else if delta.abs() > MAX_WEIGHT - MIN_WEIGHT {
            errors.push(format!(
                "analysis.delta: {} exceeds the weight range ({})",
                delta,
                MAX_WEIGHT - MIN_WEIGHT
            ));
        }
    }

    if config.top_n == Some(0) {
        errors.push("analysis.top_n: must be at least 1".to_string());
    }

    if let Some(threshold) = config.low_confidence_threshold {
        if !(0.0..=1.0).contains(&threshold) {
            errors.push(format!(
                "analysis.low_confidence_threshold: {} is outside 0-1",
                threshold
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
