use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A weighted evaluation dimension of a study.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Criterion {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Relative importance, 1-10 scale
    pub weight: f64,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default = "default_higher_is_better")]
    pub higher_is_better: bool,

    /// Raw values below this fail the requirement check
    #[serde(default)]
    pub minimum_requirement: Option<f64>,

    /// Raw values above this fail the requirement check
    #[serde(default)]
    pub maximum_requirement: Option<f64>,
}

fn default_higher_is_better() -> bool {
    true
}

impl Criterion {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            weight,
            unit: None,
            higher_is_better: true,
            minimum_requirement: None,
            maximum_requirement: None,
        }
    }
}

/// A candidate under evaluation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Component {
    pub id: String,
    pub manufacturer: String,
    pub part_number: String,
}

impl Component {
    pub fn new(
        id: impl Into<String>,
        manufacturer: impl Into<String>,
        part_number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            manufacturer: manufacturer.into(),
            part_number: part_number.into(),
        }
    }

    /// Display label: "Manufacturer PartNumber"
    pub fn label(&self) -> String {
        format!("{} {}", self.manufacturer, self.part_number)
    }
}

/// Score of one component on one criterion, either extracted or entered by hand.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CriterionScore {
    pub component_id: String,
    pub criterion_id: String,

    /// 0-10 scale
    pub score: f64,

    #[serde(default)]
    pub rationale: Option<String>,

    /// Confidence reported by the extraction step (0-1)
    #[serde(default)]
    pub extraction_confidence: Option<f64>,

    /// Measured value in the criterion's unit
    #[serde(default)]
    pub raw_value: Option<f64>,

    #[serde(default)]
    pub manually_adjusted: bool,

    #[serde(default)]
    pub adjusted_by: Option<String>,

    #[serde(default)]
    pub adjusted_at: Option<DateTime<Utc>>,
}

impl CriterionScore {
    pub fn new(
        component_id: impl Into<String>,
        criterion_id: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            component_id: component_id.into(),
            criterion_id: criterion_id.into(),
            score,
            rationale: None,
            extraction_confidence: None,
            raw_value: None,
            manually_adjusted: false,
            adjusted_by: None,
            adjusted_at: None,
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    /// Returns a copy carrying a human override. The extraction confidence
    /// no longer applies once a person has set the score.
    pub fn with_override(
        &self,
        score: f64,
        rationale: impl Into<String>,
        adjusted_by: impl Into<String>,
        adjusted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            score,
            rationale: Some(rationale.into()),
            extraction_confidence: None,
            manually_adjusted: true,
            adjusted_by: Some(adjusted_by.into()),
            adjusted_at: Some(adjusted_at),
            ..self.clone()
        }
    }
}

/// Per-criterion cell of a [`ComponentScore`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CriterionEntry {
    pub score: f64,
    pub rationale: String,
    pub weight: f64,
    pub confidence: Option<f64>,
    pub manually_adjusted: bool,
    /// True when the score came from the missing-score policy
    pub missing: bool,
}

impl CriterionEntry {
    /// Share of the total score contributed by this criterion
    pub fn contribution(&self, total_weight: f64) -> f64 {
        if total_weight == 0.0 {
            0.0
        } else {
            self.score * self.weight / total_weight
        }
    }
}

/// Aggregated result for one component. Built fresh by every aggregation
/// pass and never updated in place.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComponentScore {
    pub component: Component,
    /// Keyed by criterion name
    pub scores: BTreeMap<String, CriterionEntry>,
    pub total_score: f64,
    /// 1-based; 0 until ranked
    pub rank: usize,
    /// At least one criterion had no recorded score
    pub incomplete: bool,
}

impl ComponentScore {
    pub fn label(&self) -> String {
        self.component.label()
    }

    pub fn score_for(&self, criterion_name: &str) -> Option<f64> {
        self.scores.get(criterion_name).map(|e| e.score)
    }
}

/// One component's position under a hypothetical weight change.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SensitivityResult {
    pub component_id: String,
    pub label: String,
    pub adjusted_score: f64,
}
