use serde::{Deserialize, Serialize};

use crate::scoring::{AnalysisConfig, Component, Criterion, CriterionScore};

/// A trade study as stored on disk.
///
/// Example YAML:
/// ```yaml
/// name: LNA selection
/// criteria:
///   - { id: gain, name: Gain, weight: 5, unit: dB }
///   - { id: cost, name: Cost, weight: 3, higher_is_better: false }
/// components:
///   - { id: a, manufacturer: Acme, part_number: A-100 }
/// scores:
///   - { component_id: a, criterion_id: gain, score: 7, rationale: "22 dB typical" }
/// analysis:
///   delta: 2
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StudyFile {
    #[serde(default)]
    pub name: Option<String>,

    pub criteria: Vec<Criterion>,

    #[serde(default)]
    pub components: Vec<Component>,

    #[serde(default)]
    pub scores: Vec<CriterionScore>,

    /// Overrides the analysis section of the user config
    #[serde(default)]
    pub analysis: Option<AnalysisConfig>,
}
