use serde::{Deserialize, Serialize};

/// Default weight perturbation for sensitivity analysis (1-10 scale).
pub const DEFAULT_DELTA: f64 = 2.0;

/// Default number of components shown per tornado bar.
pub const DEFAULT_TOP_N: usize = 3;

pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Rule for ordering components whose totals are equal.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Part number ascending, then manufacturer, then component id
    #[default]
    PartNumber,
    /// Keep the order components were supplied in
    InputOrder,
}

/// Analysis settings.
///
/// Every field is optional so a study file can override only part of the
/// user config.
///
/// Example YAML:
/// ```yaml
/// analysis:
///   delta: 2
///   top_n: 3
///   tie_break: part_number
///   low_confidence_threshold: 0.5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Weight change applied in both directions for sensitivity/tornado views
    #[serde(default)]
    pub delta: Option<f64>,

    /// Components listed per direction in tornado rows
    #[serde(default)]
    pub top_n: Option<usize>,

    #[serde(default)]
    pub tie_break: Option<TieBreak>,

    /// Extraction confidence below this is reported as low confidence
    #[serde(default)]
    pub low_confidence_threshold: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delta: Some(DEFAULT_DELTA),
            top_n: Some(DEFAULT_TOP_N),
            tie_break: Some(TieBreak::default()),
            low_confidence_threshold: Some(DEFAULT_LOW_CONFIDENCE_THRESHOLD),
        }
    }
}

impl AnalysisConfig {
    /// Fill unset fields from `fallback`.
    pub fn merged_over(&self, fallback: &AnalysisConfig) -> AnalysisConfig {
        AnalysisConfig {
            delta: self.delta.or(fallback.delta),
            top_n: self.top_n.or(fallback.top_n),
            tie_break: self.tie_break.or(fallback.tie_break),
            low_confidence_threshold: self
                .low_confidence_threshold
                .or(fallback.low_confidence_threshold),
        }
    }

    pub fn delta(&self) -> f64 {
        self.delta.unwrap_or(DEFAULT_DELTA)
    }

    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break.unwrap_or_default()
    }

    pub fn low_confidence_threshold(&self) -> f64 {
        self.low_confidence_threshold
            .unwrap_or(DEFAULT_LOW_CONFIDENCE_THRESHOLD)
    }
}
