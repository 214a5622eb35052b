use serde::{Deserialize, Serialize};

use crate::scoring::AnalysisConfig;

/// User-level settings shared by every study.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Analysis defaults; a study's own `analysis` section takes precedence
    #[serde(default)]
    pub analysis: Option<AnalysisConfig>,

    /// Force colored output on or off (default: on when stdout is a terminal)
    #[serde(default)]
    pub colors: Option<bool>,
}
