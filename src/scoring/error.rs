use thiserror::Error;

/// Failures raised while computing scores or rankings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// The weights of the study sum to zero, so no weighted average exists.
    #[error("total criterion weight is zero; at least one criterion needs a positive weight")]
    ZeroTotalWeight,

    /// Every weight is finite but their sum is not.
    #[error("total criterion weight overflows")]
    TotalWeightOverflow,

    #[error("criterion '{criterion}' has invalid weight {weight}")]
    InvalidWeight { criterion: String, weight: f64 },

    #[error("unknown criterion '{0}'")]
    UnknownCriterion(String),

    #[error("unknown component '{0}'")]
    UnknownComponent(String),
}
