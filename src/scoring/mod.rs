pub mod aggregate;
pub mod config;
pub mod error;
pub mod rank;
pub mod requirements;
pub mod sensitivity;
pub mod types;
pub mod validation;

pub use aggregate::{aggregate, aggregate_all, total_weight, ScoreIndex, MISSING_SCORE_POLICY};
pub use config::*;
pub use error::ScoringError;
pub use rank::{find_component, rank};
pub use requirements::{check_requirements, low_confidence_scores, Bound, RequirementViolation};
pub use sensitivity::{adjusted_weight, analyze};
pub use types::*;
pub use validation::{
    validate_analysis, validate_study, MAX_SCORE, MAX_WEIGHT, MIN_SCORE, MIN_WEIGHT,
    RESERVED_CRITERION_NAMES,
};
