use serde::Serialize;
use tracing::debug;

use crate::scoring::{
    adjusted_weight, analyze, ComponentScore, Criterion, ScoringError, SensitivityResult,
    TieBreak,
};

/// Leaders for one criterion when its weight moves down and up.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TornadoRow {
    pub criterion: String,
    pub weight: f64,
    pub decreased_weight: f64,
    pub increased_weight: f64,
    /// Top components after lowering the weight
    pub decreased: Vec<SensitivityResult>,
    /// Top components after raising the weight
    pub increased: Vec<SensitivityResult>,
}

/// Top `top_n` components per criterion under `-delta` and `+delta`.
///
/// The sign of `delta` is ignored; both directions are always computed.
pub fn tornado_rows(
    criteria: &[Criterion],
    ranked: &[ComponentScore],
    delta: f64,
    top_n: usize,
    tie_break: TieBreak,
) -> Result<Vec<TornadoRow>, ScoringError> {
    let delta = delta.abs();

    let rows = criteria
        .iter()
        .map(|criterion| {
            let mut decreased = analyze(criteria, ranked, &criterion.name, -delta, tie_break)?;
            let mut increased = analyze(criteria, ranked, &criterion.name, delta, tie_break)?;
            decreased.truncate(top_n);
            increased.truncate(top_n);

            Ok(TornadoRow {
                criterion: criterion.name.clone(),
                weight: criterion.weight,
                decreased_weight: adjusted_weight(criterion.weight, -delta),
                increased_weight: adjusted_weight(criterion.weight, delta),
                decreased,
                increased,
            })
        })
        .collect::<Result<Vec<_>, ScoringError>>()?;

    debug!(criteria = rows.len(), delta, top_n, "built tornado rows");
    Ok(rows)
}
