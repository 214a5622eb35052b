use serde::Serialize;
use std::collections::BTreeMap;

use crate::scoring::{find_component, ComponentScore, Criterion, ScoringError, MAX_SCORE};

/// Outer ring of the radar chart.
pub const FULL_MARK: f64 = MAX_SCORE;

/// Wide row for grouped bar charts: `{name, <criterion>: score, ..., total}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BarRow {
    pub name: String,
    #[serde(flatten)]
    pub scores: BTreeMap<String, f64>,
    pub total: f64,
}

/// One spoke of a radar chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RadarRow {
    pub criterion: String,
    pub value: f64,
    pub full_mark: f64,
}

/// One bar row per component, in ranked order.
pub fn bar_rows(ranked: &[ComponentScore]) -> Vec<BarRow> {
    ranked
        .iter()
        .map(|component| BarRow {
            name: component.label(),
            scores: component
                .scores
                .iter()
                .map(|(criterion, entry)| (criterion.clone(), entry.score))
                .collect(),
            total: component.total_score,
        })
        .collect()
}

/// Radar profile of one component, one row per criterion in study order.
///
/// The first row is an unnamed zero-value anchor that pins the chart's origin.
pub fn radar_rows(criteria: &[Criterion], component: &ComponentScore) -> Vec<RadarRow> {
    let anchor = RadarRow {
        criterion: String::new(),
        value: 0.0,
        full_mark: FULL_MARK,
    };

    std::iter::once(anchor)
        .chain(criteria.iter().map(|criterion| RadarRow {
            criterion: criterion.name.clone(),
            value: component.score_for(&criterion.name).unwrap_or(0.0),
            full_mark: FULL_MARK,
        }))
        .collect()
}

/// [`radar_rows`] for the ranked component with the given id.
pub fn radar_rows_for(
    criteria: &[Criterion],
    ranked: &[ComponentScore],
    component_id: &str,
) -> Result<Vec<RadarRow>, ScoringError> {
    let component = find_component(ranked, component_id)?;
    Ok(radar_rows(criteria, component))
}
