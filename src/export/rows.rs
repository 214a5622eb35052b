use serde::Serialize;
use std::collections::BTreeMap;

use crate::scoring::{ComponentScore, Criterion};

/// One line of the summary sheet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryRow {
    pub rank: usize,
    pub manufacturer: String,
    pub part_number: String,
    #[serde(flatten)]
    pub scores: BTreeMap<String, f64>,
    pub total_score: f64,
}

/// One (component, criterion) line of the detailed scores sheet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailedRow {
    pub rank: usize,
    pub manufacturer: String,
    pub part_number: String,
    pub criterion: String,
    pub score: f64,
    pub weight: f64,
    pub rationale: String,
}

/// One line of the criteria sheet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CriteriaRow {
    pub name: String,
    pub weight: f64,
}

/// Header-plus-records form of any sheet, ready for a delimited writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

pub fn summary_rows(ranked: &[ComponentScore]) -> Vec<SummaryRow> {
    ranked
        .iter()
        .map(|component| SummaryRow {
            rank: component.rank,
            manufacturer: component.component.manufacturer.clone(),
            part_number: component.component.part_number.clone(),
            scores: component
                .scores
                .iter()
                .map(|(name, entry)| (name.clone(), entry.score))
                .collect(),
            total_score: component.total_score,
        })
        .collect()
}

/// Detailed rows, grouped by component in ranked order and by criterion in
/// study order within each component.
pub fn detailed_rows(criteria: &[Criterion], ranked: &[ComponentScore]) -> Vec<DetailedRow> {
    ranked
        .iter()
        .flat_map(|component| {
            criteria.iter().filter_map(move |criterion| {
                component
                    .scores
                    .get(&criterion.name)
                    .map(|entry| DetailedRow {
                        rank: component.rank,
                        manufacturer: component.component.manufacturer.clone(),
                        part_number: component.component.part_number.clone(),
                        criterion: criterion.name.clone(),
                        score: entry.score,
                        weight: entry.weight,
                        rationale: entry.rationale.clone(),
                    })
            })
        })
        .collect()
}

pub fn criteria_rows(criteria: &[Criterion]) -> Vec<CriteriaRow> {
    criteria
        .iter()
        .map(|criterion| CriteriaRow {
            name: criterion.name.clone(),
            weight: criterion.weight,
        })
        .collect()
}

/// Summary sheet: Rank, Manufacturer, Part Number, one column per criterion
/// (study order), Total Score.
pub fn summary_table(criteria: &[Criterion], rows: &[SummaryRow]) -> Table {
    let headers = ["Rank", "Manufacturer", "Part Number"]
        .into_iter()
        .map(String::from)
        .chain(criteria.iter().map(|c| c.name.clone()))
        .chain(std::iter::once("Total Score".to_string()))
        .collect();

    let records = rows
        .iter()
        .map(|row| {
            let mut record = vec![
                row.rank.to_string(),
                row.manufacturer.clone(),
                row.part_number.clone(),
            ];
            record.extend(criteria.iter().map(|c| {
                row.scores
                    .get(&c.name)
                    .map(|s| format_number(*s))
                    .unwrap_or_default()
            }));
            record.push(format!("{:.2}", row.total_score));
            record
        })
        .collect();

    Table { headers, records }
}

pub fn detailed_table(rows: &[DetailedRow]) -> Table {
    let headers = [
        "Rank",
        "Manufacturer",
        "Part Number",
        "Criterion",
        "Score",
        "Weight",
        "Rationale",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let records = rows
        .iter()
        .map(|row| {
            vec![
                row.rank.to_string(),
                row.manufacturer.clone(),
                row.part_number.clone(),
                row.criterion.clone(),
                format_number(row.score),
                format_number(row.weight),
                row.rationale.clone(),
            ]
        })
        .collect();

    Table { headers, records }
}

pub fn criteria_table(rows: &[CriteriaRow]) -> Table {
    Table {
        headers: vec!["Criterion".to_string(), "Weight".to_string()],
        records: rows
            .iter()
            .map(|row| vec![row.name.clone(), format_number(row.weight)])
            .collect(),
    }
}

/// Whole numbers print without decimals, others with up to two.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let formatted = format!("{:.2}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{aggregate_all, rank, Component, CriterionScore, TieBreak};

    fn study() -> (Vec<Criterion>, Vec<ComponentScore>) {
        let criteria = vec![
            Criterion::new("gain", "Gain", 5.0),
            Criterion::new("cost", "Cost", 3.0),
            Criterion::new("size", "Size", 2.0),
        ];
        let components = vec![
            Component::new("c", "Core", "C-300"),
            Component::new("a", "Acme", "A-100"),
        ];
        let scores = vec![
            CriterionScore::new("a", "gain", 7.0).with_rationale("22 dB"),
            CriterionScore::new("a", "cost", 8.0),
            CriterionScore::new("a", "size", 9.0),
            CriterionScore::new("c", "gain", 6.0),
            CriterionScore::new("c", "cost", 10.0),
        ];
        let aggregated = aggregate_all(&criteria, &components, &scores).unwrap();
        (criteria, rank(&aggregated, TieBreak::PartNumber))
    }

    #[test]
    fn test_summary_rows() {
        let (_, ranked) = study();
        let rows = summary_rows(&ranked);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].manufacturer, "Acme");
        assert_eq!(rows[0].part_number, "A-100");
        assert_eq!(rows[0].scores["Size"], 9.0);
        assert!((rows[0].total_score - 7.7).abs() < 1e-12);
        // Missing Size for C exports as zero
        assert_eq!(rows[1].scores["Size"], 0.0);
    }

    #[test]
    fn test_detailed_rows_follow_criteria_order() {
        let (criteria, ranked) = study();
        let rows = detailed_rows(&criteria, &ranked);

        assert_eq!(rows.len(), 6);
        let first: Vec<_> = rows[..3].iter().map(|r| r.criterion.as_str()).collect();
        assert_eq!(first, vec!["Gain", "Cost", "Size"]);
        assert_eq!(rows[0].rationale, "22 dB");
        assert_eq!(rows[0].weight, 5.0);
        assert_eq!(rows[5].part_number, "C-300");
        assert_eq!(rows[5].rationale, "No score available");
    }

    #[test]
    fn test_criteria_rows() {
        let (criteria, _) = study();
        let rows = criteria_rows(&criteria);
        assert_eq!(
            rows,
            vec![
                CriteriaRow { name: "Gain".to_string(), weight: 5.0 },
                CriteriaRow { name: "Cost".to_string(), weight: 3.0 },
                CriteriaRow { name: "Size".to_string(), weight: 2.0 },
            ]
        );
    }

    #[test]
    fn test_summary_table_columns() {
        let (criteria, ranked) = study();
        let table = summary_table(&criteria, &summary_rows(&ranked));

        assert_eq!(
            table.headers,
            vec!["Rank", "Manufacturer", "Part Number", "Gain", "Cost", "Size", "Total Score"]
        );
        assert_eq!(
            table.records[0],
            vec!["1", "Acme", "A-100", "7", "8", "9", "7.70"]
        );
        // (30 + 30) / 10
        assert_eq!(table.records[1][6], "6.00");
    }

    #[test]
    fn test_detailed_table() {
        let (criteria, ranked) = study();
        let table = detailed_table(&detailed_rows(&criteria, &ranked));
        assert_eq!(table.headers.len(), 7);
        assert_eq!(table.records[0], vec!["1", "Acme", "A-100", "Gain", "7", "5", "22 dB"]);
    }

    #[test]
    fn test_criteria_table() {
        let rows = vec![CriteriaRow { name: "Gain".to_string(), weight: 2.5 }];
        let table = criteria_table(&rows);
        assert_eq!(table.headers, vec!["Criterion", "Weight"]);
        assert_eq!(table.records, vec![vec!["Gain".to_string(), "2.5".to_string()]]);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(7.5), "7.5");
        assert_eq!(format_number(7.25), "7.25");
        assert_eq!(format_number(7.333), "7.33");
        assert_eq!(format_number(7.999), "8");
    }
}
