use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::chart::{RadarRow, TornadoRow};
use crate::scoring::{ComponentScore, Criterion, RequirementViolation, SensitivityResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals.
/// If incomplete is true, appends asterisk to indicate missing criterion scores
pub fn format_score(score: f64, incomplete: bool) -> String {
    if incomplete {
        format!("{:.2}*", score)
    } else {
        format!("{:.2}", score)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fit `text` into what is left of the terminal after `fixed_width` columns.
fn fit(text: &str, fixed_width: usize) -> String {
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => truncate(text, width - fixed_width),
        // Very narrow terminal, show truncated
        Some(_) => truncate(text, 20),
        // No terminal (pipe), don't truncate
        None => text.to_string(),
    }
}

/// Format ranked components as a table with columns: Rank, Score, Label
/// Rank column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned, 6 chars wide (fits "10.00*")
pub fn format_ranked_table(ranked: &[ComponentScore], use_colors: bool) -> String {
    if ranked.is_empty() {
        return "No components found.".to_string();
    }

    let index_width = 3;
    let score_width = 6;
    let separator = "  ";
    let fixed_width = index_width + 1 + score_width + separator.len();

    ranked
        .iter()
        .map(|scored| {
            let index_str = format!("{:>2}.", scored.rank);
            let score_str = format_score(scored.total_score, scored.incomplete);
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let label = fit(&scored.label(), fixed_width);

            if use_colors {
                format!(
                    "{} {}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    label
                )
            } else {
                format!("{} {}{}{}", index_str, score_padded, separator, label)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-criterion breakdown of one component (for `show` and verbose mode)
pub fn format_component_detail(
    scored: &ComponentScore,
    criteria: &[Criterion],
    use_colors: bool,
) -> String {
    let total_weight: f64 = criteria.iter().map(|c| c.weight).sum();
    let header = format!(
        "#{} {}  total {}",
        scored.rank,
        scored.label(),
        format_score(scored.total_score, scored.incomplete)
    );

    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for criterion in criteria {
        let Some(entry) = scored.scores.get(&criterion.name) else {
            continue;
        };
        let mut flags = Vec::new();
        if entry.missing {
            flags.push("missing".to_string());
        }
        if entry.manually_adjusted {
            flags.push("manual".to_string());
        }
        if let Some(confidence) = entry.confidence {
            flags.push(format!("conf {:.0}%", confidence * 100.0));
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        let line = format!(
            "  {}: {:.1} x{} -> {:.2}{}",
            criterion.name,
            entry.score,
            entry.weight,
            entry.contribution(total_weight),
            flags
        );
        lines.push(if use_colors && entry.missing {
            line.red().to_string()
        } else {
            line
        });
        if !entry.rationale.is_empty() && !entry.missing {
            lines.push(format!("      {}", entry.rationale));
        }
    }

    lines.join("\n")
}

/// What-if ranking for one weight change
pub fn format_sensitivity(
    criterion: &str,
    from_weight: f64,
    to_weight: f64,
    results: &[SensitivityResult],
    use_colors: bool,
) -> String {
    let header = format!("{}: weight {} -> {}", criterion, from_weight, to_weight);
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    if results.is_empty() {
        return format!("{}\nNo components found.", header);
    }

    let body = results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            format!(
                "{:>2}. {:>6.2}  {}",
                i + 1,
                result.adjusted_score,
                fit(&result.label, 12)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", header, body)
}

fn format_leaders(results: &[SensitivityResult]) -> String {
    results
        .iter()
        .map(|r| format!("{} ({:.2})", r.label, r.adjusted_score))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tornado rows: leaders per criterion when its weight drops and rises
pub fn format_tornado(rows: &[TornadoRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No criteria found.".to_string();
    }

    rows.iter()
        .map(|row| {
            let title = format!("{} (weight {})", row.criterion, row.weight);
            let down = format!("  - w={}: {}", row.decreased_weight, format_leaders(&row.decreased));
            let up = format!("  + w={}: {}", row.increased_weight, format_leaders(&row.increased));
            if use_colors {
                format!("{}\n{}\n{}", title.bold(), down.red(), up.green())
            } else {
                format!("{}\n{}\n{}", title, down, up)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Radar rows as a simple bar profile (anchor row skipped)
pub fn format_radar(rows: &[RadarRow]) -> String {
    let name_width = rows.iter().map(|r| r.criterion.chars().count()).max().unwrap_or(0);
    rows.iter()
        .filter(|r| !r.criterion.is_empty())
        .map(|r| {
            let filled = (r.value.clamp(0.0, r.full_mark) / r.full_mark * 20.0).round() as usize;
            format!(
                "{:<width$}  {:<20}  {:.1}/{}",
                r.criterion,
                "#".repeat(filled),
                r.value,
                r.full_mark,
                width = name_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per requirement violation
pub fn format_violations(violations: &[RequirementViolation], use_colors: bool) -> String {
    violations
        .iter()
        .map(|v| {
            let line = format!(
                "{}: {} = {} violates {:?} {}",
                v.component_id, v.criterion, v.raw_value, v.bound, v.limit
            );
            if use_colors {
                line.yellow().to_string()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::radar_rows;
    use crate::scoring::{aggregate_all, rank, Bound, Component, CriterionScore, TieBreak};

    fn study() -> (Vec<Criterion>, Vec<ComponentScore>) {
        let criteria = vec![
            Criterion::new("gain", "Gain", 5.0),
            Criterion::new("cost", "Cost", 3.0),
            Criterion::new("size", "Size", 2.0),
        ];
        let components = vec![
            Component::new("a", "Acme", "A-100"),
            Component::new("b", "Beta", "B-200"),
        ];
        let scores = vec![
            CriterionScore::new("a", "gain", 7.0).with_rationale("22 dB typical"),
            CriterionScore::new("a", "cost", 8.0),
            CriterionScore::new("a", "size", 9.0),
            CriterionScore {
                manually_adjusted: true,
                ..CriterionScore::new("b", "gain", 9.0)
            },
            CriterionScore {
                extraction_confidence: Some(0.42),
                ..CriterionScore::new("b", "cost", 6.0)
            },
        ];
        let aggregated = aggregate_all(&criteria, &components, &scores).unwrap();
        (criteria, rank(&aggregated, TieBreak::PartNumber))
    }

    // format_score tests
    #[test]
    fn test_format_score() {
        assert_eq!(format_score(7.7, false), "7.70");
        assert_eq!(format_score(0.0, false), "0.00");
        assert_eq!(format_score(10.0, false), "10.00");
    }

    #[test]
    fn test_format_score_with_incomplete() {
        assert_eq!(format_score(6.3, true), "6.30*");
    }

    // truncate tests
    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("Short label", 20), "Short label");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("Analog Devices ADL5611ARKZ", 15), "Analog Devi...");
    }

    #[test]
    fn test_truncate_very_narrow() {
        assert_eq!(truncate("Hello world", 3), "Hel");
    }

    // format_ranked_table tests
    #[test]
    fn test_format_ranked_table_empty() {
        assert_eq!(format_ranked_table(&[], false), "No components found.");
    }

    #[test]
    fn test_format_ranked_table() {
        let (_, ranked) = study();
        let result = format_ranked_table(&ranked, false);
        let lines: Vec<&str> = result.lines().collect();

        assert_eq!(lines.len(), 2);
        // A: 7.7; B: (45 + 18) / 10 = 6.3 with Size missing
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("7.70"));
        assert!(lines[0].contains("Acme A-100"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].contains("6.30*"));
    }

    #[test]
    fn test_format_component_detail() {
        let (criteria, ranked) = study();
        let detail = format_component_detail(&ranked[1], &criteria, false);

        assert!(detail.starts_with("#2 Beta B-200  total 6.30*"));
        assert!(detail.contains("Gain: 9.0 x5 -> 4.50 [manual]"));
        assert!(detail.contains("Cost: 6.0 x3 -> 1.80 [conf 42%]"));
        assert!(detail.contains("Size: 0.0 x2 -> 0.00 [missing]"));
        assert!(!detail.contains("No score available"));
    }

    #[test]
    fn test_format_component_detail_rationale() {
        let (criteria, ranked) = study();
        let detail = format_component_detail(&ranked[0], &criteria, false);
        assert!(detail.contains("\n      22 dB typical"));
    }

    #[test]
    fn test_format_sensitivity() {
        let results = vec![
            SensitivityResult {
                component_id: "b".to_string(),
                label: "Beta B-200".to_string(),
                adjusted_score: 7.9166,
            },
            SensitivityResult {
                component_id: "a".to_string(),
                label: "Acme A-100".to_string(),
                adjusted_score: 7.5833,
            },
        ];
        let output = format_sensitivity("Gain", 5.0, 7.0, &results, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Gain: weight 5 -> 7");
        assert_eq!(lines[1], " 1.   7.92  Beta B-200");
        assert_eq!(lines[2], " 2.   7.58  Acme A-100");
    }

    #[test]
    fn test_format_sensitivity_empty() {
        let output = format_sensitivity("Gain", 5.0, 7.0, &[], false);
        assert!(output.ends_with("No components found."));
    }

    #[test]
    fn test_format_tornado() {
        let rows = vec![TornadoRow {
            criterion: "Gain".to_string(),
            weight: 5.0,
            decreased_weight: 3.0,
            increased_weight: 7.0,
            decreased: vec![SensitivityResult {
                component_id: "c".to_string(),
                label: "Core C-300".to_string(),
                adjusted_score: 8.0,
            }],
            increased: vec![SensitivityResult {
                component_id: "b".to_string(),
                label: "Beta B-200".to_string(),
                adjusted_score: 7.9166,
            }],
        }];
        let output = format_tornado(&rows, false);
        assert_eq!(
            output,
            "Gain (weight 5)\n  - w=3: Core C-300 (8.00)\n  + w=7: Beta B-200 (7.92)"
        );
        assert_eq!(format_tornado(&[], false), "No criteria found.");
    }

    #[test]
    fn test_format_radar_skips_anchor() {
        let (criteria, ranked) = study();
        let output = format_radar(&radar_rows(&criteria, &ranked[0]));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Gain"));
        assert!(lines[0].contains(&"#".repeat(14)));
        assert!(lines[0].ends_with("7.0/10"));
    }

    #[test]
    fn test_format_violations() {
        let violations = vec![RequirementViolation {
            component_id: "a".to_string(),
            criterion: "Noise Figure".to_string(),
            raw_value: 3.4,
            bound: Bound::Maximum,
            limit: 3.0,
        }];
        assert_eq!(
            format_violations(&violations, false),
            "a: Noise Figure = 3.4 violates Maximum 3"
        );
    }
}
