use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use trade_study::scoring::{AnalysisConfig, ComponentScore, ScoringError};
use trade_study::study::{StudyFile, DEFAULT_STUDY_FILE};
use trade_study::{chart, config, export, output, scoring, study};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_STUDY: i32 = 1;
const EXIT_ANALYSIS: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Sheet {
    /// One row per component with every criterion score and the total
    Summary,
    /// One row per (component, criterion) with weight and rationale
    Detailed,
    /// Criterion names and weights
    Criteria,
    /// Flat CSV of the summary sheet
    Csv,
    /// Grouped-bar chart rows (JSON)
    Chart,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List components sorted by total score (default if no subcommand)
    Rank,
    /// Show the per-criterion breakdown of a ranked component
    Show {
        /// Rank of the component (1-based, as shown in rank)
        index: usize,
    },
    /// Re-rank after changing one criterion's weight
    Sensitivity {
        /// Criterion name
        criterion: String,
        /// Weight change (defaults to the configured delta)
        #[arg(short, long, allow_hyphen_values = true)]
        delta: Option<f64>,
    },
    /// Top components per criterion under a weight decrease and increase
    Tornado {
        #[arg(short, long)]
        delta: Option<f64>,
        /// Components listed per direction
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Radar profile of a ranked component
    Profile {
        /// Rank of the component (1-based, as shown in rank)
        index: usize,
    },
    /// Export ranked results
    Export {
        #[arg(value_enum)]
        sheet: Sheet,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit JSON rows instead of delimited text
        #[arg(long)]
        json: bool,
    },
    /// Check the study file and report every problem found
    Validate,
    /// Create a study file interactively
    Init {
        /// Where to write the study (defaults to --study or ./study.yaml)
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "trade-study")]
#[command(about = "Rank components against weighted criteria", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/trade-study/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the study file
    #[arg(short, long, global = true, default_value = DEFAULT_STUDY_FILE)]
    study: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with(code: i32, message: &str, err: &dyn std::fmt::Display) -> ! {
    error!(error = %err, "{}", message);
    eprintln!("{}: {}", message, err);
    std::process::exit(code);
}

/// Map a 1-based index from the rank listing to a component.
fn component_at(ranked: &[ComponentScore], index: usize) -> &ComponentScore {
    if index < 1 || index > ranked.len() {
        eprintln!(
            "Invalid index {}. Must be between 1 and {}.",
            index,
            ranked.len()
        );
        std::process::exit(EXIT_ANALYSIS);
    }
    &ranked[index - 1]
}

fn emit(text: &str, path: Option<&PathBuf>) {
    match path {
        Some(path) => {
            if let Err(e) = export::write_export(path, text) {
                exit_with(EXIT_STUDY, "Export failed", &format!("{:#}", e));
            }
            debug!(path = %path.display(), "export written");
        }
        None => println!("{}", text),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| exit_with(EXIT_ANALYSIS, "Failed to serialize rows", &e))
}

fn rendered(result: anyhow::Result<String>) -> String {
    result.unwrap_or_else(|e| exit_with(EXIT_STUDY, "Export failed", &format!("{:#}", e)))
}

fn or_analysis_error<T>(result: Result<T, ScoringError>) -> T {
    result.unwrap_or_else(|e| exit_with(EXIT_ANALYSIS, "Analysis error", &e))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Rank);
    let start_time = Instant::now();

    if let Commands::Init { path } = &command {
        let path = path.clone().unwrap_or_else(|| cli.study.clone());
        if let Err(e) = config::init::run_init_wizard(&path) {
            exit_with(EXIT_STUDY, "Init failed", &format!("{:#}", e));
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let user_config = match config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, "Config error", &format!("{:#}", e)),
    };

    // Load and validate the study
    let study: StudyFile = match study::load_study(&cli.study) {
        Ok(s) => s,
        Err(e) => exit_with(EXIT_STUDY, "Study error", &format!("{:#}", e)),
    };
    if let Err(errors) = study.validate() {
        eprintln!("Study errors in {}:", cli.study.display());
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_STUDY);
    }

    // Command-line flags win over the study and user config
    let (delta, top_n) = match &command {
        Commands::Sensitivity { delta, .. } => (*delta, None),
        Commands::Tornado { delta, top } => (*delta, *top),
        _ => (None, None),
    };
    let overrides = AnalysisConfig {
        delta,
        top_n,
        tie_break: None,
        low_confidence_threshold: None,
    };
    let analysis =
        match config::resolve_analysis(&user_config, study.analysis.as_ref(), &overrides) {
            Ok(a) => a,
            Err(errors) => {
                eprintln!("Analysis config errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }
        };

    let use_colors = user_config
        .colors
        .unwrap_or_else(output::should_use_colors);
    let tie_break = analysis.tie_break();

    let ranked = or_analysis_error(study.ranked(tie_break));
    let low_confidence =
        scoring::low_confidence_scores(&study.scores, analysis.low_confidence_threshold());
    let violations = scoring::check_requirements(&study.criteria, &study.scores);

    match command {
        Commands::Rank => {
            println!("{}", output::format_ranked_table(&ranked, use_colors));

            if cli.verbose {
                for scored in &ranked {
                    eprintln!();
                    eprintln!(
                        "{}",
                        output::format_component_detail(scored, &study.criteria, use_colors)
                    );
                }
                if !violations.is_empty() {
                    eprintln!();
                    eprintln!("{}", output::format_violations(&violations, use_colors));
                }
                eprintln!();
                eprintln!(
                    "Total: {} components in {:?}",
                    ranked.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Show { index } => {
            let scored = component_at(&ranked, index);
            println!(
                "{}",
                output::format_component_detail(scored, &study.criteria, use_colors)
            );
        }
        Commands::Sensitivity { criterion, .. } => {
            let delta = analysis.delta();
            let results = or_analysis_error(scoring::analyze(
                &study.criteria,
                &ranked,
                &criterion,
                delta,
                tie_break,
            ));
            // analyze succeeded, so the criterion exists
            let from_weight = study
                .criteria
                .iter()
                .find(|c| c.name == criterion)
                .map(|c| c.weight)
                .unwrap_or_default();
            println!(
                "{}",
                output::format_sensitivity(
                    &criterion,
                    from_weight,
                    scoring::adjusted_weight(from_weight, delta),
                    &results,
                    use_colors
                )
            );
        }
        Commands::Tornado { .. } => {
            let rows = or_analysis_error(chart::tornado_rows(
                &study.criteria,
                &ranked,
                analysis.delta(),
                analysis.top_n(),
                tie_break,
            ));
            println!("{}", output::format_tornado(&rows, use_colors));
        }
        Commands::Profile { index } => {
            let scored = component_at(&ranked, index);
            let rows = chart::radar_rows(&study.criteria, scored);
            println!("{}", scored.label());
            println!("{}", output::format_radar(&rows));
        }
        Commands::Export {
            sheet,
            output: path,
            json,
        } => {
            let text = match sheet {
                Sheet::Summary => {
                    let rows = export::summary_rows(&ranked);
                    if json {
                        to_json(&rows)
                    } else {
                        rendered(export::to_tsv(&export::summary_table(&study.criteria, &rows)))
                    }
                }
                Sheet::Detailed => {
                    let rows = export::detailed_rows(&study.criteria, &ranked);
                    if json {
                        to_json(&rows)
                    } else {
                        rendered(export::to_tsv(&export::detailed_table(&rows)))
                    }
                }
                Sheet::Criteria => {
                    let rows = export::criteria_rows(&study.criteria);
                    if json {
                        to_json(&rows)
                    } else {
                        rendered(export::to_tsv(&export::criteria_table(&rows)))
                    }
                }
                Sheet::Csv => {
                    if json {
                        warn!("--json ignored for csv export");
                    }
                    let rows = export::summary_rows(&ranked);
                    rendered(export::to_csv(&export::summary_table(&study.criteria, &rows)))
                }
                Sheet::Chart => to_json(&chart::bar_rows(&ranked)),
            };
            emit(&text, path.as_ref());
        }
        Commands::Validate => {
            if !violations.is_empty() {
                println!("{}", output::format_violations(&violations, use_colors));
            }
            println!(
                "Study is valid: {} criteria, {} components, {} scores ({} low confidence, {} requirement violations)",
                study.criteria.len(),
                study.components.len(),
                study.scores.len(),
                low_confidence.len(),
                violations.len()
            );
        }
        Commands::Init { .. } => unreachable!("handled before loading the study"),
    }

    std::process::exit(EXIT_SUCCESS);
}
