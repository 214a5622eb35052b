pub mod init;
mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::scoring::{validate_analysis, AnalysisConfig};

/// Get the config directory path (~/.config/trade-study/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("trade-study"))
}

/// Get the default config file path (~/.config/trade-study/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/trade-study/config.yaml) and falls back to defaults when that
///   file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Effective analysis settings: study section, then user config, then defaults
pub fn effective_analysis(config: &Config, study: Option<&AnalysisConfig>) -> AnalysisConfig {
    let defaults = AnalysisConfig::default();
    let user = config
        .analysis
        .as_ref()
        .map(|a| a.merged_over(&defaults))
        .unwrap_or(defaults);
    match study {
        Some(study) => study.merged_over(&user),
        None => user,
    }
}

/// Layer command-line `overrides` over [`effective_analysis`] and validate
/// the result, so flags pass the same checks as config files.
pub fn resolve_analysis(
    config: &Config,
    study: Option<&AnalysisConfig>,
    overrides: &AnalysisConfig,
) -> Result<AnalysisConfig, Vec<String>> {
    let analysis = overrides.merged_over(&effective_analysis(config, study));
    validate_analysis(&analysis)?;
    Ok(analysis)
}
