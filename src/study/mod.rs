mod schema;

pub use schema::StudyFile;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::scoring::{
    aggregate_all, rank, validate_study, ComponentScore, ScoringError, TieBreak,
};

/// Default study file looked up in the working directory
pub const DEFAULT_STUDY_FILE: &str = "study.yaml";

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a study from a YAML file, or JSON when the extension is `.json`
///
/// # Errors
///
/// Returns an error if:
/// - The study file does not exist
/// - The study file cannot be read
/// - The YAML/JSON cannot be parsed
pub fn load_study(path: &Path) -> Result<StudyFile> {
    if !path.exists() {
        anyhow::bail!(
            "Study file not found at {}. Create one with `trade-study init`",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read study file at {}", path.display()))?;

    let study: StudyFile = if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse study: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse study: invalid YAML in {}", path.display()))?
    };

    debug!(
        path = %path.display(),
        criteria = study.criteria.len(),
        components = study.components.len(),
        scores = study.scores.len(),
        "loaded study"
    );
    Ok(study)
}

/// Save a study atomically, as JSON or YAML depending on the extension
pub fn save_study(path: &Path, study: &StudyFile) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(study).context("Failed to serialize study")?
    } else {
        serde_saphyr::to_string(study)
            .map_err(|e| anyhow::anyhow!("Failed to serialize study: {}", e))?
    };

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write study to {}", path.display()))?;
    file.commit().context("Failed to save study")?;

    Ok(())
}

impl StudyFile {
    /// Boundary validation of every record in the study
    pub fn validate(&self) -> Result<(), Vec<String>> {
        validate_study(&self.criteria, &self.components, &self.scores)
    }

    /// Aggregate and rank every component
    pub fn ranked(&self, tie_break: TieBreak) -> Result<Vec<ComponentScore>, ScoringError> {
        let aggregated = aggregate_all(&self.criteria, &self.components, &self.scores)?;
        Ok(rank(&aggregated, tie_break))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDY_YAML: &str = r#"
name: LNA selection
criteria:
  - { id: gain, name: Gain, weight: 5, unit: dB }
  - { id: cost, name: Cost, weight: 3, higher_is_better: false }
  - { id: size, name: Size, weight: 2 }
components:
  - { id: a, manufacturer: Acme, part_number: A-100 }
  - { id: b, manufacturer: Beta, part_number: B-200 }
  - { id: c, manufacturer: Core, part_number: C-300 }
scores:
  - { component_id: a, criterion_id: gain, score: 7, rationale: "22 dB typical" }
  - { component_id: a, criterion_id: cost, score: 8 }
  - { component_id: a, criterion_id: size, score: 9 }
  - { component_id: b, criterion_id: gain, score: 9, extraction_confidence: 0.92 }
  - { component_id: b, criterion_id: cost, score: 6 }
  - { component_id: b, criterion_id: size, score: 7 }
  - { component_id: c, criterion_id: gain, score: 6 }
  - { component_id: c, criterion_id: cost, score: 10 }
  - { component_id: c, criterion_id: size, score: 8 }
analysis:
  top_n: 2
"#;

    #[test]
    fn test_parse_study_yaml() {
        let study: StudyFile = serde_saphyr::from_str(STUDY_YAML).unwrap();
        assert_eq!(study.name.as_deref(), Some("LNA selection"));
        assert_eq!(study.criteria.len(), 3);
        assert!(!study.criteria[1].higher_is_better);
        assert_eq!(study.criteria[0].unit.as_deref(), Some("dB"));
        assert_eq!(study.components.len(), 3);
        assert_eq!(study.scores.len(), 9);
        assert_eq!(study.scores[3].extraction_confidence, Some(0.92));
        assert_eq!(study.analysis.as_ref().unwrap().top_n, Some(2));
        assert!(study.validate().is_ok());
    }

    #[test]
    fn test_ranked_example_study() {
        let study: StudyFile = serde_saphyr::from_str(STUDY_YAML).unwrap();
        let ranked = study.ranked(TieBreak::PartNumber).unwrap();

        let ids: Vec<_> = ranked.iter().map(|s| s.component.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!((ranked[0].total_score - 7.7).abs() < 1e-12);
        assert_eq!(ranked[0].total_score, ranked[1].total_score);
        assert!((ranked[2].total_score - 7.6).abs() < 1e-12);
    }

    #[test]
    fn test_ranked_twice_is_identical() {
        let study: StudyFile = serde_saphyr::from_str(STUDY_YAML).unwrap();
        assert_eq!(
            study.ranked(TieBreak::PartNumber).unwrap(),
            study.ranked(TieBreak::PartNumber).unwrap()
        );
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        let yaml = "criteria: []\nweights: {}\n";
        let parsed: Result<StudyFile, _> = serde_saphyr::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_study(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Study file not found"));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.yaml");
        fs::write(&path, "criteria: [unclosed").unwrap();
        let err = load_study(&path).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn test_save_and_load_roundtrip_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let study: StudyFile = serde_saphyr::from_str(STUDY_YAML).unwrap();

        for file_name in ["study.yaml", "study.json"] {
            let path = dir.path().join(file_name);
            save_study(&path, &study).unwrap();
            let loaded = load_study(&path).unwrap();
            assert_eq!(loaded, study);
        }
    }
}
