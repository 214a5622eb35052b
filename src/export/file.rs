use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

/// Write export output to a file atomically
///
/// Uses atomic-write-file so a failed export never leaves a truncated file
/// behind.
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    if !contents.ends_with('\n') {
        file.write_all(b"\n")
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
    }

    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        write_export(&path, "Rank,Total Score\n1,7.70").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Rank,Total Score\n1,7.70\n");
    }

    #[test]
    fn test_write_export_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        std::fs::write(&path, "old contents that are longer\n").unwrap();

        write_export(&path, "new\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_write_export_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.csv");
        assert!(write_export(&path, "x").is_err());
    }
}
