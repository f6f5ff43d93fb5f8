use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path` through a temp file in the same directory,
/// then renames it into place. Readers never see a half-written file.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    if !parent.exists() {
        std::fs::create_dir_all(parent)?;
    }

    // Same directory so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_parent_dirs() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("target/reports/run.json");

        atomic_write(&file_path, "{}")?;

        assert_eq!(fs::read_to_string(file_path)?, "{}");
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("report.json");

        atomic_write(&file_path, "first")?;
        atomic_write(&file_path, "second")?;

        assert_eq!(fs::read_to_string(file_path)?, "second");
        Ok(())
    }
}
