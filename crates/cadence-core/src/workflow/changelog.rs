//! Changelog file operations

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ChangelogError, Result};

/// Read existing changelog content, or an empty string when the file is absent
pub fn read_changelog(path: &Path) -> Result<String> {
    if !path.exists() {
        debug!(path = %path.display(), "no existing changelog found");
        return Ok(String::new());
    }

    debug!(path = %path.display(), "reading existing changelog");
    std::fs::read_to_string(path).map_err(|e| {
        ChangelogError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Write the full changelog document in one pass
pub fn write_changelog(path: &Path, content: &str) -> Result<()> {
    info!(path = %path.display(), bytes = content.len(), "writing changelog");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ChangelogError::WriteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, content).map_err(|e| {
        ChangelogError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_changelog_reads_empty() {
        let temp = TempDir::new().unwrap();
        let content = read_changelog(&temp.path().join("CHANGELOG.md")).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docs").join("CHANGELOG.md");

        write_changelog(&path, "# Changelog\n").unwrap();
        assert_eq!(read_changelog(&path).unwrap(), "# Changelog\n");
    }

    #[test]
    fn test_write_into_directory_fails() {
        let temp = TempDir::new().unwrap();
        let result = write_changelog(temp.path(), "content");
        assert!(result.is_err());
    }
}
