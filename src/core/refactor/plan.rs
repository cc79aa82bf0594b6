//! File-level change records and the commit step.
//!
//! Rewriting operations never touch the disk themselves. They return one
//! `FileChange` per scanned file; `commit` writes the changed ones.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utils::io;
use crate::walker;

#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    #[serde(skip)]
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub file: String,
    #[serde(skip)]
    pub original_content: String,
    #[serde(skip)]
    pub new_content: String,
    pub changed: bool,
}

impl FileChange {
    pub fn new(path: &Path, root: &Path, original_content: String, new_content: String) -> Self {
        Self {
            path: path.to_path_buf(),
            file: walker::relative_path(path, root),
            changed: original_content != new_content,
            original_content,
            new_content,
        }
    }
}

/// Read a scanned source file.
pub(crate) fn read_source(path: &Path) -> Result<String> {
    io::read_file(path, &format!("read {}", path.display()))
}

/// Write every changed file. Each write is atomic; the batch is not, so an
/// error stops the run with earlier files already written.
pub fn commit(changes: &[FileChange]) -> Result<usize> {
    let mut written = 0;

    for change in changes.iter().filter(|c| c.changed) {
        io::write_file_atomic(
            &change.path,
            &change.new_content,
            &format!("write {}", change.path.display()),
        )?;
        log_status!("write", "{}", change.file);
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unchanged_content_is_not_marked_changed() {
        let change = FileChange::new(
            Path::new("/repo/a.object.ts"),
            Path::new("/repo"),
            "same".to_string(),
            "same".to_string(),
        );
        assert!(!change.changed);
        assert_eq!(change.file, "a.object.ts");
    }

    #[test]
    fn commit_writes_only_changed_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.object.ts");
        let b = dir.path().join("b.object.ts");
        fs::write(&a, "Name").unwrap();
        fs::write(&b, "name").unwrap();

        let changes = vec![
            FileChange::new(&a, dir.path(), "Name".to_string(), "name".to_string()),
            FileChange::new(&b, dir.path(), "name".to_string(), "name".to_string()),
        ];

        assert_eq!(commit(&changes).unwrap(), 1);
        assert_eq!(fs::read_to_string(&a).unwrap(), "name");
        assert_eq!(fs::read_to_string(&b).unwrap(), "name");
    }

    #[test]
    fn commit_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.object.ts");
        fs::write(&a, "Old").unwrap();
        let missing = dir.path().join("gone").join("b.object.ts");

        let changes = vec![
            FileChange::new(&a, dir.path(), "Old".to_string(), "old".to_string()),
            FileChange::new(&missing, dir.path(), "X".to_string(), "x".to_string()),
        ];

        assert!(commit(&changes).is_err());
        assert_eq!(fs::read_to_string(&a).unwrap(), "old");
    }
}
