//! Source file discovery.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directories to always skip at any depth (dependency/VCS directories).
const ALWAYS_SKIP_DIRS: &[&str] = &["node_modules", "vendor", ".git", ".svn", ".hg"];

/// Directories to skip only at the root level (build output directories).
/// Deeper directories with these names may hold real sources.
const ROOT_ONLY_SKIP_DIRS: &[&str] = &["build", "dist", "out", "coverage", "target", ".next"];

/// Which files a scan picks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    /// Object-definition files: names ending with the given suffix.
    Objects { suffix: String },
    /// Every `.ts` source except declaration, spec/test, index and db files.
    Sources,
}

impl FileSelection {
    pub fn objects(suffix: &str) -> Self {
        FileSelection::Objects {
            suffix: suffix.to_string(),
        }
    }

    fn accepts(&self, file_name: &str) -> bool {
        match self {
            FileSelection::Objects { suffix } => file_name.ends_with(suffix.as_str()),
            FileSelection::Sources => is_plain_ts_source(file_name),
        }
    }
}

fn is_plain_ts_source(file_name: &str) -> bool {
    if !file_name.ends_with(".ts") {
        return false;
    }
    let excluded_suffixes = [".d.ts", ".spec.ts", ".test.ts", ".db.ts"];
    if excluded_suffixes.iter().any(|s| file_name.ends_with(s)) {
        return false;
    }
    !matches!(file_name, "index.ts" | "db.ts")
}

/// Recursively list files under `root` matching `selection`, sorted by path.
///
/// `exclude` holds glob patterns matched against the root-relative path
/// (forward slashes). A missing root, or any directory that cannot be read,
/// aborts the walk.
pub fn walk_files(root: &Path, selection: &FileSelection, exclude: &[String]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::internal_io(
            format!("Not a directory: {}", root.display()),
            Some("scan root".to_string()),
        )
        .with_hint("Pass the directory holding your object definitions, e.g. 'stackfix check packages'"));
    }

    let mut files = Vec::new();
    walk_recursive(root, root, selection, exclude, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_recursive(
    dir: &Path,
    root: &Path,
    selection: &FileSelection,
    exclude: &[String],
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())))
    })?;

    let is_root = dir == root;

    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())))
        })?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if path.is_dir() {
            if ALWAYS_SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            if is_root && ROOT_ONLY_SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            walk_recursive(&path, root, selection, exclude, files)?;
        } else if selection.accepts(&name) && !is_excluded(&path, root, exclude) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_excluded(path: &Path, root: &Path, exclude: &[String]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let relative = relative_path(path, root);
    exclude
        .iter()
        .any(|pattern| glob_match::glob_match(pattern, &relative))
}

/// Root-relative path with forward slashes, for reports and glob matching.
pub fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};\n").unwrap();
    }

    fn relatives(files: &[PathBuf], root: &Path) -> Vec<String> {
        files.iter().map(|f| relative_path(f, root)).collect()
    }

    #[test]
    fn objects_selection_matches_suffix() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "crm/src/account.object.ts");
        touch(dir.path(), "crm/src/account.page.ts");
        touch(dir.path(), "crm/src/lead.object.ts");

        let files = walk_files(dir.path(), &FileSelection::objects(".object.ts"), &[]).unwrap();
        assert_eq!(
            relatives(&files, dir.path()),
            vec!["crm/src/account.object.ts", "crm/src/lead.object.ts"]
        );
    }

    #[test]
    fn sources_selection_skips_declarations_specs_index_and_db() {
        let dir = TempDir::new().unwrap();
        for f in [
            "a/types.d.ts",
            "a/account.spec.ts",
            "a/account.test.ts",
            "a/index.ts",
            "a/db.ts",
            "a/seed.db.ts",
            "a/account.object.ts",
            "a/helpers.ts",
            "a/readme.md",
        ] {
            touch(dir.path(), f);
        }

        let files = walk_files(dir.path(), &FileSelection::Sources, &[]).unwrap();
        assert_eq!(
            relatives(&files, dir.path()),
            vec!["a/account.object.ts", "a/helpers.ts"]
        );
    }

    #[test]
    fn dependency_dirs_skipped_at_any_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "pkg/node_modules/dep/x.object.ts");
        touch(dir.path(), "pkg/.git/y.object.ts");
        touch(dir.path(), "pkg/z.object.ts");

        let files = walk_files(dir.path(), &FileSelection::objects(".object.ts"), &[]).unwrap();
        assert_eq!(relatives(&files, dir.path()), vec!["pkg/z.object.ts"]);
    }

    #[test]
    fn build_dirs_skipped_only_at_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "dist/a.object.ts");
        touch(dir.path(), "pkg/dist/b.object.ts");

        let files = walk_files(dir.path(), &FileSelection::objects(".object.ts"), &[]).unwrap();
        assert_eq!(relatives(&files, dir.path()), vec!["pkg/dist/b.object.ts"]);
    }

    #[test]
    fn exclude_globs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "pkg/generated/a.object.ts");
        touch(dir.path(), "pkg/b.object.ts");

        let exclude = vec!["**/generated/**".to_string()];
        let files =
            walk_files(dir.path(), &FileSelection::objects(".object.ts"), &exclude).unwrap();
        assert_eq!(relatives(&files, dir.path()), vec!["pkg/b.object.ts"]);
    }

    #[test]
    fn missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = walk_files(&dir.path().join("nope"), &FileSelection::Sources, &[]).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }
}
