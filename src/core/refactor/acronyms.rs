//! Acronym repair for object files converted before the acronym table existed.
//!
//! Finds snake_case identifiers anywhere in the file (declarations, quoted
//! column lists, formulas) and runs each one through the acronym table, so
//! `s_m_s_body` becomes `sms_body` everywhere it is referenced.

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::plan::{read_source, FileChange};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::naming::AcronymTable;
use crate::walker;

const SNAKE_IDENTIFIER: &str = r"\b[a-z][a-z0-9]*(?:_[a-z0-9]+)+\b";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcronymFix {
    pub from: String,
    pub to: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileAcronymFixes {
    pub file: String,
    pub fixes: Vec<AcronymFix>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AcronymPlan {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub total_replacements: usize,
    pub files: Vec<FileAcronymFixes>,
    #[serde(skip)]
    pub changes: Vec<FileChange>,
}

fn identifier_regex() -> Result<Regex> {
    Regex::new(SNAKE_IDENTIFIER)
        .map_err(|e| Error::internal_unexpected(format!("invalid identifier pattern: {}", e)))
}

/// Repair acronyms in every snake_case identifier of `content`.
/// Returns the new content and the distinct repairs, sorted by original.
pub fn fix_acronyms(content: &str, table: &AcronymTable) -> Result<(String, Vec<AcronymFix>)> {
    let re = identifier_regex()?;
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();

    let fixed = re
        .replace_all(content, |caps: &Captures| {
            let original = &caps[0];
            let repaired = table.apply(original);
            if repaired != original {
                *counts
                    .entry((original.to_string(), repaired.clone()))
                    .or_insert(0) += 1;
            }
            repaired
        })
        .into_owned();

    let fixes = counts
        .into_iter()
        .map(|((from, to), count)| AcronymFix { from, to, count })
        .collect();

    Ok((fixed, fixes))
}

/// Scan object files under `root` and plan acronym repairs.
pub fn plan_acronym_fixes(root: &Path, config: &Config) -> Result<AcronymPlan> {
    let files = walker::walk_files(root, &config.object_selection(), &config.exclude)?;
    let table = config.acronym_table();

    log_status!("acronyms", "Scanning {} object files under {}", files.len(), root.display());

    let mut plan = AcronymPlan {
        files_scanned: files.len(),
        files_changed: 0,
        total_replacements: 0,
        files: Vec::new(),
        changes: Vec::new(),
    };

    for path in &files {
        let content = read_source(path)?;
        let (fixed, fixes) = fix_acronyms(&content, &table)?;

        if !fixes.is_empty() {
            plan.files_changed += 1;
            plan.total_replacements += fixes.iter().map(|f| f.count).sum::<usize>();
            plan.files.push(FileAcronymFixes {
                file: walker::relative_path(path, root),
                fixes,
            });
        }
        plan.changes.push(FileChange::new(path, root, content, fixed));
    }

    log_status!(
        "acronyms",
        "{} replacements across {} files",
        plan.total_replacements,
        plan.files_changed
    );

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn repairs_every_reference() {
        let content = "fields: {\n  s_m_s_body: Field.text({}),\n  website_u_r_l: Field.url({}),\n},\ncolumns: ['s_m_s_body', 'name'],\nformula: 's_m_s_body + 1'\n";
        let (fixed, fixes) = fix_acronyms(content, &AcronymTable::builtin()).unwrap();

        assert!(fixed.contains("  sms_body: Field.text"));
        assert!(fixed.contains("  website_url: Field.url"));
        assert!(fixed.contains("['sms_body', 'name']"));
        assert!(fixed.contains("'sms_body + 1'"));
        assert_eq!(
            fixes,
            vec![
                AcronymFix {
                    from: "s_m_s_body".to_string(),
                    to: "sms_body".to_string(),
                    count: 3
                },
                AcronymFix {
                    from: "website_u_r_l".to_string(),
                    to: "website_url".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn leaves_other_identifiers_alone() {
        let content = "import { Field } from '@objectstack/spec';\nconst data_info = 'Closed Won';\n";
        let (fixed, fixes) = fix_acronyms(content, &AcronymTable::builtin()).unwrap();
        assert_eq!(fixed, content);
        assert!(fixes.is_empty());
    }

    #[test]
    fn repaired_content_is_stable() {
        let table = AcronymTable::builtin();
        let (once, _) = fix_acronyms("use_a_i_scoring: {}", &table).unwrap();
        let (twice, fixes) = fix_acronyms(&once, &table).unwrap();
        assert_eq!(once, "use_ai_scoring: {}");
        assert_eq!(twice, once);
        assert!(fixes.is_empty());
    }

    #[test]
    fn plan_counts_changed_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.object.ts"), "fields: { s_l_a_due: {} }").unwrap();
        fs::write(dir.path().join("b.object.ts"), "fields: { due: {} }").unwrap();

        let plan = plan_acronym_fixes(dir.path(), &Config::default()).unwrap();
        assert_eq!(plan.files_scanned, 2);
        assert_eq!(plan.files_changed, 1);
        assert_eq!(plan.total_replacements, 1);
        assert_eq!(plan.files[0].file, "a.object.ts");
        assert_eq!(plan.changes[0].new_content, "fields: { sla_due: {} }");
        assert!(!plan.changes[1].changed);
    }
}
