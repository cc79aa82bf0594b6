//! Select option value normalization.
//!
//! Rewrites `value: 'Closed Won'` inside select/multiselect option arrays to
//! `value: 'closed_won'`, keeping each literal's quote style. Runs over every
//! plain TypeScript source, not just object files. Only option arrays inside a
//! select declaration are visited; a standalone `export const OPTIONS = [...]`
//! is left alone.

use serde::Serialize;
use std::path::Path;

use super::plan::{read_source, FileChange};
use crate::config::Config;
use crate::error::Result;
use crate::naming::normalize_value;
use crate::schema::find_select_fields;
use crate::walker::{self, FileSelection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueFix {
    pub field: String,
    pub line: usize,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileValueFixes {
    pub file: String,
    pub fixes: Vec<ValueFix>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValuePlan {
    pub files_scanned: usize,
    pub select_fields: usize,
    pub options_checked: usize,
    pub values_fixed: usize,
    pub files: Vec<FileValueFixes>,
    #[serde(skip)]
    pub changes: Vec<FileChange>,
}

/// Normalize every select option value in `content`.
/// Returns the new content, the fixes applied, and (fields, options) counts.
pub fn fix_option_values(content: &str) -> (String, Vec<ValueFix>, usize, usize) {
    let selects = find_select_fields(content);
    let options_checked = selects.iter().map(|s| s.options.len()).sum();

    let mut edits: Vec<(usize, usize, String)> = Vec::new();
    let mut fixes = Vec::new();

    for select in &selects {
        for option in &select.options {
            let normalized = normalize_value(&option.value);
            if normalized == option.value {
                continue;
            }
            edits.push((
                option.start,
                option.end,
                format!("{q}{}{q}", normalized, q = option.quote),
            ));
            fixes.push(ValueFix {
                field: select.field.clone(),
                line: option.line,
                from: option.value.clone(),
                to: normalized,
            });
        }
    }

    // Replace from the end so earlier offsets stay valid.
    edits.sort_by(|a, b| b.0.cmp(&a.0));
    edits.dedup_by(|a, b| a.0 == b.0);

    let mut new_content = content.to_string();
    for (start, end, replacement) in &edits {
        new_content.replace_range(*start..*end, replacement);
    }

    (new_content, fixes, selects.len(), options_checked)
}

/// Scan TypeScript sources under `root` and plan option value fixes.
pub fn plan_value_fixes(root: &Path, config: &Config) -> Result<ValuePlan> {
    let files = walker::walk_files(root, &FileSelection::Sources, &config.exclude)?;

    log_status!("values", "Scanning {} sources under {}", files.len(), root.display());

    let mut plan = ValuePlan {
        files_scanned: files.len(),
        select_fields: 0,
        options_checked: 0,
        values_fixed: 0,
        files: Vec::new(),
        changes: Vec::new(),
    };

    for path in &files {
        let content = read_source(path)?;
        let (fixed, fixes, fields, options) = fix_option_values(&content);

        plan.select_fields += fields;
        plan.options_checked += options;
        if !fixes.is_empty() {
            plan.values_fixed += fixes.len();
            plan.files.push(FileValueFixes {
                file: walker::relative_path(path, root),
                fixes,
            });
        }
        plan.changes.push(FileChange::new(path, root, content, fixed));
    }

    log_status!(
        "values",
        "{} of {} option values to normalize",
        plan.values_fixed,
        plan.options_checked
    );

    Ok(plan)
}
