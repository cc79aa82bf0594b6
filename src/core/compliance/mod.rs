//! Read-only protocol compliance scan for select option values.
//!
//! Walks object-definition files the same way the field rewrite does, checks
//! every select/multiselect option value, and reports violations. Nothing is
//! written; the caller turns `passed` into the process exit status.

mod findings;

use serde::Serialize;
use std::path::Path;

pub use findings::{check_select_fields, CheckMode, ComplianceViolation};

use crate::config::Config;
use crate::error::Result;
use crate::schema::find_select_fields;
use crate::{utils, walker};

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceSummary {
    pub files_scanned: usize,
    pub fields_found: usize,
    pub options_checked: usize,
    pub violations_found: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub source_path: String,
    pub mode: CheckMode,
    pub passed: bool,
    pub summary: ComplianceSummary,
    pub violations: Vec<ComplianceViolation>,
}

impl ComplianceReport {
    /// 0 when compliant, 1 when any violation was found.
    pub fn exit_code(&self) -> i32 {
        if self.passed {
            0
        } else {
            1
        }
    }
}

/// Scan object files under `root` for non-compliant option values.
pub fn scan(root: &Path, config: &Config, mode: CheckMode) -> Result<ComplianceReport> {
    let files = walker::walk_files(root, &config.object_selection(), &config.exclude)?;

    log_status!("check", "Checking {} object files under {}", files.len(), root.display());

    let mut fields_found = 0;
    let mut options_checked = 0;
    let mut violations = Vec::new();

    for path in &files {
        let content = utils::io::read_file(path, &format!("read {}", path.display()))?;
        let selects = find_select_fields(&content);

        fields_found += selects.len();
        options_checked += selects.iter().map(|s| s.options.len()).sum::<usize>();
        violations.extend(check_select_fields(
            &walker::relative_path(path, root),
            &selects,
            mode,
        ));
    }

    for v in &violations {
        log_status!(
            "check",
            "{}:{} {} value '{}' (use '{}')",
            v.file,
            v.line,
            v.field,
            v.value,
            v.suggested
        );
    }
    log_status!(
        "check",
        "{} files, {} select fields, {} options, {} violations",
        files.len(),
        fields_found,
        options_checked,
        violations.len()
    );

    Ok(ComplianceReport {
        source_path: root.display().to_string(),
        mode,
        passed: violations.is_empty(),
        summary: ComplianceSummary {
            files_scanned: files.len(),
            fields_found,
            options_checked,
            violations_found: violations.len(),
        },
        violations,
    })
}
