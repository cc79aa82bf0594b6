//! Field-name conversion: rename PascalCase field keys to protocol snake_case.
//!
//! For every object-definition file:
//! 1. Extract the uppercase keys of its `fields` block
//! 2. Compute canonical names (generic conversion + acronym repair)
//! 3. Rewrite declarations, quoted references, formula words and foreign keys
//! 4. Return a `FileChange` (the caller decides whether to commit)

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use super::plan::{read_source, FileChange};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::naming::{canonical_field_name, is_snake_case, AcronymTable};
use crate::schema::{extract_fields, fields_block_keys, is_convertible_key};
use crate::walker;

// ============================================================================
// Types
// ============================================================================

/// One field rename within a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameMapping {
    pub from: String,
    pub to: String,
}

impl RenameMapping {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Replacement counts per rewrite pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassCounts {
    pub declarations: usize,
    pub quoted: usize,
    pub bare_words: usize,
    pub foreign_keys: usize,
}

impl PassCounts {
    pub fn total(&self) -> usize {
        self.declarations + self.quoted + self.bare_words + self.foreign_keys
    }

    fn add(&mut self, other: &PassCounts) {
        self.declarations += other.declarations;
        self.quoted += other.quoted;
        self.bare_words += other.bare_words;
        self.foreign_keys += other.foreign_keys;
    }
}

/// Output of rewriting one file's content.
#[derive(Debug, Clone)]
pub struct FieldRewrite {
    pub content: String,
    pub counts: PassCounts,
    pub changed: bool,
}

/// Per-file summary in a rename plan.
#[derive(Debug, Clone, Serialize)]
pub struct FileRenames {
    pub file: String,
    pub mappings: Vec<RenameMapping>,
    pub replacements: PassCounts,
}

/// A potential problem the rename would introduce.
#[derive(Debug, Clone, Serialize)]
pub struct RenameWarning {
    pub kind: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

/// Result of planning field renames under a root.
#[derive(Debug, Clone, Serialize)]
pub struct RenamePlan {
    pub files_scanned: usize,
    pub files_with_fields: usize,
    pub fields_renamed: usize,
    pub replacements: PassCounts,
    pub files: Vec<FileRenames>,
    pub warnings: Vec<RenameWarning>,
    #[serde(skip)]
    pub changes: Vec<FileChange>,
}

// ============================================================================
// Rewrite engine
// ============================================================================

struct MappingPatterns {
    declaration: Regex,
    single_quoted: Regex,
    double_quoted: Regex,
    bare_word: Regex,
    foreign_key: Regex,
}

impl MappingPatterns {
    fn compile(from: &str) -> Result<Self> {
        let name = regex::escape(from);
        let build = |pattern: String| {
            Regex::new(&pattern).map_err(|e| {
                Error::internal_unexpected(format!("invalid rename pattern for '{}': {}", from, e))
            })
        };

        Ok(Self {
            declaration: build(format!(r"(?m)^([ \t]+){}([ \t]*:)", name))?,
            single_quoted: build(format!("'{}'", name))?,
            double_quoted: build(format!("\"{}\"", name))?,
            bare_word: build(format!(r"\b{}\b", name))?,
            foreign_key: build(format!(r#"(foreignKey\s*:\s*['"]){}(['"])"#, name))?,
        })
    }
}

/// Apply `mappings` to `content`, longest original name first.
///
/// Four passes per mapping, in order: indented declarations (`Name:`), quoted
/// exact matches (`'Name'`, `"Name"`), bare words anywhere (`\bName\b`), and
/// `foreignKey: 'Name'`. The bare-word pass has no syntactic context and will
/// also rewrite identical words in labels or comments.
pub fn rewrite_fields(content: &str, mappings: &[RenameMapping]) -> Result<FieldRewrite> {
    let mut ordered: Vec<&RenameMapping> = mappings.iter().filter(|m| m.from != m.to).collect();
    ordered.sort_by(|a, b| b.from.len().cmp(&a.from.len()));

    let mut text = content.to_string();
    let mut counts = PassCounts::default();

    for mapping in ordered {
        let patterns = MappingPatterns::compile(&mapping.from)?;
        let to = mapping.to.as_str();

        counts.declarations += patterns.declaration.find_iter(&text).count();
        text = patterns
            .declaration
            .replace_all(&text, |caps: &Captures| format!("{}{}{}", &caps[1], to, &caps[2]))
            .into_owned();

        let single = patterns.single_quoted.find_iter(&text).count();
        text = patterns
            .single_quoted
            .replace_all(&text, regex::NoExpand(&format!("'{}'", to)))
            .into_owned();
        let double = patterns.double_quoted.find_iter(&text).count();
        text = patterns
            .double_quoted
            .replace_all(&text, regex::NoExpand(&format!("\"{}\"", to)))
            .into_owned();
        counts.quoted += single + double;

        counts.bare_words += patterns.bare_word.find_iter(&text).count();
        text = patterns
            .bare_word
            .replace_all(&text, regex::NoExpand(to))
            .into_owned();

        counts.foreign_keys += patterns.foreign_key.find_iter(&text).count();
        text = patterns
            .foreign_key
            .replace_all(&text, |caps: &Captures| format!("{}{}{}", &caps[1], to, &caps[2]))
            .into_owned();
    }

    let changed = text != content;
    Ok(FieldRewrite {
        content: text,
        counts,
        changed,
    })
}

/// Non-identity mappings for the uppercase fields of one file. A field whose
/// converted name is not valid snake_case gets no mapping.
pub fn field_mappings(content: &str, acronyms: &AcronymTable) -> Vec<RenameMapping> {
    extract_fields(content)
        .into_iter()
        .filter_map(|name| {
            let canonical = canonical_field_name(&name, acronyms);
            (canonical != name && is_snake_case(&canonical))
                .then(|| RenameMapping::new(&name, &canonical))
        })
        .collect()
}

// ============================================================================
// Planning
// ============================================================================

/// Scan object files under `root` and plan every field rename.
pub fn plan_field_renames(root: &Path, config: &Config) -> Result<RenamePlan> {
    let files = walker::walk_files(root, &config.object_selection(), &config.exclude)?;
    let acronyms = config.acronym_table();

    log_status!("fields", "Scanning {} object files under {}", files.len(), root.display());

    let mut plan = RenamePlan {
        files_scanned: files.len(),
        files_with_fields: 0,
        fields_renamed: 0,
        replacements: PassCounts::default(),
        files: Vec::new(),
        warnings: Vec::new(),
        changes: Vec::new(),
    };

    for path in &files {
        let content = read_source(path)?;
        let relative = walker::relative_path(path, root);
        let mappings = field_mappings(&content, &acronyms);
        detect_skipped_keys(&relative, &content, &acronyms, &mut plan.warnings);

        if mappings.is_empty() {
            plan.changes
                .push(FileChange::new(path, root, content.clone(), content));
            continue;
        }

        detect_collisions(&relative, &content, &mappings, &mut plan.warnings);

        let rewrite = rewrite_fields(&content, &mappings)?;
        plan.files_with_fields += 1;
        plan.fields_renamed += mappings.len();
        plan.replacements.add(&rewrite.counts);
        plan.files.push(FileRenames {
            file: relative,
            mappings,
            replacements: rewrite.counts,
        });
        plan.changes
            .push(FileChange::new(path, root, content, rewrite.content));
    }

    log_status!(
        "fields",
        "{} fields to rename across {} files ({} replacements)",
        plan.fields_renamed,
        plan.files_with_fields,
        plan.replacements.total()
    );

    Ok(plan)
}

/// Flag uppercase keys that are left as they are because no valid snake_case
/// name can be derived from them (`'Billing Street'`, `'Ship-To'`).
fn detect_skipped_keys(
    file: &str,
    content: &str,
    acronyms: &AcronymTable,
    warnings: &mut Vec<RenameWarning>,
) {
    let keys = fields_block_keys(content).unwrap_or_default();
    for key in keys.iter().filter(|k| k.name.starts_with(|c: char| c.is_ascii_uppercase())) {
        let convertible = is_convertible_key(&key.name)
            && is_snake_case(&canonical_field_name(&key.name, acronyms));
        if !convertible {
            warnings.push(RenameWarning {
                kind: "unconvertible_key".to_string(),
                file: file.to_string(),
                line: Some(key.line),
                message: format!("'{}' has no valid snake_case form; left unchanged", key.name),
            });
        }
    }
}

/// Flag renames that would leave two fields with the same name in one block:
/// two originals converging on one canonical name, or a canonical name that is
/// already declared.
fn detect_collisions(
    file: &str,
    content: &str,
    mappings: &[RenameMapping],
    warnings: &mut Vec<RenameWarning>,
) {
    let keys = fields_block_keys(content).unwrap_or_default();
    let line_of = |name: &str| keys.iter().find(|k| k.name == name).map(|k| k.line);

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for mapping in mappings {
        if let Some(first) = seen.get(mapping.to.as_str()) {
            warnings.push(RenameWarning {
                kind: "canonical_collision".to_string(),
                file: file.to_string(),
                line: line_of(&mapping.from),
                message: format!(
                    "'{}' and '{}' both become '{}'",
                    first, mapping.from, mapping.to
                ),
            });
        } else {
            seen.insert(mapping.to.as_str(), mapping.from.as_str());
        }

        if let Some(existing_line) = line_of(&mapping.to) {
            warnings.push(RenameWarning {
                kind: "canonical_collision".to_string(),
                file: file.to_string(),
                line: line_of(&mapping.from),
                message: format!(
                    "'{}' becomes '{}', which is already declared at line {}",
                    mapping.from, mapping.to, existing_line
                ),
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
