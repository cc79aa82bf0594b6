//! Source rewrites that bring object definitions to protocol naming.
//!
//! Each operation scans a root, returns a plan holding one `FileChange` per
//! file, and leaves the disk untouched. `commit` applies a plan's changes.

mod acronyms;
mod fields;
mod plan;
mod values;

pub use acronyms::{fix_acronyms, plan_acronym_fixes, AcronymFix, AcronymPlan, FileAcronymFixes};
pub use fields::{
    field_mappings, plan_field_renames, rewrite_fields, FieldRewrite, FileRenames, PassCounts,
    RenameMapping, RenamePlan, RenameWarning,
};
pub use plan::{commit, FileChange};
pub use values::{fix_option_values, plan_value_fixes, FileValueFixes, ValueFix, ValuePlan};
