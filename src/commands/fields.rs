use clap::Args;
use serde::Serialize;

use stackfix::refactor::{self, FileRenames, PassCounts, RenameWarning};

use super::{CmdResult, GlobalArgs, RewriteArgs};

#[derive(Args)]
pub struct FieldsArgs {
    #[command(flatten)]
    rewrite: RewriteArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum FieldsOutput {
    #[serde(rename = "fields")]
    Fields {
        root: String,
        dry_run: bool,
        files_scanned: usize,
        files_with_fields: usize,
        fields_renamed: usize,
        replacements: PassCounts,
        total_replacements: usize,
        files: Vec<FileRenames>,
        warnings: Vec<RenameWarning>,
        files_written: usize,
    },
}

pub fn run(args: FieldsArgs, global: &GlobalArgs) -> CmdResult<FieldsOutput> {
    let config = global.load_config()?;
    let root = config.resolve_root(args.rewrite.path.as_deref())?;

    let plan = refactor::plan_field_renames(&root, &config)?;
    let files_written = if args.rewrite.write {
        refactor::commit(&plan.changes)?
    } else {
        0
    };

    Ok((
        FieldsOutput::Fields {
            root: root.display().to_string(),
            dry_run: !args.rewrite.write,
            files_scanned: plan.files_scanned,
            files_with_fields: plan.files_with_fields,
            fields_renamed: plan.fields_renamed,
            total_replacements: plan.replacements.total(),
            replacements: plan.replacements,
            files: plan.files,
            warnings: plan.warnings,
            files_written,
        },
        0,
    ))
}
