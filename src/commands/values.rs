use clap::Args;
use serde::Serialize;

use stackfix::refactor::{self, FileValueFixes};

use super::{CmdResult, GlobalArgs, RewriteArgs};

#[derive(Args)]
pub struct ValuesArgs {
    #[command(flatten)]
    rewrite: RewriteArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ValuesOutput {
    #[serde(rename = "values")]
    Values {
        root: String,
        dry_run: bool,
        files_scanned: usize,
        select_fields: usize,
        options_checked: usize,
        values_fixed: usize,
        files: Vec<FileValueFixes>,
        files_written: usize,
    },
}

pub fn run(args: ValuesArgs, global: &GlobalArgs) -> CmdResult<ValuesOutput> {
    let config = global.load_config()?;
    let root = config.resolve_root(args.rewrite.path.as_deref())?;

    let plan = refactor::plan_value_fixes(&root, &config)?;
    let files_written = if args.rewrite.write {
        refactor::commit(&plan.changes)?
    } else {
        0
    };

    Ok((
        ValuesOutput::Values {
            root: root.display().to_string(),
            dry_run: !args.rewrite.write,
            files_scanned: plan.files_scanned,
            select_fields: plan.select_fields,
            options_checked: plan.options_checked,
            values_fixed: plan.values_fixed,
            files: plan.files,
            files_written,
        },
        0,
    ))
}
