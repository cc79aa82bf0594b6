use clap::Args;
use serde::Serialize;

use stackfix::refactor::{self, FileAcronymFixes};

use super::{CmdResult, GlobalArgs, RewriteArgs};

#[derive(Args)]
pub struct AcronymsArgs {
    #[command(flatten)]
    rewrite: RewriteArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum AcronymsOutput {
    #[serde(rename = "acronyms")]
    Acronyms {
        root: String,
        dry_run: bool,
        files_scanned: usize,
        files_changed: usize,
        total_replacements: usize,
        files: Vec<FileAcronymFixes>,
        files_written: usize,
    },
}

pub fn run(args: AcronymsArgs, global: &GlobalArgs) -> CmdResult<AcronymsOutput> {
    let config = global.load_config()?;
    let root = config.resolve_root(args.rewrite.path.as_deref())?;

    let plan = refactor::plan_acronym_fixes(&root, &config)?;
    let files_written = if args.rewrite.write {
        refactor::commit(&plan.changes)?
    } else {
        0
    };

    Ok((
        AcronymsOutput::Acronyms {
            root: root.display().to_string(),
            dry_run: !args.rewrite.write,
            files_scanned: plan.files_scanned,
            files_changed: plan.files_changed,
            total_replacements: plan.total_replacements,
            files: plan.files,
            files_written,
        },
        0,
    ))
}
