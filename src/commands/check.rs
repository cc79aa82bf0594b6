use clap::Args;
use serde::Serialize;

use stackfix::compliance::{self, CheckMode, ComplianceReport};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct CheckArgs {
    /// Directory to scan (default: `root` from stackfix.json, else `packages`)
    path: Option<String>,

    /// Require fully normalized snake_case values, not just lowercase
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum CheckOutput {
    #[serde(rename = "check")]
    Check(ComplianceReport),
}

pub fn run(args: CheckArgs, global: &GlobalArgs) -> CmdResult<CheckOutput> {
    let config = global.load_config()?;
    let root = config.resolve_root(args.path.as_deref())?;
    let mode = if args.strict {
        CheckMode::Strict
    } else {
        CheckMode::Lowercase
    };

    let report = compliance::scan(&root, &config, mode)?;
    let exit_code = report.exit_code();

    Ok((CheckOutput::Check(report), exit_code))
}
