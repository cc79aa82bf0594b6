use clap::Args;
use serde::Serialize;

use stackfix::naming::{AcronymRule, RuleConflict};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct RulesArgs {}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RulesOutput {
    #[serde(rename = "rules")]
    Rules {
        rules: Vec<AcronymRule>,
        conflicts: Vec<RuleConflict>,
    },
}

pub fn run(_args: RulesArgs, global: &GlobalArgs) -> CmdResult<RulesOutput> {
    let table = global.load_config()?.acronym_table();

    Ok((
        RulesOutput::Rules {
            rules: table.rules().to_vec(),
            conflicts: table.conflicts(),
        },
        0,
    ))
}
