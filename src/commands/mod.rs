use clap::Args;
use std::path::PathBuf;

use stackfix::config::{self, Config};

pub type CmdResult<T> = stackfix::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_config(&self) -> stackfix::Result<Config> {
        config::load(self.config.as_deref())
    }
}

/// Arguments shared by the rewriting commands.
#[derive(Args, Debug, Default)]
pub struct RewriteArgs {
    /// Directory to scan (default: `root` from stackfix.json, else `packages`)
    pub path: Option<String>,

    /// Apply changes to disk (default is dry-run)
    #[arg(long)]
    pub write: bool,
}

pub mod acronyms;
pub mod check;
pub mod convert;
pub mod fields;
pub mod rules;
pub mod values;

macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (stackfix::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Fields(args) => dispatch!(args, global, fields),
        crate::Commands::Acronyms(args) => dispatch!(args, global, acronyms),
        crate::Commands::Values(args) => dispatch!(args, global, values),
        crate::Commands::Check(args) => dispatch!(args, global, check),
        crate::Commands::Convert(args) => dispatch!(args, global, convert),
        crate::Commands::Rules(args) => dispatch!(args, global, rules),
    }
}
