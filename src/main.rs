use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::GlobalArgs;

mod commands;
mod output;

use commands::{acronyms, check, convert, fields, rules, values};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "stackfix")]
#[command(version = VERSION)]
#[command(about = "Field-name normalization and compliance checks for ObjectStack object definitions")]
struct Cli {
    /// Config file (default: ./stackfix.json when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert camelCase field names to snake_case across object files
    Fields(fields::FieldsArgs),
    /// Repair split acronyms (s_m_s_body -> sms_body) in converted files
    Acronyms(acronyms::AcronymsArgs),
    /// Normalize select option values to lowercase snake_case
    Values(values::ValuesArgs),
    /// Report option values that break the lowercase convention
    Check(check::CheckArgs),
    /// Print canonical field names or normalized values for the given inputs
    Convert(convert::ConvertArgs),
    /// Show the effective acronym table and any rule conflicts
    Rules(rules::RulesArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs { config: cli.config };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
