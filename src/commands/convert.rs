use clap::Args;
use serde::Serialize;

use stackfix::naming::{canonical_field_name, normalize_value};
use stackfix::Error;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ConvertArgs {
    /// Names (or option values with --value) to convert
    inputs: Vec<String>,

    /// Normalize as select option values instead of field names
    #[arg(long)]
    value: bool,
}

#[derive(Serialize)]
pub struct Conversion {
    pub input: String,
    pub output: String,
    pub changed: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ConvertOutput {
    #[serde(rename = "convert")]
    Convert {
        kind: &'static str,
        conversions: Vec<Conversion>,
    },
}

pub fn run(args: ConvertArgs, global: &GlobalArgs) -> CmdResult<ConvertOutput> {
    validate_inputs(&args.inputs)?;

    let (kind, conversions) = if args.value {
        ("value", convert_all(&args.inputs, normalize_value))
    } else {
        let table = global.load_config()?.acronym_table();
        (
            "field",
            convert_all(&args.inputs, |name| canonical_field_name(name, &table)),
        )
    };

    Ok((ConvertOutput::Convert { kind, conversions }, 0))
}

fn validate_inputs(inputs: &[String]) -> stackfix::Result<()> {
    if inputs.is_empty() {
        return Err(Error::validation_missing_argument(vec!["inputs".to_string()]));
    }
    if let Some(blank) = inputs.iter().find(|i| i.trim().is_empty()) {
        return Err(Error::validation_invalid_argument(
            "inputs",
            "Input must not be blank",
            Some(blank.clone()),
        ));
    }
    Ok(())
}

fn convert_all(inputs: &[String], convert: impl Fn(&str) -> String) -> Vec<Conversion> {
    inputs
        .iter()
        .map(|input| {
            let output = convert(input);
            Conversion {
                changed: output != *input,
                input: input.clone(),
                output,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackfix::ErrorCode;

    fn run_with(inputs: &[&str], value: bool) -> CmdResult<ConvertOutput> {
        let args = ConvertArgs {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            value,
        };
        run(args, &GlobalArgs { config: None })
    }

    #[test]
    fn no_inputs_is_missing_argument() {
        let err = run_with(&[], false).err().unwrap();
        assert_eq!(err.code, ErrorCode::ValidationMissingArgument);
    }

    #[test]
    fn blank_input_is_invalid_argument() {
        let err = run_with(&["SMSBody", "  "], true).err().unwrap();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
        assert_eq!(err.details["value"], "  ");
    }

    #[test]
    fn values_are_normalized() {
        let (ConvertOutput::Convert { kind, conversions }, code) =
            run_with(&["Closed Won", "open"], true).unwrap();
        assert_eq!(code, 0);
        assert_eq!(kind, "value");
        assert_eq!(conversions[0].output, "closed_won");
        assert!(conversions[0].changed);
        assert!(!conversions[1].changed);
    }
}
