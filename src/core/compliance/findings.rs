//! Option value checks and the violations they produce.

use serde::Serialize;

use crate::naming::normalize_value;
use crate::schema::SelectField;

/// How strictly option values are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Value must equal its lowercase form.
    #[default]
    Lowercase,
    /// Value must equal its fully normalized snake_case form.
    Strict,
}

impl CheckMode {
    pub fn is_compliant(&self, value: &str) -> bool {
        match self {
            CheckMode::Lowercase => value == value.to_lowercase(),
            CheckMode::Strict => value == normalize_value(value),
        }
    }
}

/// An option value that breaks the lowercase protocol convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceViolation {
    pub file: String,
    pub field: String,
    pub line: usize,
    pub value: String,
    pub suggested: String,
}

/// Check every option of `selects`, returning violations in source order.
pub fn check_select_fields(
    file: &str,
    selects: &[SelectField],
    mode: CheckMode,
) -> Vec<ComplianceViolation> {
    selects
        .iter()
        .flat_map(|select| {
            select
                .options
                .iter()
                .filter(|option| !mode.is_compliant(&option.value))
                .map(|option| ComplianceViolation {
                    file: file.to_string(),
                    field: select.field.clone(),
                    line: option.line,
                    value: option.value.clone(),
                    suggested: normalize_value(&option.value),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::find_select_fields;

    #[test]
    fn lowercase_mode_accepts_lowercase_with_spaces() {
        assert!(CheckMode::Lowercase.is_compliant("in progress"));
        assert!(!CheckMode::Lowercase.is_compliant("In Progress"));
    }

    #[test]
    fn strict_mode_requires_snake_case() {
        assert!(!CheckMode::Strict.is_compliant("in progress"));
        assert!(CheckMode::Strict.is_compliant("in_progress"));
        assert!(CheckMode::Strict.is_compliant(""));
    }

    #[test]
    fn violations_carry_field_and_suggestion() {
        let content = "stage: Field.select({\n  options: [\n    { value: 'open' },\n    { value: 'In Progress' },\n  ],\n})\n";
        let selects = find_select_fields(content);
        let violations = check_select_fields("deal.object.ts", &selects, CheckMode::Lowercase);

        assert_eq!(
            violations,
            vec![ComplianceViolation {
                file: "deal.object.ts".to_string(),
                field: "stage".to_string(),
                line: 4,
                value: "In Progress".to_string(),
                suggested: "in_progress".to_string(),
            }]
        );
    }
}
