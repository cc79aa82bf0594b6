//! Identifier and value naming rules for the ObjectStack protocol.
//!
//! - `case` - generic PascalCase → snake_case conversion
//! - `acronym` - repair table for letter-split acronyms
//! - `value` - free-text option value normalization

mod acronym;
mod case;
mod value;

pub use acronym::{AcronymRule, AcronymTable, Anchor, RuleConflict};
pub use case::{is_snake_case, to_snake_case};
pub use value::normalize_value;

/// Canonical protocol form of a field name: generic conversion, then acronym
/// repair, then edge underscores trimmed.
pub fn canonical_field_name(name: &str, acronyms: &AcronymTable) -> String {
    let converted = to_snake_case(name);
    acronyms.apply(&converted).trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        let table = AcronymTable::builtin();
        assert_eq!(canonical_field_name("AccountId", &table), "account_id");
        assert_eq!(canonical_field_name("SMSBody", &table), "sms_body");
        assert_eq!(canonical_field_name("SLAExpiry", &table), "sla_expiry");
        assert_eq!(canonical_field_name("AccountID", &table), "account_id");
        assert_eq!(canonical_field_name("Name_", &table), "name");
    }

    #[test]
    fn canonical_names_satisfy_snake_case() {
        let table = AcronymTable::builtin();
        for name in ["AccountId", "SMSBody", "UseAIScoring", "WebsiteURL", "Address2"] {
            let canonical = canonical_field_name(name, &table);
            assert!(is_snake_case(&canonical), "{} -> {}", name, canonical);
        }
    }
}
