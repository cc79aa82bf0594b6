//! Field declarations inside an object definition's `fields: { ... }` block.

use serde::Serialize;

use crate::lexer::{matching_close, tokenize, Token};

/// A key declared directly inside the `fields` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldKey {
    pub name: String,
    pub line: usize,
}

/// Every key declared at the first nesting level of the first `fields: {`
/// block, in order of appearance. `None` when there is no such block or it is
/// never closed.
pub fn fields_block_keys(content: &str) -> Option<Vec<FieldKey>> {
    let tokens = tokenize(content);
    let open = find_fields_open(&tokens)?;
    let close = matching_close(&tokens, open)?;

    let mut keys = Vec::new();
    let mut depth = 0usize;

    for idx in open + 1..close {
        let token = &tokens[idx];

        if token.is_punct('{') || token.is_punct('[') || token.is_punct('(') {
            depth += 1;
            continue;
        }
        if token.is_punct('}') || token.is_punct(']') || token.is_punct(')') {
            depth = depth.saturating_sub(1);
            continue;
        }
        if depth != 0 {
            continue;
        }

        let Some(name) = token.key_name() else {
            continue;
        };
        let followed_by_colon = tokens.get(idx + 1).is_some_and(|t| t.is_punct(':'));
        let prev = &tokens[idx - 1];
        let at_entry_start = idx - 1 == open || prev.is_punct(',');

        if followed_by_colon && at_entry_start {
            keys.push(FieldKey {
                name: name.to_string(),
                line: token.line,
            });
        }
    }

    Some(keys)
}

fn find_fields_open(tokens: &[Token<'_>]) -> Option<usize> {
    tokens.windows(3).position(|w| {
        w[0].key_name() == Some("fields") && w[1].is_punct(':') && w[2].is_punct('{')
    })
    .map(|idx| idx + 2)
}

/// Field names that still need conversion: distinct identifier-shaped keys of
/// the `fields` block starting with an uppercase ASCII letter, in order of
/// appearance. Quoted keys such as `'Billing Street'` are not identifiers and
/// are left out. Empty when the file has no `fields` block.
pub fn extract_fields(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for key in fields_block_keys(content).unwrap_or_default() {
        if is_convertible_key(&key.name) && !names.contains(&key.name) {
            names.push(key.name);
        }
    }

    names
}

/// `[A-Z][A-Za-z0-9_]*`
pub fn is_convertible_key(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_uppercase())
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = r#"import { ObjectSchema, Field } from '@objectstack/spec/data';

export const Account = ObjectSchema.create({
  name: 'account',
  label: 'Account',
  fields: {
    Name: Field.text({ label: 'Account Name', required: true }),
    AccountNumber: Field.text({
      label: 'Account Number',
      options: { unique: true },
    }),
    industry: Field.select({
      label: 'Industry',
      options: [{ label: 'Tech', value: 'tech' }],
    }),
    'ParentId': Field.lookup('account', { label: 'Parent' }),
    // Hidden: Field.text({}),
    Notes: { type: 'textarea', label: 'Notes {braces}' },
  },
  listViews: {
    All: { columns: ['Name'] },
  },
});
"#;

    #[test]
    fn extracts_uppercase_keys_in_order() {
        assert_eq!(
            extract_fields(ACCOUNT),
            vec!["Name", "AccountNumber", "ParentId", "Notes"]
        );
    }

    #[test]
    fn block_keys_include_lowercase_and_lines() {
        let keys = fields_block_keys(ACCOUNT).unwrap();
        let names: Vec<&str> = keys.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Name", "AccountNumber", "industry", "ParentId", "Notes"]
        );
        assert_eq!(keys[0].line, 7);
    }

    #[test]
    fn nested_keys_are_ignored() {
        let names = extract_fields(ACCOUNT);
        assert!(!names.contains(&"All".to_string()));
        assert!(!names.iter().any(|n| n == "Hidden"));
    }

    #[test]
    fn no_fields_block_yields_empty() {
        let content = "export const Dashboard = { widgets: [] };\n";
        assert!(extract_fields(content).is_empty());
        assert!(fields_block_keys(content).is_none());
    }

    #[test]
    fn unclosed_block_yields_empty() {
        assert!(extract_fields("fields: {\n  Name: Field.text({}),\n").is_empty());
    }

    #[test]
    fn duplicates_reported_once() {
        let content = "fields: {\n  Name: {},\n  Name: {},\n}\n";
        assert_eq!(extract_fields(content), vec!["Name"]);
    }

    #[test]
    fn keys_that_are_not_identifiers_are_skipped() {
        let content = "fields: {\n  'Billing Street': Field.text({}),\n  'Ship-To': Field.text({}),\n  'BillingCity': Field.text({}),\n},\n";
        assert_eq!(extract_fields(content), vec!["BillingCity"]);
        assert!(is_convertible_key("SMSOptIn_2"));
        assert!(!is_convertible_key("Billing Street"));
        assert!(!is_convertible_key("name"));
    }
}
