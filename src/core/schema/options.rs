//! Select/multiselect option values.
//!
//! Recognizes both declaration styles used in object definitions:
//!
//! ```text
//! status: Field.select({ options: [{ label: 'New', value: 'new' }] })
//! status: { type: 'select', options: [{ label: 'New', value: 'new' }] }
//! ```

use serde::Serialize;

use crate::lexer::{enclosing_open, matching_close, tokenize, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectKind {
    Select,
    Multiselect,
}

impl SelectKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "select" => Some(SelectKind::Select),
            "multiselect" => Some(SelectKind::Multiselect),
            _ => None,
        }
    }
}

/// One `value: '...'` literal inside an options array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionValue {
    pub value: String,
    pub quote: char,
    /// Byte span of the literal including its quotes.
    #[serde(skip)]
    pub start: usize,
    #[serde(skip)]
    pub end: usize,
    pub line: usize,
}

/// A select/multiselect declaration and the option values found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectField {
    /// Key the field is declared under, or `unknown`.
    pub field: String,
    pub kind: SelectKind,
    pub line: usize,
    pub options: Vec<OptionValue>,
}

const UNKNOWN_FIELD: &str = "unknown";

/// All select/multiselect declarations in `content`, in source order.
pub fn find_select_fields(content: &str) -> Vec<SelectField> {
    let tokens = tokenize(content);
    let mut fields = Vec::new();
    // Argument ranges of collected `Field.select(` calls.
    let mut calls: Vec<(usize, usize)> = Vec::new();

    for idx in 0..tokens.len() {
        if let Some((kind, scope)) = field_call_at(&tokens, idx) {
            calls.push(scope);
            fields.push(SelectField {
                field: key_before(&tokens, idx).unwrap_or(UNKNOWN_FIELD).to_string(),
                kind,
                line: tokens[idx].line,
                options: option_values(&tokens, scope),
            });
        } else if let Some((kind, open, scope)) = typed_object_at(&tokens, idx) {
            // `Field.select({ type: 'select', ... })` is one declaration.
            if calls.iter().any(|&(start, end)| open >= start && open < end) {
                continue;
            }
            fields.push(SelectField {
                field: key_before(&tokens, open).unwrap_or(UNKNOWN_FIELD).to_string(),
                kind,
                line: tokens[idx].line,
                options: option_values(&tokens, scope),
            });
        }
    }

    fields
}

/// `Field.select(` / `Field.multiselect(` starting at `idx`; returns the
/// token range of the call's arguments.
fn field_call_at(tokens: &[Token<'_>], idx: usize) -> Option<(SelectKind, (usize, usize))> {
    let window = tokens.get(idx..idx + 4)?;
    if !window[0].is_ident("Field") || !window[1].is_punct('.') || !window[3].is_punct('(') {
        return None;
    }
    if window[2].kind != TokenKind::Ident {
        return None;
    }
    let kind = SelectKind::parse(window[2].text)?;
    let close = matching_close(tokens, idx + 3)?;
    Some((kind, (idx + 4, close)))
}

/// `type: 'select'` at `idx`; returns the enclosing `{` and its token range.
fn typed_object_at(
    tokens: &[Token<'_>],
    idx: usize,
) -> Option<(SelectKind, usize, (usize, usize))> {
    let window = tokens.get(idx..idx + 3)?;
    if window[0].key_name() != Some("type") || !window[1].is_punct(':') {
        return None;
    }
    if window[2].kind != TokenKind::Str {
        return None;
    }
    let kind = SelectKind::parse(window[2].string_value()?)?;
    let open = enclosing_open(tokens, idx)?;
    if !tokens[open].is_punct('{') {
        return None;
    }
    let close = matching_close(tokens, open)?;
    Some((kind, open, (open + 1, close)))
}

/// The `key` of a `key: <value starting at idx>` pair.
fn key_before<'a>(tokens: &[Token<'a>], idx: usize) -> Option<&'a str> {
    if idx < 2 || !tokens[idx - 1].is_punct(':') {
        return None;
    }
    tokens[idx - 2].key_name()
}

/// `value:` string literals inside the first `options: [ ... ]` in range.
fn option_values(tokens: &[Token<'_>], (start, end): (usize, usize)) -> Vec<OptionValue> {
    let Some(open) = (start..end.saturating_sub(2)).find_map(|i| {
        let is_options = tokens[i].key_name() == Some("options")
            && tokens[i + 1].is_punct(':')
            && tokens[i + 2].is_punct('[');
        is_options.then_some(i + 2)
    }) else {
        return Vec::new();
    };
    let Some(close) = matching_close(tokens, open) else {
        return Vec::new();
    };

    let mut values = Vec::new();
    for idx in open + 1..close.saturating_sub(2) {
        let (key, colon, literal) = (&tokens[idx], &tokens[idx + 1], &tokens[idx + 2]);
        if key.key_name() != Some("value") || !colon.is_punct(':') || literal.kind != TokenKind::Str {
            continue;
        }
        let (Some(value), Some(quote)) = (literal.string_value(), literal.quote()) else {
            continue;
        };
        values.push(OptionValue {
            value: value.to_string(),
            quote,
            start: literal.start,
            end: literal.end,
            line: literal.line,
        });
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPPORTUNITY: &str = r#"export const Opportunity = ObjectSchema.create({
  name: 'opportunity',
  fields: {
    stage: Field.select({
      label: 'Stage',
      options: [
        { label: 'Prospecting', value: 'prospecting' },
        { label: 'Closed Won', value: "Closed Won" },
      ],
    }),
    tags: Field.multiselect({
      label: 'Tags',
      options: [{ label: 'Hot', value: 'Hot' }],
    }),
    priority: {
      type: 'select',
      label: 'Priority',
      options: [{ value: 'high', label: 'High' }],
    },
    name: Field.text({ label: 'Name', options: [{ value: 'Nope' }] }),
  },
});
"#;

    #[test]
    fn finds_both_declaration_styles() {
        let fields = find_select_fields(OPPORTUNITY);
        let summary: Vec<(&str, SelectKind, usize)> = fields
            .iter()
            .map(|f| (f.field.as_str(), f.kind, f.options.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("stage", SelectKind::Select, 2),
                ("tags", SelectKind::Multiselect, 1),
                ("priority", SelectKind::Select, 1),
            ]
        );
    }

    #[test]
    fn option_values_keep_quote_and_span() {
        let fields = find_select_fields(OPPORTUNITY);
        let closed = &fields[0].options[1];
        assert_eq!(closed.value, "Closed Won");
        assert_eq!(closed.quote, '"');
        assert_eq!(&OPPORTUNITY[closed.start..closed.end], "\"Closed Won\"");
        assert_eq!(closed.line, 8);
    }

    #[test]
    fn non_select_fields_ignored() {
        let fields = find_select_fields(OPPORTUNITY);
        assert!(fields.iter().all(|f| f.field != "name"));
    }

    #[test]
    fn select_without_options() {
        let fields = find_select_fields("x: Field.select({ label: 'X' })");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "x");
        assert!(fields[0].options.is_empty());
    }

    #[test]
    fn unknown_field_name_when_not_keyed() {
        let fields = find_select_fields("register(Field.select({ options: [{ value: 'A' }] }))");
        assert_eq!(fields[0].field, "unknown");
        assert_eq!(fields[0].options[0].value, "A");
    }

    #[test]
    fn typed_call_counts_once() {
        let fields = find_select_fields("s: Field.select({ type: 'select', options: [{ value: 'Open' }] })");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "s");
        assert_eq!(fields[0].options.len(), 1);
    }
}
