//! PascalCase → snake_case conversion.

/// Convert an identifier to snake_case.
///
/// Every ASCII uppercase letter gets a `_` in front of it, the result is
/// lowercased, runs of `_` collapse to one and a leading `_` is dropped.
/// Consecutive capitals are split letter by letter (`SMSBody` → `s_m_s_body`);
/// the acronym table repairs those afterwards.
pub fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);

    for c in input.chars() {
        if c.is_ascii_uppercase() {
            push_underscore(&mut out);
            out.push(c.to_ascii_lowercase());
        } else if c == '_' {
            push_underscore(&mut out);
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }

    match out.strip_prefix('_') {
        Some(rest) => rest.to_string(),
        None => out,
    }
}

fn push_underscore(out: &mut String) {
    if !out.ends_with('_') {
        out.push('_');
    }
}

/// True when `s` is already in lowercase-with-underscores form.
pub fn is_snake_case(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
}
