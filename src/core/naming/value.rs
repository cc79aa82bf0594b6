/// Normalize a free-text option value to lowercase snake_case.
///
/// Lowercases, turns whitespace runs into `_`, drops anything outside
/// `[a-z0-9_]`, collapses `_` runs and trims `_` from both ends.
pub fn normalize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_space = false;

    for c in value.chars() {
        if c.is_whitespace() {
            if !in_space {
                push_underscore(&mut out);
            }
            in_space = true;
            continue;
        }
        in_space = false;

        let c = c.to_ascii_lowercase();
        if c == '_' {
            push_underscore(&mut out);
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        }
    }

    out.trim_matches('_').to_string()
}

fn push_underscore(out: &mut String) {
    if !out.ends_with('_') {
        out.push('_');
    }
}
