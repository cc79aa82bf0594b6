//! Minimal tokenizer for TypeScript object-definition sources.
//!
//! Only what structural scanning needs: identifiers, string literals (with
//! their quote), numbers and single-character punctuation, each with a byte
//! span and 1-based line. Comments and whitespace are skipped, so brackets
//! inside strings or comments never affect nesting.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    /// `'...'` or `"..."`
    Str,
    /// `` `...` ``
    Template,
    Number,
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text.len() == c.len_utf8() && self.text.starts_with(c)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == name
    }

    /// Quote character of a string literal.
    pub fn quote(&self) -> Option<char> {
        match self.kind {
            TokenKind::Str | TokenKind::Template => self.text.chars().next(),
            _ => None,
        }
    }

    /// Raw text between the quotes of a string literal (escapes untouched).
    pub fn string_value(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Str | TokenKind::Template => {
                let inner = &self.text[1..];
                let quote = self.text.as_bytes()[0];
                Some(match inner.as_bytes().last() {
                    Some(&last) if last == quote && !inner.is_empty() => &inner[..inner.len() - 1],
                    _ => inner,
                })
            }
            _ => None,
        }
    }

    /// Name of an object-literal key: identifier text or string contents.
    pub fn key_name(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Ident => Some(self.text),
            TokenKind::Str => self.string_value(),
            _ => None,
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Tokenize `source`. Never fails; unterminated literals run to end of line
/// (strings) or end of input (templates, block comments).
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut line = 1;

    while pos < len {
        let b = bytes[pos];

        if b == b'\n' {
            line += 1;
            pos += 1;
            continue;
        }
        if b.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        // Comments
        if b == b'/' && pos + 1 < len && bytes[pos + 1] == b'/' {
            while pos < len && bytes[pos] != b'\n' {
                pos += 1;
            }
            continue;
        }
        if b == b'/' && pos + 1 < len && bytes[pos + 1] == b'*' {
            let end = source[pos + 2..]
                .find("*/")
                .map_or(len, |offset| pos + 2 + offset + 2);
            line += count_newlines(&source[pos..end]);
            pos = end;
            continue;
        }

        let start = pos;
        let start_line = line;

        let kind = if is_ident_start(b) {
            while pos < len && is_ident_continue(bytes[pos]) {
                pos += 1;
            }
            TokenKind::Ident
        } else if b.is_ascii_digit() {
            while pos < len && (is_ident_continue(bytes[pos]) || bytes[pos] == b'.') {
                pos += 1;
            }
            TokenKind::Number
        } else if b == b'\'' || b == b'"' {
            pos = scan_string(bytes, pos, b);
            // A `\` line continuation keeps the string open across lines.
            line += count_newlines(&source[start..pos]);
            TokenKind::Str
        } else if b == b'`' {
            pos = scan_template(bytes, pos);
            line += count_newlines(&source[start..pos]);
            TokenKind::Template
        } else {
            let ch_len = source[pos..].chars().next().map_or(1, char::len_utf8);
            pos += ch_len;
            TokenKind::Punct
        };

        tokens.push(Token {
            kind,
            text: &source[start..pos],
            start,
            end: pos,
            line: start_line,
        });
    }

    tokens
}

fn count_newlines(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'\n').count()
}

/// Returns the index just past the closing quote (or the end of the line).
fn scan_string(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos = skip_escape(bytes, pos),
            b'\n' => return pos,
            b if b == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

/// Index just past the character escaped by the `\\` at `pos`.
fn skip_escape(bytes: &[u8], pos: usize) -> usize {
    let mut next = pos + 2;
    while next < bytes.len() && bytes[next] & 0xC0 == 0x80 {
        next += 1;
    }
    next.min(bytes.len())
}

fn scan_template(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    let mut depth = 0usize;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => {
                pos = skip_escape(bytes, pos);
                continue;
            }
            b'$' if depth == 0 && bytes.get(pos + 1) == Some(&b'{') => {
                depth = 1;
                pos += 2;
                continue;
            }
            b'{' if depth > 0 => depth += 1,
            b'}' if depth > 0 => depth -= 1,
            b'`' if depth == 0 => return pos + 1,
            _ => {}
        }
        pos += 1;
    }
    bytes.len()
}

/// Index of the bracket closing the one at `open`, if balanced.
pub fn matching_close(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let (open_ch, close_ch) = match tokens.get(open)?.text {
        "{" => ('{', '}'),
        "[" => ('[', ']'),
        "(" => ('(', ')'),
        _ => return None,
    };

    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        if token.is_punct(open_ch) {
            depth += 1;
        } else if token.is_punct(close_ch) {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

/// Index of the unmatched `{`, `[` or `(` enclosing `idx`, if any.
pub fn enclosing_open(tokens: &[Token<'_>], idx: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..idx).rev() {
        let t = &tokens[i];
        if t.is_punct('}') || t.is_punct(']') || t.is_punct(')') {
            depth += 1;
        } else if t.is_punct('{') || t.is_punct('[') || t.is_punct('(') {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_text(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text.to_string()))
            .collect()
    }

    #[test]
    fn basic_object_literal() {
        let tokens = kinds_and_text("fields: { Name: Field.text({ label: 'Name' }) }");
        assert_eq!(tokens[0], (TokenKind::Ident, "fields".to_string()));
        assert_eq!(tokens[1], (TokenKind::Punct, ":".to_string()));
        assert_eq!(tokens[2], (TokenKind::Punct, "{".to_string()));
        assert!(tokens.contains(&(TokenKind::Str, "'Name'".to_string())));
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = kinds_and_text("a // { not a brace\n/* } also not */ b");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Ident, "a".to_string()),
                (TokenKind::Ident, "b".to_string())
            ]
        );
    }

    #[test]
    fn strings_hide_brackets_and_keep_escapes() {
        let tokens = tokenize(r#"x = "a { b \" }" + 'c'"#);
        let strs: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Str).collect();
        assert_eq!(strs.len(), 2);
        assert_eq!(strs[0].string_value(), Some(r#"a { b \" }"#));
        assert_eq!(strs[0].quote(), Some('"'));
        assert_eq!(strs[1].string_value(), Some("c"));
        assert!(!tokens.iter().any(|t| t.is_punct('{')));
    }

    #[test]
    fn template_with_interpolation() {
        let tokens = tokenize("`sum ${ a + `inner` } }` b");
        assert_eq!(tokens[0].kind, TokenKind::Template);
        assert!(tokens[1].is_ident("b"));
    }

    #[test]
    fn tracks_lines() {
        let tokens = tokenize("a\n/* x\n y */\nb 'c'\n`d\ne` f");
        let line_of = |name: &str| tokens.iter().find(|t| t.text == name).map(|t| t.line);
        assert_eq!(line_of("a"), Some(1));
        assert_eq!(line_of("b"), Some(4));
        assert_eq!(line_of("f"), Some(6));
    }

    #[test]
    fn bracket_matching() {
        let tokens = tokenize("{ a: [1, { b: 2 }], c: (3) }");
        let close = matching_close(&tokens, 0).unwrap();
        assert_eq!(close, tokens.len() - 1);

        let bracket = tokens.iter().position(|t| t.is_punct('[')).unwrap();
        let bracket_close = matching_close(&tokens, bracket).unwrap();
        assert!(tokens[bracket_close].is_punct(']'));

        let inner_b = tokens.iter().position(|t| t.is_ident("b")).unwrap();
        let open = enclosing_open(&tokens, inner_b).unwrap();
        assert!(tokens[open].is_punct('{'));
        assert_eq!(enclosing_open(&tokens, open), Some(bracket));
    }

    #[test]
    fn unterminated_string_stops_at_newline() {
        let tokens = tokenize("'open\nnext");
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert!(tokens[1].is_ident("next"));
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[0].string_value(), Some("open"));
    }

    #[test]
    fn line_continuation_in_string_advances_lines() {
        let tokens = tokenize("'first \\\nsecond' value: 'Open'");
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].line, 1);
        assert!(tokens[1].is_ident("value"));
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[3].line, 2);
    }

    #[test]
    fn escapes_at_end_or_before_multibyte_chars() {
        let tokens = tokenize("'caf\\é' x '\\");
        assert_eq!(tokens[0].text, "'caf\\é'");
        assert!(tokens[1].is_ident("x"));
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].end, "'caf\\é' x '\\".len());
    }
}
