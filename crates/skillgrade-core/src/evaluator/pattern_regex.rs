//! Loose regexes built from example code

use regex::{Regex, RegexBuilder};

/// Build a whitespace- and quote-tolerant regex from an example.
///
/// Every character is matched literally except that a space matches one or
/// more whitespace characters, a newline matches zero or more, and either
/// quote style matches both. Returns `None` for empty examples and for
/// regexes the engine refuses to build (e.g. over its size limit).
pub fn pattern_to_regex(code: &str) -> Option<Regex> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(code.len() * 2);
    let mut buf = [0u8; 4];
    for ch in code.chars() {
        match ch {
            ' ' => pattern.push_str(r"\s+"),
            '\n' => pattern.push_str(r"\s*"),
            '"' | '\'' => pattern.push_str(r#"["']"#),
            _ => pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
        }
    }

    RegexBuilder::new(&pattern)
        .dot_matches_new_line(true)
        .multi_line(true)
        .build()
        .ok()
}
