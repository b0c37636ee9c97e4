//! Line-based matching of multi-line examples against generated code
//!
//! Both matchers compare whitespace-normalized, non-comment lines. Only
//! pattern lines of at least [`SIGNIFICANT_LINE_LEN`] characters take part;
//! shorter lines are too generic to discriminate. A pattern with one or two
//! significant lines must have all of them matched. A longer pattern matches
//! once any two of its significant lines are found (quorum).

/// Minimum normalized length of a pattern line that takes part in matching
pub const SIGNIFICANT_LINE_LEN: usize = 15;

/// Matched significant lines required for patterns with more than two
const QUORUM: usize = 2;

/// Collapse interior whitespace runs into single spaces and trim
pub fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized lines of `text`, skipping blank lines and `#` comment lines
pub fn normalized_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(normalize_line)
        .collect()
}

/// Exact line equality. Used for anti-patterns, where a near miss such as
/// `url=` versus `endpoint=` must not count.
pub fn matches_exact(code_lines: &[String], pattern_lines: &[String]) -> bool {
    matches_with(code_lines, pattern_lines, |pattern, code| pattern == code)
}

/// Two-way substring containment. Used for documented correct usage, where
/// reformatting, extra arguments, or trailing comments are acceptable.
pub fn matches_flexible(code_lines: &[String], pattern_lines: &[String]) -> bool {
    matches_with(code_lines, pattern_lines, |pattern, code| {
        code.contains(pattern) || pattern.contains(code)
    })
}

fn matches_with(
    code_lines: &[String],
    pattern_lines: &[String],
    line_matches: impl Fn(&str, &str) -> bool,
) -> bool {
    let significant: Vec<String> = pattern_lines
        .iter()
        .map(|line| normalize_line(line))
        .filter(|line| line.chars().count() >= SIGNIFICANT_LINE_LEN)
        .collect();

    if significant.is_empty() {
        return false;
    }

    let matched = significant
        .iter()
        .filter(|pattern| code_lines.iter().any(|code| line_matches(pattern, code)))
        .count();

    if significant.len() <= QUORUM {
        matched == significant.len()
    } else {
        matched >= QUORUM
    }
}
