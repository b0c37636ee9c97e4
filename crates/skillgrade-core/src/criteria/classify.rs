//! Correctness labeling of code blocks
//!
//! A block is labeled from the 200 characters written just before it. When
//! that window carries no marker, the section's majority label applies, and
//! when the section is balanced the block counts as correct.

/// Markers counted toward a correct section
pub const SECTION_CORRECT_MARKERS: [&str; 4] = ["✅", "Correct", "DO:", "Good"];

/// Markers counted toward an incorrect section
pub const SECTION_INCORRECT_MARKERS: [&str; 5] = ["❌", "Incorrect", "DON'T:", "Bad", "Anti-pattern"];

/// Markers that label a single block as incorrect. Checked before the
/// correct markers.
pub const BLOCK_INCORRECT_MARKERS: [&str; 3] = ["❌", "Incorrect", "DON'T"];

/// Markers that label a single block as correct
pub const BLOCK_CORRECT_MARKERS: [&str; 2] = ["✅", "Correct"];

/// Characters before a block inspected for markers
pub const PRECEDING_WINDOW_CHARS: usize = 200;

/// Longest prefix of a block used to locate it in its section
pub const ANCHOR_CHARS: usize = 50;

/// Majority label of a section: `Some(true)` when correct markers outnumber
/// incorrect ones, `Some(false)` for the reverse, `None` on a tie.
pub fn section_default(body: &str) -> Option<bool> {
    let correct = count_markers(body, &SECTION_CORRECT_MARKERS);
    let incorrect = count_markers(body, &SECTION_INCORRECT_MARKERS);

    match correct.cmp(&incorrect) {
        std::cmp::Ordering::Greater => Some(true),
        std::cmp::Ordering::Less => Some(false),
        std::cmp::Ordering::Equal => None,
    }
}

/// Label one block. `code` is the raw block body as it appears in `body`.
pub fn block_correctness(code: &str, body: &str, section_default: Option<bool>) -> bool {
    let fallback = section_default.unwrap_or(true);

    let Some(position) = body.find(anchor(code)) else {
        return fallback;
    };

    let window = preceding_window(&body[..position]);
    if BLOCK_INCORRECT_MARKERS.iter().any(|m| window.contains(m)) {
        return false;
    }
    if BLOCK_CORRECT_MARKERS.iter().any(|m| window.contains(m)) {
        return true;
    }
    fallback
}

fn count_markers(text: &str, markers: &[&str]) -> usize {
    markers.iter().map(|m| text.matches(m).count()).sum()
}

/// First [`ANCHOR_CHARS`] characters of `code`
fn anchor(code: &str) -> &str {
    match code.char_indices().nth(ANCHOR_CHARS) {
        Some((end, _)) => &code[..end],
        None => code,
    }
}

/// Last [`PRECEDING_WINDOW_CHARS`] characters of `before`
fn preceding_window(before: &str) -> &str {
    match before.char_indices().rev().nth(PRECEDING_WINDOW_CHARS - 1) {
        Some((start, _)) => &before[start..],
        None => before,
    }
}
