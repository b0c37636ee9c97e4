//! Minimal markdown structure recovery: level-2 sections and fenced code
//!
//! Only `## ` headers and triple-backtick fences are recognized. Everything
//! else is treated as plain text.

use std::sync::OnceLock;

use regex::Regex;

static SECTION_HEADER: OnceLock<Regex> = OnceLock::new();
static CODE_FENCE: OnceLock<Regex> = OnceLock::new();

fn section_header() -> &'static Regex {
    SECTION_HEADER.get_or_init(|| Regex::new(r"(?m)^## ").expect("static regex"))
}

fn code_fence() -> &'static Regex {
    CODE_FENCE.get_or_init(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").expect("static regex"))
}

/// One `## ` section: the header text and everything up to the next header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// One fenced code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock<'a> {
    /// Tag after the opening fence, if any
    pub lang: Option<&'a str>,
    /// Block body exactly as written, including its trailing newline
    pub code: &'a str,
}

/// Split a document on lines starting with `## `.
///
/// Text before the first header is preamble and dropped, as are sections
/// that are entirely whitespace.
pub fn split_into_sections(content: &str) -> Vec<Section<'_>> {
    let starts: Vec<usize> = section_header().find_iter(content).map(|m| m.start()).collect();

    let mut sections = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(content.len());
        let chunk = &content[start + 3..end];
        if chunk.trim().is_empty() {
            continue;
        }

        let (title, body) = chunk.split_once('\n').unwrap_or((chunk, ""));
        sections.push(Section {
            title: title.trim(),
            body,
        });
    }
    sections
}

/// Fenced code blocks in document order
pub fn extract_code_blocks(text: &str) -> Vec<CodeBlock<'_>> {
    code_fence()
        .captures_iter(text)
        .filter_map(|cap| {
            let code = cap.get(2)?.as_str();
            Some(CodeBlock {
                lang: cap.get(1).map(|m| m.as_str()),
                code,
            })
        })
        .collect()
}
