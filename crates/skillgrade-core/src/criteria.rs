//! Acceptance criteria model and markdown extraction
//!
//! A criteria document is split into `## ` sections. Every fenced code block
//! becomes a [`CodePattern`] labeled correct or incorrect. Each section that
//! is not an overview becomes a [`ValidationRule`] carrying its own patterns
//! and the imports its prose mentions.
//!
//! Patterns are tracked twice: flat on [`AcceptanceCriteria`] for
//! document-wide checks, and per rule for rule-scoped checks.

pub mod checks;
pub mod classify;
pub mod loader;
pub mod markdown;

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::language::Language;
use markdown::Section;

pub use checks::RuleCheck;
pub use loader::CriteriaLoader;

/// Section titles containing any of these (case-insensitive) never become rules
const NON_RULE_SECTIONS: [&str; 3] = ["overview", "introduction", "quick reference"];

static FROM_IMPORT: OnceLock<Regex> = OnceLock::new();

fn from_import() -> &'static Regex {
    FROM_IMPORT.get_or_init(|| {
        Regex::new(r"from[ \t]+([\w.]+)[ \t]+import[ \t]+([\w, \t]+)").expect("static regex")
    })
}

/// One example code block from the criteria document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodePattern {
    /// Block body, trimmed
    pub code: String,
    /// Fence tag, or the criteria language when the fence has none
    pub language: String,
    pub is_correct: bool,
    /// Title of the enclosing section
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Criteria for one documentation section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationRule {
    pub name: String,
    pub description: String,
    pub correct_patterns: Vec<CodePattern>,
    pub incorrect_patterns: Vec<CodePattern>,
    pub required_imports: Vec<String>,
    /// Never populated by extraction; forbidden imports are caught through
    /// the incorrect-pattern import check instead.
    pub forbidden_imports: Vec<String>,
    /// Literal substrings the code should contain. Not populated by
    /// extraction.
    pub required_patterns: Vec<String>,
    /// Not populated by extraction and not checked.
    pub forbidden_patterns: Vec<String>,
}

impl ValidationRule {
    /// Every check this rule defines, anti-patterns first
    pub fn checks(&self) -> Vec<RuleCheck<'_>> {
        let mut checks = Vec::new();
        checks.extend(self.incorrect_patterns.iter().map(RuleCheck::ExactAntiPattern));
        checks.extend(
            self.forbidden_imports
                .iter()
                .map(|i| RuleCheck::ImportAbsence(i.as_str())),
        );
        checks.extend(
            self.required_patterns
                .iter()
                .map(|p| RuleCheck::LiteralSubstringPresence(p.as_str())),
        );
        checks.extend(
            self.correct_patterns
                .iter()
                .map(RuleCheck::FlexibleCorrectPattern),
        );
        checks.extend(
            self.required_imports
                .iter()
                .map(|i| RuleCheck::ImportPresence(i.as_str())),
        );
        checks
    }

    fn has_patterns(&self) -> bool {
        !self.correct_patterns.is_empty() || !self.incorrect_patterns.is_empty()
    }
}

/// Parsed acceptance criteria for one skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptanceCriteria {
    pub skill_name: String,
    pub source_path: PathBuf,
    pub language: Language,
    pub rules: Vec<ValidationRule>,
    /// Every correct pattern in the document, independent of rules
    pub correct_patterns: Vec<CodePattern>,
    /// Every incorrect pattern in the document, independent of rules
    pub incorrect_patterns: Vec<CodePattern>,
}

impl AcceptanceCriteria {
    /// Build criteria from markdown text.
    ///
    /// Never fails: a document without sections or code blocks yields
    /// criteria with no rules and no patterns. `\r\n` and lone `\r` line
    /// endings are read as `\n`.
    pub fn parse(skill_name: &str, source_path: impl Into<PathBuf>, content: &str) -> Self {
        let language = Language::from_skill_name(skill_name);
        let content = normalize_newlines(content);

        let mut criteria = Self {
            skill_name: skill_name.to_string(),
            source_path: source_path.into(),
            language,
            rules: Vec::new(),
            correct_patterns: Vec::new(),
            incorrect_patterns: Vec::new(),
        };

        for section in markdown::split_into_sections(&content) {
            let patterns = section_patterns(&section, language);

            for pattern in &patterns {
                if pattern.is_correct {
                    criteria.correct_patterns.push(pattern.clone());
                } else {
                    criteria.incorrect_patterns.push(pattern.clone());
                }
            }

            if let Some(rule) = build_rule(&section, patterns) {
                criteria.rules.push(rule);
            }
        }

        criteria
    }

    /// Case-insensitive rule lookup
    pub fn get_rule(&self, name: &str) -> Option<&ValidationRule> {
        let name = name.to_lowercase();
        self.rules.iter().find(|r| r.name.to_lowercase() == name)
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Label every code block of a section
fn section_patterns(section: &Section<'_>, language: Language) -> Vec<CodePattern> {
    let default = classify::section_default(section.body);

    markdown::extract_code_blocks(section.body)
        .into_iter()
        .map(|block| CodePattern {
            code: block.code.trim().to_string(),
            language: block
                .lang
                .map(str::to_string)
                .unwrap_or_else(|| language.as_str().to_string()),
            is_correct: classify::block_correctness(block.code, section.body, default),
            section: section.title.to_string(),
            description: None,
        })
        .collect()
}

fn build_rule(section: &Section<'_>, patterns: Vec<CodePattern>) -> Option<ValidationRule> {
    let title = section.title.to_lowercase();
    if NON_RULE_SECTIONS.iter().any(|skip| title.contains(skip)) {
        return None;
    }

    let (correct_patterns, incorrect_patterns) = patterns.into_iter().partition(|p| p.is_correct);

    let rule = ValidationRule {
        name: section.title.to_string(),
        description: leading_paragraph(section.body),
        correct_patterns,
        incorrect_patterns,
        required_imports: mentioned_imports(section.body),
        ..Default::default()
    };

    rule.has_patterns().then_some(rule)
}

/// First paragraph of a section, stopping at a header or fence
fn leading_paragraph(body: &str) -> String {
    let mut lines = Vec::new();
    for line in body.split('\n') {
        if line.starts_with('#') || line.starts_with("```") {
            break;
        }
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line);
        } else if !lines.is_empty() {
            break;
        }
    }
    lines.join(" ")
}

/// `from X import a, b` mentions, one entry per imported name
fn mentioned_imports(body: &str) -> Vec<String> {
    let mut imports = Vec::new();
    for cap in from_import().captures_iter(body) {
        let module = &cap[1];
        for name in cap[2].split(',').map(str::trim).filter(|n| !n.is_empty()) {
            imports.push(format!("from {module} import {name}"));
        }
    }
    imports
}
