//! Deciding rule checks against a piece of generated code

use std::collections::BTreeSet;

use super::matcher::{matches_exact, matches_flexible, normalize_line, normalized_lines};
use crate::criteria::{CodePattern, RuleCheck};

/// Generated code prepared once per evaluation
pub struct CodeContext<'a> {
    pub code: &'a str,
    /// Normalized non-comment lines
    pub lines: Vec<String>,
    /// Imports from the syntax tree; `None` when the language has no import
    /// analysis
    pub imports: Option<BTreeSet<String>>,
}

impl<'a> CodeContext<'a> {
    pub fn new(code: &'a str, imports: Option<BTreeSet<String>>) -> Self {
        Self {
            code,
            lines: normalized_lines(code),
            imports,
        }
    }

    fn has_import(&self, import: &str) -> Option<bool> {
        self.imports
            .as_ref()
            .map(|imports| imports.contains(&normalize_line(import)))
    }
}

/// Result of deciding one check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Satisfied,
    Violated,
    /// The check needs an analysis the language does not support
    Unsupported,
}

impl CheckOutcome {
    fn from_bool(satisfied: bool) -> Self {
        if satisfied {
            CheckOutcome::Satisfied
        } else {
            CheckOutcome::Violated
        }
    }
}

pub trait CheckEvaluator {
    fn evaluate(&self, ctx: &CodeContext<'_>) -> CheckOutcome;
}

impl CheckEvaluator for RuleCheck<'_> {
    fn evaluate(&self, ctx: &CodeContext<'_>) -> CheckOutcome {
        match self {
            RuleCheck::ImportPresence(import) => ctx
                .has_import(import)
                .map_or(CheckOutcome::Unsupported, CheckOutcome::from_bool),
            RuleCheck::ImportAbsence(import) => ctx
                .has_import(import)
                .map_or(CheckOutcome::Unsupported, |present| {
                    CheckOutcome::from_bool(!present)
                }),
            RuleCheck::ExactAntiPattern(pattern) => {
                CheckOutcome::from_bool(!pattern_matches(ctx, pattern, matches_exact))
            }
            RuleCheck::FlexibleCorrectPattern(pattern) => {
                CheckOutcome::from_bool(pattern_matches(ctx, pattern, matches_flexible))
            }
            RuleCheck::LiteralSubstringPresence(text) => {
                CheckOutcome::from_bool(ctx.code.contains(text))
            }
        }
    }
}

fn is_import_line(line: &str) -> bool {
    line.starts_with("from ") || line.starts_with("import ")
}

/// Whether `pattern` appears in the code.
///
/// Patterns led by an import line are compared statement by statement with
/// the code's imports, and never match without import analysis. Other
/// patterns go through `line_matcher`.
fn pattern_matches(
    ctx: &CodeContext<'_>,
    pattern: &CodePattern,
    line_matcher: fn(&[String], &[String]) -> bool,
) -> bool {
    let pattern_lines = normalized_lines(&pattern.code);
    let Some(first) = pattern_lines.first() else {
        return false;
    };

    if is_import_line(first) {
        return match &ctx.imports {
            Some(imports) => pattern_lines
                .iter()
                .filter(|line| is_import_line(line))
                .any(|line| imports.contains(line)),
            None => false,
        };
    }

    line_matcher(&ctx.lines, &pattern_lines)
}

/// Import lines of an incorrect example that the code reproduces
pub fn reproduced_imports<'p>(pattern: &'p CodePattern, imports: &BTreeSet<String>) -> Vec<&'p str> {
    if !pattern.code.to_lowercase().contains("import") {
        return Vec::new();
    }

    pattern
        .code
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| is_import_line(line))
        .filter(|line| imports.contains(&normalize_line(line)))
        .collect()
}
