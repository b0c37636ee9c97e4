//! Grading generated code against acceptance criteria
//!
//! [`CodeEvaluator::evaluate`] runs a fixed pipeline:
//! 1. syntax check (languages with a parser); failure ends the evaluation
//!    with a single `syntax` error and a score of 0
//! 2. imports reproduced from incorrect examples
//! 3. document-wide incorrect-pattern regexes
//! 4. document-wide correct-pattern regexes (scored, never reported)
//! 5. rule-scoped checks
//! 6. scoring
//!
//! Nothing in the pipeline fails: every problem with the code becomes a
//! [`Finding`].

pub mod checks;
pub mod coverage;
pub mod matcher;
pub mod pattern_regex;
mod result;
pub mod score;

use std::collections::HashSet;
use std::time::Instant;

use regex::Regex;
use tracing::debug;

use crate::criteria::{AcceptanceCriteria, RuleCheck, ValidationRule};
use crate::language::python::{PythonSource, SyntaxDiagnostic};
use crate::language::Language;
use checks::{CheckEvaluator, CheckOutcome, CodeContext};

pub use coverage::RuleCoverage;
pub use result::{EvaluationResult, Finding, Severity};

/// Characters of an example kept in a finding's snippet
const SNIPPET_CHARS: usize = 100;

struct CompiledPattern {
    section: String,
    code: String,
    regex: Regex,
}

/// Evaluates code against one skill's criteria.
///
/// Regexes are compiled once at construction; `evaluate` takes `&self` and
/// keeps no state between calls, so one evaluator can serve many threads.
pub struct CodeEvaluator {
    criteria: AcceptanceCriteria,
    correct: Vec<CompiledPattern>,
    incorrect: Vec<CompiledPattern>,
}

impl CodeEvaluator {
    pub fn new(criteria: AcceptanceCriteria) -> Self {
        let correct = compile_patterns(&criteria.correct_patterns);
        let incorrect = compile_patterns(&criteria.incorrect_patterns);

        debug!(
            skill = %criteria.skill_name,
            correct = correct.len(),
            incorrect = incorrect.len(),
            "patterns_compiled"
        );

        Self {
            criteria,
            correct,
            incorrect,
        }
    }

    pub fn criteria(&self) -> &AcceptanceCriteria {
        &self.criteria
    }

    /// Grade `code`. `scenario` is carried into the result for reporting.
    #[tracing::instrument(skip(self, code), fields(skill = %self.criteria.skill_name))]
    pub fn evaluate(&self, code: &str, scenario: &str) -> EvaluationResult {
        let start = Instant::now();
        let mut result = EvaluationResult::new(&self.criteria.skill_name, scenario, code);

        let ctx = match self.analyze(code) {
            Ok(ctx) => ctx,
            Err(diagnostic) => {
                debug!(line = ?diagnostic.line, reason = %diagnostic.message, "syntax_error");
                result.findings.push(
                    Finding::new(
                        Severity::Error,
                        "syntax",
                        format!("Syntax error: {}", diagnostic.message),
                    )
                    .with_position(diagnostic.line, diagnostic.column),
                );
                result.score = 0.0;
                return result;
            }
        };

        self.check_imports(&ctx, &mut result);
        let flagged = self.check_incorrect_patterns(code, &mut result);
        self.check_correct_patterns(code, &mut result);
        for rule in &self.criteria.rules {
            check_rule(rule, &ctx, &flagged, &mut result);
        }

        result.score = score::calculate(&result);

        crate::trace_time!(start, "evaluate");
        debug!(
            score = result.score,
            errors = result.error_count(),
            warnings = result.warning_count(),
            "evaluated"
        );

        result
    }

    /// Per-rule coverage of correct examples and required imports.
    ///
    /// Code that fails the syntax check is still reported, without import
    /// analysis.
    pub fn coverage(&self, code: &str) -> Vec<RuleCoverage> {
        let ctx = self
            .analyze(code)
            .unwrap_or_else(|_| CodeContext::new(code, None));

        self.criteria
            .rules
            .iter()
            .map(|rule| coverage::rule_coverage(rule, &ctx))
            .collect()
    }

    /// Parse the code when the language has parser-backed checks
    fn analyze<'c>(&self, code: &'c str) -> Result<CodeContext<'c>, SyntaxDiagnostic> {
        let capabilities = self.criteria.language.capabilities();

        match self.criteria.language {
            Language::Python if capabilities.syntax_check || capabilities.import_analysis => {
                match PythonSource::parse(code) {
                    Ok(source) => {
                        let imports = capabilities.import_analysis.then(|| source.imports());
                        Ok(CodeContext::new(code, imports))
                    }
                    Err(diagnostic) if capabilities.syntax_check => Err(diagnostic),
                    Err(_) => Ok(CodeContext::new(code, None)),
                }
            }
            _ => Ok(CodeContext::new(code, None)),
        }
    }

    /// Report every import line of an incorrect example that the code
    /// reproduces
    fn check_imports(&self, ctx: &CodeContext<'_>, result: &mut EvaluationResult) {
        let Some(imports) = &ctx.imports else {
            return;
        };

        for pattern in &self.criteria.incorrect_patterns {
            for line in checks::reproduced_imports(pattern, imports) {
                result.findings.push(
                    Finding::new(Severity::Error, "imports", format!("Incorrect import: {line}"))
                        .with_suggestion(format!(
                            "Check acceptance criteria section: {}",
                            pattern.section
                        )),
                );
            }
        }
    }

    /// Returns the (section, code) of every incorrect example that matched,
    /// so rule-scoped checks do not report it a second time
    fn check_incorrect_patterns<'s>(
        &'s self,
        code: &str,
        result: &mut EvaluationResult,
    ) -> HashSet<(&'s str, &'s str)> {
        let mut flagged = HashSet::new();

        for pattern in &self.incorrect {
            if !pattern.regex.is_match(code) {
                continue;
            }
            flagged.insert((pattern.section.as_str(), pattern.code.as_str()));
            result.matched_incorrect.push(pattern.section.clone());
            result.findings.push(
                Finding::new(
                    Severity::Error,
                    format!("pattern:{}", pattern.section),
                    format!("Incorrect pattern found from section: {}", pattern.section),
                )
                .with_snippet(snippet(&pattern.code))
                .with_suggestion("Review acceptance criteria for correct usage"),
            );
        }

        flagged
    }

    fn check_correct_patterns(&self, code: &str, result: &mut EvaluationResult) {
        for pattern in &self.correct {
            if pattern.regex.is_match(code) {
                result.matched_correct.push(pattern.section.clone());
            }
        }
    }
}

fn compile_patterns(patterns: &[crate::criteria::CodePattern]) -> Vec<CompiledPattern> {
    patterns
        .iter()
        .filter_map(|pattern| {
            let Some(regex) = pattern_regex::pattern_to_regex(&pattern.code) else {
                debug!(section = %pattern.section, "skipping pattern without a usable regex");
                return None;
            };
            Some(CompiledPattern {
                section: pattern.section.clone(),
                code: pattern.code.clone(),
                regex,
            })
        })
        .collect()
}

/// Run the reporting checks of one rule
fn check_rule(
    rule: &ValidationRule,
    ctx: &CodeContext<'_>,
    flagged: &HashSet<(&str, &str)>,
    result: &mut EvaluationResult,
) {
    for check in rule.checks() {
        let Some(severity) = check.violation_severity() else {
            continue;
        };
        if let RuleCheck::ExactAntiPattern(pattern) = check {
            if flagged.contains(&(pattern.section.as_str(), pattern.code.as_str())) {
                continue;
            }
        }
        if check.evaluate(ctx) != CheckOutcome::Violated {
            continue;
        }
        result.findings.push(violation(rule, check, severity));
    }
}

fn violation(rule: &ValidationRule, check: RuleCheck<'_>, severity: Severity) -> Finding {
    match check {
        RuleCheck::ExactAntiPattern(pattern) => Finding::new(
            severity,
            &rule.name,
            format!("Incorrect usage in {}", rule.name),
        )
        .with_snippet(snippet(&pattern.code)),
        RuleCheck::ImportAbsence(import) => {
            Finding::new(severity, &rule.name, format!("Forbidden import: {import}"))
        }
        RuleCheck::LiteralSubstringPresence(text) => Finding::new(
            severity,
            &rule.name,
            format!("Missing recommended pattern: {text}"),
        ),
        RuleCheck::ImportPresence(import) => {
            Finding::new(severity, &rule.name, format!("Missing import: {import}"))
        }
        RuleCheck::FlexibleCorrectPattern(pattern) => Finding::new(
            severity,
            &rule.name,
            format!("Documented usage not followed in {}", rule.name),
        )
        .with_snippet(snippet(&pattern.code)),
    }
}

fn snippet(code: &str) -> String {
    code.chars().take(SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CodePattern;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_evaluator_is_shareable() {
        assert_send_sync::<CodeEvaluator>();
        assert_send_sync::<AcceptanceCriteria>();
    }

    #[test]
    fn test_empty_patterns_are_not_compiled() {
        let doc = "## Empty\n❌\n```python\n```\n";
        let criteria = AcceptanceCriteria::parse("demo-py", "c.md", doc);
        assert_eq!(criteria.incorrect_patterns.len(), 1);

        let evaluator = CodeEvaluator::new(criteria);
        assert!(evaluator.incorrect.is_empty());
        assert!(evaluator.evaluate("x = 1\n", "").passed());
    }

    #[test]
    fn test_required_patterns_warn_when_missing() {
        let mut criteria = AcceptanceCriteria::parse("demo-py", "c.md", "");
        criteria.rules.push(ValidationRule {
            name: "Cleanup".to_string(),
            correct_patterns: vec![CodePattern {
                code: "with client:".to_string(),
                language: "python".to_string(),
                is_correct: true,
                section: "Cleanup".to_string(),
                description: None,
            }],
            required_patterns: vec!["with client".to_string(), "close()".to_string()],
            ..Default::default()
        });

        let result = CodeEvaluator::new(criteria).evaluate("with client:\n    pass\n", "");
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.findings[0].message, "Missing recommended pattern: close()");
        assert_eq!(result.findings[0].rule, "Cleanup");
        assert!(result.passed());
        assert_eq!(result.score, 95.0);
    }

    #[test]
    fn test_forbidden_imports_are_reported_when_populated() {
        let mut criteria = AcceptanceCriteria::parse("demo-py", "c.md", "");
        criteria.rules.push(ValidationRule {
            name: "Imports".to_string(),
            forbidden_imports: vec!["import requests".to_string()],
            ..Default::default()
        });

        let result = CodeEvaluator::new(criteria).evaluate("import requests\n", "");
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.findings[0].message, "Forbidden import: import requests");
    }

    #[test]
    fn test_snippet_is_bounded() {
        let long = "é".repeat(300);
        assert_eq!(snippet(&long).chars().count(), 100);
    }
}
