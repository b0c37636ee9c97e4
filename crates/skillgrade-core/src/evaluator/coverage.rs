//! Per-rule report of how much documented correct usage the code follows.
//! Diagnostic only: coverage never changes findings or score.

use serde::Serialize;

use super::checks::{CheckEvaluator, CheckOutcome, CodeContext};
use crate::criteria::{RuleCheck, ValidationRule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCoverage {
    pub rule: String,
    pub correct_patterns: usize,
    /// Correct examples reproduced under flexible matching
    pub reproduced_correct: usize,
    pub present_imports: Vec<String>,
    pub missing_imports: Vec<String>,
    /// False when the language has no import analysis; both import lists
    /// are then empty
    pub imports_checked: bool,
}

pub(crate) fn rule_coverage(rule: &ValidationRule, ctx: &CodeContext<'_>) -> RuleCoverage {
    let mut coverage = RuleCoverage {
        rule: rule.name.clone(),
        correct_patterns: rule.correct_patterns.len(),
        reproduced_correct: 0,
        present_imports: Vec::new(),
        missing_imports: Vec::new(),
        imports_checked: ctx.imports.is_some(),
    };

    for check in rule.checks() {
        let outcome = check.evaluate(ctx);
        match (check, outcome) {
            (RuleCheck::FlexibleCorrectPattern(_), CheckOutcome::Satisfied) => {
                coverage.reproduced_correct += 1;
            }
            (RuleCheck::ImportPresence(import), CheckOutcome::Satisfied) => {
                coverage.present_imports.push(import.to_string());
            }
            (RuleCheck::ImportPresence(import), CheckOutcome::Violated) => {
                coverage.missing_imports.push(import.to_string());
            }
            _ => {}
        }
    }

    coverage
}
