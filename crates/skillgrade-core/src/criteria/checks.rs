//! Tagged checks a validation rule can impose on generated code

use super::CodePattern;
use crate::evaluator::Severity;

/// One check derived from a [`super::ValidationRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCheck<'a> {
    /// The import statement should be present
    ImportPresence(&'a str),
    /// The import statement must not be present
    ImportAbsence(&'a str),
    /// The anti-pattern must not be reproduced (exact line matching)
    ExactAntiPattern(&'a CodePattern),
    /// The documented example should be reproduced (substring line matching)
    FlexibleCorrectPattern(&'a CodePattern),
    /// The literal text should appear somewhere in the code
    LiteralSubstringPresence(&'a str),
}

impl RuleCheck<'_> {
    /// Severity of the finding raised when the check is violated.
    ///
    /// `None` for advisory checks, which only feed the coverage report.
    pub fn violation_severity(&self) -> Option<Severity> {
        match self {
            RuleCheck::ExactAntiPattern(_) | RuleCheck::ImportAbsence(_) => Some(Severity::Error),
            RuleCheck::LiteralSubstringPresence(_) => Some(Severity::Warning),
            RuleCheck::ImportPresence(_) | RuleCheck::FlexibleCorrectPattern(_) => None,
        }
    }
}
