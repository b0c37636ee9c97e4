//! Findings and evaluation verdicts

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity levels for evaluation findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Incorrect pattern, import, or syntax. Fails the evaluation.
    Error,
    /// Missing recommended pattern
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single observation from one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// Rule name, `pattern:<section>`, `imports` or `syntax`
    pub rule: String,
    pub message: String,
    /// Only set for syntax errors
    pub line: Option<usize>,
    /// Only set for syntax errors
    pub column: Option<usize>,
    pub code_snippet: String,
    pub suggestion: String,
}

impl Finding {
    pub fn new(severity: Severity, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            rule: rule.into(),
            message: message.into(),
            line: None,
            column: None,
            code_snippet: String::new(),
            suggestion: String::new(),
        }
    }

    pub fn with_position(mut self, line: Option<usize>, column: Option<usize>) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.code_snippet = snippet.into();
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "severity": self.severity,
            "rule": self.rule,
            "message": self.message,
            "line": self.line,
            "suggestion": self.suggestion,
        })
    }
}

/// Verdict for one (criteria, code, scenario) evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub skill_name: String,
    pub scenario: String,
    /// The evaluated code, kept verbatim for auditing
    pub generated_code: String,
    pub findings: Vec<Finding>,
    /// Sections whose correct patterns matched, duplicates allowed
    pub matched_correct: Vec<String>,
    /// Sections whose incorrect patterns matched, duplicates allowed
    pub matched_incorrect: Vec<String>,
    /// 0.0 to 100.0
    pub score: f64,
}

impl EvaluationResult {
    pub(crate) fn new(skill_name: &str, scenario: &str, generated_code: &str) -> Self {
        Self {
            skill_name: skill_name.to_string(),
            scenario: scenario.to_string(),
            generated_code: generated_code.to_string(),
            findings: Vec::new(),
            matched_correct: Vec::new(),
            matched_incorrect: Vec::new(),
            score: 0.0,
        }
    }

    /// True iff no finding has error severity
    pub fn passed(&self) -> bool {
        !self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Serializable summary; omits the generated code
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "skill_name": self.skill_name,
            "scenario": self.scenario,
            "passed": self.passed(),
            "score": self.score,
            "error_count": self.error_count(),
            "warning_count": self.warning_count(),
            "findings": self.findings.iter().map(Finding::to_json).collect::<Vec<_>>(),
            "matched_correct": self.matched_correct,
            "matched_incorrect": self.matched_incorrect,
        })
    }
}
