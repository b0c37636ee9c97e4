//! Skillgrade Core Library
//!
//! Parses skill acceptance-criteria documents into structured rules and
//! grades generated code against them.

pub mod config;
pub mod criteria;
pub mod error;
pub mod evaluator;
pub mod language;
pub mod logging;

pub use criteria::{AcceptanceCriteria, CodePattern, CriteriaLoader, ValidationRule};
pub use evaluator::{CodeEvaluator, EvaluationResult, Finding, RuleCoverage, Severity};
pub use language::Language;
