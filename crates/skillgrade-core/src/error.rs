//! Error types and exit codes for skillgrade
//!
//! Exit codes:
//! - 0: Success (including evaluations that did not pass)
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (missing criteria document, unreadable config)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing criteria, invalid config (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while loading criteria or running the CLI.
///
/// Evaluation itself never fails: unparsable code and pattern violations are
/// reported as findings on the result.
#[derive(Error, Debug)]
pub enum SkillgradeError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("acceptance criteria not found for {skill}: {path:?}")]
    CriteriaNotFound { skill: String, path: PathBuf },

    #[error("code file not found: {path:?}")]
    CodeFileNotFound { path: PathBuf },

    #[error("invalid config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl SkillgradeError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        SkillgradeError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a config file that could not be parsed
    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        SkillgradeError::InvalidConfig {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SkillgradeError::UnknownFormat(_) | SkillgradeError::UsageError(_) => ExitCode::Usage,

            SkillgradeError::CriteriaNotFound { .. }
            | SkillgradeError::CodeFileNotFound { .. }
            | SkillgradeError::InvalidConfig { .. } => ExitCode::Data,

            SkillgradeError::Io(_)
            | SkillgradeError::Json(_)
            | SkillgradeError::FailedOperationWithTarget { .. }
            | SkillgradeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            SkillgradeError::UnknownFormat(_) => "unknown_format",
            SkillgradeError::UsageError(_) => "usage_error",
            SkillgradeError::CriteriaNotFound { .. } => "criteria_not_found",
            SkillgradeError::CodeFileNotFound { .. } => "code_file_not_found",
            SkillgradeError::InvalidConfig { .. } => "invalid_config",
            SkillgradeError::Io(_) => "io_error",
            SkillgradeError::Json(_) => "json_error",
            SkillgradeError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            SkillgradeError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for skillgrade operations
pub type Result<T> = std::result::Result<T, SkillgradeError>;
