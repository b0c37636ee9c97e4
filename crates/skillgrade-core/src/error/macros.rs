//! Error macros for skillgrade

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::SkillgradeError::UsageError($msg.to_string()))
    };
}
