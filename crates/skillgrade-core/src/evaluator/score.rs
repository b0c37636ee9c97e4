//! Scoring rubric

use super::EvaluationResult;

/// Score when nothing matched and nothing was found
pub const NEUTRAL_SCORE: f64 = 50.0;
pub const BASE_SCORE: f64 = 100.0;
pub const ERROR_PENALTY: f64 = 20.0;
pub const WARNING_PENALTY: f64 = 5.0;
pub const CORRECT_MATCH_BONUS: f64 = 5.0;
/// Applied on top of the error penalty of the same match
pub const INCORRECT_MATCH_PENALTY: f64 = 15.0;

/// Score a result from its findings and matched sections, clamped to 0-100
pub fn calculate(result: &EvaluationResult) -> f64 {
    if result.findings.is_empty() && result.matched_correct.is_empty() {
        return NEUTRAL_SCORE;
    }

    let score = BASE_SCORE - result.error_count() as f64 * ERROR_PENALTY
        - result.warning_count() as f64 * WARNING_PENALTY
        + result.matched_correct.len() as f64 * CORRECT_MATCH_BONUS
        - result.matched_incorrect.len() as f64 * INCORRECT_MATCH_PENALTY;

    score.clamp(0.0, 100.0)
}
