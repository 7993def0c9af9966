//! Ratio evaluator: premium of market price over quota and the alert decision.

use quota_common::types::EvaluationResult;

pub struct RatioEvaluator;

impl RatioEvaluator {
    /// `ratio = (market - quota) / quota`, notify when `ratio < target`.
    ///
    /// A zero quota yields a non-finite ratio; `NaN` never notifies and
    /// `-inf` always does.
    pub fn evaluate(quota: f64, market: f64, target: f64) -> EvaluationResult {
        let ratio = (market - quota) / quota;
        EvaluationResult {
            ratio,
            should_notify: ratio < target,
        }
    }
}
