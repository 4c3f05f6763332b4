use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::shared::constants::MAX_SCORE;

const FALLBACK_SCORE: u32 = 50;
const FALLBACK_FEEDBACK: &str = "Submission received. Automated grading temporarily unavailable.";

const MANUAL_REVIEW_SCORE: u32 = 50;
const MANUAL_REVIEW_FEEDBACK: &str = "Submission received. Manual grading required.";

const TESTS_PENDING_SCORE: u32 = 75;
const TESTS_PENDING_FEEDBACK: &str =
    "Code submitted successfully! Automated testing will be added in a future update.";

/// Normalized result of grading one submission
#[derive(Debug, Clone, PartialEq)]
pub struct GradingOutcome {
    pub score: Decimal,
    pub max_score: Decimal,
    pub is_correct: bool,
    pub feedback: String,
    pub breakdown: Map<String, Value>,
}

impl GradingOutcome {
    fn fixed(score: u32, is_correct: bool, feedback: &str) -> Self {
        Self {
            score: Decimal::from(score),
            max_score: Decimal::from(MAX_SCORE),
            is_correct,
            feedback: feedback.to_string(),
            breakdown: Map::new(),
        }
    }

    /// Used whenever automated grading could not produce a score
    pub fn fallback() -> Self {
        Self::fixed(FALLBACK_SCORE, false, FALLBACK_FEEDBACK)
    }

    pub fn manual_review() -> Self {
        Self::fixed(MANUAL_REVIEW_SCORE, false, MANUAL_REVIEW_FEEDBACK)
    }

    /// Debugging submissions while no code runner is wired in
    pub fn tests_pending() -> Self {
        Self::fixed(TESTS_PENDING_SCORE, true, TESTS_PENDING_FEEDBACK)
    }

    /// Outcome from a validated model reply. `score` must already be within 0..=100.
    pub fn from_reply(
        score: u32,
        pass_threshold: u32,
        feedback: String,
        breakdown: Map<String, Value>,
    ) -> Self {
        let score = score.min(MAX_SCORE);
        Self {
            score: Decimal::from(score),
            max_score: Decimal::from(MAX_SCORE),
            is_correct: score >= pass_threshold,
            feedback,
            breakdown,
        }
    }

    /// Outcome from test-case counts; score is the pass percentage rounded to two decimals
    pub fn from_test_counts(passed: usize, total: usize) -> Self {
        let score = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(passed as u64 * 100) / Decimal::from(total as u64)).round_dp(2)
        };

        let all_passed = passed == total;

        let mut feedback = format!("Passed {} out of {} test cases.", passed, total);
        if all_passed {
            feedback.push_str(" Perfect! All tests passed.");
        } else if passed * 10 > total * 7 {
            feedback.push_str(" Good work, but some edge cases failed.");
        } else {
            feedback.push_str(" Review the failed test cases and try again.");
        }

        let mut breakdown = Map::new();
        breakdown.insert("passed".to_string(), Value::from(passed));
        breakdown.insert("total".to_string(), Value::from(total));

        Self {
            score,
            max_score: Decimal::from(MAX_SCORE),
            is_correct: all_passed,
            feedback,
            breakdown,
        }
    }

    pub fn breakdown_value(&self) -> Value {
        Value::Object(self.breakdown.clone())
    }
}
