use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::submissions::models::Submission;

/// Request DTO for submitting a solution
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSubmissionDto {
    pub challenge_id: Uuid,

    /// Fixed code (debugging challenges)
    #[validate(length(max = 50000, message = "Code must be at most 50000 characters"))]
    pub code: Option<String>,

    /// Explanation or code review (comprehension, ai_review and security challenges)
    #[validate(length(max = 20000, message = "Explanation must be at most 20000 characters"))]
    pub explanation: Option<String>,
}

/// Response DTO for submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponseDto {
    pub id: Uuid,
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub code: Option<String>,
    pub explanation: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub score: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub max_score: Decimal,
    pub is_correct: bool,
    pub feedback: String,
    pub test_results: Option<Value>,
    /// Rubric sub-scores, or pass/total counts for test-graded challenges
    pub grading_details: Value,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponseDto {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            challenge_id: s.challenge_id,
            user_id: s.user_id,
            code: s.code,
            explanation: s.explanation,
            score: s.score,
            max_score: s.max_score,
            is_correct: s.is_correct,
            feedback: s.feedback,
            test_results: s.test_results,
            grading_details: s.grading_details,
            submitted_at: s.submitted_at,
        }
    }
}
