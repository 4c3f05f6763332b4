use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::grading::GradingOutcome;

/// Database model for submission
#[derive(Debug, Clone, FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub code: Option<String>,
    pub explanation: Option<String>,
    pub score: Decimal,
    pub max_score: Decimal,
    pub is_correct: bool,
    pub feedback: String,
    pub test_results: Option<Value>,
    pub grading_details: Value,
    pub submitted_at: DateTime<Utc>,
}

/// A graded submission ready to be stored
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub code: Option<String>,
    pub explanation: Option<String>,
    pub outcome: GradingOutcome,
}
