use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// One ranked user, aggregated over their submissions
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRow {
    pub rank: i64,
    pub user_id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub total_score: Decimal,
    pub submission_count: i64,
    pub correct_count: i64,
    pub last_submission_at: DateTime<Utc>,
}
