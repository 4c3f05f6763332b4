use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::leaderboard::models::LeaderboardRow;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryDto {
    /// 1-based position; ties broken by earliest last submission, then username
    pub rank: i64,
    pub user_id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_score: Decimal,
    pub submission_count: i64,
    pub correct_count: i64,
    /// Percentage of submissions graded correct, one decimal place
    pub accuracy: f64,
    pub last_submission_at: DateTime<Utc>,
}

fn accuracy(correct: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (correct as f64 * 1000.0 / total as f64).round() / 10.0
}

impl From<LeaderboardRow> for LeaderboardEntryDto {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            rank: row.rank,
            user_id: row.user_id,
            username: row.username,
            full_name: row.full_name,
            total_score: row.total_score,
            submission_count: row.submission_count,
            correct_count: row.correct_count,
            accuracy: accuracy(row.correct_count, row.submission_count),
            last_submission_at: row.last_submission_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(3, 3), 100.0);
        assert_eq!(accuracy(1, 3), 33.3);
        assert_eq!(accuracy(2, 3), 66.7);
    }

    #[test]
    fn test_entry_from_row() {
        let row = LeaderboardRow {
            rank: 1,
            user_id: Uuid::now_v7(),
            username: "linus".to_string(),
            full_name: None,
            total_score: Decimal::new(24550, 2),
            submission_count: 4,
            correct_count: 3,
            last_submission_at: Utc::now(),
        };

        let entry = LeaderboardEntryDto::from(row);
        assert_eq!(entry.accuracy, 75.0);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["total_score"], serde_json::json!(245.5));
    }
}
