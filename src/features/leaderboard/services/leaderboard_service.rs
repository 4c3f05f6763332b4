use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::leaderboard::dtos::LeaderboardEntryDto;
use crate::features::leaderboard::models::LeaderboardRow;
use crate::shared::types::PaginationQuery;

pub struct LeaderboardService {
    pool: PgPool,
}

impl LeaderboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active users with at least one submission, ranked by total score
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<LeaderboardEntryDto>, i64)> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT
                ROW_NUMBER() OVER (
                    ORDER BY SUM(s.score) DESC, MAX(s.submitted_at) ASC, u.username ASC
                ) AS rank,
                u.id AS user_id,
                u.username,
                u.full_name,
                SUM(s.score) AS total_score,
                COUNT(s.id) AS submission_count,
                COUNT(s.id) FILTER (WHERE s.is_correct) AS correct_count,
                MAX(s.submitted_at) AS last_submission_at
            FROM users u
            JOIN submissions s ON s.user_id = u.id
            WHERE u.is_active = TRUE
            GROUP BY u.id, u.username, u.full_name
            ORDER BY rank
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load leaderboard: {:?}", e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT s.user_id)
            FROM submissions s
            JOIN users u ON u.id = s.user_id
            WHERE u.is_active = TRUE
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }
}
