use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::challenges::dtos::{
    ChallengeListItemDto, ChallengeListQuery, ChallengeResponseDto, CreateChallengeDto,
    UpdateChallengeDto,
};
use crate::features::challenges::models::Challenge;
use crate::shared::types::PaginationQuery;

pub(crate) const CHALLENGE_COLUMNS: &str = "id, title, category, difficulty, description, \
     code_snippet, language, test_cases, grading_criteria, time_limit, points, created_by, \
     is_active, created_at, updated_at";

/// Service for challenge operations
pub struct ChallengeService {
    pool: PgPool,
}

impl ChallengeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List active challenges matching the filters, with the unpaginated total
    pub async fn list(
        &self,
        filter: &ChallengeListQuery,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ChallengeListItemDto>, i64)> {
        let challenges = sqlx::query_as::<_, Challenge>(&format!(
            r#"
            SELECT {}
            FROM challenges
            WHERE is_active = TRUE
              AND ($1::challenge_category IS NULL OR category = $1)
              AND ($2::challenge_difficulty IS NULL OR difficulty = $2)
            ORDER BY created_at DESC, id
            LIMIT $3 OFFSET $4
            "#,
            CHALLENGE_COLUMNS
        ))
        .bind(filter.category)
        .bind(filter.difficulty)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list challenges: {:?}", e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM challenges
            WHERE is_active = TRUE
              AND ($1::challenge_category IS NULL OR category = $1)
              AND ($2::challenge_difficulty IS NULL OR difficulty = $2)
            "#,
        )
        .bind(filter.category)
        .bind(filter.difficulty)
        .fetch_one(&self.pool)
        .await?;

        Ok((challenges.into_iter().map(Into::into).collect(), total))
    }

    /// Get an active challenge by id
    pub async fn get(&self, id: Uuid) -> Result<ChallengeResponseDto> {
        sqlx::query_as::<_, Challenge>(&format!(
            "SELECT {} FROM challenges WHERE id = $1 AND is_active = TRUE",
            CHALLENGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Into::into)
        .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))
    }

    pub async fn create(
        &self,
        created_by: Uuid,
        dto: CreateChallengeDto,
    ) -> Result<ChallengeResponseDto> {
        let challenge = sqlx::query_as::<_, Challenge>(&format!(
            r#"
            INSERT INTO challenges
                (title, category, difficulty, description, code_snippet, language,
                 test_cases, grading_criteria, time_limit, points, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            CHALLENGE_COLUMNS
        ))
        .bind(dto.title.trim())
        .bind(dto.category)
        .bind(dto.difficulty)
        .bind(&dto.description)
        .bind(&dto.code_snippet)
        .bind(&dto.language)
        .bind(&dto.test_cases)
        .bind(&dto.grading_criteria)
        .bind(dto.time_limit)
        .bind(dto.points)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "Challenge already exists"))?;

        tracing::info!(
            "Challenge {} ({}) created by {}",
            challenge.id,
            challenge.category,
            created_by
        );

        Ok(challenge.into())
    }

    /// Apply an administrative edit; inactive challenges can be edited too
    pub async fn update(&self, id: Uuid, dto: UpdateChallengeDto) -> Result<ChallengeResponseDto> {
        if dto.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        sqlx::query_as::<_, Challenge>(&format!(
            r#"
            UPDATE challenges SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                code_snippet = COALESCE($4, code_snippet),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CHALLENGE_COLUMNS
        ))
        .bind(id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(&dto.description)
        .bind(&dto.code_snippet)
        .bind(dto.is_active)
        .fetch_optional(&self.pool)
        .await?
        .map(Into::into)
        .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))
    }
}
