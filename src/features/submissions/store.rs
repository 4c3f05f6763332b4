//! Persistence for submissions.
//!
//! The `(user_id, challenge_id)` unique constraint is the authoritative
//! duplicate guard; [`SubmissionStore::exists_for`] only lets the service
//! reject duplicates before spending a grading call.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::challenges::models::Challenge;
use crate::features::challenges::services::CHALLENGE_COLUMNS;
use crate::features::submissions::models::{NewSubmission, Submission};
use crate::shared::types::PaginationQuery;

pub(crate) const DUPLICATE_SUBMISSION_MESSAGE: &str =
    "You have already submitted this challenge. Each challenge can only be attempted once.";

const SUBMISSION_COLUMNS: &str = "id, challenge_id, user_id, code, explanation, score, \
     max_score, is_correct, feedback, test_results, grading_details, submitted_at";

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Active challenge by id
    async fn find_active_challenge(&self, challenge_id: Uuid) -> Result<Option<Challenge>>;

    async fn exists_for(&self, user_id: Uuid, challenge_id: Uuid) -> Result<bool>;

    /// Fails with `AppError::Conflict` when the user already has a submission for the challenge
    async fn insert(&self, submission: NewSubmission) -> Result<Submission>;

    /// Newest first, with the unpaginated total
    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<Submission>, i64)>;

    async fn find_for_user(&self, submission_id: Uuid, user_id: Uuid) -> Result<Option<Submission>>;
}

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn find_active_challenge(&self, challenge_id: Uuid) -> Result<Option<Challenge>> {
        let challenge = sqlx::query_as::<_, Challenge>(&format!(
            "SELECT {} FROM challenges WHERE id = $1 AND is_active = TRUE",
            CHALLENGE_COLUMNS
        ))
        .bind(challenge_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(challenge)
    }

    async fn exists_for(&self, user_id: Uuid, challenge_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM submissions WHERE user_id = $1 AND challenge_id = $2)",
        )
        .bind(user_id)
        .bind(challenge_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, submission: NewSubmission) -> Result<Submission> {
        let outcome = &submission.outcome;

        sqlx::query_as::<_, Submission>(&format!(
            r#"
            INSERT INTO submissions
                (challenge_id, user_id, code, explanation, score, max_score,
                 is_correct, feedback, grading_details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        ))
        .bind(submission.challenge_id)
        .bind(submission.user_id)
        .bind(&submission.code)
        .bind(&submission.explanation)
        .bind(outcome.score)
        .bind(outcome.max_score)
        .bind(outcome.is_correct)
        .bind(&outcome.feedback)
        .bind(outcome.breakdown_value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, DUPLICATE_SUBMISSION_MESSAGE))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<Submission>, i64)> {
        let submissions = sqlx::query_as::<_, Submission>(&format!(
            r#"
            SELECT {}
            FROM submissions
            WHERE user_id = $1
            ORDER BY submitted_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
            SUBMISSION_COLUMNS
        ))
        .bind(user_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list submissions: {:?}", e);
            AppError::Database(e)
        })?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok((submissions, total))
    }

    async fn find_for_user(&self, submission_id: Uuid, user_id: Uuid) -> Result<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {} FROM submissions WHERE id = $1 AND user_id = $2",
            SUBMISSION_COLUMNS
        ))
        .bind(submission_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(submission)
    }
}
