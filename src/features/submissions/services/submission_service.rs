use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::grading::{GradingInput, GradingService};
use crate::features::submissions::dtos::{CreateSubmissionDto, SubmissionResponseDto};
use crate::features::submissions::models::NewSubmission;
use crate::features::submissions::store::{SubmissionStore, DUPLICATE_SUBMISSION_MESSAGE};
use crate::shared::types::PaginationQuery;

/// Service for submission operations
pub struct SubmissionService {
    store: Arc<dyn SubmissionStore>,
    grading: Arc<GradingService>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn SubmissionStore>, grading: Arc<GradingService>) -> Self {
        Self { store, grading }
    }

    /// Grade and store a user's submission.
    ///
    /// Unknown challenge is checked first, then duplicates, then category
    /// requirements. Nothing is held open in the database while grading runs.
    pub async fn create(
        &self,
        user_id: Uuid,
        dto: CreateSubmissionDto,
    ) -> Result<SubmissionResponseDto> {
        let challenge = self
            .store
            .find_active_challenge(dto.challenge_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))?;

        if self.store.exists_for(user_id, challenge.id).await? {
            return Err(AppError::Conflict(DUPLICATE_SUBMISSION_MESSAGE.to_string()));
        }

        let input = GradingInput {
            code: dto.code,
            explanation: dto.explanation,
            test_results: None,
        };
        let outcome = self.grading.grade(&challenge, &input).await?;

        let submission = self
            .store
            .insert(NewSubmission {
                challenge_id: challenge.id,
                user_id,
                code: input.code,
                explanation: input.explanation,
                outcome,
            })
            .await?;

        tracing::info!(
            submission_id = %submission.id,
            challenge_id = %submission.challenge_id,
            "Submission stored with score {}/{}",
            submission.score,
            submission.max_score
        );

        Ok(submission.into())
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<SubmissionResponseDto>, i64)> {
        let (submissions, total) = self.store.list_by_user(user_id, pagination).await?;
        Ok((submissions.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, submission_id: Uuid, user_id: Uuid) -> Result<SubmissionResponseDto> {
        self.store
            .find_for_user(submission_id, user_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))
    }
}
