use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::submissions::dtos::{CreateSubmissionDto, SubmissionResponseDto};
use crate::features::submissions::services::SubmissionService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Submit a solution and receive its grade
#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = CreateSubmissionDto,
    responses(
        (status = 201, description = "Submission graded and stored", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Missing text required by the challenge category"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Challenge not found"),
        (status = 409, description = "Challenge already submitted")
    ),
    tag = "submissions",
    security(("bearer_auth" = []))
)]
pub async fn create_submission(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    AppJson(dto): AppJson<CreateSubmissionDto>,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let submission = service.create(user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(submission), None, None)),
    ))
}

/// List the current user's submissions
#[utoipa::path(
    get,
    path = "/api/submissions",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Submissions, newest first", body = ApiResponse<Vec<SubmissionResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "submissions",
    security(("bearer_auth" = []))
)]
pub async fn list_submissions(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<SubmissionResponseDto>>>> {
    let (submissions, total) = service.list(user.user_id, &pagination).await?;
    Ok(Json(ApiResponse::paginated(submissions, total)))
}

/// Get one of the current user's submissions
#[utoipa::path(
    get,
    path = "/api/submissions/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Submission found", body = ApiResponse<SubmissionResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions",
    security(("bearer_auth" = []))
)]
pub async fn get_submission(
    user: AuthenticatedUser,
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubmissionResponseDto>>> {
    let submission = service.get(id, user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(submission), None, None)))
}
