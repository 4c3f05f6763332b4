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
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::challenges::dtos::{
    ChallengeListItemDto, ChallengeListQuery, ChallengeResponseDto, CreateChallengeDto,
    UpdateChallengeDto,
};
use crate::features::challenges::services::ChallengeService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// List active challenges
#[utoipa::path(
    get,
    path = "/api/challenges",
    params(ChallengeListQuery, PaginationQuery),
    responses(
        (status = 200, description = "List of challenges", body = ApiResponse<Vec<ChallengeListItemDto>>),
        (status = 400, description = "Unknown category or difficulty"),
    ),
    tag = "challenges"
)]
pub async fn list_challenges(
    State(service): State<Arc<ChallengeService>>,
    AppQuery(filter): AppQuery<ChallengeListQuery>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ChallengeListItemDto>>>> {
    let (challenges, total) = service.list(&filter, &pagination).await?;
    Ok(Json(ApiResponse::paginated(challenges, total)))
}

/// Get challenge by id
#[utoipa::path(
    get,
    path = "/api/challenges/{id}",
    params(
        ("id" = Uuid, Path, description = "Challenge id")
    ),
    responses(
        (status = 200, description = "Challenge found", body = ApiResponse<ChallengeResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Challenge not found")
    ),
    tag = "challenges",
    security(("bearer_auth" = []))
)]
pub async fn get_challenge(
    _user: AuthenticatedUser,
    State(service): State<Arc<ChallengeService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ChallengeResponseDto>>> {
    let challenge = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(challenge), None, None)))
}

/// Create a challenge (admin only)
#[utoipa::path(
    post,
    path = "/api/challenges",
    request_body = CreateChallengeDto,
    responses(
        (status = 201, description = "Challenge created", body = ApiResponse<ChallengeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required")
    ),
    tag = "challenges",
    security(("bearer_auth" = []))
)]
pub async fn create_challenge(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<ChallengeService>>,
    AppJson(dto): AppJson<CreateChallengeDto>,
) -> Result<(StatusCode, Json<ApiResponse<ChallengeResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let challenge = service.create(admin.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(challenge),
            Some("Challenge created".to_string()),
            None,
        )),
    ))
}

/// Edit a challenge (admin only)
#[utoipa::path(
    patch,
    path = "/api/challenges/{id}",
    params(
        ("id" = Uuid, Path, description = "Challenge id")
    ),
    request_body = UpdateChallengeDto,
    responses(
        (status = 200, description = "Challenge updated", body = ApiResponse<ChallengeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Challenge not found")
    ),
    tag = "challenges",
    security(("bearer_auth" = []))
)]
pub async fn update_challenge(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ChallengeService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateChallengeDto>,
) -> Result<Json<ApiResponse<ChallengeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let challenge = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(challenge),
        Some("Challenge updated".to_string()),
        None,
    )))
}
