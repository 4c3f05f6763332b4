use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::leaderboard::dtos::LeaderboardEntryDto;
use crate::features::leaderboard::services::LeaderboardService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Global leaderboard
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Ranked users", body = ApiResponse<Vec<LeaderboardEntryDto>>),
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(service): State<Arc<LeaderboardService>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntryDto>>>> {
    let (entries, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::paginated(entries, total)))
}
