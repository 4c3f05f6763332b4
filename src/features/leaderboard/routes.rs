use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::leaderboard::handlers;
use crate::features::leaderboard::services::LeaderboardService;

/// Create routes for the leaderboard feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<LeaderboardService>) -> Router {
    Router::new()
        .route("/api/leaderboard", get(handlers::get_leaderboard))
        .with_state(service)
}
