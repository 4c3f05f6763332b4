use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::challenges::handlers;
use crate::features::challenges::services::ChallengeService;

/// Public challenge routes
pub fn public_routes(service: Arc<ChallengeService>) -> Router {
    Router::new()
        .route("/api/challenges", get(handlers::list_challenges))
        .with_state(service)
}

/// Protected challenge routes; create and edit additionally require the admin role
pub fn protected_routes(service: Arc<ChallengeService>) -> Router {
    Router::new()
        .route(
            "/api/challenges",
            axum::routing::post(handlers::create_challenge),
        )
        .route(
            "/api/challenges/{id}",
            get(handlers::get_challenge).patch(handlers::update_challenge),
        )
        .with_state(service)
}
