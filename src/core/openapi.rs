use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::challenges::{
    dtos as challenges_dtos, handlers as challenges_handlers, models as challenges_models,
};
use crate::features::grading::TestCaseResult;
use crate::features::leaderboard::{dtos as leaderboard_dtos, handlers as leaderboard_handlers};
use crate::features::submissions::{dtos as submissions_dtos, handlers as submissions_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::get_me,
        // Challenges
        challenges_handlers::list_challenges,
        challenges_handlers::get_challenge,
        challenges_handlers::create_challenge,
        challenges_handlers::update_challenge,
        // Submissions
        submissions_handlers::create_submission,
        submissions_handlers::list_submissions,
        submissions_handlers::get_submission,
        // Leaderboard (public)
        leaderboard_handlers::get_leaderboard,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::TokenResponseDto,
            auth_dtos::UserResponseDto,
            ApiResponse<auth_dtos::TokenResponseDto>,
            ApiResponse<auth_dtos::UserResponseDto>,
            // Challenges
            challenges_models::ChallengeCategory,
            challenges_models::ChallengeDifficulty,
            challenges_dtos::CreateChallengeDto,
            challenges_dtos::UpdateChallengeDto,
            challenges_dtos::ChallengeListItemDto,
            challenges_dtos::ChallengeResponseDto,
            ApiResponse<Vec<challenges_dtos::ChallengeListItemDto>>,
            ApiResponse<challenges_dtos::ChallengeResponseDto>,
            // Submissions
            TestCaseResult,
            submissions_dtos::CreateSubmissionDto,
            submissions_dtos::SubmissionResponseDto,
            ApiResponse<Vec<submissions_dtos::SubmissionResponseDto>>,
            ApiResponse<submissions_dtos::SubmissionResponseDto>,
            // Leaderboard
            leaderboard_dtos::LeaderboardEntryDto,
            ApiResponse<Vec<leaderboard_dtos::LeaderboardEntryDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and current user"),
        (name = "challenges", description = "Challenge catalogue"),
        (name = "submissions", description = "Graded challenge submissions"),
        (name = "leaderboard", description = "Global ranking (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CodeCraft API",
        version = "0.1.0",
        description = "API documentation for CodeCraft",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/me",
            "/api/challenges",
            "/api/challenges/{id}",
            "/api/submissions",
            "/api/submissions/{id}",
            "/api/leaderboard",
        ] {
            assert!(paths.contains(&expected), "missing path {}", expected);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Staging".to_string(),
            version: "9.9.9".to_string(),
            description: "staging docs".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Staging");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
