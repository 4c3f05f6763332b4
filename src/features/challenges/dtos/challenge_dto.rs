use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::challenges::models::{Challenge, ChallengeCategory, ChallengeDifficulty};
use crate::shared::validation::LANGUAGE_REGEX;

/// Filters for the public challenge list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChallengeListQuery {
    pub category: Option<ChallengeCategory>,
    pub difficulty: Option<ChallengeDifficulty>,
}

/// Request DTO for creating a challenge
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateChallengeDto {
    #[validate(length(min = 5, max = 255, message = "Title must be 5-255 characters"))]
    pub title: String,

    pub category: ChallengeCategory,

    pub difficulty: ChallengeDifficulty,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub code_snippet: Option<String>,

    #[validate(regex(path = *LANGUAGE_REGEX, message = "Language must be a lowercase language tag"))]
    pub language: Option<String>,

    /// Test case definitions for debugging challenges
    pub test_cases: Option<Value>,

    pub grading_criteria: Option<Value>,

    /// Seconds
    #[validate(range(min = 1, message = "Time limit must be positive"))]
    pub time_limit: i32,

    #[validate(range(min = 1, message = "Points must be positive"))]
    pub points: i32,
}

/// Request DTO for editing a challenge; absent fields are left unchanged
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateChallengeDto {
    #[validate(length(min = 5, max = 255, message = "Title must be 5-255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    pub code_snippet: Option<String>,

    pub is_active: Option<bool>,
}

impl UpdateChallengeDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.code_snippet.is_none()
            && self.is_active.is_none()
    }
}

/// Lightweight challenge for list views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChallengeListItemDto {
    pub id: Uuid,
    pub title: String,
    pub category: ChallengeCategory,
    pub difficulty: ChallengeDifficulty,
    pub time_limit: i32,
    pub points: i32,
}

impl From<Challenge> for ChallengeListItemDto {
    fn from(c: Challenge) -> Self {
        Self {
            id: c.id,
            title: c.title,
            category: c.category,
            difficulty: c.difficulty,
            time_limit: c.time_limit,
            points: c.points,
        }
    }
}

/// Response DTO for challenge
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChallengeResponseDto {
    pub id: Uuid,
    pub title: String,
    pub category: ChallengeCategory,
    pub difficulty: ChallengeDifficulty,
    pub description: String,
    pub code_snippet: Option<String>,
    pub language: Option<String>,
    pub test_cases: Option<Value>,
    pub time_limit: i32,
    pub points: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Challenge> for ChallengeResponseDto {
    fn from(c: Challenge) -> Self {
        Self {
            id: c.id,
            title: c.title,
            category: c.category,
            difficulty: c.difficulty,
            description: c.description,
            code_snippet: c.code_snippet,
            language: c.language,
            test_cases: c.test_cases,
            time_limit: c.time_limit,
            points: c.points,
            is_active: c.is_active,
            created_at: c.created_at,
        }
    }
}
