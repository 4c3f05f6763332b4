use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::DEFAULT_CHALLENGE_LANGUAGE;

/// Challenge category, stored as the `challenge_category` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "challenge_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChallengeCategory {
    Comprehension,
    Debugging,
    AiReview,
    Design,
    Security,
}

impl ChallengeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comprehension => "comprehension",
            Self::Debugging => "debugging",
            Self::AiReview => "ai_review",
            Self::Design => "design",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for ChallengeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "challenge_difficulty", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChallengeDifficulty {
    Easy,
    Medium,
    Hard,
}

/// Database model for challenge
#[derive(Debug, Clone, FromRow)]
pub struct Challenge {
    pub id: Uuid,
    pub title: String,
    pub category: ChallengeCategory,
    pub difficulty: ChallengeDifficulty,
    pub description: String,
    pub code_snippet: Option<String>,
    pub language: Option<String>,
    pub test_cases: Option<Value>,
    pub grading_criteria: Option<Value>,
    /// Seconds
    pub time_limit: i32,
    pub points: i32,
    pub created_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Challenge {
    /// Declared language, falling back to the platform default
    pub fn language_or_default(&self) -> &str {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_CHALLENGE_LANGUAGE)
    }
}
