use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::models::User;
use crate::shared::validation::USERNAME_REGEX;

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        regex(
            path = *USERNAME_REGEX,
            message = "Username must start with a letter or underscore and contain only letters, digits and underscores"
        )
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 100, message = "Password must be 8-100 characters"))]
    pub password: String,

    #[validate(length(max = 255, message = "Full name must be at most 255 characters"))]
    pub full_name: Option<String>,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponseDto {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
}

/// Public view of a user account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub skill_level: i32,
    pub role: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            bio: u.bio,
            avatar_url: u.avatar_url,
            skill_level: u.skill_level,
            role: u.role,
            is_verified: u.is_verified,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::{Password, SafeEmail};
    use fake::Fake;

    fn valid_register() -> RegisterRequestDto {
        RegisterRequestDto {
            username: "ada_lovelace".to_string(),
            email: SafeEmail().fake(),
            password: Password(8..32).fake(),
            full_name: Some("Ada Lovelace".to_string()),
        }
    }

    #[test]
    fn test_valid_registration() {
        for _ in 0..20 {
            assert!(valid_register().validate().is_ok());
        }
    }

    #[test]
    fn test_username_rules() {
        let too_long = "x".repeat(51);
        for bad in ["ab", "1abc", "has space", "dash-name", too_long.as_str()] {
            let dto = RegisterRequestDto {
                username: bad.to_string(),
                ..valid_register()
            };
            let errors = dto.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("username"),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_password_length() {
        let short = RegisterRequestDto {
            password: "short".to_string(),
            ..valid_register()
        };
        assert!(short.validate().unwrap_err().field_errors().contains_key("password"));

        let long = RegisterRequestDto {
            password: "p".repeat(101),
            ..valid_register()
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_invalid_email() {
        let dto = RegisterRequestDto {
            email: "not-an-email".to_string(),
            ..valid_register()
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let dto = LoginRequestDto {
            username: String::new(),
            password: String::new(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
