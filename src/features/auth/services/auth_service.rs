use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    LoginRequestDto, RegisterRequestDto, TokenResponseDto, UserResponseDto,
};
use crate::features::auth::models::User;
use crate::features::auth::services::password::{
    hash_password, verify_against_dummy, verify_password,
};
use crate::features::auth::services::token_service::TokenService;
use crate::shared::constants::ROLE_USER;

const USER_COLUMNS: &str = "id, username, email, password_hash, full_name, bio, avatar_url, \
     skill_level, role, is_active, is_verified, created_at, updated_at";

/// Service for authentication operations (register, login)
pub struct AuthService {
    pool: PgPool,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, token_service: Arc<TokenService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }

    /// Register a new user
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<UserResponseDto> {
        let password = dto.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?;

        let full_name = dto
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, full_name, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&dto.username)
        .bind(dto.email.to_lowercase())
        .bind(&password_hash)
        .bind(&full_name)
        .bind(ROLE_USER)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "Username or email already registered"))?;

        tracing::info!("Registered user {} ({})", user.username, user.id);

        Ok(user.into())
    }

    /// Login with username and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<TokenResponseDto> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(&dto.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load user for login: {:?}", e);
            AppError::Database(e)
        })?;

        let user = check_credentials(user, dto.password).await?;

        self.token_service.issue(&user)
    }

    /// Get current user profile (for /me endpoint)
    pub async fn get_user(&self, user_id: Uuid) -> Result<UserResponseDto> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

/// Verify the password, then the account state. Unknown users still pay for a hash check.
async fn check_credentials(user: Option<User>, password: String) -> Result<User> {
    let Some(user) = user else {
        tokio::task::spawn_blocking(move || verify_against_dummy(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?;
        return Err(invalid_credentials());
    };

    let stored = user.password_hash.clone();
    let password_valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?
        .map_err(|e| {
            AppError::Internal(format!("Stored password hash for {} unusable: {}", user.id, e))
        })?;

    if !password_valid {
        return Err(invalid_credentials());
    }

    // Checked after the password so account state isn't revealed to guessers
    if !user.is_active {
        return Err(AppError::Forbidden("Account is inactive".to_string()));
    }

    Ok(user)
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Incorrect username or password".to_string())
}
