use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::time::Duration;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::TokenResponseDto;
use crate::features::auth::model::AccessTokenClaims;
use crate::features::auth::models::User;

/// Issues HS256 access tokens for local accounts
pub struct TokenService {
    encoding_key: EncodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            issuer: config.issuer.clone(),
            ttl: config.access_token_ttl,
        }
    }

    pub fn issue(&self, user: &User) -> Result<TokenResponseDto> {
        let iat = Utc::now().timestamp().max(0) as u64;
        let claims = AccessTokenClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            roles: user.roles(),
            iss: self.issuer.clone(),
            iat,
            exp: iat + self.ttl.as_secs(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign access token: {}", e)))?;

        Ok(TokenResponseDto {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.ttl.as_secs() as i64,
        })
    }
}
