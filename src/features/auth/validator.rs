use super::model::{AccessTokenClaims, AuthenticatedUser};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

/// Verifies HS256 access tokens issued by [`TokenService`](super::services::TokenService).
pub struct JwtValidator {
    decoding_key: DecodingKey,
    issuer: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            issuer: config.issuer.clone(),
            leeway: config.jwt_leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = self.leeway;

        let claims = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?
            .claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Auth("Invalid subject in token".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            username: claims.username,
            roles: claims.roles,
        })
    }
}
