//! Role-based authorization guards.
//!
//! Roles: `admin` manages challenges, `user` browses and submits.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only handlers.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, create_test_user};
    use axum::http::Request;

    async fn extract(user: Option<AuthenticatedUser>) -> Result<RequireAdmin, AppError> {
        let mut request = Request::new(());
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        let (mut parts, _) = request.into_parts();
        RequireAdmin::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let admin = create_admin_user();
        let RequireAdmin(user) = extract(Some(admin.clone())).await.unwrap();
        assert_eq!(user.user_id, admin.user_id);
    }

    #[tokio::test]
    async fn test_regular_user_is_forbidden() {
        let result = extract(Some(create_test_user())).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_missing_user_is_unauthorized() {
        let result = extract(None).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
