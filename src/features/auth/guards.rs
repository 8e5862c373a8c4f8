//! Role-based authorization guards.
//!
//! Guards extract the authenticated user from request extensions and verify
//! the required role before the handler runs. Read endpoints accept any
//! authenticated user; mutations require "admin".

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for checking if user is an administrator.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
#[derive(Debug)]
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
    use crate::shared::test_helpers::create_admin_user;
    use axum::http::Request;

    fn parts_with_user(user: Option<AuthenticatedUser>) -> Parts {
        let mut request = Request::builder().body(()).unwrap();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        request.into_parts().0
    }

    #[tokio::test]
    async fn test_admin_passes_guard() {
        let mut parts = parts_with_user(Some(create_admin_user()));
        let guard = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(guard.is_ok());
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let viewer = AuthenticatedUser {
            sub: "user-2".to_string(),
            username: None,
            roles: vec!["viewer".to_string()],
        };
        let mut parts = parts_with_user(Some(viewer));
        let err = RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let mut parts = parts_with_user(None);
        let err = RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
