use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::shared::constants::ROLE_ADMIN;

/// Identity extracted from a validated access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    /// Display name claim, when the issuer includes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if user can manage geography, respondents and surveys
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

/// Handlers take `AuthenticatedUser` as an argument to read the identity
/// the auth middleware placed in request extensions.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            username: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_admin_role() {
        assert!(user_with_roles(&["admin"]).is_admin());
        assert!(user_with_roles(&["viewer", "admin"]).is_admin());
    }

    #[test]
    fn test_non_admin_roles() {
        assert!(!user_with_roles(&[]).is_admin());
        assert!(!user_with_roles(&["viewer"]).is_admin());
        assert!(!user_with_roles(&["ADMIN"]).is_admin()); // roles are case-sensitive
    }
}
