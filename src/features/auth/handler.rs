use crate::core::error::Result;
use crate::features::auth::dto::MeResponseDto;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ApiResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(user: AuthenticatedUser) -> Result<Json<ApiResponse<MeResponseDto>>> {
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::with_admin_auth;
    use axum::http::StatusCode;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_me_returns_injected_identity() {
        let app = with_admin_auth(Router::new().route("/api/auth/me", get(get_me)));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/auth/me").await;
        response.assert_status_ok();

        let body: ApiResponse<MeResponseDto> = response.json();
        assert!(body.success);
        let me = body.data.unwrap();
        assert_eq!(me.username.as_deref(), Some("test-admin"));
        assert!(me.is_admin);
    }

    #[tokio::test]
    async fn test_me_without_identity_is_unauthorized() {
        let app = Router::new().route("/api/auth/me", get(get_me));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
