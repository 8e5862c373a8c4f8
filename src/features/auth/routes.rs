use crate::features::auth::handler;
use axum::{routing::get, Router};

/// Protected auth routes (require JWT authentication)
pub fn routes() -> Router {
    Router::new().route("/api/auth/me", get(handler::get_me))
}
