use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create public dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route(
            "/api/dashboard/satisfaction",
            get(handlers::get_satisfaction),
        )
        .route(
            "/api/dashboard/satisfaction/export",
            get(handlers::export_satisfaction),
        )
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .with_state(dashboard_service)
}
