use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::results::handlers;
use crate::features::results::services::ResultService;

/// Create routes for the results feature
pub fn routes(service: Arc<ResultService>) -> Router {
    Router::new()
        .route("/api/results/{survey_id}", get(handlers::list_results))
        .route(
            "/api/results/{survey_id}/respondents/{respondent_id}",
            get(handlers::get_result)
                .post(handlers::submit_result)
                .delete(handlers::delete_result),
        )
        .with_state(service)
}
