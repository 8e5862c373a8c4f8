use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::imports::upload::MAX_IMPORT_SIZE;
use crate::features::respondents::handlers;
use crate::features::respondents::services::RespondentService;

/// Create routes for the respondents feature
pub fn routes(service: Arc<RespondentService>) -> Router {
    Router::new()
        .route(
            "/api/respondents",
            get(handlers::list_respondents).post(handlers::create_respondent),
        )
        .route(
            "/api/respondents/import",
            post(handlers::import_respondents)
                .layer(DefaultBodyLimit::max(MAX_IMPORT_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/respondents/{id}",
            get(handlers::get_respondent)
                .put(handlers::update_respondent)
                .delete(handlers::delete_respondent),
        )
        .with_state(service)
}
