use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::surveys::handlers;
use crate::features::surveys::services::SurveyService;

/// Create routes for the surveys feature
pub fn routes(service: Arc<SurveyService>) -> Router {
    Router::new()
        .route(
            "/api/surveys",
            get(handlers::list_surveys).post(handlers::create_survey),
        )
        // Question routes (literal segment must come before {id} route)
        .route(
            "/api/surveys/questions/{id}",
            put(handlers::update_question).delete(handlers::delete_question),
        )
        .route(
            "/api/surveys/{id}",
            get(handlers::get_survey)
                .put(handlers::update_survey)
                .delete(handlers::delete_survey),
        )
        .route(
            "/api/surveys/{id}/questions",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .with_state(service)
}
