use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::geography::handlers;
use crate::features::geography::services::GeographyService;
use crate::features::imports::upload::MAX_IMPORT_SIZE;

/// Create routes for the geography feature
pub fn routes(service: Arc<GeographyService>) -> Router {
    Router::new()
        // Province routes (import must come before {id} route)
        .route(
            "/api/geography/provinces",
            get(handlers::list_provinces).post(handlers::create_province),
        )
        .route(
            "/api/geography/provinces/import",
            post(handlers::import_provinces)
                .layer(DefaultBodyLimit::max(MAX_IMPORT_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/geography/provinces/{id}",
            get(handlers::get_province)
                .put(handlers::update_province)
                .delete(handlers::delete_province),
        )
        .route(
            "/api/geography/provinces/{id}/wards",
            get(handlers::list_wards).post(handlers::create_ward),
        )
        // Ward routes
        .route(
            "/api/geography/wards/import",
            post(handlers::import_wards)
                .layer(DefaultBodyLimit::max(MAX_IMPORT_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/geography/wards/{id}",
            get(handlers::get_ward)
                .put(handlers::update_ward)
                .delete(handlers::delete_ward),
        )
        .with_state(service)
}
