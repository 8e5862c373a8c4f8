use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// JSON body extractor that rejects through the standard error envelope
/// instead of axum's plain-text responses.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let message = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => return Ok(Self(value)),
            Err(JsonRejection::JsonDataError(err)) => format!("Invalid JSON data: {}", err),
            Err(JsonRejection::JsonSyntaxError(err)) => format!("Invalid JSON syntax: {}", err),
            Err(JsonRejection::MissingJsonContentType(err)) => {
                format!("Missing JSON content type: {}", err)
            }
            Err(_) => "Failed to parse JSON body".to_string(),
        };

        Err(AppError::BadRequest(message))
    }
}
