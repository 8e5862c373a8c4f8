use axum::extract::Multipart;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};

/// Upper bound for uploaded spreadsheets (10MB)
pub const MAX_IMPORT_SIZE: usize = 10 * 1024 * 1024;

/// Multipart payload for the import endpoints (OpenAPI schema only).
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportFileDto {
    /// The CSV or XLSX file to import
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Pulls the spreadsheet out of a multipart request.
///
/// Expects a single `file` field; other fields are ignored. Returns the
/// original file name (used to pick the CSV or XLSX parser) and the bytes.
pub async fn read_spreadsheet(mut multipart: Multipart) -> Result<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|name| name.to_string())
            .ok_or_else(|| AppError::Validation("File tải lên không có tên".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read uploaded file: {}", e)))?;

        return Ok((file_name, bytes.to_vec()));
    }

    Err(AppError::Validation(
        "Thiếu file dữ liệu trong yêu cầu".to_string(),
    ))
}
