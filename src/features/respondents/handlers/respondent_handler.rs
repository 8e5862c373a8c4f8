use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::imports::reconciler::ImportReport;
use crate::features::imports::upload::{read_spreadsheet, ImportFileDto};
use crate::features::respondents::dtos::{
    CreateRespondentDto, RespondentQueryParams, RespondentResponseDto, UpdateRespondentDto,
};
use crate::features::respondents::services::RespondentService;
use crate::shared::types::{ApiResponse, Meta};

/// List respondents with pagination and filters
#[utoipa::path(
    get,
    path = "/api/respondents",
    params(RespondentQueryParams),
    responses(
        (status = 200, description = "Paginated list of respondents", body = ApiResponse<Vec<RespondentResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "respondents",
    security(("bearer_auth" = []))
)]
pub async fn list_respondents(
    _user: AuthenticatedUser,
    State(service): State<Arc<RespondentService>>,
    Query(params): Query<RespondentQueryParams>,
) -> Result<Json<ApiResponse<Vec<RespondentResponseDto>>>> {
    let (respondents, total) = service.list(&params).await?;
    let dtos: Vec<RespondentResponseDto> = respondents.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a respondent by id
#[utoipa::path(
    get,
    path = "/api/respondents/{id}",
    params(
        ("id" = Uuid, Path, description = "Respondent ID")
    ),
    responses(
        (status = 200, description = "Respondent details", body = ApiResponse<RespondentResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Respondent not found")
    ),
    tag = "respondents",
    security(("bearer_auth" = []))
)]
pub async fn get_respondent(
    _user: AuthenticatedUser,
    State(service): State<Arc<RespondentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RespondentResponseDto>>> {
    let respondent = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(
        Some(respondent.into()),
        None,
        None,
    )))
}

/// Create a respondent (admin only)
#[utoipa::path(
    post,
    path = "/api/respondents",
    request_body = CreateRespondentDto,
    responses(
        (status = 200, description = "Respondent created successfully", body = ApiResponse<RespondentResponseDto>),
        (status = 400, description = "Validation error or unknown province/ward"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 409, description = "Username already exists")
    ),
    tag = "respondents",
    security(("bearer_auth" = []))
)]
pub async fn create_respondent(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<RespondentService>>,
    AppJson(dto): AppJson<CreateRespondentDto>,
) -> Result<Json<ApiResponse<RespondentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let respondent = service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(respondent.into()),
        None,
        None,
    )))
}

/// Update a respondent (admin only); the username cannot be changed
#[utoipa::path(
    put,
    path = "/api/respondents/{id}",
    params(
        ("id" = Uuid, Path, description = "Respondent ID")
    ),
    request_body = UpdateRespondentDto,
    responses(
        (status = 200, description = "Respondent updated successfully", body = ApiResponse<RespondentResponseDto>),
        (status = 400, description = "Validation error or unknown province/ward"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Respondent not found")
    ),
    tag = "respondents",
    security(("bearer_auth" = []))
)]
pub async fn update_respondent(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<RespondentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRespondentDto>,
) -> Result<Json<ApiResponse<RespondentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let respondent = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(respondent.into()),
        None,
        None,
    )))
}

/// Delete a respondent and their submissions (admin only)
#[utoipa::path(
    delete,
    path = "/api/respondents/{id}",
    params(
        ("id" = Uuid, Path, description = "Respondent ID")
    ),
    responses(
        (status = 200, description = "Respondent deleted successfully"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Respondent not found")
    ),
    tag = "respondents",
    security(("bearer_auth" = []))
)]
pub async fn delete_respondent(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<RespondentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Respondent deleted successfully".to_string()),
        None,
    )))
}

/// Import respondents from a CSV or XLSX file (admin only)
#[utoipa::path(
    post,
    path = "/api/respondents/import",
    request_body(content = ImportFileDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import finished; skipped rows listed in the report", body = ApiResponse<ImportReport>),
        (status = 400, description = "Bad file format, blank required cell or unknown province/ward"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "respondents",
    security(("bearer_auth" = []))
)]
pub async fn import_respondents(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<RespondentService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImportReport>>> {
    let (file_name, bytes) = read_spreadsheet(multipart).await?;
    let report = service.import(&file_name, &bytes).await?;
    let message = report.message.clone();
    Ok(Json(ApiResponse::success(Some(report), Some(message), None)))
}
