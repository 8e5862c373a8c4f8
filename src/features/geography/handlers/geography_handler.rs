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
use crate::features::geography::dtos::{
    CreateProvinceDto, CreateWardDto, GeographySearchQuery, ProvinceResponseDto, UpdateProvinceDto,
    UpdateWardDto, WardResponseDto,
};
use crate::features::geography::services::GeographyService;
use crate::features::imports::reconciler::ImportReport;
use crate::features::imports::upload::{read_spreadsheet, ImportFileDto};
use crate::shared::types::ApiResponse;

// ==================== Province Handlers ====================

/// List all provinces
#[utoipa::path(
    get,
    path = "/api/geography/provinces",
    params(GeographySearchQuery),
    responses(
        (status = 200, description = "List of provinces", body = ApiResponse<Vec<ProvinceResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn list_provinces(
    _user: AuthenticatedUser,
    State(service): State<Arc<GeographyService>>,
    Query(query): Query<GeographySearchQuery>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let provinces = service.list_provinces(query.search.as_deref()).await?;
    let dtos: Vec<ProvinceResponseDto> = provinces.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a province by id
#[utoipa::path(
    get,
    path = "/api/geography/provinces/{id}",
    params(
        ("id" = Uuid, Path, description = "Province ID")
    ),
    responses(
        (status = 200, description = "Province details", body = ApiResponse<ProvinceResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn get_province(
    _user: AuthenticatedUser,
    State(service): State<Arc<GeographyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    let province = service.get_province(id).await?;
    Ok(Json(ApiResponse::success(Some(province.into()), None, None)))
}

/// Create a province (admin only)
#[utoipa::path(
    post,
    path = "/api/geography/provinces",
    request_body = CreateProvinceDto,
    responses(
        (status = 200, description = "Province created successfully", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 409, description = "Province name already exists")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn create_province(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<GeographyService>>,
    AppJson(dto): AppJson<CreateProvinceDto>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province = service.create_province(dto).await?;
    Ok(Json(ApiResponse::success(Some(province.into()), None, None)))
}

/// Update a province (admin only)
#[utoipa::path(
    put,
    path = "/api/geography/provinces/{id}",
    params(
        ("id" = Uuid, Path, description = "Province ID")
    ),
    request_body = UpdateProvinceDto,
    responses(
        (status = 200, description = "Province updated successfully", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Province not found"),
        (status = 409, description = "Name conflict or province already referenced")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn update_province(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<GeographyService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateProvinceDto>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province = service.update_province(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(province.into()), None, None)))
}

/// Delete a province (admin only)
#[utoipa::path(
    delete,
    path = "/api/geography/provinces/{id}",
    params(
        ("id" = Uuid, Path, description = "Province ID")
    ),
    responses(
        (status = 200, description = "Province deleted successfully"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Province not found"),
        (status = 409, description = "Province still referenced by wards or respondents")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn delete_province(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<GeographyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_province(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Province deleted successfully".to_string()),
        None,
    )))
}

/// Import provinces from a CSV or XLSX file (admin only)
#[utoipa::path(
    post,
    path = "/api/geography/provinces/import",
    request_body(content = ImportFileDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import finished; skipped rows listed in the report", body = ApiResponse<ImportReport>),
        (status = 400, description = "Bad file format, blank required cell or unknown reference"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn import_provinces(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<GeographyService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImportReport>>> {
    let (file_name, bytes) = read_spreadsheet(multipart).await?;
    let report = service.import_provinces(&file_name, &bytes).await?;
    let message = report.message.clone();
    Ok(Json(ApiResponse::success(Some(report), Some(message), None)))
}

// ==================== Ward Handlers ====================

/// List wards of a province
#[utoipa::path(
    get,
    path = "/api/geography/provinces/{id}/wards",
    params(
        ("id" = Uuid, Path, description = "Province ID"),
        GeographySearchQuery
    ),
    responses(
        (status = 200, description = "List of wards", body = ApiResponse<Vec<WardResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn list_wards(
    _user: AuthenticatedUser,
    State(service): State<Arc<GeographyService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<GeographySearchQuery>,
) -> Result<Json<ApiResponse<Vec<WardResponseDto>>>> {
    let wards = service.list_wards(id, query.search.as_deref()).await?;
    let dtos: Vec<WardResponseDto> = wards.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Create a ward inside a province (admin only)
#[utoipa::path(
    post,
    path = "/api/geography/provinces/{id}/wards",
    params(
        ("id" = Uuid, Path, description = "Province ID")
    ),
    request_body = CreateWardDto,
    responses(
        (status = 200, description = "Ward created successfully", body = ApiResponse<WardResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Province not found"),
        (status = 409, description = "Ward name already exists in this province")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn create_ward(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<GeographyService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateWardDto>,
) -> Result<Json<ApiResponse<WardResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ward = service.create_ward(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(ward.into()), None, None)))
}

/// Get a ward by id
#[utoipa::path(
    get,
    path = "/api/geography/wards/{id}",
    params(
        ("id" = Uuid, Path, description = "Ward ID")
    ),
    responses(
        (status = 200, description = "Ward details", body = ApiResponse<WardResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Ward not found")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn get_ward(
    _user: AuthenticatedUser,
    State(service): State<Arc<GeographyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WardResponseDto>>> {
    let ward = service.get_ward(id).await?;
    Ok(Json(ApiResponse::success(Some(ward.into()), None, None)))
}

/// Rename a ward (admin only)
#[utoipa::path(
    put,
    path = "/api/geography/wards/{id}",
    params(
        ("id" = Uuid, Path, description = "Ward ID")
    ),
    request_body = UpdateWardDto,
    responses(
        (status = 200, description = "Ward updated successfully", body = ApiResponse<WardResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Ward not found"),
        (status = 409, description = "Ward name already exists in this province")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn update_ward(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<GeographyService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateWardDto>,
) -> Result<Json<ApiResponse<WardResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ward = service.update_ward(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(ward.into()), None, None)))
}

/// Delete a ward (admin only)
#[utoipa::path(
    delete,
    path = "/api/geography/wards/{id}",
    params(
        ("id" = Uuid, Path, description = "Ward ID")
    ),
    responses(
        (status = 200, description = "Ward deleted successfully"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Ward not found"),
        (status = 409, description = "Ward still referenced by respondents")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn delete_ward(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<GeographyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_ward(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Ward deleted successfully".to_string()),
        None,
    )))
}

/// Import wards from a CSV or XLSX file (admin only)
#[utoipa::path(
    post,
    path = "/api/geography/wards/import",
    request_body(content = ImportFileDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import finished; skipped rows listed in the report", body = ApiResponse<ImportReport>),
        (status = 400, description = "Bad file format, blank required cell or unknown province"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "geography",
    security(("bearer_auth" = []))
)]
pub async fn import_wards(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<GeographyService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImportReport>>> {
    let (file_name, bytes) = read_spreadsheet(multipart).await?;
    let report = service.import_wards(&file_name, &bytes).await?;
    let message = report.message.clone();
    Ok(Json(ApiResponse::success(Some(report), Some(message), None)))
}
