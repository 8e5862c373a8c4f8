use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::results::dtos::{SubmitResultDto, SurveyResultDetailDto, SurveyResultDto};
use crate::features::results::services::ResultService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List submissions for a survey
#[utoipa::path(
    get,
    path = "/api/results/{survey_id}",
    params(
        ("survey_id" = Uuid, Path, description = "Survey ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Paginated list of submissions", body = ApiResponse<Vec<SurveyResultDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Survey not found")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn list_results(
    _user: AuthenticatedUser,
    State(service): State<Arc<ResultService>>,
    Path(survey_id): Path<Uuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<SurveyResultDto>>>> {
    let (results, total) = service.list(survey_id, &pagination).await?;
    let dtos: Vec<SurveyResultDto> = results.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get one respondent's submission with its answers
#[utoipa::path(
    get,
    path = "/api/results/{survey_id}/respondents/{respondent_id}",
    params(
        ("survey_id" = Uuid, Path, description = "Survey ID"),
        ("respondent_id" = Uuid, Path, description = "Respondent ID")
    ),
    responses(
        (status = 200, description = "Submission details", body = ApiResponse<SurveyResultDetailDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No submission for this survey and respondent")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn get_result(
    _user: AuthenticatedUser,
    State(service): State<Arc<ResultService>>,
    Path((survey_id, respondent_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<SurveyResultDetailDto>>> {
    let result = service.get(survey_id, respondent_id).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Submit a respondent's answers for a survey
#[utoipa::path(
    post,
    path = "/api/results/{survey_id}/respondents/{respondent_id}",
    params(
        ("survey_id" = Uuid, Path, description = "Survey ID"),
        ("respondent_id" = Uuid, Path, description = "Respondent ID")
    ),
    request_body = SubmitResultDto,
    responses(
        (status = 200, description = "Submission stored", body = ApiResponse<SurveyResultDetailDto>),
        (status = 400, description = "Validation error or answer for a foreign question"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Survey or respondent not found")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn submit_result(
    _user: AuthenticatedUser,
    State(service): State<Arc<ResultService>>,
    Path((survey_id, respondent_id)): Path<(Uuid, Uuid)>,
    AppJson(dto): AppJson<SubmitResultDto>,
) -> Result<Json<ApiResponse<SurveyResultDetailDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let result = service.submit(survey_id, respondent_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Clear a submission (admin only)
#[utoipa::path(
    delete,
    path = "/api/results/{survey_id}/respondents/{respondent_id}",
    params(
        ("survey_id" = Uuid, Path, description = "Survey ID"),
        ("respondent_id" = Uuid, Path, description = "Respondent ID")
    ),
    responses(
        (status = 200, description = "Submission cleared"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "No submission for this survey and respondent")
    ),
    tag = "results",
    security(("bearer_auth" = []))
)]
pub async fn delete_result(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ResultService>>,
    Path((survey_id, respondent_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(survey_id, respondent_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Submission cleared successfully".to_string()),
        None,
    )))
}
