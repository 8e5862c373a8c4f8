use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::surveys::dtos::{
    CreateQuestionDto, CreateSurveyDto, QuestionResponseDto, SurveyResponseDto, UpdateQuestionDto,
    UpdateSurveyDto,
};
use crate::features::surveys::services::SurveyService;
use crate::shared::types::ApiResponse;

// ==================== Survey Handlers ====================

/// List surveys, newest year first
#[utoipa::path(
    get,
    path = "/api/surveys",
    responses(
        (status = 200, description = "List of surveys", body = ApiResponse<Vec<SurveyResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "surveys",
    security(("bearer_auth" = []))
)]
pub async fn list_surveys(
    _user: AuthenticatedUser,
    State(service): State<Arc<SurveyService>>,
) -> Result<Json<ApiResponse<Vec<SurveyResponseDto>>>> {
    let surveys = service.list_surveys().await?;
    let dtos: Vec<SurveyResponseDto> = surveys.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a survey by id
#[utoipa::path(
    get,
    path = "/api/surveys/{id}",
    params(
        ("id" = Uuid, Path, description = "Survey ID")
    ),
    responses(
        (status = 200, description = "Survey details", body = ApiResponse<SurveyResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Survey not found")
    ),
    tag = "surveys",
    security(("bearer_auth" = []))
)]
pub async fn get_survey(
    _user: AuthenticatedUser,
    State(service): State<Arc<SurveyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SurveyResponseDto>>> {
    let survey = service.get_survey(id).await?;
    Ok(Json(ApiResponse::success(Some(survey.into()), None, None)))
}

/// Create a survey (admin only)
#[utoipa::path(
    post,
    path = "/api/surveys",
    request_body = CreateSurveyDto,
    responses(
        (status = 200, description = "Survey created successfully", body = ApiResponse<SurveyResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 409, description = "Survey for that year already exists")
    ),
    tag = "surveys",
    security(("bearer_auth" = []))
)]
pub async fn create_survey(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SurveyService>>,
    AppJson(dto): AppJson<CreateSurveyDto>,
) -> Result<Json<ApiResponse<SurveyResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let survey = service.create_survey(dto).await?;
    Ok(Json(ApiResponse::success(Some(survey.into()), None, None)))
}

/// Update a survey (admin only)
#[utoipa::path(
    put,
    path = "/api/surveys/{id}",
    params(
        ("id" = Uuid, Path, description = "Survey ID")
    ),
    request_body = UpdateSurveyDto,
    responses(
        (status = 200, description = "Survey updated successfully", body = ApiResponse<SurveyResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Survey not found"),
        (status = 409, description = "Survey for that year already exists")
    ),
    tag = "surveys",
    security(("bearer_auth" = []))
)]
pub async fn update_survey(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SurveyService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSurveyDto>,
) -> Result<Json<ApiResponse<SurveyResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let survey = service.update_survey(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(survey.into()), None, None)))
}

/// Delete a survey without results (admin only)
#[utoipa::path(
    delete,
    path = "/api/surveys/{id}",
    params(
        ("id" = Uuid, Path, description = "Survey ID")
    ),
    responses(
        (status = 200, description = "Survey deleted successfully"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Survey not found"),
        (status = 409, description = "Survey already has results")
    ),
    tag = "surveys",
    security(("bearer_auth" = []))
)]
pub async fn delete_survey(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SurveyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_survey(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Survey deleted successfully".to_string()),
        None,
    )))
}

// ==================== Question Handlers ====================

/// List questions of a survey in display order
#[utoipa::path(
    get,
    path = "/api/surveys/{id}/questions",
    params(
        ("id" = Uuid, Path, description = "Survey ID")
    ),
    responses(
        (status = 200, description = "List of questions", body = ApiResponse<Vec<QuestionResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Survey not found")
    ),
    tag = "surveys",
    security(("bearer_auth" = []))
)]
pub async fn list_questions(
    _user: AuthenticatedUser,
    State(service): State<Arc<SurveyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<QuestionResponseDto>>>> {
    let questions = service.list_questions(id).await?;
    let dtos: Vec<QuestionResponseDto> = questions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Add a question to a survey (admin only); rejected once results exist
#[utoipa::path(
    post,
    path = "/api/surveys/{id}/questions",
    params(
        ("id" = Uuid, Path, description = "Survey ID")
    ),
    request_body = CreateQuestionDto,
    responses(
        (status = 200, description = "Question created successfully", body = ApiResponse<QuestionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Survey not found"),
        (status = 409, description = "Survey already has results")
    ),
    tag = "surveys",
    security(("bearer_auth" = []))
)]
pub async fn create_question(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SurveyService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateQuestionDto>,
) -> Result<Json<ApiResponse<QuestionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let question = service.create_question(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(question.into()), None, None)))
}

/// Update a question (admin only); rejected once results exist
#[utoipa::path(
    put,
    path = "/api/surveys/questions/{id}",
    params(
        ("id" = Uuid, Path, description = "Question ID")
    ),
    request_body = UpdateQuestionDto,
    responses(
        (status = 200, description = "Question updated successfully", body = ApiResponse<QuestionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Question not found"),
        (status = 409, description = "Survey already has results")
    ),
    tag = "surveys",
    security(("bearer_auth" = []))
)]
pub async fn update_question(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SurveyService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateQuestionDto>,
) -> Result<Json<ApiResponse<QuestionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let question = service.update_question(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(question.into()), None, None)))
}

/// Delete a question (admin only); rejected once results exist
#[utoipa::path(
    delete,
    path = "/api/surveys/questions/{id}",
    params(
        ("id" = Uuid, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Question deleted successfully"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Question not found"),
        (status = 409, description = "Survey already has results")
    ),
    tag = "surveys",
    security(("bearer_auth" = []))
)]
pub async fn delete_question(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SurveyService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_question(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Question deleted successfully".to_string()),
        None,
    )))
}
