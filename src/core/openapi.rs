use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::geography::{dtos as geography_dtos, handlers as geography_handlers};
use crate::features::imports;
use crate::features::respondents::{dtos as respondent_dtos, handlers as respondent_handlers};
use crate::features::results::{dtos as result_dtos, handlers as result_handlers};
use crate::features::surveys::{dtos as survey_dtos, handlers as survey_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Geography
        geography_handlers::list_provinces,
        geography_handlers::create_province,
        geography_handlers::import_provinces,
        geography_handlers::get_province,
        geography_handlers::update_province,
        geography_handlers::delete_province,
        geography_handlers::list_wards,
        geography_handlers::create_ward,
        geography_handlers::import_wards,
        geography_handlers::get_ward,
        geography_handlers::update_ward,
        geography_handlers::delete_ward,
        // Respondents
        respondent_handlers::list_respondents,
        respondent_handlers::create_respondent,
        respondent_handlers::import_respondents,
        respondent_handlers::get_respondent,
        respondent_handlers::update_respondent,
        respondent_handlers::delete_respondent,
        // Surveys
        survey_handlers::list_surveys,
        survey_handlers::create_survey,
        survey_handlers::get_survey,
        survey_handlers::update_survey,
        survey_handlers::delete_survey,
        survey_handlers::list_questions,
        survey_handlers::create_question,
        survey_handlers::update_question,
        survey_handlers::delete_question,
        // Results
        result_handlers::list_results,
        result_handlers::get_result,
        result_handlers::submit_result,
        result_handlers::delete_result,
        // Dashboard (public)
        dashboard_handlers::get_satisfaction,
        dashboard_handlers::export_satisfaction,
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            auth::model::AuthenticatedUser,
            ApiResponse<auth::dto::MeResponseDto>,
            // Geography
            geography_dtos::CreateProvinceDto,
            geography_dtos::UpdateProvinceDto,
            geography_dtos::ProvinceResponseDto,
            geography_dtos::CreateWardDto,
            geography_dtos::UpdateWardDto,
            geography_dtos::WardResponseDto,
            ApiResponse<Vec<geography_dtos::ProvinceResponseDto>>,
            ApiResponse<geography_dtos::ProvinceResponseDto>,
            ApiResponse<Vec<geography_dtos::WardResponseDto>>,
            ApiResponse<geography_dtos::WardResponseDto>,
            // Imports
            imports::ImportFileDto,
            imports::ImportReport,
            imports::SkippedRow,
            ApiResponse<imports::ImportReport>,
            // Respondents
            respondent_dtos::CreateRespondentDto,
            respondent_dtos::UpdateRespondentDto,
            respondent_dtos::RespondentResponseDto,
            ApiResponse<Vec<respondent_dtos::RespondentResponseDto>>,
            ApiResponse<respondent_dtos::RespondentResponseDto>,
            // Surveys
            survey_dtos::CreateSurveyDto,
            survey_dtos::UpdateSurveyDto,
            survey_dtos::SurveyResponseDto,
            survey_dtos::CreateQuestionDto,
            survey_dtos::UpdateQuestionDto,
            survey_dtos::QuestionResponseDto,
            ApiResponse<Vec<survey_dtos::SurveyResponseDto>>,
            ApiResponse<survey_dtos::SurveyResponseDto>,
            ApiResponse<Vec<survey_dtos::QuestionResponseDto>>,
            ApiResponse<survey_dtos::QuestionResponseDto>,
            // Results
            result_dtos::AnswerInputDto,
            result_dtos::SubmitResultDto,
            result_dtos::SurveyResultDto,
            result_dtos::AnswerResponseDto,
            result_dtos::SurveyResultDetailDto,
            ApiResponse<Vec<result_dtos::SurveyResultDto>>,
            ApiResponse<result_dtos::SurveyResultDetailDto>,
            // Dashboard (public)
            dashboard_dtos::ProvincePointDto,
            dashboard_dtos::SatisfactionResponseDto,
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::SatisfactionResponseDto>,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "geography", description = "Vietnamese provinces/cities and their wards/communes"),
        (name = "respondents", description = "Cooperative respondent accounts (HTX/QTD)"),
        (name = "surveys", description = "Annual satisfaction surveys and their questions"),
        (name = "results", description = "Survey answer submissions"),
        (name = "Dashboard", description = "Public satisfaction ranking and summary counts"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "HTX Survey API",
        version = "0.1.0",
        description = "API documentation for the cooperative satisfaction survey platform",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/auth/me",
            "/api/geography/provinces",
            "/api/geography/provinces/import",
            "/api/geography/provinces/{id}",
            "/api/geography/provinces/{id}/wards",
            "/api/geography/wards/import",
            "/api/geography/wards/{id}",
            "/api/respondents",
            "/api/respondents/import",
            "/api/respondents/{id}",
            "/api/surveys",
            "/api/surveys/{id}",
            "/api/surveys/{id}/questions",
            "/api/surveys/questions/{id}",
            "/api/results/{survey_id}",
            "/api/results/{survey_id}/respondents/{respondent_id}",
            "/api/dashboard/satisfaction",
            "/api/dashboard/satisfaction/export",
            "/api/dashboard/summary",
        ] {
            assert!(paths.contains_key(path), "missing path: {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components section");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
