use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::surveys::models::{Question, SurveyWithCount};

/// Request DTO for creating a survey
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: i32,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// Request DTO for updating a survey
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSurveyDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: i32,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Request DTO for adding a question to a survey
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionDto {
    #[validate(length(min = 1, max = 1000, message = "Content must be 1-1000 characters"))]
    pub content: String,

    /// Position in the questionnaire; appended to the end when omitted
    pub display_order: Option<i32>,
}

/// Request DTO for updating a question
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionDto {
    #[validate(length(min = 1, max = 1000, message = "Content must be 1-1000 characters"))]
    pub content: String,

    pub display_order: i32,
}

/// Response DTO for survey data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponseDto {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub total_questions: i64,
}

impl From<SurveyWithCount> for SurveyResponseDto {
    fn from(survey: SurveyWithCount) -> Self {
        Self {
            id: survey.id,
            name: survey.name,
            year: survey.year,
            description: survey.description,
            is_active: survey.is_active,
            total_questions: survey.total_questions,
        }
    }
}

/// Response DTO for question data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponseDto {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub content: String,
    pub display_order: i32,
}

impl From<Question> for QuestionResponseDto {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            survey_id: question.survey_id,
            content: question.content,
            display_order: question.display_order,
        }
    }
}
