use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::results::models::{SurveyAnswer, SurveyResultWithRespondent};

/// One answered question on the 1-5 scale
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInputDto {
    pub question_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Answer value must be between 1 and 5"))]
    pub value: i32,
}

/// Request DTO for submitting a survey result. Resubmitting replaces the
/// previous answers wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultDto {
    #[validate(length(min = 1, message = "At least one answer is required"), nested)]
    pub answers: Vec<AnswerInputDto>,
}

/// Response DTO for one submission in a listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResultDto {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub respondent_id: Uuid,
    pub username: String,
    pub organization_name: String,
    pub is_member: bool,
    pub point: f64,
    pub submitted_at: DateTime<Utc>,
}

impl From<SurveyResultWithRespondent> for SurveyResultDto {
    fn from(result: SurveyResultWithRespondent) -> Self {
        Self {
            id: result.id,
            survey_id: result.survey_id,
            respondent_id: result.respondent_id,
            username: result.username,
            organization_name: result.organization_name,
            is_member: result.is_member,
            point: result.point,
            submitted_at: result.submitted_at,
        }
    }
}

/// Stored answer echoed back in the detail view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponseDto {
    pub question_id: Uuid,
    pub value: i32,
}

impl From<SurveyAnswer> for AnswerResponseDto {
    fn from(answer: SurveyAnswer) -> Self {
        Self {
            question_id: answer.question_id,
            value: answer.value,
        }
    }
}

/// Response DTO for one submission with its answers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResultDetailDto {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub respondent_id: Uuid,
    pub username: String,
    pub organization_name: String,
    pub is_member: bool,
    pub point: f64,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<AnswerResponseDto>,
}

impl SurveyResultDetailDto {
    pub fn from_parts(result: SurveyResultWithRespondent, answers: Vec<SurveyAnswer>) -> Self {
        Self {
            id: result.id,
            survey_id: result.survey_id,
            respondent_id: result.respondent_id,
            username: result.username,
            organization_name: result.organization_name,
            is_member: result.is_member,
            point: result.point,
            submitted_at: result.submitted_at,
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_dto_carries_answers_in_stored_order() {
        let result = SurveyResultWithRespondent {
            id: Uuid::new_v4(),
            survey_id: Uuid::new_v4(),
            respondent_id: Uuid::new_v4(),
            username: "htx_badinh".to_string(),
            organization_name: "HTX Ba Đình".to_string(),
            is_member: true,
            point: 9.0,
            submitted_at: Utc::now(),
        };
        let first_question = Uuid::new_v4();
        let second_question = Uuid::new_v4();
        let answers = vec![
            SurveyAnswer {
                id: Uuid::new_v4(),
                response_id: result.id,
                question_id: first_question,
                value: 4,
            },
            SurveyAnswer {
                id: Uuid::new_v4(),
                response_id: result.id,
                question_id: second_question,
                value: 5,
            },
        ];

        let dto = SurveyResultDetailDto::from_parts(result.clone(), answers);

        assert_eq!(dto.username, "htx_badinh");
        assert_eq!(dto.point, result.point);
        assert_eq!(dto.answers.len(), 2);
        assert_eq!(dto.answers[0].question_id, first_question);
        assert_eq!(dto.answers[0].value, 4);
        assert_eq!(dto.answers[1].question_id, second_question);
        assert_eq!(dto.answers[1].value, 5);
    }
}
