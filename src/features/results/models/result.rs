use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One respondent's submission for one survey, joined with the respondent
/// it came from. `point` caches the sum of the answer values so scoring
/// never re-aggregates answers.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SurveyResultWithRespondent {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub respondent_id: Uuid,
    pub username: String,
    pub organization_name: String,
    pub is_member: bool,
    pub point: f64,
    pub submitted_at: DateTime<Utc>,
}

/// Stored answer row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SurveyAnswer {
    pub id: Uuid,
    pub response_id: Uuid,
    pub question_id: Uuid,
    pub value: i32,
}
