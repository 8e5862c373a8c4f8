use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Annual satisfaction survey joined with its question count. Every read
/// path wants the count, so this is the only row shape the service loads.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SurveyWithCount {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub is_active: bool,
    pub total_questions: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
