use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Survey question database model. Answers are on a fixed 1-5 scale, so the
/// model carries only the prompt text and its position.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub content: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}
