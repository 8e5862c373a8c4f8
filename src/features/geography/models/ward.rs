use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A ward or commune inside a province.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ward {
    pub id: Uuid,
    pub name: String,
    pub province_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
