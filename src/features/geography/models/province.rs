use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A Vietnamese province or centrally-run city, tagged with its economic
/// region for dashboard grouping.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Province {
    pub id: Uuid,
    pub name: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
