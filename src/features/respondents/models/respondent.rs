use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Respondent organization (HTX/QTD) joined with its province and ward
/// names. Every read path wants the names, so this is the only row shape
/// the service loads.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RespondentWithNames {
    pub id: Uuid,
    pub username: String,
    pub organization_name: String,
    pub province_id: Uuid,
    pub province_name: String,
    pub ward_id: Option<Uuid>,
    pub ward_name: Option<String>,
    pub is_member: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
