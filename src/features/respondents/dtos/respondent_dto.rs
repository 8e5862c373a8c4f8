use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::respondents::models::RespondentWithNames;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// Helper functions for defaults
fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query params for listing respondents
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RespondentQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Filter by province
    pub province_id: Option<Uuid>,

    /// Filter by ward
    pub ward_id: Option<Uuid>,

    /// Filter by alliance membership
    pub is_member: Option<bool>,

    /// Search in username or organization name
    pub search: Option<String>,
}

impl RespondentQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Request DTO for creating a respondent
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRespondentDto {
    #[validate(
        length(min = 1, max = 128, message = "Username must be 1-128 characters"),
        regex(
            path = "*crate::shared::validation::USERNAME_REGEX",
            message = "Username must start with letter or underscore and contain only alphanumeric characters and underscores"
        )
    )]
    pub username: String,

    #[validate(length(min = 1, max = 255, message = "Organization name must be 1-255 characters"))]
    pub organization_name: String,

    pub province_id: Uuid,

    pub ward_id: Option<Uuid>,

    #[serde(default)]
    pub is_member: bool,
}

/// Request DTO for updating a respondent. The username is the login
/// identity and cannot be changed after creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRespondentDto {
    #[validate(length(min = 1, max = 255, message = "Organization name must be 1-255 characters"))]
    pub organization_name: String,

    pub province_id: Uuid,

    pub ward_id: Option<Uuid>,

    #[serde(default)]
    pub is_member: bool,
}

/// Response DTO for respondent data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondentResponseDto {
    pub id: Uuid,
    pub username: String,
    pub organization_name: String,
    pub province_id: Uuid,
    pub province_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward_name: Option<String>,
    pub is_member: bool,
}

impl From<RespondentWithNames> for RespondentResponseDto {
    fn from(respondent: RespondentWithNames) -> Self {
        Self {
            id: respondent.id,
            username: respondent.username,
            organization_name: respondent.organization_name,
            province_id: respondent.province_id,
            province_name: respondent.province_name,
            ward_id: respondent.ward_id,
            ward_name: respondent.ward_name,
            is_member: respondent.is_member,
        }
    }
}
