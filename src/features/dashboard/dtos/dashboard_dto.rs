use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::dashboard::scoring::ProvincePoint;

/// Query selecting the survey year to rank
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SatisfactionQuery {
    /// Survey year, e.g. 2025
    #[param(example = 2025)]
    pub year: i32,
}

/// Optional year filter for the summary counts
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    /// Count submissions for this survey year only
    pub year: Option<i32>,
}

/// One province's satisfaction index in the ranking
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvincePointDto {
    pub id: Uuid,
    pub name: String,
    pub region: String,
    pub point: f64,
}

impl From<ProvincePoint> for ProvincePointDto {
    fn from(point: ProvincePoint) -> Self {
        Self {
            id: point.id,
            name: point.name,
            region: point.region,
            point: point.point,
        }
    }
}

/// Satisfaction ranking for one survey year
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SatisfactionResponseDto {
    pub year: i32,
    pub survey_id: Uuid,
    pub total_questions: i64,
    /// Provinces in descending point order
    pub provinces: Vec<ProvincePointDto>,
}

/// Lightweight dashboard counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub total_provinces: i64,
    pub total_wards: i64,
    pub total_respondents: i64,
    pub total_members: i64,
    pub total_submissions: i64,
}
