use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::{
    DashboardSummaryDto, SatisfactionQuery, SatisfactionResponseDto, SummaryQuery,
};
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Province satisfaction ranking for a survey year
#[utoipa::path(
    get,
    path = "/api/dashboard/satisfaction",
    params(SatisfactionQuery),
    tag = "Dashboard",
    responses(
        (status = 200, description = "Provinces ranked by satisfaction index", body = ApiResponse<SatisfactionResponseDto>),
        (status = 404, description = "No survey for that year")
    )
)]
pub async fn get_satisfaction(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<SatisfactionQuery>,
) -> Result<Json<ApiResponse<SatisfactionResponseDto>>> {
    let ranking = service.satisfaction(query.year).await?;
    Ok(Json(ApiResponse::success(Some(ranking), None, None)))
}

/// Satisfaction ranking exported as a CSV attachment
#[utoipa::path(
    get,
    path = "/api/dashboard/satisfaction/export",
    params(SatisfactionQuery),
    tag = "Dashboard",
    responses(
        (status = 200, description = "CSV file with the ranked provinces", content_type = "text/csv", body = String),
        (status = 404, description = "No survey for that year")
    )
)]
pub async fn export_satisfaction(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<SatisfactionQuery>,
) -> Result<Response> {
    let csv = service.satisfaction_csv(query.year).await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "text/csv; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"satisfaction_{}.csv\"", query.year),
        ),
    ];

    Ok((headers, csv).into_response())
}

/// Lightweight dashboard counts
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    params(SummaryQuery),
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 404, description = "No survey for the requested year")
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>> {
    let summary = service.get_summary(query.year).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}
