use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{DashboardSummaryDto, SatisfactionResponseDto};
use crate::features::dashboard::scoring::{satisfaction_scores, ProvinceRef, ScoreRow};

/// Service for the public satisfaction dashboard
pub struct DashboardService {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct SurveyRef {
    id: Uuid,
    year: i32,
}

#[derive(Debug, FromRow)]
struct SummaryCounts {
    total_provinces: i64,
    total_wards: i64,
    total_respondents: i64,
    total_members: i64,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Satisfaction ranking
    // ========================================================================

    /// Rank every province by satisfaction index for one survey year.
    ///
    /// Recomputed from the raw rows on every call. Every respondent assigned
    /// to a province counts toward its `n`, whether or not they submitted;
    /// the LEFT JOIN leaves `survey_time` NULL and `point` 0 for the silent
    /// ones.
    pub async fn satisfaction(&self, year: i32) -> Result<SatisfactionResponseDto> {
        let survey = self.survey_for_year(year).await?;

        let total_questions = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM questions WHERE survey_id = $1",
        )
        .bind(survey.id)
        .fetch_one(&self.pool)
        .await?;

        let provinces = sqlx::query_as::<_, ProvinceRef>(
            "SELECT id, name, region FROM provinces ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch provinces for scoring: {:?}", e);
            AppError::Database(e)
        })?;

        let rows = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT r.province_id, r.is_member,
                   sr.submitted_at AS survey_time,
                   COALESCE(sr.point, 0) AS point
            FROM respondents r
            LEFT JOIN survey_responses sr
                ON sr.respondent_id = r.id AND sr.survey_id = $1
            "#,
        )
        .bind(survey.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch score rows: {:?}", e);
            AppError::Database(e)
        })?;

        let mut scored = satisfaction_scores(&provinces, &rows, total_questions);
        scored.sort_by(|a, b| b.point.total_cmp(&a.point));

        Ok(SatisfactionResponseDto {
            year: survey.year,
            survey_id: survey.id,
            total_questions,
            provinces: scored.into_iter().map(Into::into).collect(),
        })
    }

    /// The satisfaction ranking as a CSV attachment body.
    pub async fn satisfaction_csv(&self, year: i32) -> Result<Vec<u8>> {
        let ranking = self.satisfaction(year).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["STT", "Tỉnh/Thành phố", "Vùng", "Điểm hài lòng"])
            .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

        for (index, province) in ranking.provinces.iter().enumerate() {
            writer
                .write_record([
                    (index + 1).to_string(),
                    province.name.clone(),
                    province.region.clone(),
                    format!("{:.2}", province.point),
                ])
                .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {}", e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to finish CSV export: {}", e)))
    }

    // ========================================================================
    // Summary (lightweight stats for header)
    // ========================================================================

    /// Get lightweight summary counts. With a year, submissions are counted
    /// for that year's survey only.
    pub async fn get_summary(&self, year: Option<i32>) -> Result<DashboardSummaryDto> {
        let counts = sqlx::query_as::<_, SummaryCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM provinces) AS total_provinces,
                (SELECT COUNT(*) FROM wards) AS total_wards,
                (SELECT COUNT(*) FROM respondents) AS total_respondents,
                (SELECT COUNT(*) FROM respondents WHERE is_member) AS total_members
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get summary counts: {:?}", e);
            AppError::Database(e)
        })?;

        let total_submissions = match year {
            Some(year) => {
                let survey = self.survey_for_year(year).await?;
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM survey_responses WHERE survey_id = $1",
                )
                .bind(survey.id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM survey_responses")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(DashboardSummaryDto {
            total_provinces: counts.total_provinces,
            total_wards: counts.total_wards,
            total_respondents: counts.total_respondents,
            total_members: counts.total_members,
            total_submissions,
        })
    }

    async fn survey_for_year(&self, year: i32) -> Result<SurveyRef> {
        let survey =
            sqlx::query_as::<_, SurveyRef>("SELECT id, year FROM surveys WHERE year = $1")
                .bind(year)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Survey for year {} not found", year))
                })?;

        Ok(survey)
    }
}
