use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::results::dtos::{SubmitResultDto, SurveyResultDetailDto};
use crate::features::results::models::{SurveyAnswer, SurveyResultWithRespondent};
use crate::shared::constants::{MAX_ANSWER_VALUE, MIN_ANSWER_VALUE};
use crate::shared::types::PaginationQuery;

const SELECT_WITH_RESPONDENT: &str = r#"
    SELECT sr.id, sr.survey_id, sr.respondent_id,
           r.username, r.organization_name, r.is_member,
           sr.point, sr.submitted_at
    FROM survey_responses sr
    INNER JOIN respondents r ON r.id = sr.respondent_id
"#;

/// Service for survey result submissions
pub struct ResultService {
    pool: PgPool,
}

impl ResultService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit (or resubmit) a respondent's answers for a survey.
    ///
    /// The response row is upserted with `point` set to the answer sum and a
    /// fresh `submitted_at`; the previous answers are replaced wholesale in
    /// the same transaction.
    pub async fn submit(
        &self,
        survey_id: Uuid,
        respondent_id: Uuid,
        dto: SubmitResultDto,
    ) -> Result<SurveyResultDetailDto> {
        self.ensure_survey(survey_id).await?;
        self.ensure_respondent(respondent_id).await?;

        let known: HashSet<Uuid> =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM questions WHERE survey_id = $1")
                .bind(survey_id)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .collect();

        let mut seen = HashSet::new();
        for answer in &dto.answers {
            if !known.contains(&answer.question_id) {
                return Err(AppError::Validation(format!(
                    "Câu hỏi '{}' không thuộc khảo sát này",
                    answer.question_id
                )));
            }
            if !seen.insert(answer.question_id) {
                return Err(AppError::Validation(
                    "Mỗi câu hỏi chỉ được trả lời một lần".to_string(),
                ));
            }
            if answer.value < MIN_ANSWER_VALUE || answer.value > MAX_ANSWER_VALUE {
                return Err(AppError::Validation(
                    "Giá trị câu trả lời phải từ 1 đến 5".to_string(),
                ));
            }
        }

        let point: f64 = dto.answers.iter().map(|a| f64::from(a.value)).sum();

        let mut tx = self.pool.begin().await?;

        let response_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO survey_responses (survey_id, respondent_id, point, submitted_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (survey_id, respondent_id)
            DO UPDATE SET point = EXCLUDED.point, submitted_at = now()
            RETURNING id
            "#,
        )
        .bind(survey_id)
        .bind(respondent_id)
        .bind(point)
        .fetch_one(&mut *tx)
        .await
        .map_err(handle_db_error)?;

        sqlx::query("DELETE FROM survey_answers WHERE response_id = $1")
            .bind(response_id)
            .execute(&mut *tx)
            .await
            .map_err(handle_db_error)?;

        for answer in &dto.answers {
            sqlx::query(
                "INSERT INTO survey_answers (response_id, question_id, value) VALUES ($1, $2, $3)",
            )
            .bind(response_id)
            .bind(answer.question_id)
            .bind(answer.value)
            .execute(&mut *tx)
            .await
            .map_err(handle_db_error)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(%survey_id, %respondent_id, point, "Survey result submitted");

        self.get(survey_id, respondent_id).await
    }

    /// List submissions for a survey, newest first
    pub async fn list(
        &self,
        survey_id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<SurveyResultWithRespondent>, i64)> {
        self.ensure_survey(survey_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM survey_responses WHERE survey_id = $1",
        )
        .bind(survey_id)
        .fetch_one(&self.pool)
        .await?;

        let query = format!(
            r#"
            {SELECT_WITH_RESPONDENT}
            WHERE sr.survey_id = $1
            ORDER BY sr.submitted_at DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let results = sqlx::query_as::<_, SurveyResultWithRespondent>(&query)
            .bind(survey_id)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch survey results: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((results, total))
    }

    /// Get one respondent's submission with its answers
    pub async fn get(
        &self,
        survey_id: Uuid,
        respondent_id: Uuid,
    ) -> Result<SurveyResultDetailDto> {
        let query = format!(
            "{SELECT_WITH_RESPONDENT} WHERE sr.survey_id = $1 AND sr.respondent_id = $2"
        );

        let result = sqlx::query_as::<_, SurveyResultWithRespondent>(&query)
            .bind(survey_id)
            .bind(respondent_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Respondent has not submitted this survey".to_string())
            })?;

        let answers = sqlx::query_as::<_, SurveyAnswer>(
            r#"
            SELECT a.id, a.response_id, a.question_id, a.value
            FROM survey_answers a
            INNER JOIN questions q ON q.id = a.question_id
            WHERE a.response_id = $1
            ORDER BY q.display_order ASC
            "#,
        )
        .bind(result.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(SurveyResultDetailDto::from_parts(result, answers))
    }

    /// Clear a submission; the respondent counts as not-surveyed again
    pub async fn delete(&self, survey_id: Uuid, respondent_id: Uuid) -> Result<()> {
        let deleted = sqlx::query(
            "DELETE FROM survey_responses WHERE survey_id = $1 AND respondent_id = $2",
        )
        .bind(survey_id)
        .bind(respondent_id)
        .execute(&self.pool)
        .await
        .map_err(handle_db_error)?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Respondent has not submitted this survey".to_string(),
            ));
        }

        Ok(())
    }

    async fn ensure_survey(&self, survey_id: Uuid) -> Result<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM surveys WHERE id = $1)")
                .bind(survey_id)
                .fetch_one(&self.pool)
                .await?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Survey with id '{}' not found",
                survey_id
            )));
        }
        Ok(())
    }

    async fn ensure_respondent(&self, respondent_id: Uuid) -> Result<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM respondents WHERE id = $1)")
                .bind(respondent_id)
                .fetch_one(&self.pool)
                .await?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Respondent with id '{}' not found",
                respondent_id
            )));
        }
        Ok(())
    }
}
