use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::surveys::dtos::{
    CreateQuestionDto, CreateSurveyDto, UpdateQuestionDto, UpdateSurveyDto,
};
use crate::features::surveys::models::{Question, SurveyWithCount};

const SELECT_WITH_COUNT: &str = r#"
    SELECT s.id, s.name, s.year, s.description, s.is_active,
           COUNT(q.id) AS total_questions,
           s.created_at, s.updated_at
    FROM surveys s
    LEFT JOIN questions q ON q.survey_id = s.id
"#;

/// Service for managing surveys and their questionnaires
pub struct SurveyService {
    pool: PgPool,
}

fn required_trimmed<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(value)
}

impl SurveyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Survey Methods ====================

    /// List surveys, newest year first
    pub async fn list_surveys(&self) -> Result<Vec<SurveyWithCount>> {
        let query = format!("{SELECT_WITH_COUNT} GROUP BY s.id ORDER BY s.year DESC");

        let surveys = sqlx::query_as::<_, SurveyWithCount>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch surveys: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(surveys)
    }

    pub async fn get_survey(&self, id: Uuid) -> Result<SurveyWithCount> {
        let query = format!("{SELECT_WITH_COUNT} WHERE s.id = $1 GROUP BY s.id");

        let survey = sqlx::query_as::<_, SurveyWithCount>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Survey with id '{}' not found", id)))?;

        Ok(survey)
    }

    pub async fn create_survey(&self, dto: CreateSurveyDto) -> Result<SurveyWithCount> {
        let name = required_trimmed(&dto.name, "Tên khảo sát không được để trống")?;

        if self.year_exists(dto.year, None).await? {
            return Err(AppError::Conflict(format!(
                "Khảo sát cho năm {} đã tồn tại",
                dto.year
            )));
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO surveys (name, year, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(dto.year)
        .bind(dto.description.as_deref().map(str::trim))
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.get_survey(id).await
    }

    pub async fn update_survey(&self, id: Uuid, dto: UpdateSurveyDto) -> Result<SurveyWithCount> {
        self.get_survey(id).await?;

        let name = required_trimmed(&dto.name, "Tên khảo sát không được để trống")?;

        if self.year_exists(dto.year, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "Khảo sát cho năm {} đã tồn tại",
                dto.year
            )));
        }

        sqlx::query(
            r#"
            UPDATE surveys
            SET name = $2, year = $3, description = $4, is_active = $5, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(dto.year)
        .bind(dto.description.as_deref().map(str::trim))
        .bind(dto.is_active)
        .execute(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.get_survey(id).await
    }

    /// Delete a survey. Rejected once results are in, since the yearly
    /// rankings are built from them.
    pub async fn delete_survey(&self, id: Uuid) -> Result<()> {
        self.get_survey(id).await?;

        if self.response_count(id).await? > 0 {
            return Err(AppError::Conflict(
                "Không thể xóa khảo sát đã có kết quả".to_string(),
            ));
        }

        sqlx::query("DELETE FROM surveys WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(())
    }

    async fn year_exists(&self, year: i32, exclude: Option<Uuid>) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM surveys
                WHERE year = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(year)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn response_count(&self, survey_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM survey_responses WHERE survey_id = $1",
        )
        .bind(survey_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    // ==================== Question Methods ====================

    pub async fn list_questions(&self, survey_id: Uuid) -> Result<Vec<Question>> {
        self.get_survey(survey_id).await?;

        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, survey_id, content, display_order, created_at
            FROM questions
            WHERE survey_id = $1
            ORDER BY display_order ASC, created_at ASC
            "#,
        )
        .bind(survey_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch questions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(questions)
    }

    /// Add a question. The question count feeds the satisfaction formula, so
    /// the questionnaire is frozen once the survey has results.
    pub async fn create_question(
        &self,
        survey_id: Uuid,
        dto: CreateQuestionDto,
    ) -> Result<Question> {
        self.get_survey(survey_id).await?;
        self.ensure_no_responses(survey_id).await?;

        let content = required_trimmed(&dto.content, "Nội dung câu hỏi không được để trống")?;

        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (survey_id, content, display_order)
            VALUES ($1, $2, COALESCE(
                $3,
                (SELECT COALESCE(MAX(display_order), 0) + 1 FROM questions WHERE survey_id = $1)
            ))
            RETURNING id, survey_id, content, display_order, created_at
            "#,
        )
        .bind(survey_id)
        .bind(content)
        .bind(dto.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(question)
    }

    pub async fn update_question(&self, id: Uuid, dto: UpdateQuestionDto) -> Result<Question> {
        let current = self.get_question(id).await?;
        self.ensure_no_responses(current.survey_id).await?;

        let content = required_trimmed(&dto.content, "Nội dung câu hỏi không được để trống")?;

        let question = sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET content = $2, display_order = $3
            WHERE id = $1
            RETURNING id, survey_id, content, display_order, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(dto.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(question)
    }

    pub async fn delete_question(&self, id: Uuid) -> Result<()> {
        let current = self.get_question(id).await?;
        self.ensure_no_responses(current.survey_id).await?;

        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(())
    }

    async fn get_question(&self, id: Uuid) -> Result<Question> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, survey_id, content, display_order, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))?;

        Ok(question)
    }

    async fn ensure_no_responses(&self, survey_id: Uuid) -> Result<()> {
        if self.response_count(survey_id).await? > 0 {
            return Err(AppError::Conflict(
                "Không thể thay đổi câu hỏi của khảo sát đã có kết quả".to_string(),
            ));
        }
        Ok(())
    }
}
