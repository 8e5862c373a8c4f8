use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::imports::rows::{map_respondent_rows, RespondentRow};
use crate::features::imports::{parse_upload, run_import, ImportReport, RowSink, SinkError};
use crate::features::respondents::dtos::{
    CreateRespondentDto, RespondentQueryParams, UpdateRespondentDto,
};
use crate::features::respondents::models::RespondentWithNames;
use crate::shared::normalize::{normalized_name, trimmed_name};

const SELECT_WITH_NAMES: &str = r#"
    SELECT r.id, r.username, r.organization_name,
           r.province_id, p.name AS province_name,
           r.ward_id, w.name AS ward_name,
           r.is_member, r.created_at, r.updated_at
    FROM respondents r
    INNER JOIN provinces p ON p.id = r.province_id
    LEFT JOIN wards w ON w.id = r.ward_id
"#;

/// Service for managing survey respondent organizations
pub struct RespondentService {
    pool: PgPool,
}

fn required_trimmed<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(value)
}

impl RespondentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List respondents with pagination and filters
    pub async fn list(
        &self,
        params: &RespondentQueryParams,
    ) -> Result<(Vec<RespondentWithNames>, i64)> {
        let search_pattern = params
            .search
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", s.trim()));

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM respondents r
            WHERE ($1::uuid IS NULL OR r.province_id = $1)
              AND ($2::uuid IS NULL OR r.ward_id = $2)
              AND ($3::boolean IS NULL OR r.is_member = $3)
              AND ($4::text IS NULL OR r.username ILIKE $4 OR r.organization_name ILIKE $4)
            "#,
        )
        .bind(params.province_id)
        .bind(params.ward_id)
        .bind(params.is_member)
        .bind(search_pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let query = format!(
            r#"
            {SELECT_WITH_NAMES}
            WHERE ($1::uuid IS NULL OR r.province_id = $1)
              AND ($2::uuid IS NULL OR r.ward_id = $2)
              AND ($3::boolean IS NULL OR r.is_member = $3)
              AND ($4::text IS NULL OR r.username ILIKE $4 OR r.organization_name ILIKE $4)
            ORDER BY r.username ASC
            LIMIT $5 OFFSET $6
            "#
        );

        let respondents = sqlx::query_as::<_, RespondentWithNames>(&query)
            .bind(params.province_id)
            .bind(params.ward_id)
            .bind(params.is_member)
            .bind(search_pattern.as_deref())
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch respondents: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((respondents, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RespondentWithNames> {
        let query = format!("{SELECT_WITH_NAMES} WHERE r.id = $1");

        let respondent = sqlx::query_as::<_, RespondentWithNames>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Respondent with id '{}' not found", id)))?;

        Ok(respondent)
    }

    pub async fn create(&self, dto: CreateRespondentDto) -> Result<RespondentWithNames> {
        let username = dto.username.trim();
        let organization_name =
            required_trimmed(&dto.organization_name, "Tên tổ chức không được để trống")?;

        self.ensure_geography(dto.province_id, dto.ward_id).await?;

        if self.username_exists(username).await? {
            return Err(AppError::Conflict(format!(
                "Tên đăng nhập '{}' đã tồn tại",
                username
            )));
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO respondents (username, organization_name, province_id, ward_id, is_member)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(organization_name)
        .bind(dto.province_id)
        .bind(dto.ward_id)
        .bind(dto.is_member)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.get_by_id(id).await
    }

    /// Update everything except the username, which is the login identity
    /// survey submissions are keyed to.
    pub async fn update(&self, id: Uuid, dto: UpdateRespondentDto) -> Result<RespondentWithNames> {
        self.get_by_id(id).await?;

        let organization_name =
            required_trimmed(&dto.organization_name, "Tên tổ chức không được để trống")?;

        self.ensure_geography(dto.province_id, dto.ward_id).await?;

        sqlx::query(
            r#"
            UPDATE respondents
            SET organization_name = $2, province_id = $3, ward_id = $4,
                is_member = $5, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(organization_name)
        .bind(dto.province_id)
        .bind(dto.ward_id)
        .bind(dto.is_member)
        .execute(&self.pool)
        .await
        .map_err(handle_db_error)?;

        self.get_by_id(id).await
    }

    /// Delete a respondent. Their survey responses cascade with them.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.get_by_id(id).await?;

        sqlx::query("DELETE FROM respondents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(())
    }

    async fn ensure_geography(&self, province_id: Uuid, ward_id: Option<Uuid>) -> Result<()> {
        let province_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM provinces WHERE id = $1)")
                .bind(province_id)
                .fetch_one(&self.pool)
                .await?;

        if !province_exists {
            return Err(AppError::BadRequest(
                "Tỉnh/thành phố không tồn tại".to_string(),
            ));
        }

        if let Some(ward_id) = ward_id {
            let ward_matches = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM wards WHERE id = $1 AND province_id = $2)",
            )
            .bind(ward_id)
            .bind(province_id)
            .fetch_one(&self.pool)
            .await?;

            if !ward_matches {
                return Err(AppError::BadRequest(
                    "Phường/xã không thuộc tỉnh/thành phố đã chọn".to_string(),
                ));
            }
        }

        Ok(())
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM respondents WHERE LOWER(TRIM(username)) = $1)",
        )
        .bind(normalized_name(username))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    // ==================== Imports ====================

    pub async fn import(&self, file_name: &str, bytes: &[u8]) -> Result<ImportReport> {
        let sheet = parse_upload(file_name, bytes)?;
        let rows = map_respondent_rows(&sheet)?;

        let mut sink = RespondentSink { pool: &self.pool };
        let report = run_import(&mut sink, &rows).await?;

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped.len(),
            "Respondent import finished"
        );
        Ok(report)
    }
}

// ==================== Import Sink ====================

struct ResolvedGeography {
    province_id: Uuid,
    ward_id: Option<Uuid>,
}

struct RespondentSink<'a> {
    pool: &'a PgPool,
}

#[async_trait]
impl RowSink for RespondentSink<'_> {
    type Row = RespondentRow;
    type Ctx = ResolvedGeography;

    /// Both lookups are trim-only; stored case must match the file.
    async fn resolve(
        &mut self,
        row: &RespondentRow,
    ) -> std::result::Result<ResolvedGeography, SinkError> {
        let province_name = trimmed_name(&row.province_name);

        let province_id =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM provinces WHERE TRIM(name) = $1")
                .bind(province_name)
                .fetch_optional(self.pool)
                .await
                .map_err(SinkError::from_db)?
                .ok_or_else(|| {
                    SinkError::Abort(format!(
                        "Dòng {}: không tìm thấy tỉnh/thành phố '{}'",
                        row.number, province_name
                    ))
                })?;

        let ward_name = trimmed_name(&row.ward_name);
        let ward_id = if ward_name.is_empty() {
            None
        } else {
            let id = sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM wards WHERE province_id = $1 AND TRIM(name) = $2",
            )
            .bind(province_id)
            .bind(ward_name)
            .fetch_optional(self.pool)
            .await
            .map_err(SinkError::from_db)?
            .ok_or_else(|| {
                SinkError::Abort(format!(
                    "Dòng {}: không tìm thấy phường/xã '{}'",
                    row.number, ward_name
                ))
            })?;
            Some(id)
        };

        Ok(ResolvedGeography {
            province_id,
            ward_id,
        })
    }

    async fn exists(
        &mut self,
        row: &RespondentRow,
        _ctx: &ResolvedGeography,
    ) -> std::result::Result<bool, SinkError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM respondents WHERE LOWER(TRIM(username)) = $1)",
        )
        .bind(normalized_name(&row.username))
        .fetch_one(self.pool)
        .await
        .map_err(SinkError::from_db)
    }

    async fn insert(
        &mut self,
        row: &RespondentRow,
        ctx: &ResolvedGeography,
    ) -> std::result::Result<(), SinkError> {
        sqlx::query(
            r#"
            INSERT INTO respondents (username, organization_name, province_id, ward_id, is_member)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.username.trim())
        .bind(row.organization_name.trim())
        .bind(ctx.province_id)
        .bind(ctx.ward_id)
        .bind(row.is_member)
        .execute(self.pool)
        .await
        .map_err(SinkError::from_db)?;

        Ok(())
    }

    fn duplicate_error(&self) -> String {
        "Tên đăng nhập đã tồn tại trong hệ thống".to_string()
    }
}
