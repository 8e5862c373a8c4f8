use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::geography::dtos::{
    CreateProvinceDto, CreateWardDto, UpdateProvinceDto, UpdateWardDto,
};
use crate::features::geography::models::{Province, Ward};
use crate::features::imports::rows::{map_province_rows, map_ward_rows, ProvinceRow, WardRow};
use crate::features::imports::{parse_upload, run_import, ImportReport, RowSink, SinkError};
use crate::shared::normalize::{normalized_name, trimmed_name};

/// Service for managing the province / ward hierarchy
pub struct GeographyService {
    pool: PgPool,
}

fn required_trimmed<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(value)
}

impl GeographyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Province Methods ====================

    /// List provinces with optional name/region search
    pub async fn list_provinces(&self, search: Option<&str>) -> Result<Vec<Province>> {
        let provinces = match search {
            Some(term) if !term.is_empty() => {
                let search_pattern = format!("%{}%", term.to_lowercase());
                sqlx::query_as::<_, Province>(
                    r#"
                    SELECT id, name, region, created_at, updated_at
                    FROM provinces
                    WHERE LOWER(name) LIKE $1 OR LOWER(region) LIKE $1
                    ORDER BY name ASC
                    "#,
                )
                .bind(search_pattern)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, Province>(
                    r#"
                    SELECT id, name, region, created_at, updated_at
                    FROM provinces
                    ORDER BY name ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to fetch provinces: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(provinces)
    }

    pub async fn get_province(&self, id: Uuid) -> Result<Province> {
        let province = sqlx::query_as::<_, Province>(
            r#"
            SELECT id, name, region, created_at, updated_at
            FROM provinces
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Province with id '{}' not found", id)))?;

        Ok(province)
    }

    pub async fn create_province(&self, dto: CreateProvinceDto) -> Result<Province> {
        let name = required_trimmed(&dto.name, "Tên tỉnh/thành phố không được để trống")?;
        let region = required_trimmed(&dto.region, "Vùng không được để trống")?;

        if self.province_name_exists(name, None).await? {
            return Err(AppError::Conflict(format!(
                "Tỉnh/thành phố '{}' đã tồn tại",
                name
            )));
        }

        let province = sqlx::query_as::<_, Province>(
            r#"
            INSERT INTO provinces (name, region)
            VALUES ($1, $2)
            RETURNING id, name, region, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(region)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(province)
    }

    /// Update name and region. Renaming is rejected once survey respondents
    /// reference the province, since historical results are keyed to it.
    pub async fn update_province(&self, id: Uuid, dto: UpdateProvinceDto) -> Result<Province> {
        let current = self.get_province(id).await?;

        let name = required_trimmed(&dto.name, "Tên tỉnh/thành phố không được để trống")?;
        let region = required_trimmed(&dto.region, "Vùng không được để trống")?;

        if normalized_name(name) != normalized_name(&current.name) {
            if self.province_respondent_count(id).await? > 0 {
                return Err(AppError::Conflict(
                    "Không thể đổi tên tỉnh/thành phố đã có đơn vị khảo sát".to_string(),
                ));
            }
            if self.province_name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "Tỉnh/thành phố '{}' đã tồn tại",
                    name
                )));
            }
        }

        let province = sqlx::query_as::<_, Province>(
            r#"
            UPDATE provinces
            SET name = $2, region = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, name, region, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(region)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(province)
    }

    pub async fn delete_province(&self, id: Uuid) -> Result<()> {
        self.get_province(id).await?;

        let ward_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM wards WHERE province_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if ward_count > 0 {
            return Err(AppError::Conflict(
                "Không thể xóa tỉnh/thành phố còn phường/xã".to_string(),
            ));
        }

        if self.province_respondent_count(id).await? > 0 {
            return Err(AppError::Conflict(
                "Không thể xóa tỉnh/thành phố đã có đơn vị khảo sát".to_string(),
            ));
        }

        sqlx::query("DELETE FROM provinces WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(())
    }

    async fn province_name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM provinces
                WHERE LOWER(TRIM(name)) = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(normalized_name(name))
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn province_respondent_count(&self, id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM respondents WHERE province_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    // ==================== Ward Methods ====================

    /// List wards of a province with optional name search
    pub async fn list_wards(&self, province_id: Uuid, search: Option<&str>) -> Result<Vec<Ward>> {
        self.get_province(province_id).await?;

        let wards = match search {
            Some(term) if !term.is_empty() => {
                let search_pattern = format!("%{}%", term.to_lowercase());
                sqlx::query_as::<_, Ward>(
                    r#"
                    SELECT id, name, province_id, created_at, updated_at
                    FROM wards
                    WHERE province_id = $1 AND LOWER(name) LIKE $2
                    ORDER BY name ASC
                    "#,
                )
                .bind(province_id)
                .bind(search_pattern)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, Ward>(
                    r#"
                    SELECT id, name, province_id, created_at, updated_at
                    FROM wards
                    WHERE province_id = $1
                    ORDER BY name ASC
                    "#,
                )
                .bind(province_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to fetch wards: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(wards)
    }

    pub async fn get_ward(&self, id: Uuid) -> Result<Ward> {
        let ward = sqlx::query_as::<_, Ward>(
            r#"
            SELECT id, name, province_id, created_at, updated_at
            FROM wards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ward with id '{}' not found", id)))?;

        Ok(ward)
    }

    pub async fn create_ward(&self, province_id: Uuid, dto: CreateWardDto) -> Result<Ward> {
        self.get_province(province_id).await?;
        let name = required_trimmed(&dto.name, "Tên phường/xã không được để trống")?;

        if self.ward_name_exists(province_id, name, None).await? {
            return Err(AppError::Conflict(format!(
                "Phường/xã '{}' đã tồn tại trong tỉnh/thành phố này",
                name
            )));
        }

        let ward = sqlx::query_as::<_, Ward>(
            r#"
            INSERT INTO wards (name, province_id)
            VALUES ($1, $2)
            RETURNING id, name, province_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(province_id)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(ward)
    }

    /// Rename a ward. The ward stays in its province; moving wards between
    /// provinces is not supported.
    pub async fn update_ward(&self, id: Uuid, dto: UpdateWardDto) -> Result<Ward> {
        let current = self.get_ward(id).await?;
        let name = required_trimmed(&dto.name, "Tên phường/xã không được để trống")?;

        if self
            .ward_name_exists(current.province_id, name, Some(id))
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Phường/xã '{}' đã tồn tại trong tỉnh/thành phố này",
                name
            )));
        }

        let ward = sqlx::query_as::<_, Ward>(
            r#"
            UPDATE wards
            SET name = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name, province_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(ward)
    }

    pub async fn delete_ward(&self, id: Uuid) -> Result<()> {
        self.get_ward(id).await?;

        let respondent_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM respondents WHERE ward_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if respondent_count > 0 {
            return Err(AppError::Conflict(
                "Không thể xóa phường/xã đã có đơn vị khảo sát".to_string(),
            ));
        }

        sqlx::query("DELETE FROM wards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(())
    }

    async fn ward_name_exists(
        &self,
        province_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM wards
                WHERE province_id = $1
                  AND LOWER(TRIM(name)) = $2
                  AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(province_id)
        .bind(normalized_name(name))
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    // ==================== Imports ====================

    pub async fn import_provinces(&self, file_name: &str, bytes: &[u8]) -> Result<ImportReport> {
        let sheet = parse_upload(file_name, bytes)?;
        let rows = map_province_rows(&sheet)?;

        let mut sink = ProvinceSink { pool: &self.pool };
        let report = run_import(&mut sink, &rows).await?;

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped.len(),
            "Province import finished"
        );
        Ok(report)
    }

    pub async fn import_wards(&self, file_name: &str, bytes: &[u8]) -> Result<ImportReport> {
        let sheet = parse_upload(file_name, bytes)?;
        let rows = map_ward_rows(&sheet)?;

        let mut sink = WardSink { pool: &self.pool };
        let report = run_import(&mut sink, &rows).await?;

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped.len(),
            "Ward import finished"
        );
        Ok(report)
    }
}

// ==================== Import Sinks ====================

struct ProvinceSink<'a> {
    pool: &'a PgPool,
}

#[async_trait]
impl RowSink for ProvinceSink<'_> {
    type Row = ProvinceRow;
    type Ctx = ();

    async fn resolve(&mut self, _row: &ProvinceRow) -> std::result::Result<(), SinkError> {
        Ok(())
    }

    async fn exists(&mut self, row: &ProvinceRow, _ctx: &()) -> std::result::Result<bool, SinkError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM provinces WHERE LOWER(TRIM(name)) = $1)",
        )
        .bind(normalized_name(&row.name))
        .fetch_one(self.pool)
        .await
        .map_err(SinkError::from_db)
    }

    async fn insert(&mut self, row: &ProvinceRow, _ctx: &()) -> std::result::Result<(), SinkError> {
        sqlx::query("INSERT INTO provinces (name, region) VALUES ($1, $2)")
            .bind(row.name.trim())
            .bind(row.region.trim())
            .execute(self.pool)
            .await
            .map_err(SinkError::from_db)?;
        Ok(())
    }
}

struct WardSink<'a> {
    pool: &'a PgPool,
}

#[async_trait]
impl RowSink for WardSink<'_> {
    type Row = WardRow;
    type Ctx = Uuid;

    /// Parent provinces are matched after trimming only; case must match
    /// what is stored.
    async fn resolve(&mut self, row: &WardRow) -> std::result::Result<Uuid, SinkError> {
        let province_name = trimmed_name(&row.province_name);

        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM provinces WHERE TRIM(name) = $1")
            .bind(province_name)
            .fetch_optional(self.pool)
            .await
            .map_err(SinkError::from_db)?;

        id.ok_or_else(|| {
            SinkError::Abort(format!(
                "Dòng {}: không tìm thấy tỉnh/thành phố '{}'",
                row.number, province_name
            ))
        })
    }

    async fn exists(&mut self, row: &WardRow, ctx: &Uuid) -> std::result::Result<bool, SinkError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM wards WHERE province_id = $1 AND LOWER(TRIM(name)) = $2)",
        )
        .bind(*ctx)
        .bind(normalized_name(&row.name))
        .fetch_one(self.pool)
        .await
        .map_err(SinkError::from_db)
    }

    async fn insert(&mut self, row: &WardRow, ctx: &Uuid) -> std::result::Result<(), SinkError> {
        sqlx::query("INSERT INTO wards (name, province_id) VALUES ($1, $2)")
            .bind(row.name.trim())
            .bind(*ctx)
            .execute(self.pool)
            .await
            .map_err(SinkError::from_db)?;
        Ok(())
    }
}
