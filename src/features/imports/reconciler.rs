//! Row-by-row import engine shared by the province, ward and respondent
//! uploads.
//!
//! Failure handling distinguishes two classes:
//! - fatal: a blank required cell or an unknown referenced parent stops the
//!   whole import at that row. Rows committed before it stay committed.
//! - per-row: a duplicate name or a failed insert is recorded in the report
//!   and processing continues with the next row.
//!
//! Rows are committed one at a time, not in a batch transaction, so each
//! duplicate check also sees rows inserted earlier in the same file.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};

/// A parsed data row the engine can validate and report on.
pub trait ImportRow {
    /// 1-based position after the header row.
    fn row_number(&self) -> usize;

    /// Name shown in the skip report.
    fn display_name(&self) -> &str;

    /// (column label, cell value) pairs that must be non-blank.
    fn required_cells(&self) -> Vec<(&'static str, &str)>;
}

/// Row-level failure raised by a sink.
#[derive(Debug)]
pub enum SinkError {
    /// Stops the whole import at the current row.
    Abort(String),
    /// Recorded for the row; the import continues.
    Skip(String),
}

impl SinkError {
    /// Database failures while handling one row are recorded for that row,
    /// not treated as fatal.
    pub fn from_db(e: sqlx::Error) -> Self {
        tracing::error!("Import row failed: {:?}", e);
        SinkError::Skip("Không thể lưu dữ liệu. Vui lòng thử lại".to_string())
    }
}

/// Persistence adapter for one import target.
#[async_trait]
pub trait RowSink {
    type Row: ImportRow + Send + Sync;
    /// Resolved reference data carried from `resolve` to `exists`/`insert`,
    /// e.g. the parent province id. `()` when the target has no parent.
    type Ctx: Send + Sync;

    /// Resolve named references. Unknown names abort the import.
    async fn resolve(&mut self, row: &Self::Row) -> std::result::Result<Self::Ctx, SinkError>;

    /// Whether an equivalent record is already committed, compared by
    /// normalized name. Must see rows inserted earlier in this batch.
    async fn exists(
        &mut self,
        row: &Self::Row,
        ctx: &Self::Ctx,
    ) -> std::result::Result<bool, SinkError>;

    /// Persist the record.
    async fn insert(
        &mut self,
        row: &Self::Row,
        ctx: &Self::Ctx,
    ) -> std::result::Result<(), SinkError>;

    /// Message recorded when `exists` reports a duplicate.
    fn duplicate_error(&self) -> String {
        "Tên đã tồn tại trong hệ thống".to_string()
    }
}

/// One row left out of an otherwise completed import.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SkippedRow {
    /// 1-based data row in the uploaded file
    pub row: usize,
    pub name: String,
    pub error: String,
}

/// Outcome of a completed import run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    pub message: String,
    pub inserted: usize,
    pub skipped: Vec<SkippedRow>,
}

fn record_skip<R: ImportRow>(skipped: &mut Vec<SkippedRow>, row: &R, error: String) {
    skipped.push(SkippedRow {
        row: row.row_number(),
        name: row.display_name().to_string(),
        error,
    });
}

/// Run an import over already-parsed rows, strictly in file order.
pub async fn run_import<S: RowSink>(sink: &mut S, rows: &[S::Row]) -> Result<ImportReport> {
    let mut skipped: Vec<SkippedRow> = Vec::new();
    let mut inserted = 0usize;

    for row in rows {
        for (label, value) in row.required_cells() {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Dòng {} thiếu dữ liệu ở cột '{}'. Vui lòng kiểm tra lại file.",
                    row.row_number(),
                    label
                )));
            }
        }

        let ctx = match sink.resolve(row).await {
            Ok(ctx) => ctx,
            Err(SinkError::Abort(message)) => return Err(AppError::Validation(message)),
            Err(SinkError::Skip(error)) => {
                record_skip(&mut skipped, row, error);
                continue;
            }
        };

        match sink.exists(row, &ctx).await {
            Ok(true) => {
                record_skip(&mut skipped, row, sink.duplicate_error());
                continue;
            }
            Ok(false) => {}
            Err(SinkError::Abort(message)) => return Err(AppError::Validation(message)),
            Err(SinkError::Skip(error)) => {
                record_skip(&mut skipped, row, error);
                continue;
            }
        }

        match sink.insert(row, &ctx).await {
            Ok(()) => inserted += 1,
            Err(SinkError::Abort(message)) => return Err(AppError::Validation(message)),
            Err(SinkError::Skip(error)) => record_skip(&mut skipped, row, error),
        }
    }

    Ok(ImportReport {
        message: format!(
            "Nhập dữ liệu hoàn tất: thêm {} dòng, bỏ qua {} dòng",
            inserted,
            skipped.len()
        ),
        inserted,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalize::normalized_name;

    struct TestRow {
        number: usize,
        name: String,
        parent: Option<String>,
    }

    impl TestRow {
        fn new(number: usize, name: &str) -> Self {
            Self {
                number,
                name: name.to_string(),
                parent: None,
            }
        }

        fn with_parent(number: usize, name: &str, parent: &str) -> Self {
            Self {
                number,
                name: name.to_string(),
                parent: Some(parent.to_string()),
            }
        }
    }

    impl ImportRow for TestRow {
        fn row_number(&self) -> usize {
            self.number
        }

        fn display_name(&self) -> &str {
            &self.name
        }

        fn required_cells(&self) -> Vec<(&'static str, &str)> {
            vec![("Tên", self.name.as_str())]
        }
    }

    #[derive(Default)]
    struct MemorySink {
        committed: Vec<String>,
        parents: Vec<String>,
        failing_inserts: Vec<String>,
    }

    #[async_trait]
    impl RowSink for MemorySink {
        type Row = TestRow;
        type Ctx = ();

        async fn resolve(&mut self, row: &TestRow) -> std::result::Result<(), SinkError> {
            if let Some(parent) = &row.parent {
                let parent = parent.trim();
                if !self.parents.iter().any(|p| p == parent) {
                    return Err(SinkError::Abort(format!(
                        "Dòng {}: không tìm thấy tỉnh/thành phố '{}'",
                        row.number, parent
                    )));
                }
            }
            Ok(())
        }

        async fn exists(&mut self, row: &TestRow, _ctx: &()) -> std::result::Result<bool, SinkError> {
            Ok(self.committed.contains(&normalized_name(&row.name)))
        }

        async fn insert(&mut self, row: &TestRow, _ctx: &()) -> std::result::Result<(), SinkError> {
            if self.failing_inserts.contains(&row.name) {
                return Err(SinkError::Skip("Không thể lưu dữ liệu".to_string()));
            }
            self.committed.push(normalized_name(&row.name));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_duplicate_by_normalized_name_is_skipped() {
        let mut sink = MemorySink::default();
        let rows = vec![TestRow::new(1, "Hà Nội"), TestRow::new(2, "hà nội ")];

        let report = run_import(&mut sink, &rows).await.unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 2);
        assert_eq!(report.skipped[0].name, "hà nội ");
        assert_eq!(sink.committed, vec!["hà nội"]);
    }

    #[tokio::test]
    async fn test_duplicate_against_previous_import_is_skipped() {
        let mut sink = MemorySink {
            committed: vec!["hà nội".to_string()],
            ..MemorySink::default()
        };
        let rows = vec![TestRow::new(1, "Hà Nội"), TestRow::new(2, "Huế")];

        let report = run_import(&mut sink, &rows).await.unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 1);
    }

    #[tokio::test]
    async fn test_blank_required_cell_aborts_and_keeps_earlier_rows() {
        let mut sink = MemorySink::default();
        let rows = vec![
            TestRow::new(1, "Hà Nội"),
            TestRow::new(2, "Huế"),
            TestRow::new(3, "   "),
            TestRow::new(4, "Cần Thơ"),
        ];

        let err = run_import(&mut sink, &rows).await.unwrap_err();

        assert!(err.to_string().contains("Dòng 3"));
        // Rows before the failing one stay committed, later rows are never seen.
        assert_eq!(sink.committed, vec!["hà nội", "huế"]);
    }

    #[tokio::test]
    async fn test_missing_parent_aborts_import() {
        let mut sink = MemorySink {
            parents: vec!["Hà Nội".to_string()],
            ..MemorySink::default()
        };
        let rows = vec![
            TestRow::with_parent(1, "Ba Đình", "Hà Nội"),
            TestRow::with_parent(2, "Hải Châu", "Đà Nẵng"),
            TestRow::with_parent(3, "Hoàn Kiếm", "Hà Nội"),
        ];

        let err = run_import(&mut sink, &rows).await.unwrap_err();

        assert!(err.to_string().contains("Dòng 2"));
        assert!(err.to_string().contains("Đà Nẵng"));
        assert_eq!(sink.committed, vec!["ba đình"]);
    }

    #[tokio::test]
    async fn test_parent_lookup_is_case_sensitive() {
        let mut sink = MemorySink {
            parents: vec!["Hà Nội".to_string()],
            ..MemorySink::default()
        };
        // Same letters, different case: the narrower trim-only rule applies
        // to parent references, so this does not match.
        let rows = vec![TestRow::with_parent(1, "Ba Đình", "hà nội")];

        assert!(run_import(&mut sink, &rows).await.is_err());
    }

    #[tokio::test]
    async fn test_insert_failure_is_recorded_not_fatal() {
        let mut sink = MemorySink {
            failing_inserts: vec!["Huế".to_string()],
            ..MemorySink::default()
        };
        let rows = vec![
            TestRow::new(1, "Hà Nội"),
            TestRow::new(2, "Huế"),
            TestRow::new(3, "Cần Thơ"),
        ];

        let report = run_import(&mut sink, &rows).await.unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 2);
        assert_eq!(report.skipped[0].error, "Không thể lưu dữ liệu");
        assert_eq!(sink.committed, vec!["hà nội", "cần thơ"]);
    }

    #[tokio::test]
    async fn test_report_message_carries_counts() {
        let mut sink = MemorySink::default();
        let rows = vec![TestRow::new(1, "Hà Nội"), TestRow::new(2, "Hà Nội")];

        let report = run_import(&mut sink, &rows).await.unwrap();

        assert!(report.message.contains("thêm 1"));
        assert!(report.message.contains("bỏ qua 1"));
    }
}
