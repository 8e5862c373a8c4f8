//! Turns uploaded CSV / XLSX bytes into rows of string cells.
//!
//! Files carry a single header row followed by data rows. The header must
//! list the expected columns in template order; each heading is compared
//! literally against the accepted spellings of its column. Data cells are
//! then read by position.

use calamine::{Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

use crate::core::error::{AppError, Result};

/// Raw tabular content of an uploaded file.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub header: Vec<String>,
    pub rows: Vec<SheetRow>,
}

/// One data row. `number` is 1-based and counts from the first row after the
/// header, so error messages match what operators see in their spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub number: usize,
    pub cells: Vec<String>,
}

impl SheetRow {
    /// Cell at the given column, empty when the row is shorter than the
    /// header.
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

/// One expected column: display label plus accepted header spellings.
#[derive(Debug)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub aliases: &'static [&'static str],
}

/// Dispatch on file extension. Only .csv and .xlsx are accepted.
pub fn parse_upload(file_name: &str, bytes: &[u8]) -> Result<Sheet> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => parse_csv(bytes),
        "xlsx" => parse_xlsx(bytes),
        _ => Err(AppError::Validation(
            "Định dạng file không được hỗ trợ. Vui lòng dùng file .csv hoặc .xlsx".to_string(),
        )),
    }
}

/// Compare the header row against the expected columns position by position.
/// Headings are compared as-is, so a reordered column, a stray space, an
/// unknown spelling, or a missing or extra column all abort the import
/// before any row is processed.
pub fn check_header(header: &[String], specs: &[ColumnSpec]) -> Result<()> {
    if header.len() != specs.len() {
        return Err(AppError::Validation(format!(
            "File không đúng định dạng: cần {} cột nhưng file có {} cột. Vui lòng sử dụng file mẫu.",
            specs.len(),
            header.len()
        )));
    }

    for (position, (cell, spec)) in header.iter().zip(specs).enumerate() {
        if !spec.aliases.contains(&cell.as_str()) {
            return Err(AppError::Validation(format!(
                "File không đúng định dạng: cột thứ {} phải là '{}'. Vui lòng sử dụng file mẫu.",
                position + 1,
                spec.label
            )));
        }
    }

    Ok(())
}

fn parse_csv(bytes: &[u8]) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| AppError::Validation(format!("File CSV không hợp lệ: {}", e)))?;
        records.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    build_sheet(records)
}

fn parse_xlsx(bytes: &[u8]) -> Result<Sheet> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::Validation(format!("File Excel không hợp lệ: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Validation("File Excel không có sheet dữ liệu".to_string()))?
        .map_err(|e| AppError::Validation(format!("File Excel không hợp lệ: {}", e)))?;

    let records = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    build_sheet(records)
}

fn cell_to_string(cell: &calamine::DataType) -> String {
    match cell {
        calamine::DataType::String(s) => s.clone(),
        calamine::DataType::Int(i) => i.to_string(),
        calamine::DataType::Float(f) => {
            // Whole numbers come back as floats; render "79" instead of "79.0"
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        calamine::DataType::Bool(b) => b.to_string(),
        calamine::DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

fn build_sheet(records: Vec<Vec<String>>) -> Result<Sheet> {
    let mut records = records.into_iter();

    let header = records
        .next()
        .ok_or_else(|| AppError::Validation("File không có dữ liệu".to_string()))?;

    // Spreadsheets routinely end with blank rows; drop every fully blank row
    // while keeping the sheet row numbers of the rest.
    let rows = records
        .enumerate()
        .map(|(index, cells)| SheetRow {
            number: index + 1,
            cells,
        })
        .filter(|row| row.cells.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    Ok(Sheet { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME_COLUMN: ColumnSpec = ColumnSpec {
        label: "Tên",
        aliases: &["Tên", "Name"],
    };

    const NOTE_COLUMN: ColumnSpec = ColumnSpec {
        label: "Ghi chú",
        aliases: &["Ghi chú"],
    };

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn test_parse_csv_upload() {
        let bytes = "Tên,Ghi chú\nHà Nội,thủ đô\nĐà Nẵng,\n".as_bytes();
        let sheet = parse_upload("provinces.csv", bytes).unwrap();

        assert_eq!(sheet.header, vec!["Tên", "Ghi chú"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].number, 1);
        assert_eq!(sheet.rows[0].cells, vec!["Hà Nội", "thủ đô"]);
        assert_eq!(sheet.rows[1].cells, vec!["Đà Nẵng", ""]);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let result = parse_upload("data.pdf", b"whatever");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(parse_upload("empty.csv", b"").is_err());
    }

    #[test]
    fn test_blank_rows_are_dropped_but_numbering_is_kept() {
        let bytes = "Tên\nHà Nội\n,\nHải Phòng\n".as_bytes();
        let sheet = parse_upload("provinces.csv", bytes).unwrap();

        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].number, 1);
        // The blank row 2 is gone but row 3 keeps its sheet position.
        assert_eq!(sheet.rows[1].number, 3);
        assert_eq!(sheet.rows[1].cells[0], "Hải Phòng");
    }

    #[test]
    fn test_template_header_passes() {
        let result = check_header(&header(&["Tên", "Ghi chú"]), &[NAME_COLUMN, NOTE_COLUMN]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_alias_spelling_passes_in_its_position() {
        let result = check_header(&header(&["Name", "Ghi chú"]), &[NAME_COLUMN, NOTE_COLUMN]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_reordered_header_is_rejected() {
        let result = check_header(&header(&["Ghi chú", "Tên"]), &[NAME_COLUMN, NOTE_COLUMN]);
        assert!(result.is_err());
    }

    #[test]
    fn test_padded_header_cell_is_rejected() {
        let result = check_header(&header(&[" Tên ", "Ghi chú"]), &[NAME_COLUMN, NOTE_COLUMN]);
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_column_is_rejected() {
        let result = check_header(
            &header(&["Tên", "Ghi chú", "Cột lạ"]),
            &[NAME_COLUMN, NOTE_COLUMN],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let result = check_header(&header(&["Tên"]), &[NAME_COLUMN, NOTE_COLUMN]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatch_error_names_the_expected_column() {
        let err = check_header(&header(&["Vùng", "Ghi chú"]), &[NAME_COLUMN, NOTE_COLUMN])
            .unwrap_err();
        assert!(err.to_string().contains("Tên"));
    }

    #[test]
    fn test_short_row_reads_trailing_cells_as_empty() {
        let row = SheetRow {
            number: 1,
            cells: vec!["Hà Nội".to_string()],
        };
        assert_eq!(row.cell(0), "Hà Nội");
        assert_eq!(row.cell(1), "");
    }
}
