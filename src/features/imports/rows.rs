//! Per-target column layouts and parsed row types.
//!
//! Template files ship with Vietnamese headers; older exports used English
//! ones, so every column lists the spellings it accepts. Columns must appear
//! in template order. The first alias is the label used in error messages.

use crate::core::error::Result;
use crate::features::imports::parser::{check_header, ColumnSpec, Sheet};
use crate::features::imports::reconciler::ImportRow;

pub const PROVINCE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        label: "Tên tỉnh/thành phố",
        aliases: &["Tên tỉnh/thành phố", "Tên tỉnh", "Name"],
    },
    ColumnSpec {
        label: "Vùng",
        aliases: &["Vùng", "Vùng kinh tế", "Region"],
    },
];

pub const WARD_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        label: "Tên phường/xã",
        aliases: &["Tên phường/xã", "Tên xã", "Name"],
    },
    ColumnSpec {
        label: "Tỉnh/Thành phố",
        aliases: &["Tỉnh/Thành phố", "Tên tỉnh/thành phố", "Province"],
    },
];

pub const RESPONDENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        label: "Tên đăng nhập",
        aliases: &["Tên đăng nhập", "Username", "Name"],
    },
    ColumnSpec {
        label: "Tên tổ chức",
        aliases: &["Tên tổ chức", "Tổ chức", "Organization"],
    },
    ColumnSpec {
        label: "Tỉnh/Thành phố",
        aliases: &["Tỉnh/Thành phố", "Tên tỉnh/thành phố", "Province"],
    },
    ColumnSpec {
        label: "Phường/Xã",
        aliases: &["Phường/Xã", "Tên phường/xã", "Ward"],
    },
    ColumnSpec {
        label: "Thành viên liên minh",
        aliases: &["Thành viên liên minh", "Là thành viên", "IsMember"],
    },
];

#[derive(Debug, Clone)]
pub struct ProvinceRow {
    pub number: usize,
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct WardRow {
    pub number: usize,
    pub name: String,
    pub province_name: String,
}

#[derive(Debug, Clone)]
pub struct RespondentRow {
    pub number: usize,
    pub username: String,
    pub organization_name: String,
    pub province_name: String,
    /// Empty when the ward cell is blank
    pub ward_name: String,
    pub is_member: bool,
}

impl ImportRow for ProvinceRow {
    fn row_number(&self) -> usize {
        self.number
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn required_cells(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Tên tỉnh/thành phố", self.name.as_str()),
            ("Vùng", self.region.as_str()),
        ]
    }
}

impl ImportRow for WardRow {
    fn row_number(&self) -> usize {
        self.number
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn required_cells(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Tên phường/xã", self.name.as_str()),
            ("Tỉnh/Thành phố", self.province_name.as_str()),
        ]
    }
}

impl ImportRow for RespondentRow {
    fn row_number(&self) -> usize {
        self.number
    }

    fn display_name(&self) -> &str {
        &self.username
    }

    fn required_cells(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Tên đăng nhập", self.username.as_str()),
            ("Tên tổ chức", self.organization_name.as_str()),
            ("Tỉnh/Thành phố", self.province_name.as_str()),
        ]
    }
}

pub fn map_province_rows(sheet: &Sheet) -> Result<Vec<ProvinceRow>> {
    check_header(&sheet.header, PROVINCE_COLUMNS)?;

    Ok(sheet
        .rows
        .iter()
        .map(|row| ProvinceRow {
            number: row.number,
            name: row.cell(0).to_string(),
            region: row.cell(1).to_string(),
        })
        .collect())
}

pub fn map_ward_rows(sheet: &Sheet) -> Result<Vec<WardRow>> {
    check_header(&sheet.header, WARD_COLUMNS)?;

    Ok(sheet
        .rows
        .iter()
        .map(|row| WardRow {
            number: row.number,
            name: row.cell(0).to_string(),
            province_name: row.cell(1).to_string(),
        })
        .collect())
}

pub fn map_respondent_rows(sheet: &Sheet) -> Result<Vec<RespondentRow>> {
    check_header(&sheet.header, RESPONDENT_COLUMNS)?;

    Ok(sheet
        .rows
        .iter()
        .map(|row| RespondentRow {
            number: row.number,
            username: row.cell(0).to_string(),
            organization_name: row.cell(1).to_string(),
            province_name: row.cell(2).to_string(),
            ward_name: row.cell(3).to_string(),
            is_member: parse_member_flag(row.cell(4)),
        })
        .collect())
}

/// Membership cells come in as "1", "x", "có" or "true" depending on which
/// template generation the file came from. Anything else is non-member.
fn parse_member_flag(cell: &str) -> bool {
    matches!(
        cell.trim().to_lowercase().as_str(),
        "1" | "x" | "true" | "có" | "co" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::imports::parser::parse_upload;

    #[test]
    fn test_map_province_rows() {
        let bytes = "Tên tỉnh/thành phố,Vùng\nHà Nội,Đồng bằng sông Hồng\n".as_bytes();
        let sheet = parse_upload("provinces.csv", bytes).unwrap();
        let rows = map_province_rows(&sheet).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Hà Nội");
        assert_eq!(rows[0].region, "Đồng bằng sông Hồng");
    }

    #[test]
    fn test_map_respondent_rows_with_english_aliases() {
        let bytes = "Name,Organization,Province,Ward,IsMember\n\
                     htx_badinh,HTX Ba Đình,Hà Nội,Ba Đình,1\n\
                     qtd_hue,QTD Huế,Huế,,\n"
            .as_bytes();
        let sheet = parse_upload("respondents.csv", bytes).unwrap();
        let rows = map_respondent_rows(&sheet).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].username, "htx_badinh");
        assert_eq!(rows[0].province_name, "Hà Nội");
        assert!(rows[0].is_member);
        assert_eq!(rows[1].ward_name, "");
        assert!(!rows[1].is_member);
    }

    #[test]
    fn test_map_ward_rows_rejects_wrong_header() {
        let bytes = "Tên,Vùng\nBa Đình,Hà Nội\n".as_bytes();
        let sheet = parse_upload("wards.csv", bytes).unwrap();
        assert!(map_ward_rows(&sheet).is_err());
    }

    #[test]
    fn test_map_respondent_rows_requires_every_template_column() {
        // A file cut down to the first three columns is not the template.
        let bytes = "Tên đăng nhập,Tên tổ chức,Tỉnh/Thành phố\n\
                     htx_badinh,HTX Ba Đình,Hà Nội\n"
            .as_bytes();
        let sheet = parse_upload("respondents.csv", bytes).unwrap();
        assert!(map_respondent_rows(&sheet).is_err());
    }

    #[test]
    fn test_parse_member_flag() {
        assert!(parse_member_flag("1"));
        assert!(parse_member_flag(" x "));
        assert!(parse_member_flag("Có"));
        assert!(!parse_member_flag("0"));
        assert!(!parse_member_flag(""));
        assert!(!parse_member_flag("không"));
    }
}
