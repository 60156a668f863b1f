//! Export of list rows to spreadsheet or PDF, or a request for the backend
//! to email or schedule the export.

pub mod pdf;
pub mod xlsx;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "Excel",
            ExportFormat::Pdf => "PDF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMethod {
    Download,
    Email,
    Schedule,
}

impl ExportMethod {
    /// Whether the file is produced in the browser.
    pub fn is_client_side(&self) -> bool {
        matches!(self, ExportMethod::Download)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportMethod::Download => "Download",
            ExportMethod::Email => "Send by email",
            ExportMethod::Schedule => "Schedule",
        }
    }
}

/// Column metadata shared by the table, the column toggle and the export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub default_visible: bool,
}

impl ColumnDef {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
            default_visible: true,
        }
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn hidden(mut self) -> Self {
        self.default_visible = false;
        self
    }
}

/// Rows that can be exported column by column.
pub trait Exportable {
    fn columns() -> &'static [ColumnDef];

    /// Display value of one column; unknown keys yield an empty string.
    fn cell(&self, key: &str) -> String;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("select at least one column")]
    NoColumns,
    #[error("unknown column `{0}`")]
    UnknownColumn(String),
    #[error("there is nothing to export")]
    NoRows,
    #[error("an email address is required")]
    MissingEmail,
    #[error("failed to write file: {0}")]
    Write(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Project rows onto the selected columns, keeping the requested order.
pub fn build_export_table<T: Exportable>(
    rows: &[T],
    selected: &[String],
) -> Result<ExportTable, ExportError> {
    if selected.is_empty() {
        return Err(ExportError::NoColumns);
    }
    let defs = T::columns();
    let mut columns = Vec::with_capacity(selected.len());
    for key in selected {
        let def = defs
            .iter()
            .find(|d| d.key == key)
            .ok_or_else(|| ExportError::UnknownColumn(key.clone()))?;
        columns.push(def);
    }
    if rows.is_empty() {
        return Err(ExportError::NoRows);
    }

    Ok(ExportTable {
        headers: columns.iter().map(|c| c.label.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| columns.iter().map(|c| row.cell(c.key)).collect())
            .collect(),
    })
}

/// `categories_1718000000000.xlsx`
pub fn export_file_name(resource: &str, format: ExportFormat, timestamp_ms: i64) -> String {
    format!("{resource}_{timestamp_ms}.{}", format.extension())
}

pub fn render(table: &ExportTable, format: ExportFormat, title: &str) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Excel => xlsx::write_workbook(title, table),
        ExportFormat::Pdf => Ok(pdf::write_document(title, table)),
    }
}

/// Which rows the backend should export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExportScope {
    Filters { filters: BTreeMap<String, String> },
    Ids { ids: Vec<i64> },
}

/// Body of `POST /{resource}/export` for server-side delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub method: ExportMethod,
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub scope: ExportScope,
}

impl ExportRequest {
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.columns.is_empty() {
            return Err(ExportError::NoColumns);
        }
        if self.method == ExportMethod::Email
            && self.email.as_deref().map_or(true, |e| !e.contains('@'))
        {
            return Err(ExportError::MissingEmail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        code: &'static str,
    }

    const COLUMNS: &[ColumnDef] = &[
        ColumnDef::new("name", "Name").sortable(),
        ColumnDef::new("code", "Code"),
    ];

    impl Exportable for Row {
        fn columns() -> &'static [ColumnDef] {
            COLUMNS
        }

        fn cell(&self, key: &str) -> String {
            match key {
                "name" => self.name.to_string(),
                "code" => self.code.to_string(),
                _ => String::new(),
            }
        }
    }

    #[test]
    fn test_table_follows_selected_order() {
        let rows = [Row { name: "Piece", code: "pc" }];
        let table =
            build_export_table(&rows, &["code".to_string(), "name".to_string()]).unwrap();
        assert_eq!(table.headers, vec!["Code", "Name"]);
        assert_eq!(table.rows, vec![vec!["pc".to_string(), "Piece".to_string()]]);
    }

    #[test]
    fn test_unknown_and_empty_columns_rejected() {
        let rows = [Row { name: "a", code: "b" }];
        assert_eq!(build_export_table(&rows, &[]), Err(ExportError::NoColumns));
        assert_eq!(
            build_export_table(&rows, &["price".to_string()]),
            Err(ExportError::UnknownColumn("price".to_string()))
        );
        let empty: [Row; 0] = [];
        assert_eq!(
            build_export_table(&empty, &["name".to_string()]),
            Err(ExportError::NoRows)
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            export_file_name("units", ExportFormat::Pdf, 1718000000000),
            "units_1718000000000.pdf"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let mut filters = BTreeMap::new();
        filters.insert("search".to_string(), "kg".to_string());
        let request = ExportRequest {
            format: ExportFormat::Excel,
            method: ExportMethod::Email,
            columns: vec!["name".to_string()],
            email: Some("ops@example.com".to_string()),
            scope: ExportScope::Filters { filters },
        };
        assert!(request.validate().is_ok());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["format"], "excel");
        assert_eq!(json["method"], "email");
        assert_eq!(json["filters"]["search"], "kg");
        assert!(json.get("ids").is_none());
    }

    #[test]
    fn test_email_method_needs_address() {
        let request = ExportRequest {
            format: ExportFormat::Pdf,
            method: ExportMethod::Email,
            columns: vec!["name".to_string()],
            email: None,
            scope: ExportScope::Ids { ids: vec![1, 2] },
        };
        assert_eq!(request.validate(), Err(ExportError::MissingEmail));
    }
}
