//! Single-sheet `.xlsx` writer.
//!
//! Writes the minimal SpreadsheetML package Excel and LibreOffice accept:
//! content types, relationships, a workbook and one worksheet. Every cell
//! is an inline string so no shared-string table is needed.

use super::{ExportError, ExportTable};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const SHEET_PATH: &str = "xl/worksheets/sheet1.xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

pub fn write_workbook(sheet_name: &str, table: &ExportTable) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml(sheet_name)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        (SHEET_PATH, sheet_xml(table)),
    ];

    for (path, body) in parts {
        zip.start_file(path, options).map_err(write_err)?;
        zip.write_all(body.as_bytes()).map_err(write_err)?;
    }

    let cursor = zip.finish().map_err(write_err)?;
    Ok(cursor.into_inner())
}

fn write_err(err: impl std::fmt::Display) -> ExportError {
    ExportError::Write(err.to_string())
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(&sheet_title(sheet_name))
    )
}

/// Sheet names are limited to 31 chars and may not contain `[]:*?/\`.
fn sheet_title(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

fn sheet_xml(table: &ExportTable) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    push_row(&mut xml, 1, &table.headers);
    for (i, row) in table.rows.iter().enumerate() {
        push_row(&mut xml, i + 2, row);
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_row(xml: &mut String, number: usize, cells: &[String]) {
    xml.push_str(&format!(r#"<row r="{number}">"#));
    for (col, value) in cells.iter().enumerate() {
        xml.push_str(&format!(
            r#"<c r="{}{number}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
            column_name(col),
            escape_xml(value)
        ));
    }
    xml.push_str("</row>");
}

/// 0 -> A, 25 -> Z, 26 -> AA
pub fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // control characters other than tab/newline are invalid in XML 1.0
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(701), "ZZ");
    }

    #[test]
    fn test_workbook_contains_escaped_cells() {
        let table = ExportTable {
            headers: vec!["Name".to_string(), "Code".to_string()],
            rows: vec![vec!["Nuts & Bolts".to_string(), "<nb>".to_string()]],
        };
        let bytes = write_workbook("Categories", &table).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert!(archive.by_name("[Content_Types].xml").is_ok());
        let mut sheet = String::new();
        archive
            .by_name(SHEET_PATH)
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        assert!(sheet.contains(r#"<c r="A1" t="inlineStr"><is><t xml:space="preserve">Name</t>"#));
        assert!(sheet.contains("Nuts &amp; Bolts"));
        assert!(sheet.contains(r#"<c r="B2""#));
        assert!(sheet.contains("&lt;nb&gt;"));
    }

    #[test]
    fn test_sheet_title_is_sanitized() {
        assert_eq!(sheet_title("a/b?"), "ab");
        assert_eq!(sheet_title(""), "Sheet1");
        assert_eq!(sheet_title(&"x".repeat(40)).len(), 31);
    }
}
