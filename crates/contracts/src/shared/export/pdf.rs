//! Plain table-to-PDF writer (PDF 1.4, A4 landscape, built-in Helvetica).
//!
//! Text is encoded as WinAnsi; characters outside Latin-1 are replaced
//! with `?`. Long cells are truncated to the column width.

use super::ExportTable;

const PAGE_WIDTH: f32 = 842.0;
const PAGE_HEIGHT: f32 = 595.0;
const MARGIN: f32 = 36.0;
const TITLE_SIZE: f32 = 14.0;
const FONT_SIZE: f32 = 9.0;
const ROW_HEIGHT: f32 = 16.0;
/// Rough average glyph width of Helvetica relative to the font size.
const GLYPH_WIDTH: f32 = 0.52;

pub fn write_document(title: &str, table: &ExportTable) -> Vec<u8> {
    let pages = paginate(table);
    let page_count = pages.len();

    // 1 catalog, 2 pages, 3 regular font, 4 bold font, then page/content pairs
    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(4 + page_count * 2);
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 5 + i * 2))
        .collect();
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .into_bytes(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );

    for (i, rows) in pages.iter().enumerate() {
        let content_id = 6 + i * 2;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_id} 0 R >>"
            )
            .into_bytes(),
        );
        let stream = page_stream(title, &table.headers, rows, i + 1, page_count);
        let mut content = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        content.extend_from_slice(&stream);
        content.extend_from_slice(b"\nendstream");
        objects.push(content);
    }

    assemble(&objects)
}

fn rows_per_page() -> usize {
    let usable = PAGE_HEIGHT - 2.0 * MARGIN - TITLE_SIZE - 2.0 * ROW_HEIGHT;
    (usable / ROW_HEIGHT).floor().max(1.0) as usize
}

fn paginate(table: &ExportTable) -> Vec<&[Vec<String>]> {
    if table.rows.is_empty() {
        return vec![&table.rows[..]];
    }
    table.rows.chunks(rows_per_page()).collect()
}

fn page_stream(
    title: &str,
    headers: &[String],
    rows: &[Vec<String>],
    page_no: usize,
    page_count: usize,
) -> Vec<u8> {
    let columns = headers.len().max(1);
    let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;
    let max_chars = ((col_width - 4.0) / (FONT_SIZE * GLYPH_WIDTH)).floor().max(1.0) as usize;

    let mut out = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE;
    push_text(&mut out, "F2", TITLE_SIZE, MARGIN, y, title);
    let footer = format!("Page {page_no} of {page_count}");
    push_text(&mut out, "F1", FONT_SIZE, PAGE_WIDTH - MARGIN - 60.0, MARGIN / 2.0, &footer);

    y -= ROW_HEIGHT * 1.5;
    for (c, header) in headers.iter().enumerate() {
        let x = MARGIN + c as f32 * col_width;
        push_text(&mut out, "F2", FONT_SIZE, x, y, &truncate(header, max_chars));
    }
    // rule under the header
    out.extend_from_slice(
        format!(
            "{:.2} {:.2} m {:.2} {:.2} l S\n",
            MARGIN,
            y - 4.0,
            PAGE_WIDTH - MARGIN,
            y - 4.0
        )
        .as_bytes(),
    );

    for row in rows {
        y -= ROW_HEIGHT;
        for (c, cell) in row.iter().enumerate().take(columns) {
            let x = MARGIN + c as f32 * col_width;
            push_text(&mut out, "F1", FONT_SIZE, x, y, &truncate(cell, max_chars));
        }
    }
    out
}

fn push_text(out: &mut Vec<u8>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    out.extend_from_slice(format!("BT /{font} {size} Tf {x:.2} {y:.2} Td (").as_bytes());
    out.extend_from_slice(&encode_text(text));
    out.extend_from_slice(b") Tj ET\n");
}

fn truncate(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Latin-1 bytes with PDF string escapes.
fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\n' | '\r' | '\t' => out.push(b' '),
            c if (c as u32) < 0x20 => {}
            c if (c as u32) <= 0xFF => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

fn assemble(objects: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }
    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> ExportTable {
        ExportTable {
            headers: vec!["Name".to_string(), "Code".to_string()],
            rows: (0..rows)
                .map(|i| vec![format!("Item ({i})"), format!("C{i}")])
                .collect(),
        }
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_document_structure() {
        let bytes = write_document("Units", &table(3));
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(find(&bytes, b"(Item \\(0\\)) Tj").is_some());
        assert!(find(&bytes, b"/Count 1").is_some());
    }

    #[test]
    fn test_xref_points_at_objects() {
        let bytes = write_document("Units", &table(2));
        let marker = find(&bytes, b"startxref\n").unwrap() + "startxref\n".len();
        let tail = std::str::from_utf8(&bytes[marker..]).unwrap();
        let start: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(bytes[start..].starts_with(b"xref"));
        let xref = std::str::from_utf8(&bytes[start..]).unwrap();
        let first_entry = &xref.lines().nth(3).unwrap()[..10];
        let offset: usize = first_entry.parse().unwrap();
        assert!(bytes[offset..].starts_with(b"1 0 obj"));
    }

    #[test]
    fn test_many_rows_paginate() {
        let per_page = rows_per_page();
        let bytes = write_document("Products", &table(per_page * 2 + 1));
        assert!(find(&bytes, b"/Count 3").is_some());
        assert!(find(&bytes, b"(Page 3 of 3)").is_some());
    }

    #[test]
    fn test_non_latin_text_is_replaced() {
        assert_eq!(encode_text("caf\u{e9} \u{4e2d}"), b"caf\xE9 ?".to_vec());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdefgh", 6), "abc...");
        assert_eq!(truncate("abc", 6), "abc");
    }
}
