//! Landscape A4 table report.
//!
//! Layout is fixed: heading, period line, then the export table with a
//! filled header row repeated on every page.

use crate::exports::ExportError;
use crate::presentation::summary::period_text;
use crate::presentation::ExportTable;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

const PAGE_WIDTH: f32 = 842.0;
const PAGE_HEIGHT: f32 = 595.0;
const MARGIN: f32 = 40.0;
const ROW_HEIGHT: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 9.0;
const HEADER_FILL: (f32, f32, f32) = (1.0 / 255.0, 0.0, 102.0 / 255.0);

/// Column widths in points; they add up to the printable width.
const COLUMN_WIDTHS: [f32; 8] = [130.0, 90.0, 110.0, 110.0, 40.0, 80.0, 80.0, 122.0];

pub fn export_table_pdf(table: &ExportTable, heading: &str) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut page_ids: Vec<ObjectId> = Vec::new();
    for (index, rows) in paginate(table.rows.len()).into_iter().enumerate() {
        let mut ops = Vec::new();

        let mut y = PAGE_HEIGHT - MARGIN;
        if index == 0 {
            let title = format!("{} - {}", heading, table.title);
            text(&mut ops, "F2", 18.0, MARGIN, y - 18.0, &title);
            let period = format!("Report Period: {}", period_text(&table.range));
            text(&mut ops, "F1", 11.0, MARGIN, y - 36.0, &period);
            y -= 50.0;
        }

        header_row(&mut ops, &table.header, y);
        y -= ROW_HEIGHT;

        for row in &table.rows[rows] {
            let cells: Vec<String> = row.iter().map(|c| c.as_text()).collect();
            row_text(&mut ops, "F1", &cells, y);
            y -= ROW_HEIGHT;
        }

        let encoded = Content { operations: ops }
            .encode()
            .map_err(|e| ExportError::Pdf(format!("Failed to encode page {}: {}", index + 1, e)))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        page_ids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
        "Count" => page_ids.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Pdf(format!("Failed to save document: {}", e)))?;

    Ok(buffer)
}

/// Row index ranges per page. Always at least one page, so an empty table
/// still renders its heading.
fn paginate(total: usize) -> Vec<std::ops::Range<usize>> {
    let first_page = rows_that_fit(PAGE_HEIGHT - 2.0 * MARGIN - 50.0);
    let other_pages = rows_that_fit(PAGE_HEIGHT - 2.0 * MARGIN);

    let mut pages = vec![0..total.min(first_page)];
    let mut start = pages[0].end;
    while start < total {
        let end = (start + other_pages).min(total);
        pages.push(start..end);
        start = end;
    }
    pages
}

// One slot goes to the header row.
fn rows_that_fit(height: f32) -> usize {
    ((height / ROW_HEIGHT) as usize).saturating_sub(1).max(1)
}

fn header_row(ops: &mut Vec<Operation>, header: &[String], y: f32) {
    let (r, g, b) = HEADER_FILL;
    let width: f32 = COLUMN_WIDTHS.iter().sum();

    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("rg", vec![Object::Real(r), Object::Real(g), Object::Real(b)]));
    ops.push(Operation::new(
        "re",
        vec![
            Object::Real(MARGIN),
            Object::Real(y - ROW_HEIGHT + 4.0),
            Object::Real(width),
            Object::Real(ROW_HEIGHT),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("g", vec![Object::Integer(1)]));
    row_text(ops, "F2", header, y);
    ops.push(Operation::new("Q", vec![]));
}

fn row_text(ops: &mut Vec<Operation>, font: &str, cells: &[String], y: f32) {
    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS.iter()) {
        let fitted = fit_to_width(cell, *width);
        text(ops, font, BODY_FONT_SIZE, x + 3.0, y - ROW_HEIGHT + 8.0, &fitted);
        x += width;
    }
}

fn text(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, value: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size)],
    ));
    ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(win_ansi(value), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Truncate using an average glyph width of half the font size.
fn fit_to_width(value: &str, width: f32) -> String {
    let max_chars = ((width - 6.0) / (BODY_FONT_SIZE * 0.5)) as usize;
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = value.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Latin-1 subset of WinAnsi; anything outside becomes '?'.
fn win_ansi(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
