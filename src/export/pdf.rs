//! PDF export.
//!
//! US-letter pages using the standard Helvetica faces, so no fonts are
//! embedded. Text is reduced to the characters those faces can show.

use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::{footer_line, ExportError, EXPORT_TITLE};

/// Approximate characters per body line.
pub const WRAP_COLUMNS: usize = 80;

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const TOP_Y: i64 = PAGE_HEIGHT - 50;
const BOTTOM_Y: i64 = 100;
const FOOTER_CLEARANCE_Y: i64 = 150;

const LABEL_X: i64 = 50;
const BODY_X: i64 = 70;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";
const OBLIQUE: &str = "F3";

/// Wrap one line of text at [`WRAP_COLUMNS`], breaking on spaces.
///
/// A word longer than the limit gets a line of its own.
pub fn wrap_line(line: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let candidate_len = current.chars().count() + word.chars().count() + 1;
        if candidate_len > WRAP_COLUMNS {
            if !current.is_empty() {
                lines.push(current.trim().to_string());
            }
            current = format!("{word} ");
        } else {
            current.push_str(word);
            current.push(' ');
        }
    }

    if !current.is_empty() {
        lines.push(current.trim().to_string());
    }
    lines
}

/// Replace characters the standard fonts cannot render.
fn pdf_text(text: &str) -> Vec<u8> {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\t' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => {}
        }
    }
    out.trim().as_bytes().to_vec()
}

/// Accumulates page content streams while tracking the cursor.
struct PageWriter {
    pages: Vec<Vec<Operation>>,
    y: i64,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: TOP_Y,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = TOP_Y;
    }

    fn ensure_room(&mut self, min_y: i64) {
        if self.y < min_y {
            self.new_page();
        }
    }

    fn text_at(&mut self, font: &str, size: i64, x: i64, y: i64, text: &str) {
        let ops = [
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(pdf_text(text))]),
            Operation::new("ET", vec![]),
        ];
        if let Some(page) = self.pages.last_mut() {
            page.extend(ops);
        }
    }

    fn line(&mut self, font: &str, size: i64, x: i64, text: &str) {
        let y = self.y;
        self.text_at(font, size, x, y, text);
    }
}

/// Lay out the jokes into per-page operation lists.
fn layout(jokes: &[String], footer: &str) -> Vec<Vec<Operation>> {
    let mut writer = PageWriter::new();

    writer.line(BOLD, 16, LABEL_X, EXPORT_TITLE);
    writer.y -= 40;

    for (i, joke) in jokes.iter().enumerate() {
        writer.ensure_room(BOTTOM_Y);
        writer.line(BOLD, 11, LABEL_X, &format!("Joke {}:", i + 1));
        writer.y -= 20;

        for line in joke.lines().flat_map(wrap_line) {
            writer.line(REGULAR, 11, BODY_X, &line);
            writer.y -= 15;
            writer.ensure_room(BOTTOM_Y);
        }
        writer.y -= 20;
    }

    writer.ensure_room(FOOTER_CLEARANCE_Y);
    writer.text_at(OBLIQUE, 10, LABEL_X, 50, footer);

    writer.pages
}

/// Render the jokes as a PDF document.
pub fn render_pdf(jokes: &[String], at: &DateTime<Local>) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font = |doc: &mut Document, base: &str| {
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base,
            "Encoding" => "WinAnsiEncoding",
        })
    };
    let regular_id = font(&mut doc, "Helvetica");
    let bold_id = font(&mut doc, "Helvetica-Bold");
    let oblique_id = font(&mut doc, "Helvetica-Oblique");

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular_id,
            BOLD => bold_id,
            OBLIQUE => oblique_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in layout(jokes, &footer_line(at)) {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(buffer)
}
