//! In-memory text-to-PDF rendering.

use encoding_rs::{EncoderResult, WINDOWS_1252};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::PageLayout;
use crate::Result;

/// Standard Type1 font used for every row.
const FONT_NAME: &str = "Helvetica";

/// Resource name the content streams refer to.
const FONT_RESOURCE: &str = "F1";

/// A rendered PDF document.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
    /// Number of text rows written, one per input line.
    pub rows: usize,
}

/// Encode text for a WinAnsi-encoded standard font.
///
/// Characters that have no WinAnsi code are replaced by `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut encoder = WINDOWS_1252.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 256];
    let mut src = text;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(src, &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => out.push(b'?'),
        }
    }

    out
}

fn text_row(layout: &PageLayout, row: usize, line: &str) -> [Operation; 5] {
    let (x, y) = layout.baseline(row);
    [
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(FONT_RESOURCE.as_bytes().to_vec()),
                layout.font_size_pt.into(),
            ],
        ),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(line))]),
        Operation::new("ET", vec![]),
    ]
}

/// Lay out each line of `text` as one left-aligned row.
///
/// Lines are not wrapped; rows overflow onto new pages. An empty text still
/// yields a single blank page.
pub fn render_pdf(text: &str, layout: &PageLayout) -> Result<RenderedPdf> {
    let lines: Vec<&str> = text.lines().collect();
    let rows_per_page = layout.rows_per_page();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => FONT_NAME,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let chunks: Vec<&[&str]> = if lines.is_empty() {
        vec![&[]]
    } else {
        lines.chunks(rows_per_page).collect()
    };

    let mut kids: Vec<Object> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let operations: Vec<Operation> = chunk
            .iter()
            .enumerate()
            .flat_map(|(row, line)| text_row(layout, row, line))
            .collect();
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = kids.len();
    let (width, height) = layout.media_box();
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    Ok(RenderedPdf {
        bytes,
        pages,
        rows: lines.len(),
    })
}
