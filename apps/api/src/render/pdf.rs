//! Serializes a laid-out resume into a PDF with lopdf.
//!
//! Text is drawn with the Type1 base fonts under WinAnsiEncoding, so nothing is embedded
//! and every page shares one resource dictionary. No timestamps or IDs are written, which
//! keeps the output byte-identical across runs.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::render::layout::{FontStyle, LaidOutDocument, LaidOutPage};
use crate::render::{LayoutConfig, RenderError};

pub fn write_pdf(
    document: &LaidOutDocument,
    config: &LayoutConfig,
) -> Result<Vec<u8>, RenderError> {
    let mut pdf = Document::with_version("1.7");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for style in FontStyle::ALL {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Object::Name(config.font_name(style).as_bytes().to_vec()),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(style.resource_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let mut kids = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content = page_content(page)
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::from(config.page_width),
                Object::from(config.page_height),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn page_content(page: &LaidOutPage) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 4);
    for line in &page.lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![line.style.resource_name().into(), Object::from(line.size)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::from(line.x), Object::from(line.y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Encodes text for a WinAnsiEncoding base font.
///
/// ASCII and Latin-1 map to themselves, common typographic characters to their 0x80..0x9F
/// slots, and `↳` to `»`. Control characters become spaces; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            '↳' => 0xBB,
            c if c.is_control() => b' ',
            _ => b'?',
        })
        .collect()
}
