// Resume PDF export.
// Layout walks the structured resume into a per-page display list; the writer turns that
// list into PDF bytes with lopdf. Both run synchronously; callers on the async runtime
// go through tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;

use thiserror::Error;
use tracing::info;

use crate::resume::models::{Modification, StructuredResume};

pub use layout::{layout_resume, FontStyle, LaidOutDocument};
pub use pdf::write_pdf;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no font metrics available for '{0}'")]
    UnknownFont(String),

    #[error("PDF serialization failed: {0}")]
    Pdf(String),
}

/// Page geometry and font selection for resume export.
///
/// All lengths are PDF points. `y` grows upward from the bottom edge of the page.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub top_margin: f32,
    pub right_margin: f32,
    /// x of top-level section headings; everything else indents from here.
    pub left_x: f32,
    pub indent_step: f32,
    pub regular_font: String,
    pub bold_font: String,
    pub italic_font: String,
    /// Whether a subsection with an empty name still gets its (empty) bold label line.
    pub render_empty_subheadings: bool,
}

impl LayoutConfig {
    pub fn font_name(&self, style: FontStyle) -> &str {
        match style {
            FontStyle::Regular => &self.regular_font,
            FontStyle::Bold => &self.bold_font,
            FontStyle::Italic => &self.italic_font,
        }
    }
}

/// US Letter, Helvetica family, 50pt top margin and heading indent.
pub fn letter_layout() -> LayoutConfig {
    LayoutConfig {
        page_width: 612.0,
        page_height: 792.0,
        top_margin: 50.0,
        right_margin: 20.0,
        left_x: 50.0,
        indent_step: 20.0,
        regular_font: "Helvetica".to_string(),
        bold_font: "Helvetica-Bold".to_string(),
        italic_font: "Helvetica-Oblique".to_string(),
        render_empty_subheadings: true,
    }
}

/// Renders a structured resume, annotated with improved bullets, to PDF bytes.
///
/// Output is deterministic: the same inputs always produce the same bytes.
pub fn render_resume(
    resume: &StructuredResume,
    modifications: &[Modification],
    config: &LayoutConfig,
) -> Result<Vec<u8>, RenderError> {
    let document = layout_resume(resume, modifications, config)?;
    let bytes = write_pdf(&document, config)?;
    info!(
        sections = resume.sections().len(),
        pages = document.pages.len(),
        bytes = bytes.len(),
        "Rendered resume PDF"
    );
    Ok(bytes)
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::content::Content;
    use lopdf::{Document, Object};

    /// One `Tj` as drawn: page number (1-based), font resource, size, position, raw bytes.
    #[derive(Debug, Clone, PartialEq)]
    pub struct TextRun {
        pub page: u32,
        pub font: String,
        pub size: f32,
        pub x: f32,
        pub y: f32,
        pub bytes: Vec<u8>,
    }

    pub fn text_runs(pdf_bytes: &[u8]) -> Vec<TextRun> {
        let doc = Document::load_mem(pdf_bytes).unwrap();
        let mut runs = Vec::new();
        for (page_no, page_id) in doc.get_pages() {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            let (mut font, mut size, mut x, mut y) = (String::new(), 0.0, 0.0, 0.0);
            for op in content.operations {
                match op.operator.as_str() {
                    "Tf" => {
                        font = String::from_utf8_lossy(op.operands[0].as_name().unwrap())
                            .into_owned();
                        size = op.operands[1].as_float().unwrap();
                    }
                    "Td" => {
                        x = op.operands[0].as_float().unwrap();
                        y = op.operands[1].as_float().unwrap();
                    }
                    "Tj" => {
                        if let Object::String(bytes, _) = &op.operands[0] {
                            runs.push(TextRun {
                                page: page_no,
                                font: font.clone(),
                                size,
                                x,
                                y,
                                bytes: bytes.clone(),
                            });
                        }
                    }
                    _ => {}
                }
            }
        }
        runs
    }
}
