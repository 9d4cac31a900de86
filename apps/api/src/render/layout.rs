//! Resume layout: turns a `StructuredResume` into positioned text lines, page by page.
//!
//! # Vertical rhythm (points)
//! - cursor starts each page at `page_height - top_margin`
//! - body line: size 10, advance 15, page break first if `y < 50`
//! - subheading: bold 11, advance 18 then +5 after its content, page break first if `y < 60`
//! - section heading: bold 14 upper-cased, advance 25 then +15 after its content,
//!   page break first if `y < 100` so a heading is not stranded at the bottom
//!
//! # Indentation
//! Depth `d` draws at `left_x + d * indent_step`. Section headings sit at depth 0, their
//! content starts at depth 1, each subsection level adds one, and an improvement
//! annotation sits one step right of the bullet it annotates.

use tracing::debug;

use crate::render::font_metrics::{metrics_for, FontMetricTable};
use crate::render::{LayoutConfig, RenderError};
use crate::resume::models::{Modification, ModificationMap, SectionContent, StructuredResume};

const BODY_SIZE: f32 = 10.0;
const BODY_LINE_HEIGHT: f32 = 15.0;
const BODY_BREAK_Y: f32 = 50.0;

const SUBHEADING_SIZE: f32 = 11.0;
const SUBHEADING_ADVANCE: f32 = 18.0;
const SUBHEADING_BREAK_Y: f32 = 60.0;
const SUBSECTION_GAP: f32 = 5.0;

const HEADING_SIZE: f32 = 14.0;
const HEADING_ADVANCE: f32 = 25.0;
const HEADING_BREAK_Y: f32 = 100.0;
const SECTION_GAP: f32 = 15.0;

pub const BULLET_PREFIX: &str = "• ";
pub const IMPROVED_PREFIX: &str = "↳ Improved: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];

    /// Name of the font in each page's resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
        }
    }
}

/// One line of text at an absolute position on its page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f32,
    pub y: f32,
    pub style: FontStyle,
    pub size: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedText>,
}

/// Display list for a whole document. Always holds at least one page.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub pages: Vec<LaidOutPage>,
}

/// Current page and vertical write position. Owned by a single layout pass.
struct RenderCursor {
    top_y: f32,
    y: f32,
    done: Vec<LaidOutPage>,
    current: LaidOutPage,
}

impl RenderCursor {
    fn new(top_y: f32) -> Self {
        Self {
            top_y,
            y: top_y,
            done: Vec::new(),
            current: LaidOutPage::default(),
        }
    }

    fn new_page(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
        self.y = self.top_y;
    }

    fn break_if_below(&mut self, threshold: f32) {
        if self.y < threshold {
            self.new_page();
        }
    }

    fn place(&mut self, x: f32, style: FontStyle, size: f32, text: String) {
        self.current.lines.push(PlacedText {
            x,
            y: self.y,
            style,
            size,
            text,
        });
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn finish(mut self) -> Vec<LaidOutPage> {
        self.done.push(self.current);
        self.done
    }
}

struct Fonts {
    regular: &'static FontMetricTable,
    bold: &'static FontMetricTable,
    italic: &'static FontMetricTable,
}

impl Fonts {
    fn resolve(config: &LayoutConfig) -> Result<Self, RenderError> {
        Ok(Self {
            regular: metrics_for(config.font_name(FontStyle::Regular))?,
            bold: metrics_for(config.font_name(FontStyle::Bold))?,
            italic: metrics_for(config.font_name(FontStyle::Italic))?,
        })
    }

    fn get(&self, style: FontStyle) -> &'static FontMetricTable {
        match style {
            FontStyle::Regular => self.regular,
            FontStyle::Bold => self.bold,
            FontStyle::Italic => self.italic,
        }
    }
}

struct ResumeLayout<'a> {
    config: &'a LayoutConfig,
    fonts: Fonts,
    improvements: ModificationMap,
    cursor: RenderCursor,
}

impl ResumeLayout<'_> {
    fn x_at(&self, depth: usize) -> f32 {
        self.config.left_x + self.config.indent_step * depth as f32
    }

    /// Word-wraps body text to the space right of `x`, breaking pages per physical line.
    fn draw_wrapped(&mut self, text: &str, x: f32, style: FontStyle) {
        let max_width = self.config.page_width - x - self.config.right_margin;
        for line in self.fonts.get(style).wrap(text, BODY_SIZE, max_width) {
            self.cursor.break_if_below(BODY_BREAK_Y);
            self.cursor.place(x, style, BODY_SIZE, line);
            self.cursor.advance(BODY_LINE_HEIGHT);
        }
    }

    fn section(&mut self, name: &str, content: &SectionContent) {
        self.cursor.break_if_below(HEADING_BREAK_Y);
        let x = self.x_at(0);
        self.cursor
            .place(x, FontStyle::Bold, HEADING_SIZE, name.to_uppercase());
        self.cursor.advance(HEADING_ADVANCE);
        self.content(content, 1);
        self.cursor.advance(SECTION_GAP);
    }

    fn content(&mut self, content: &SectionContent, depth: usize) {
        let x = self.x_at(depth);
        match content {
            SectionContent::Text(raw) => {
                let text = raw.trim();
                let annotation = self
                    .improvements
                    .improvement_for(text)
                    .map(|improved| format!("{IMPROVED_PREFIX}{improved}"));
                self.draw_wrapped(&format!("{BULLET_PREFIX}{text}"), x, FontStyle::Regular);
                if let Some(annotation) = annotation {
                    let indented = x + self.config.indent_step;
                    self.draw_wrapped(&annotation, indented, FontStyle::Italic);
                }
            }
            SectionContent::List(items) => {
                for item in items {
                    self.content(item, depth);
                }
            }
            SectionContent::Subsections(subs) => {
                for (name, child) in subs {
                    if !name.is_empty() || self.config.render_empty_subheadings {
                        self.cursor.break_if_below(SUBHEADING_BREAK_Y);
                        self.cursor
                            .place(x, FontStyle::Bold, SUBHEADING_SIZE, name.clone());
                        self.cursor.advance(SUBHEADING_ADVANCE);
                    }
                    self.content(child, depth + 1);
                    self.cursor.advance(SUBSECTION_GAP);
                }
            }
        }
    }
}

/// Lays out every section in order. Fails before placing anything if a configured font
/// has no metrics.
pub fn layout_resume(
    resume: &StructuredResume,
    modifications: &[Modification],
    config: &LayoutConfig,
) -> Result<LaidOutDocument, RenderError> {
    let mut layout = ResumeLayout {
        config,
        fonts: Fonts::resolve(config)?,
        improvements: ModificationMap::from_modifications(modifications),
        cursor: RenderCursor::new(config.page_height - config.top_margin),
    };

    debug!(
        improvements = layout.improvements.len(),
        "Resolved bullet improvements"
    );

    for (name, content) in resume.sections() {
        layout.section(name, content);
    }

    Ok(LaidOutDocument {
        pages: layout.cursor.finish(),
    })
}
