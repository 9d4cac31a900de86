//! Static glyph-width tables for the PDF base fonts the renderer draws with.
//!
//! Widths are AFM units (1/1000 em). Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32.
//! The bullet glyph has its own width, every other non-ASCII character falls back to
//! `average_char_width`, which is close enough for greedy wrapping of Latin text.

use crate::render::RenderError;

/// Width-measuring view of one base font.
pub struct FontMetricTable {
    /// PostScript name as written into the PDF font dictionary.
    pub postscript_name: &'static str,
    widths: [u16; 95],
    bullet_width: u16,
    average_char_width: u16,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if c == '•' {
            self.bullet_width
        } else {
            self.average_char_width
        }
    }

    /// Rendered width of `s` in points at `size`.
    pub fn measure_str(&self, s: &str, size: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size / 1000.0
    }

    /// Greedy word wrap into lines no wider than `max_width` points.
    ///
    /// Words are separated by single spaces on output. A word wider than `max_width`
    /// gets a line to itself. Whitespace-only input produces no lines.
    pub fn wrap(&self, text: &str, size: f32, max_width: f32) -> Vec<String> {
        let space_w = self.measure_str(" ", size);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.measure_str(word, size);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Helvetica advance widths, shared by Helvetica-Oblique.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    postscript_name: "Helvetica",
    widths: HELVETICA_WIDTHS,
    bullet_width: 350,
    average_char_width: 556,
};

static HELVETICA_OBLIQUE_TABLE: FontMetricTable = FontMetricTable {
    postscript_name: "Helvetica-Oblique",
    widths: HELVETICA_WIDTHS,
    bullet_width: 350,
    average_char_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    postscript_name: "Helvetica-Bold",
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    bullet_width: 350,
    average_char_width: 611,
};

/// Looks up the metric table for a PostScript font name.
pub fn metrics_for(postscript_name: &str) -> Result<&'static FontMetricTable, RenderError> {
    [
        &HELVETICA_TABLE,
        &HELVETICA_BOLD_TABLE,
        &HELVETICA_OBLIQUE_TABLE,
    ]
    .into_iter()
    .find(|table| table.postscript_name == postscript_name)
    .ok_or_else(|| RenderError::UnknownFont(postscript_name.to_string()))
}
