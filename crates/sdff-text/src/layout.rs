//! Wrap, align and glyph-quad emission
//!
//! The layout pass is a pure function of its inputs: the same text,
//! font, box and options always produce identical quads and bounds.

use sdff_font::{AtlasRect, FontAsset};

/// Where line wrapping is allowed to break
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Boundary {
    /// Break at any glyph
    Letter,
    /// Break only between words
    #[default]
    Word,
}

/// Horizontal line alignment inside the box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Axis-aligned rectangle in layout units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// One positioned glyph: source atlas region and destination rect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub src: AtlasRect,
    pub dst: Rect,
}

/// A laid out line of text
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Glyph quads in drawing order
    pub quads: Vec<Quad>,
    /// Ink width, trailing whitespace excluded
    pub width: f32,
}

/// Complete layout result
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Lines stacked from the box top
    pub lines: Vec<Line>,
    /// Widest line
    pub width: f32,
    /// Stacked height, `line_count * line pitch`
    pub height: f32,
    /// Line pitch after font-size and line-space scaling
    pub line_height: f32,
}

impl TextLayout {
    /// Create empty layout
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            width: 0.0,
            height: 0.0,
            line_height: 0.0,
        }
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate over every quad in drawing order
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.lines.iter().flat_map(|line| line.quads.iter())
    }
}

/// Kind of break unit produced by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitKind {
    /// Drawn glyph run, kept intact unless wider than the box
    Word,
    /// Whitespace run, carries advance only
    Space,
    /// Hard line break
    Break,
}

#[derive(Debug, Clone, Copy)]
struct Unit<'a> {
    kind: UnitKind,
    text: &'a str,
}

/// Split text into break units.
///
/// WORD mode alternates word and whitespace-run units; LETTER mode
/// makes every glyph its own unit. `\n`, `\r` and `\r\n` become hard
/// breaks in both modes.
fn tokenize(text: &str, boundary: Boundary) -> Vec<Unit<'_>> {
    let mut units = Vec::new();
    let mut iter = text.char_indices().peekable();

    while let Some((start, c)) = iter.next() {
        if c == '\n' || c == '\r' {
            let mut end = start + c.len_utf8();
            if c == '\r' {
                if let Some(&(i, '\n')) = iter.peek() {
                    end = i + 1;
                    iter.next();
                }
            }
            units.push(Unit { kind: UnitKind::Break, text: &text[start..end] });
            continue;
        }

        let kind = if c.is_whitespace() { UnitKind::Space } else { UnitKind::Word };
        let mut end = start + c.len_utf8();

        if boundary == Boundary::Word {
            while let Some(&(i, next)) = iter.peek() {
                let same_run = match kind {
                    UnitKind::Word => !next.is_whitespace(),
                    UnitKind::Space => {
                        next.is_whitespace() && next != '\n' && next != '\r'
                    }
                    UnitKind::Break => unreachable!(),
                };
                if !same_run {
                    break;
                }
                iter.next();
                end = i + next.len_utf8();
            }
        }

        units.push(Unit { kind, text: &text[start..end] });
    }

    units
}

/// Accumulates one line; quad positions are relative to the line
/// origin until the alignment pass.
struct LineBuilder {
    quads: Vec<Quad>,
    pen: f32,
    /// Pen position after the last drawn glyph; trailing whitespace
    /// does not move it
    ink: f32,
    occupied: bool,
}

impl LineBuilder {
    fn new() -> Self {
        Self { quads: Vec::new(), pen: 0.0, ink: 0.0, occupied: false }
    }

    fn push_glyph(&mut self, font: &FontAsset, scale: f32, c: char) {
        let Some(glyph) = font.glyph(c) else {
            // No entry for this codepoint: no quad, no advance
            return;
        };
        if glyph.rect.w > 0 && glyph.rect.h > 0 {
            self.quads.push(Quad {
                src: glyph.rect,
                dst: Rect {
                    x: self.pen + glyph.bearing_x * scale,
                    y: glyph.bearing_y * scale,
                    w: glyph.rect.w as f32 * scale,
                    h: glyph.rect.h as f32 * scale,
                },
            });
        }
        self.pen += glyph.advance * scale;
        self.ink = self.pen;
        self.occupied = true;
    }

    fn push_space(&mut self, font: &FontAsset, scale: f32, c: char) {
        if let Some(glyph) = font.glyph(c) {
            self.pen += glyph.advance * scale;
        }
        self.occupied = true;
    }

    fn take_line(&mut self) -> Line {
        let done = std::mem::replace(self, Self::new());
        Line { quads: done.quads, width: done.ink }
    }
}

fn measure(font: &FontAsset, scale: f32, text: &str) -> f32 {
    text.chars()
        .filter_map(|c| font.glyph(c))
        .map(|g| g.advance * scale)
        .sum()
}

/// Lay text out inside a box of the given width.
///
/// Box height is advisory and plays no part here; callers clip. The
/// pass never fails: empty text yields zero lines, an over-narrow box
/// degenerates to one unit per line.
pub(crate) fn compute(
    text: &str,
    font: &FontAsset,
    font_size: f32,
    box_width: f32,
    boundary: Boundary,
    align: Align,
    line_space: f32,
) -> TextLayout {
    let scale = font.scale_for(font_size);
    let pitch = font.line_height() * scale * line_space;

    let mut lines: Vec<Line> = Vec::new();
    let mut cur = LineBuilder::new();

    for unit in tokenize(text, boundary) {
        match unit.kind {
            UnitKind::Break => {
                lines.push(cur.take_line());
            }
            // Whitespace is never wrapped on: it is trimmed from the
            // committed end anyway, so an overflowing run just hangs
            // past the box edge
            UnitKind::Space => {
                for c in unit.text.chars() {
                    cur.push_space(font, scale, c);
                }
            }
            UnitKind::Word => {
                let width = measure(font, scale, unit.text);
                if cur.occupied && cur.pen + width > box_width {
                    lines.push(cur.take_line());
                }
                if width > box_width {
                    // The unit alone exceeds the box: fall back to
                    // glyph-granularity fill, at least one glyph per
                    // line
                    for c in unit.text.chars() {
                        let advance =
                            font.glyph(c).map_or(0.0, |g| g.advance * scale);
                        if cur.occupied && cur.pen + advance > box_width {
                            lines.push(cur.take_line());
                        }
                        cur.push_glyph(font, scale, c);
                    }
                } else {
                    for c in unit.text.chars() {
                        cur.push_glyph(font, scale, c);
                    }
                }
            }
        }
    }
    if cur.occupied {
        lines.push(cur.take_line());
    }

    let mut max_width = 0.0f32;
    for (i, line) in lines.iter_mut().enumerate() {
        max_width = max_width.max(line.width);
        let offset = match align {
            Align::Left => 0.0,
            Align::Center => (box_width - line.width) / 2.0,
            Align::Right => box_width - line.width,
        };
        let top = i as f32 * pitch;
        for quad in &mut line.quads {
            quad.dst.x += offset;
            quad.dst.y += top;
        }
    }

    let height = lines.len() as f32 * pitch;
    TextLayout { lines, width: max_width, height, line_height: pitch }
}
