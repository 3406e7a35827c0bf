//! Rectangular text area with cached layout
//!
//! A [`TextBox`] owns the formatting state (text, font, size, box,
//! boundary, alignment, line spacing) and lazily recomputes its
//! layout: every mutator drops the cache, every geometry accessor
//! rebuilds it when missing. The recompute itself is the pure
//! [`crate::layout::compute`] pass, so the cache only ever holds what
//! a fresh computation would produce.

use std::sync::Arc;

use sdff_font::{AtlasImage, FontAsset};

use crate::layout::{self, Align, Boundary, Quad, TextLayout};

/// Everything a renderer needs for one draw: ordered glyph quads plus
/// the atlas they sample from. No GPU calls happen here.
pub struct DrawList<'a> {
    pub layout: &'a TextLayout,
    pub atlas: &'a AtlasImage,
}

impl DrawList<'_> {
    /// All quads in drawing order
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.layout.quads()
    }
}

/// A rectangular text area
pub struct TextBox {
    width: f32,
    height: f32,
    text: String,
    font: Arc<FontAsset>,
    font_size: f32,
    boundary: Boundary,
    align: Align,
    line_space: f32,
    /// `None` while dirty
    cache: Option<TextLayout>,
}

impl TextBox {
    /// Create a text box over a font asset.
    ///
    /// Starts empty at the font's base size, WORD wrapping, left
    /// aligned, single line spacing.
    pub fn new(font: Arc<FontAsset>, width: f32, height: f32) -> Self {
        let font_size = font.base_size();
        Self {
            width,
            height,
            text: String::new(),
            font,
            font_size,
            boundary: Boundary::default(),
            align: Align::default(),
            line_space: 1.0,
            cache: None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cache = None;
    }

    pub fn set_font(&mut self, font: Arc<FontAsset>) {
        self.font = font;
        self.cache = None;
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.cache = None;
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.cache = None;
    }

    pub fn set_boundary(&mut self, boundary: Boundary) {
        self.boundary = boundary;
        self.cache = None;
    }

    pub fn set_align(&mut self, align: Align) {
        self.align = align;
        self.cache = None;
    }

    pub fn set_line_space(&mut self, line_space: f32) {
        self.line_space = line_space;
        self.cache = None;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &Arc<FontAsset> {
        &self.font
    }

    pub fn font_family(&self) -> &str {
        self.font.family()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Box size; the height is a viewport hint, not a truncation bound
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn line_space(&self) -> f32 {
        self.line_space
    }

    /// Current layout, recomputed if a mutator ran since the last call
    pub fn layout(&mut self) -> &TextLayout {
        let Self {
            cache,
            text,
            font,
            font_size,
            width,
            boundary,
            align,
            line_space,
            ..
        } = self;
        cache.get_or_insert_with(|| {
            tracing::trace!("Recomputing layout for {} chars", text.chars().count());
            layout::compute(
                text,
                font,
                *font_size,
                *width,
                *boundary,
                *align,
                *line_space,
            )
        })
    }

    /// Bounding size of the laid out text: widest line by stacked
    /// height. May exceed the box in either direction.
    pub fn bounds(&mut self) -> (f32, f32) {
        let layout = self.layout();
        (layout.width, layout.height)
    }

    /// Produce the draw list for the renderer
    pub fn draw(&mut self) -> DrawList<'_> {
        self.layout();
        match &self.cache {
            Some(layout) => DrawList { layout, atlas: self.font.atlas() },
            None => unreachable!("layout computed above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_font;

    fn text_box() -> TextBox {
        TextBox::new(Arc::new(test_font()), 100.0, 50.0)
    }

    #[test]
    fn test_defaults() {
        let tb = text_box();
        assert_eq!(tb.font_size(), 10.0);
        assert_eq!(tb.boundary(), Boundary::Word);
        assert_eq!(tb.align(), Align::Left);
        assert_eq!(tb.line_space(), 1.0);
        assert_eq!(tb.font_family(), "TestMono");
    }

    #[test]
    fn test_empty_bounds() {
        let mut tb = text_box();
        assert_eq!(tb.bounds(), (0.0, 0.0));
    }

    #[test]
    fn test_mutators_invalidate() {
        let mut tb = text_box();
        let pitch = tb.font().line_height();
        tb.set_text("AA");
        assert_eq!(tb.bounds(), (10.0, pitch));

        tb.set_text("AAAA");
        assert_eq!(tb.bounds(), (20.0, pitch));

        tb.set_font_size(20.0);
        assert_eq!(tb.bounds(), (40.0, pitch * 2.0));

        tb.set_size(15.0, 50.0);
        // at size 20 only one 10-wide glyph fits per 15-wide line
        assert_eq!(tb.bounds().1, 4.0 * (pitch * 2.0));

        tb.set_line_space(2.0);
        assert_eq!(tb.bounds().1, 4.0 * (pitch * 2.0 * 2.0));
    }

    #[test]
    fn test_repeated_access_is_stable() {
        let mut tb = text_box();
        tb.set_text("stable text");
        let first = tb.layout().clone();
        let second = tb.layout().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_font_invalidates() {
        let mut tb = text_box();
        tb.set_text("AA");
        assert_eq!(tb.bounds().0, 10.0);

        // same glyphs baked at twice the base size
        let mut metrics = String::new();
        metrics.push_str("65 10 0 0 0 0 8 16\n");
        let big = sdff_font::FontAsset::from_image_and_metrics(
            "TestMonoBig",
            20.0,
            sdff_font::AtlasImage::blank(64, 64),
            &metrics,
        )
        .unwrap();
        tb.set_font(Arc::new(big));
        // requested size is still 10: scale halves, advances stay 5
        assert_eq!(tb.bounds().0, 10.0);
    }

    #[test]
    fn test_draw_list() {
        let mut tb = text_box();
        tb.set_text("AB BA");
        let draw = tb.draw();
        assert_eq!(draw.quads().count(), 4);
        assert_eq!(draw.atlas.width, 128);
        assert_eq!(draw.atlas.height, 64);

        // quads arrive in drawing order: left to right
        let xs: Vec<f32> = draw.quads().map(|q| q.dst.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_boundary_switch() {
        let mut tb = text_box();
        tb.set_text("AB CD");
        tb.set_size(10.0, 50.0);
        assert_eq!(tb.layout().line_count(), 2);

        tb.set_boundary(Boundary::Letter);
        assert_eq!(tb.layout().line_count(), 2);

        tb.set_size(5.0, 50.0);
        assert_eq!(tb.layout().line_count(), 4);
    }
}
