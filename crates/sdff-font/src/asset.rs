//! Font asset data model
//!
//! A FontAsset pairs a glyph metrics table with the single-channel
//! distance-field atlas it indexes into. All linear measures are
//! expressed at the base size the atlas was baked at; consumers scale
//! by `requested_size / base_size`.

use std::collections::HashMap;

/// Distance-field spread assumed for assets built from metrics text,
/// which carries no spread column.
pub const DEFAULT_SPREAD: f32 = 4.0;

/// Rectangle in atlas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Single-channel distance-field atlas
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasImage {
    /// Atlas width in pixels
    pub width: u32,
    /// Atlas height in pixels
    pub height: u32,
    /// Distance values, row-major, `width * height` bytes
    pub pixels: Vec<u8>,
}

impl AtlasImage {
    /// Create an atlas from a raw luma buffer.
    ///
    /// Returns `None` when the buffer length does not match the
    /// dimensions.
    pub fn from_luma(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    /// Create a zero-filled atlas
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize)],
        }
    }

    /// Check that a rectangle lies fully within the atlas
    pub fn contains(&self, rect: AtlasRect) -> bool {
        rect.x.checked_add(rect.w).is_some_and(|r| r <= self.width)
            && rect.y.checked_add(rect.h).is_some_and(|b| b <= self.height)
    }
}

/// Metrics for a single glyph, at base size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetric {
    /// Horizontal pen advance
    pub advance: f32,
    /// Offset from pen position to the left edge of the ink
    pub bearing_x: f32,
    /// Offset from the line top to the top edge of the ink
    pub bearing_y: f32,
    /// Region of the atlas holding this glyph's distance field
    pub rect: AtlasRect,
    /// Distance range the SDF transitions over
    pub spread: f32,
}

/// An immutable SDF font asset
///
/// Built by [`crate::codec::decode`] or
/// [`FontAsset::from_image_and_metrics`]; never mutated afterwards, so
/// it can be shared read-only between layout engines.
#[derive(Debug, Clone)]
pub struct FontAsset {
    family: String,
    glyphs: HashMap<u32, GlyphMetric>,
    atlas: AtlasImage,
    base_size: f32,
    line_height: f32,
}

impl FontAsset {
    /// Assemble an asset from already-validated parts.
    ///
    /// Callers (codec, metrics pipeline) are responsible for having
    /// checked every glyph rectangle against the atlas bounds.
    pub(crate) fn from_parts(
        family: String,
        glyphs: HashMap<u32, GlyphMetric>,
        atlas: AtlasImage,
        base_size: f32,
        line_height: f32,
    ) -> Self {
        Self { family, glyphs, atlas, base_size, line_height }
    }

    /// Family name, the registry key
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Look up the metrics for a character
    pub fn glyph(&self, c: char) -> Option<&GlyphMetric> {
        self.glyphs.get(&(c as u32))
    }

    /// Look up the metrics for a raw codepoint
    pub fn glyph_by_codepoint(&self, codepoint: u32) -> Option<&GlyphMetric> {
        self.glyphs.get(&codepoint)
    }

    /// Number of glyphs in the table
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Iterate over (codepoint, metric) pairs in unspecified order
    pub fn glyphs(&self) -> impl Iterator<Item = (u32, &GlyphMetric)> {
        self.glyphs.iter().map(|(&cp, m)| (cp, m))
    }

    /// The distance-field atlas
    pub fn atlas(&self) -> &AtlasImage {
        &self.atlas
    }

    /// Pixel size the SDF was baked at
    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// Line pitch at base size
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Scale factor mapping base-size units to the requested size
    pub fn scale_for(&self, font_size: f32) -> f32 {
        font_size / self.base_size
    }
}
