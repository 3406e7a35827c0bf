//! Binary `.sdff` codec
//!
//! Layout (all fields little-endian, fixed order):
//!
//! ```text
//! magic        b"SDFF"
//! version      u16 (currently 1)
//! family_len   u16, followed by that many UTF-8 bytes
//! base_size    f32
//! line_height  f32
//! glyph_count  u32
//! glyph record x glyph_count:
//!     codepoint u32, advance f32, bearing_x f32, bearing_y f32,
//!     x u32, y u32, w u32, h u32, spread f32
//! atlas_width  u32
//! atlas_height u32
//! pixels       atlas_width * atlas_height bytes
//! ```

use std::collections::HashMap;

use crate::asset::{AtlasImage, AtlasRect, FontAsset, GlyphMetric};
use crate::{FontError, Result};

/// Format marker at the start of every asset
pub const MAGIC: [u8; 4] = *b"SDFF";

/// Current format version
pub const VERSION: u16 = 1;

/// Binary reader with bounds checking
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn truncated(&self) -> FontError {
        FontError::Format(format!("truncated at offset {}", self.pos))
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or_else(|| self.truncated())?;
        if end > self.data.len() {
            return Err(self.truncated());
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u16(&mut self) -> Result<u16> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_f32(&mut self) -> Result<f32> {
        let b = self.read_bytes(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

/// Decode a binary asset.
///
/// Fails with [`FontError::Format`] on a bad marker or version,
/// truncated data, a duplicate codepoint, a glyph rectangle outside
/// the atlas, or trailing bytes. A failed decode yields no asset.
pub fn decode(bytes: &[u8]) -> Result<FontAsset> {
    let mut r = Reader::new(bytes);

    let magic = r.read_bytes(4)?;
    if magic != MAGIC {
        return Err(FontError::Format("bad magic, not an SDFF asset".into()));
    }
    let version = r.read_u16()?;
    if version != VERSION {
        return Err(FontError::Format(format!("unsupported version {version}")));
    }

    let family_len = r.read_u16()? as usize;
    let family = std::str::from_utf8(r.read_bytes(family_len)?)
        .map_err(|_| FontError::Format("family name is not UTF-8".into()))?
        .to_string();

    let base_size = r.read_f32()?;
    if !(base_size > 0.0) {
        return Err(FontError::Format(format!("invalid base size {base_size}")));
    }
    let line_height = r.read_f32()?;

    let glyph_count = r.read_u32()? as usize;
    let mut glyphs = HashMap::with_capacity(glyph_count);
    for _ in 0..glyph_count {
        let codepoint = r.read_u32()?;
        let advance = r.read_f32()?;
        let bearing_x = r.read_f32()?;
        let bearing_y = r.read_f32()?;
        let rect = AtlasRect {
            x: r.read_u32()?,
            y: r.read_u32()?,
            w: r.read_u32()?,
            h: r.read_u32()?,
        };
        let spread = r.read_f32()?;
        let metric = GlyphMetric { advance, bearing_x, bearing_y, rect, spread };
        if glyphs.insert(codepoint, metric).is_some() {
            return Err(FontError::Format(format!("duplicate codepoint {codepoint}")));
        }
    }

    let width = r.read_u32()?;
    let height = r.read_u32()?;
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| FontError::Format("atlas dimensions overflow".into()))?;
    let pixels = r.read_bytes(pixel_count)?.to_vec();
    let atlas = AtlasImage { width, height, pixels };

    if r.remaining() != 0 {
        return Err(FontError::Format(format!(
            "{} trailing bytes after atlas",
            r.remaining()
        )));
    }

    for (&cp, metric) in &glyphs {
        if !atlas.contains(metric.rect) {
            return Err(FontError::Format(format!(
                "glyph {cp} rect outside {width}x{height} atlas"
            )));
        }
    }

    tracing::debug!("Decoded SDFF asset '{}' ({} glyphs)", family, glyphs.len());
    Ok(FontAsset::from_parts(family, glyphs, atlas, base_size, line_height))
}

/// Encode an asset to bytes.
///
/// Glyph records are written in ascending codepoint order so encoding
/// is deterministic; `decode(encode(a))` reproduces the glyph table
/// and atlas exactly.
pub fn encode(asset: &FontAsset) -> Vec<u8> {
    let atlas = asset.atlas();
    let mut out = Vec::with_capacity(
        64 + asset.glyph_count() * 36 + atlas.pixels.len(),
    );

    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());

    let family = asset.family().as_bytes();
    // asset constructors cap the family name at u16::MAX bytes
    debug_assert!(family.len() <= u16::MAX as usize);
    out.extend_from_slice(&(family.len() as u16).to_le_bytes());
    out.extend_from_slice(family);

    out.extend_from_slice(&asset.base_size().to_le_bytes());
    out.extend_from_slice(&asset.line_height().to_le_bytes());

    let mut codepoints: Vec<(u32, &GlyphMetric)> = asset.glyphs().collect();
    codepoints.sort_by_key(|(cp, _)| *cp);

    out.extend_from_slice(&(codepoints.len() as u32).to_le_bytes());
    for (cp, m) in codepoints {
        out.extend_from_slice(&cp.to_le_bytes());
        out.extend_from_slice(&m.advance.to_le_bytes());
        out.extend_from_slice(&m.bearing_x.to_le_bytes());
        out.extend_from_slice(&m.bearing_y.to_le_bytes());
        out.extend_from_slice(&m.rect.x.to_le_bytes());
        out.extend_from_slice(&m.rect.y.to_le_bytes());
        out.extend_from_slice(&m.rect.w.to_le_bytes());
        out.extend_from_slice(&m.rect.h.to_le_bytes());
        out.extend_from_slice(&m.spread.to_le_bytes());
    }

    out.extend_from_slice(&atlas.width.to_le_bytes());
    out.extend_from_slice(&atlas.height.to_le_bytes());
    out.extend_from_slice(&atlas.pixels);

    out
}
