//! Metrics-text asset pipeline
//!
//! Builds a [`FontAsset`] from a rasterized atlas image plus a
//! line-oriented metrics description, one glyph per line:
//!
//! ```text
//! codepoint advance bearingX bearingY atlasX atlasY atlasW atlasH
//! ```
//!
//! Fields may be separated by whitespace and/or commas. Blank lines
//! and lines starting with `#` are ignored.

use std::collections::HashMap;

use crate::asset::{AtlasImage, AtlasRect, FontAsset, GlyphMetric, DEFAULT_SPREAD};
use crate::{FontError, Result};

fn parse_err(line: usize, msg: impl Into<String>) -> FontError {
    FontError::Parse { line, msg: msg.into() }
}

fn field<T: std::str::FromStr>(fields: &[&str], idx: usize, line: usize, name: &str) -> Result<T> {
    fields[idx]
        .parse()
        .map_err(|_| parse_err(line, format!("invalid {name} '{}'", fields[idx])))
}

/// Parse one metrics line into (codepoint, metric).
fn parse_line(text: &str, line: usize) -> Result<(u32, GlyphMetric)> {
    let fields: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|f| !f.is_empty())
        .collect();

    match fields.len() {
        8 => {}
        n if n < 5 => {
            return Err(parse_err(line, format!("codepoint has no atlas rectangle ({n} of 8 fields)")));
        }
        n => {
            return Err(parse_err(line, format!("expected 8 fields, found {n}")));
        }
    }

    let codepoint: u32 = field(&fields, 0, line, "codepoint")?;
    let metric = GlyphMetric {
        advance: field(&fields, 1, line, "advance")?,
        bearing_x: field(&fields, 2, line, "bearing x")?,
        bearing_y: field(&fields, 3, line, "bearing y")?,
        rect: AtlasRect {
            x: field(&fields, 4, line, "atlas x")?,
            y: field(&fields, 5, line, "atlas y")?,
            w: field(&fields, 6, line, "atlas width")?,
            h: field(&fields, 7, line, "atlas height")?,
        },
        spread: DEFAULT_SPREAD,
    };
    Ok((codepoint, metric))
}

impl FontAsset {
    /// Build an asset by pairing a rasterized atlas with a metrics
    /// description.
    ///
    /// Fails with [`FontError::Parse`] on a malformed line, a
    /// duplicate codepoint, or a rectangle exceeding the image
    /// bounds; no asset is produced on failure.
    pub fn from_image_and_metrics(
        family: impl Into<String>,
        base_size: f32,
        image: AtlasImage,
        metrics: &str,
    ) -> Result<Self> {
        let family = family.into();
        // match the codec's constraints so every created asset
        // survives encode/decode
        if !(base_size > 0.0) {
            return Err(FontError::Format(format!("invalid base size {base_size}")));
        }
        if family.len() > u16::MAX as usize {
            return Err(FontError::Format(format!(
                "family name too long ({} bytes)",
                family.len()
            )));
        }
        let mut glyphs = HashMap::new();

        for (idx, raw) in metrics.lines().enumerate() {
            let line_no = idx + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let (codepoint, metric) = parse_line(text, line_no)?;
            if !image.contains(metric.rect) {
                return Err(parse_err(
                    line_no,
                    format!(
                        "rect {}x{}+{}+{} exceeds {}x{} atlas",
                        metric.rect.w, metric.rect.h, metric.rect.x, metric.rect.y,
                        image.width, image.height
                    ),
                ));
            }
            if glyphs.insert(codepoint, metric).is_some() {
                return Err(parse_err(line_no, format!("duplicate codepoint {codepoint}")));
            }
        }

        tracing::debug!("Built asset '{}' from metrics ({} glyphs)", family, glyphs.len());
        // The metrics text carries no line height; use the common
        // 1.2em pitch.
        let line_height = base_size * 1.2;
        Ok(FontAsset::from_parts(family, glyphs, image, base_size, line_height))
    }
}
