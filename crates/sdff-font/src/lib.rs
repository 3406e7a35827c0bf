//! SDFF Font - Signed-distance-field font assets
//!
//! This crate provides the font side of the SDFF text stack:
//! - FontAsset data model (glyph metrics + single-channel atlas)
//! - Binary `.sdff` codec (decode/encode)
//! - Asset creation from a rasterized atlas image and a metrics text
//! - FontRegistry for sharing assets by family name

pub mod asset;
pub mod codec;
pub mod metrics;
pub mod registry;

pub use asset::{AtlasImage, AtlasRect, FontAsset, GlyphMetric};
pub use codec::{decode, encode};
pub use registry::FontRegistry;

/// Font asset error types
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Invalid font data: {0}")]
    Format(String),

    #[error("Metrics line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
