//! SDFF Text - Text layout over SDF font assets
//!
//! This crate turns a string plus a [`sdff_font::FontAsset`] into
//! positioned glyph geometry:
//! - Word/letter wrapping inside a bounded box
//! - Left/center/right alignment and line-spacing control
//! - Glyph quads (atlas rect, destination rect) for a shader renderer
//!
//! Layout never fails; degenerate input yields a valid, possibly
//! empty, layout.

pub mod layout;
pub mod textbox;

pub use layout::{Align, Boundary, Line, Quad, Rect, TextLayout};
pub use textbox::{DrawList, TextBox};
