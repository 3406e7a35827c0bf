//! Font registry
//!
//! An explicitly owned mapping from family name to a shared
//! [`FontAsset`]. The owning thread is the single writer; assets are
//! handed out as `Arc`s, so a reader holds either the old or the new
//! asset for a family, never a mixture.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{codec, FontAsset, FontError, Result};

/// Registry of loaded font assets, keyed by family name
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: HashMap<String, Arc<FontAsset>>,
}

impl FontRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { fonts: HashMap::new() }
    }

    /// Register an asset under its family name.
    ///
    /// A loaded family is replaced wholesale; last load wins.
    pub fn add(&mut self, asset: FontAsset) -> Arc<FontAsset> {
        let family = asset.family().to_string();
        let asset = Arc::new(asset);
        if self.fonts.insert(family.clone(), Arc::clone(&asset)).is_some() {
            tracing::info!("Replaced font family '{}'", family);
        } else {
            tracing::info!("Registered font family '{}'", family);
        }
        asset
    }

    /// Decode a binary asset and register it.
    ///
    /// On decode failure the registry is left untouched.
    pub fn load(&mut self, bytes: &[u8]) -> Result<Arc<FontAsset>> {
        let asset = codec::decode(bytes)?;
        Ok(self.add(asset))
    }

    /// Read a `.sdff` file and register it
    pub fn load_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<Arc<FontAsset>> {
        let bytes = std::fs::read(path)?;
        self.load(&bytes)
    }

    /// Look up an asset by family name
    pub fn get(&self, family: &str) -> Result<Arc<FontAsset>> {
        self.fonts
            .get(family)
            .cloned()
            .ok_or_else(|| FontError::NotFound(family.to_string()))
    }

    /// Iterate over registered family names
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// Number of registered families
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Check if no fonts are registered
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AtlasImage;

    fn asset(family: &str, base_size: f32) -> FontAsset {
        FontAsset::from_image_and_metrics(
            family,
            base_size,
            AtlasImage::blank(64, 64),
            "65 12 1 0 0 0 10 14\n",
        )
        .unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let mut reg = FontRegistry::new();
        reg.add(asset("Bubblegum", 32.0));

        let font = reg.get("Bubblegum").unwrap();
        assert_eq!(font.family(), "Bubblegum");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let reg = FontRegistry::new();
        assert!(matches!(reg.get("Nope"), Err(FontError::NotFound(_))));
    }

    #[test]
    fn test_last_load_wins() {
        let mut reg = FontRegistry::new();
        reg.add(asset("Bubblegum", 32.0));
        let old = reg.get("Bubblegum").unwrap();

        reg.add(asset("Bubblegum", 48.0));
        let new = reg.get("Bubblegum").unwrap();

        assert_eq!(reg.len(), 1);
        assert_eq!(new.base_size(), 48.0);
        // the old Arc stays valid for readers that still hold it
        assert_eq!(old.base_size(), 32.0);
    }

    #[test]
    fn test_load_failure_leaves_registry_intact() {
        let mut reg = FontRegistry::new();
        reg.add(asset("Bubblegum", 32.0));

        assert!(reg.load(b"not an sdff file").is_err());
        assert_eq!(reg.len(), 1);
        assert!(reg.get("Bubblegum").is_ok());
    }

    #[test]
    fn test_load_file_missing() {
        let mut reg = FontRegistry::new();
        let err = reg.load_file("/nonexistent/font.sdff").unwrap_err();
        assert!(matches!(err, FontError::Io(_)));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_load_round_trip() {
        let mut reg = FontRegistry::new();
        let bytes = codec::encode(&asset("Bubblegum", 32.0));
        let font = reg.load(&bytes).unwrap();
        assert_eq!(font.family(), "Bubblegum");
        assert!(reg.get("Bubblegum").is_ok());
    }
}
