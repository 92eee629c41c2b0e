//! Content set: one full generation of published content

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Category, GalleryImage, Ingredient, MenuItem, ProductVariant, StaticContent};

/// Every content row the public site reads, in id order.
///
/// The same shape is produced from the live tables and from a snapshot, so a
/// snapshot and the live state after publishing it have equal checksums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSet {
    pub categories: Vec<Category>,
    pub menu_items: Vec<MenuItem>,
    pub variants: Vec<ProductVariant>,
    pub ingredients: Vec<Ingredient>,
    pub gallery: Vec<GalleryImage>,
    pub static_content: Vec<StaticContent>,
}

impl ContentSet {
    /// SHA-256 (hex) over the canonical JSON encoding
    pub fn checksum(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.menu_items.is_empty()
            && self.variants.is_empty()
            && self.ingredients.is_empty()
            && self.gallery.is_empty()
            && self.static_content.is_empty()
    }
}

/// Current live content generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ContentVersion {
    pub version: i64,
    pub updated_at: i64,
}
