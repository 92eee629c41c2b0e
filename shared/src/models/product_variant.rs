//! Product Variant Model

use serde::{Deserialize, Serialize};

use super::{LocalizedText, VariantType};

/// One enumerated choice of a menu item (rice vs. quinoa, cola flavors)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductVariant {
    pub id: i64,
    pub menu_item_id: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub name: LocalizedText,
    #[serde(rename = "type")]
    pub variant_type: VariantType,
    pub display_order: i32,
    pub is_available: bool,
}

/// Create variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariantCreate {
    pub menu_item_id: i64,
    pub name: LocalizedText,
    #[serde(rename = "type")]
    pub variant_type: VariantType,
    pub display_order: Option<i32>,
    pub is_available: Option<bool>,
}
