//! Category Model

use serde::{Deserialize, Serialize};

use super::LocalizedText;

/// Menu category (bowls, soups, drinks...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub name: LocalizedText,
    /// Emoji or icon glyph shown next to the name
    pub icon: String,
    pub display_order: i32,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: LocalizedText,
    #[serde(default)]
    pub icon: String,
    pub display_order: Option<i32>,
}
