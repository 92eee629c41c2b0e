//! Gallery Image Model

use serde::{Deserialize, Serialize};

use super::LocalizedText;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GalleryImage {
    pub id: i64,
    pub image_url: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub alt_text: LocalizedText,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageCreate {
    pub image_url: String,
    #[serde(default)]
    pub alt_text: LocalizedText,
    pub display_order: Option<i32>,
}
