//! Static Content Model
//!
//! Keyed text blocks of the public site (hero, about, contacts...).

use serde::{Deserialize, Serialize};

use super::LocalizedText;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaticContent {
    pub id: i64,
    /// Section key, unique among live rows
    pub key: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub title: LocalizedText,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub body: LocalizedText,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticContentCreate {
    pub key: String,
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub body: LocalizedText,
    pub image_url: Option<String>,
}
