//! Snapshot Models

use serde::{Deserialize, Serialize};

use super::ContentSet;

/// Snapshot metadata. Frozen content lives in the `snapshot_*` tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Snapshot {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Admin who captured it; null once that admin is removed
    pub created_by: Option<i64>,
    pub created_by_name: Option<String>,
    pub created_at: i64,
    /// Live content version at capture time
    pub content_version: i64,
    /// Checksum of the captured [`ContentSet`]
    pub checksum: String,
}

/// List row: metadata plus captured row counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SnapshotSummary {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub snapshot: Snapshot,
    pub category_count: i64,
    pub menu_item_count: i64,
}

/// Capture request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Snapshot with all captured content, for preview before publishing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDetail {
    pub snapshot: Snapshot,
    #[serde(flatten)]
    pub content: ContentSet,
}

/// Publish (restore) request. Body is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// When set, publish only if live content is still at this version
    pub expected_version: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    pub success: bool,
    pub snapshot_id: i64,
    /// Live content version after the publish
    pub content_version: i64,
}
