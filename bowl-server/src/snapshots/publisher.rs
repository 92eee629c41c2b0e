//! Snapshot publish (restore)
//!
//! Replaces live content with a snapshot inside one transaction:
//!
//! 1. version precondition and integrity gate (no writes yet)
//! 2. upsert parents before children, keeping every original id
//! 3. delete live rows the snapshot does not contain, children first
//! 4. re-read live content and compare checksums
//! 5. bump `content_version`
//!
//! Any error drops the transaction, so live tables are left untouched.
//! Rows that survive are updated in place, which keeps
//! `order_item.menu_item_id` pointing at them.

use shared::models::{ContentSet, PublishResult};
use sqlx::{SqliteConnection, SqlitePool};

use super::{SnapshotError, validator};
use crate::db::repository::{
    category, content, content_version, gallery, ingredient, menu_item, product_variant,
    snapshot, static_content,
};

pub async fn publish(
    pool: &SqlitePool,
    snapshot_id: i64,
    expected_version: Option<i64>,
) -> Result<PublishResult, SnapshotError> {
    let mut tx = pool.begin().await?;

    let snap = snapshot::find_by_id(&mut *tx, snapshot_id)
        .await?
        .ok_or(SnapshotError::NotFound(snapshot_id))?;

    let current = content_version::get(&mut *tx).await?;
    if let Some(expected) = expected_version
        && expected != current.version
    {
        return Err(SnapshotError::StaleVersion {
            expected,
            actual: current.version,
        });
    }

    let target = snapshot::load_content(&mut tx, snapshot_id).await?;
    validator::validate(&target)?;

    apply(&mut tx, &target).await?;

    let live = content::load_live(&mut tx).await?;
    let actual = live.checksum()?;
    if actual != snap.checksum {
        return Err(SnapshotError::ChecksumMismatch {
            expected: snap.checksum,
            actual,
        });
    }

    let version = content_version::bump(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!(
        snapshot_id,
        name = %snap.name,
        categories = target.categories.len(),
        menu_items = target.menu_items.len(),
        variants = target.variants.len(),
        ingredients = target.ingredients.len(),
        content_version = version.version,
        "Snapshot published"
    );

    Ok(PublishResult {
        success: true,
        snapshot_id,
        content_version: version.version,
    })
}

/// Make the live tables equal to `target`
async fn apply(conn: &mut SqliteConnection, target: &ContentSet) -> Result<(), SnapshotError> {
    for c in &target.categories {
        category::upsert(&mut *conn, c).await?;
    }
    for i in &target.ingredients {
        ingredient::upsert(&mut *conn, i).await?;
    }
    for m in &target.menu_items {
        menu_item::upsert(&mut *conn, m).await?;
    }
    for v in &target.variants {
        product_variant::upsert(&mut *conn, v).await?;
    }

    let variant_ids: Vec<i64> = target.variants.iter().map(|v| v.id).collect();
    let menu_item_ids: Vec<i64> = target.menu_items.iter().map(|m| m.id).collect();
    let category_ids: Vec<i64> = target.categories.iter().map(|c| c.id).collect();
    let ingredient_ids: Vec<i64> = target.ingredients.iter().map(|i| i.id).collect();
    product_variant::delete_except(&mut *conn, &variant_ids).await?;
    menu_item::delete_except(&mut *conn, &menu_item_ids).await?;
    category::delete_except(&mut *conn, &category_ids).await?;
    ingredient::delete_except(&mut *conn, &ingredient_ids).await?;

    // No foreign keys here; delete first so a reused key never meets a stale row
    let gallery_ids: Vec<i64> = target.gallery.iter().map(|g| g.id).collect();
    gallery::delete_except(&mut *conn, &gallery_ids).await?;
    for g in &target.gallery {
        gallery::upsert(&mut *conn, g).await?;
    }
    let static_ids: Vec<i64> = target.static_content.iter().map(|s| s.id).collect();
    static_content::delete_except(&mut *conn, &static_ids).await?;
    for s in &target.static_content {
        static_content::upsert(&mut *conn, s).await?;
    }

    Ok(())
}
