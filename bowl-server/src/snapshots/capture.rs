//! Snapshot capture
//!
//! Freezes every live content row under a new snapshot id in one
//! transaction. Either the whole snapshot is written or nothing is.

use shared::models::{Snapshot, SnapshotCreate};
use sqlx::SqlitePool;

use super::SnapshotError;
use crate::auth::AdminIdentity;
use crate::db::repository::{content, content_version, snapshot};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

pub async fn capture(
    pool: &SqlitePool,
    request: SnapshotCreate,
    actor: &AdminIdentity,
) -> Result<Snapshot, SnapshotError> {
    let name = request.name.trim().to_string();
    validate_required_text(&name, "name", MAX_NAME_LEN).map_err(SnapshotError::Invalid)?;
    let description = request
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    validate_optional_text(&description, "description", MAX_NOTE_LEN)
        .map_err(SnapshotError::Invalid)?;

    let mut tx = pool.begin().await?;

    let live = content::load_live(&mut tx).await?;
    let version = content_version::get(&mut *tx).await?;

    let snap = Snapshot {
        id: shared::util::snowflake_id(),
        name,
        description,
        created_by: Some(actor.id),
        created_by_name: Some(actor.username.clone()),
        created_at: shared::util::now_millis(),
        content_version: version.version,
        checksum: live.checksum()?,
    };
    snapshot::insert(&mut *tx, &snap).await?;
    snapshot::copy_live_content(&mut tx, snap.id, &live.static_content).await?;

    tx.commit().await?;

    tracing::info!(
        snapshot_id = snap.id,
        name = %snap.name,
        admin = %actor.username,
        categories = live.categories.len(),
        menu_items = live.menu_items.len(),
        variants = live.variants.len(),
        ingredients = live.ingredients.len(),
        gallery = live.gallery.len(),
        static_content = live.static_content.len(),
        content_version = snap.content_version,
        "Snapshot captured"
    );

    Ok(snap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use crate::snapshots::fixtures::{admin, seed_monday_menu};

    fn request(name: &str) -> SnapshotCreate {
        SnapshotCreate {
            name: name.into(),
            description: Some("  ".into()),
        }
    }

    #[tokio::test]
    async fn captures_every_table_with_original_ids() {
        let pool = test_pool().await;
        let seeded = seed_monday_menu(&pool).await;

        let snap = capture(&pool, request("Monday Menu"), &admin(&pool).await).await.unwrap();
        assert_eq!(snap.created_by_name.as_deref(), Some("admin"));
        assert_eq!(snap.description, None);
        assert_eq!(snap.content_version, 0);

        let mut conn = pool.acquire().await.unwrap();
        let captured = snapshot::load_content(&mut conn, snap.id).await.unwrap();
        let live = content::load_live(&mut conn).await.unwrap();
        assert_eq!(captured, live);
        assert_eq!(snap.checksum, live.checksum().unwrap());

        let captured_ids: Vec<_> = captured.categories.iter().map(|c| c.id).collect();
        let mut expected = vec![seeded.cat1, seeded.cat2];
        expected.sort();
        assert_eq!(captured_ids, expected);
    }

    #[tokio::test]
    async fn blank_name_rejected_without_writes() {
        let pool = test_pool().await;
        seed_monday_menu(&pool).await;

        let err = capture(&pool, request("   "), &admin(&pool).await).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Invalid(_)));
        assert!(snapshot::find_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_allowed() {
        let pool = test_pool().await;
        seed_monday_menu(&pool).await;

        let a = capture(&pool, request("Menu"), &admin(&pool).await).await.unwrap();
        let b = capture(&pool, request("Menu"), &admin(&pool).await).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(snapshot::find_all(&pool).await.unwrap().len(), 2);
    }
}
