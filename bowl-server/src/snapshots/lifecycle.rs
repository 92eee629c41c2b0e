//! List, preview, delete and download

use std::path::PathBuf;

use shared::models::{SnapshotDetail, SnapshotSummary};
use sqlx::SqlitePool;

use super::{SnapshotError, archive};
use crate::db::repository::snapshot;

pub async fn list(pool: &SqlitePool) -> Result<Vec<SnapshotSummary>, SnapshotError> {
    Ok(snapshot::find_all(pool).await?)
}

/// Metadata plus all captured content
pub async fn detail(pool: &SqlitePool, id: i64) -> Result<SnapshotDetail, SnapshotError> {
    let mut conn = pool.acquire().await?;
    let snap = snapshot::find_by_id(&mut *conn, id)
        .await?
        .ok_or(SnapshotError::NotFound(id))?;
    let content = snapshot::load_content(&mut conn, id).await?;
    Ok(SnapshotDetail {
        snapshot: snap,
        content,
    })
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), SnapshotError> {
    if !snapshot::delete(pool, id).await? {
        return Err(SnapshotError::NotFound(id));
    }
    tracing::info!(snapshot_id = id, "Snapshot deleted");
    Ok(())
}

/// ZIP download: file name and bytes
pub async fn download(
    pool: &SqlitePool,
    id: i64,
    images_dir: PathBuf,
    media_dir: PathBuf,
) -> Result<(String, Vec<u8>), SnapshotError> {
    let SnapshotDetail { snapshot, content } = detail(pool, id).await?;

    let bytes = tokio::task::spawn_blocking(move || {
        archive::build_archive(&snapshot, &content, &images_dir, &media_dir)
    })
    .await
    .map_err(|e| SnapshotError::Archive(e.to_string()))??;

    tracing::info!(snapshot_id = id, bytes = bytes.len(), "Snapshot archive built");
    Ok((archive::archive_file_name(id), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use crate::snapshots::capture::capture;
    use crate::snapshots::fixtures::{admin, seed_monday_menu};
    use shared::models::SnapshotCreate;

    async fn capture_one(pool: &SqlitePool) -> i64 {
        capture(
            pool,
            SnapshotCreate {
                name: "Monday Menu".into(),
                description: Some("weekday".into()),
            },
            &admin(pool).await,
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn detail_holds_all_content() {
        let pool = test_pool().await;
        seed_monday_menu(&pool).await;
        let id = capture_one(&pool).await;

        let d = detail(&pool, id).await.unwrap();
        assert_eq!(d.snapshot.description.as_deref(), Some("weekday"));
        assert_eq!(d.content.categories.len(), 2);
        assert_eq!(d.content.menu_items.len(), 3);
        assert_eq!(d.content.static_content.len(), 1);

        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("menuItems").is_some());
        assert!(json.get("staticContent").is_some());
        assert_eq!(json["snapshot"]["name"], "Monday Menu");
    }

    #[tokio::test]
    async fn list_newest_first_with_counts() {
        let pool = test_pool().await;
        seed_monday_menu(&pool).await;
        let first = capture_one(&pool).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = capture_one(&pool).await;

        let rows = list(&pool).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.snapshot.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(rows[0].category_count, 2);
        assert_eq!(rows[0].menu_item_count, 3);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let pool = test_pool().await;
        seed_monday_menu(&pool).await;
        let id = capture_one(&pool).await;

        delete(&pool, id).await.unwrap();
        assert!(matches!(
            delete(&pool, id).await,
            Err(SnapshotError::NotFound(_))
        ));
        assert!(matches!(
            detail(&pool, id).await,
            Err(SnapshotError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn download_names_file_after_snapshot() {
        let pool = test_pool().await;
        seed_monday_menu(&pool).await;
        let id = capture_one(&pool).await;
        let dir = tempfile::tempdir().unwrap();

        let (name, bytes) = download(&pool, id, dir.path().join("images"), dir.path().join("media"))
            .await
            .unwrap();
        assert_eq!(name, format!("snapshot-{id}.zip"));
        assert_eq!(&bytes[..2], b"PK");
    }
}
