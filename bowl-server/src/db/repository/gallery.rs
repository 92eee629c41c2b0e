//! Gallery Image Repository

use super::{RepoError, RepoResult, id_list};
use shared::models::{GalleryImage, GalleryImageCreate};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

pub async fn find_all<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<Vec<GalleryImage>> {
    let images = sqlx::query_as::<_, GalleryImage>(
        "SELECT id, image_url, alt_text, display_order FROM gallery_image ORDER BY id",
    )
    .fetch_all(ex)
    .await?;
    Ok(images)
}

pub async fn create(pool: &SqlitePool, data: GalleryImageCreate) -> RepoResult<GalleryImage> {
    if data.image_url.trim().is_empty() {
        return Err(RepoError::Validation("Image URL must not be empty".into()));
    }
    let image = GalleryImage {
        id: shared::util::snowflake_id(),
        image_url: data.image_url,
        alt_text: data.alt_text,
        display_order: data.display_order.unwrap_or(0),
    };
    upsert(pool, &image).await?;
    Ok(image)
}

pub async fn upsert<'e>(ex: impl SqliteExecutor<'e>, g: &GalleryImage) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO gallery_image (id, image_url, alt_text, display_order) VALUES (?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET image_url = excluded.image_url, \
         alt_text = excluded.alt_text, display_order = excluded.display_order",
    )
    .bind(g.id)
    .bind(&g.image_url)
    .bind(Json(&g.alt_text))
    .bind(g.display_order)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn delete_except<'e>(ex: impl SqliteExecutor<'e>, keep: &[i64]) -> RepoResult<u64> {
    let rows =
        sqlx::query("DELETE FROM gallery_image WHERE id NOT IN (SELECT value FROM json_each(?))")
            .bind(id_list(keep.iter().copied()))
            .execute(ex)
            .await?;
    Ok(rows.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use shared::models::LocalizedText;

    #[tokio::test]
    async fn create_and_prune() {
        let pool = test_pool().await;
        let keep = create(
            &pool,
            GalleryImageCreate {
                image_url: "/images/hall.jpg".into(),
                alt_text: LocalizedText::new("Зал", "Hall"),
                display_order: Some(1),
            },
        )
        .await
        .unwrap();
        create(
            &pool,
            GalleryImageCreate {
                image_url: "/images/old.jpg".into(),
                alt_text: LocalizedText::default(),
                display_order: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(delete_except(&pool, &[keep.id]).await.unwrap(), 1);
        assert_eq!(find_all(&pool).await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn empty_url_rejected() {
        let pool = test_pool().await;
        let err = create(
            &pool,
            GalleryImageCreate {
                image_url: "  ".into(),
                alt_text: LocalizedText::default(),
                display_order: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
