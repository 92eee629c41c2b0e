//! Snapshot Repository
//!
//! Snapshot rows are immutable: captured once, read, or deleted with their
//! parent. Captured rows keep the live id in `original_*_id`; reads alias it
//! back to `id` so a snapshot loads into the same [`ContentSet`] shape as the
//! live tables.

use super::RepoResult;
use shared::models::{
    Category, ContentSet, GalleryImage, Ingredient, MenuItem, ProductVariant, Snapshot,
    SnapshotSummary, StaticContent,
};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const SNAPSHOT_COLUMNS: &str =
    "id, name, description, created_by, created_by_name, created_at, content_version, checksum";

pub async fn insert<'e>(ex: impl SqliteExecutor<'e>, s: &Snapshot) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO snapshot ({SNAPSHOT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(s.id)
    .bind(&s.name)
    .bind(&s.description)
    .bind(s.created_by)
    .bind(&s.created_by_name)
    .bind(s.created_at)
    .bind(s.content_version)
    .bind(&s.checksum)
    .execute(ex)
    .await?;
    Ok(())
}

/// Copy every live content row into the snapshot tables.
///
/// Relational tables are copied column for column inside SQLite so JSON text
/// is kept byte for byte. Static content rows become one JSON payload each.
pub async fn copy_live_content(
    conn: &mut SqliteConnection,
    snapshot_id: i64,
    static_content: &[StaticContent],
) -> RepoResult<()> {
    let copies = [
        "INSERT INTO snapshot_category (snapshot_id, original_category_id, name, icon, display_order) \
         SELECT ?, id, name, icon, display_order FROM category",
        "INSERT INTO snapshot_ingredient (snapshot_id, original_ingredient_id, name, kind, price, \
         price_small, price_standard, is_available, display_order) \
         SELECT ?, id, name, kind, price, price_small, price_standard, is_available, display_order \
         FROM ingredient",
        "INSERT INTO snapshot_menu_item (snapshot_id, original_menu_item_id, category_id, name, \
         description, price, price_small, image, is_available, is_popular, has_size_options, \
         is_custom_bowl, has_variants, variant_type, ingredients, toppings, allergens, display_order) \
         SELECT ?, id, category_id, name, description, price, price_small, image, is_available, \
         is_popular, has_size_options, is_custom_bowl, has_variants, variant_type, ingredients, \
         toppings, allergens, display_order FROM menu_item",
        "INSERT INTO snapshot_product_variant (snapshot_id, original_variant_id, menu_item_id, name, \
         variant_type, display_order, is_available) \
         SELECT ?, id, menu_item_id, name, variant_type, display_order, is_available \
         FROM product_variant",
        "INSERT INTO snapshot_gallery_image (snapshot_id, original_image_id, image_url, alt_text, \
         display_order) SELECT ?, id, image_url, alt_text, display_order FROM gallery_image",
    ];
    for sql in copies {
        sqlx::query(sql)
            .bind(snapshot_id)
            .execute(&mut *conn)
            .await?;
    }

    for content in static_content {
        sqlx::query(
            "INSERT INTO snapshot_static_content (snapshot_id, original_content_id, content_json) \
             VALUES (?, ?, ?)",
        )
        .bind(snapshot_id)
        .bind(content.id)
        .bind(serde_json::to_string(content)?)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// All snapshots, newest first, with captured row counts
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<SnapshotSummary>> {
    let rows = sqlx::query_as::<_, SnapshotSummary>(
        "SELECT s.id, s.name, s.description, s.created_by, s.created_by_name, s.created_at, \
         s.content_version, s.checksum, \
         (SELECT COUNT(*) FROM snapshot_category c WHERE c.snapshot_id = s.id) AS category_count, \
         (SELECT COUNT(*) FROM snapshot_menu_item m WHERE m.snapshot_id = s.id) AS menu_item_count \
         FROM snapshot s ORDER BY s.created_at DESC, s.id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id<'e>(ex: impl SqliteExecutor<'e>, id: i64) -> RepoResult<Option<Snapshot>> {
    let snapshot =
        sqlx::query_as::<_, Snapshot>(&format!("SELECT {SNAPSHOT_COLUMNS} FROM snapshot WHERE id = ?"))
            .bind(id)
            .fetch_optional(ex)
            .await?;
    Ok(snapshot)
}

/// Captured content of one snapshot, in original id order
pub async fn load_content(conn: &mut SqliteConnection, snapshot_id: i64) -> RepoResult<ContentSet> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT original_category_id AS id, name, icon, display_order \
         FROM snapshot_category WHERE snapshot_id = ? ORDER BY original_category_id",
    )
    .bind(snapshot_id)
    .fetch_all(&mut *conn)
    .await?;

    let menu_items = sqlx::query_as::<_, MenuItem>(
        "SELECT original_menu_item_id AS id, category_id, name, description, price, price_small, \
         image, is_available, is_popular, has_size_options, is_custom_bowl, has_variants, \
         variant_type, ingredients, toppings, allergens, display_order \
         FROM snapshot_menu_item WHERE snapshot_id = ? ORDER BY original_menu_item_id",
    )
    .bind(snapshot_id)
    .fetch_all(&mut *conn)
    .await?;

    let variants = sqlx::query_as::<_, ProductVariant>(
        "SELECT original_variant_id AS id, menu_item_id, name, variant_type, display_order, \
         is_available FROM snapshot_product_variant WHERE snapshot_id = ? \
         ORDER BY original_variant_id",
    )
    .bind(snapshot_id)
    .fetch_all(&mut *conn)
    .await?;

    let ingredients = sqlx::query_as::<_, Ingredient>(
        "SELECT original_ingredient_id AS id, name, kind, price, price_small, price_standard, \
         is_available, display_order FROM snapshot_ingredient WHERE snapshot_id = ? \
         ORDER BY original_ingredient_id",
    )
    .bind(snapshot_id)
    .fetch_all(&mut *conn)
    .await?;

    let gallery = sqlx::query_as::<_, GalleryImage>(
        "SELECT original_image_id AS id, image_url, alt_text, display_order \
         FROM snapshot_gallery_image WHERE snapshot_id = ? ORDER BY original_image_id",
    )
    .bind(snapshot_id)
    .fetch_all(&mut *conn)
    .await?;

    let payloads: Vec<(i64, String)> = sqlx::query_as(
        "SELECT original_content_id, content_json FROM snapshot_static_content \
         WHERE snapshot_id = ? ORDER BY original_content_id",
    )
    .bind(snapshot_id)
    .fetch_all(&mut *conn)
    .await?;
    let static_content = payloads
        .into_iter()
        .map(|(original_id, json)| {
            let mut content: StaticContent = serde_json::from_str(&json)?;
            content.id = original_id;
            Ok(content)
        })
        .collect::<RepoResult<Vec<_>>>()?;

    Ok(ContentSet {
        categories,
        menu_items,
        variants,
        ingredients,
        gallery,
        static_content,
    })
}

/// Delete a snapshot; captured rows go with it (cascade)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM snapshot WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{content, test_support::test_pool};

    fn snapshot(id: i64, created_at: i64) -> Snapshot {
        Snapshot {
            id,
            name: "Monday Menu".into(),
            description: None,
            created_by: None,
            created_by_name: Some("admin".into()),
            created_at,
            content_version: 0,
            checksum: String::new(),
        }
    }

    async fn seed_live(pool: &SqlitePool) {
        let statements = [
            r#"INSERT INTO category (id, name, icon, display_order) VALUES (1, '{"ru":"Боулы","en":"Bowls"}', '🥗', 0)"#,
            r#"INSERT INTO menu_item (id, category_id, name, description, price, allergens)
               VALUES (10, 1, '{"ru":"Поке","en":"Poke"}', '{"ru":"","en":""}', 9.5, '["fish"]')"#,
            r#"INSERT INTO product_variant (id, menu_item_id, name, variant_type)
               VALUES (20, 10, '{"ru":"Рис","en":"Rice"}', 'base')"#,
            r#"INSERT INTO ingredient (id, name, kind, price_small, price_standard)
               VALUES (30, '{"ru":"Лосось","en":"Salmon"}', 'protein', 3.5, 5.0)"#,
            r#"INSERT INTO gallery_image (id, image_url, alt_text) VALUES (40, '/img/a.jpg', '{"ru":"","en":""}')"#,
            r#"INSERT INTO static_content (id, key, title, body) VALUES (50, 'about', '{"ru":"О","en":"A"}', '{"ru":"Т","en":"T"}')"#,
        ];
        for sql in statements {
            sqlx::query(sql).execute(pool).await.unwrap();
        }
    }

    #[tokio::test]
    async fn copy_then_load_matches_live() {
        let pool = test_pool().await;
        seed_live(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        let live = content::load_live(&mut conn).await.unwrap();
        insert(&mut *conn, &snapshot(1, 100)).await.unwrap();
        copy_live_content(&mut conn, 1, &live.static_content)
            .await
            .unwrap();

        let captured = load_content(&mut conn, 1).await.unwrap();
        assert_eq!(captured, live);
        assert_eq!(captured.checksum().unwrap(), live.checksum().unwrap());
    }

    #[tokio::test]
    async fn list_counts_and_cascade_delete() {
        let pool = test_pool().await;
        seed_live(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        let live = content::load_live(&mut conn).await.unwrap();
        insert(&mut *conn, &snapshot(1, 100)).await.unwrap();
        copy_live_content(&mut conn, 1, &live.static_content)
            .await
            .unwrap();
        insert(&mut *conn, &snapshot(2, 200)).await.unwrap();
        drop(conn);

        let list = find_all(&pool).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].snapshot.id, 2);
        assert_eq!(list[0].category_count, 0);
        assert_eq!(list[1].category_count, 1);
        assert_eq!(list[1].menu_item_count, 1);

        assert!(delete(&pool, 1).await.unwrap());
        assert!(!delete(&pool, 1).await.unwrap());
        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM snapshot_menu_item")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orphans, 0);
        assert!(find_by_id(&pool, 1).await.unwrap().is_none());
    }
}
