//! Product Variant Repository

use super::{RepoError, RepoResult, id_list};
use shared::models::{ProductVariant, ProductVariantCreate};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, menu_item_id, name, variant_type, display_order, is_available";

pub async fn find_all<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<Vec<ProductVariant>> {
    let variants = sqlx::query_as::<_, ProductVariant>(&format!(
        "SELECT {COLUMNS} FROM product_variant ORDER BY id"
    ))
    .fetch_all(ex)
    .await?;
    Ok(variants)
}

pub async fn find_by_id<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<ProductVariant>> {
    let variant = sqlx::query_as::<_, ProductVariant>(&format!(
        "SELECT {COLUMNS} FROM product_variant WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(variant)
}

pub async fn find_by_menu_item<'e>(
    ex: impl SqliteExecutor<'e>,
    menu_item_id: i64,
) -> RepoResult<Vec<ProductVariant>> {
    let variants = sqlx::query_as::<_, ProductVariant>(&format!(
        "SELECT {COLUMNS} FROM product_variant WHERE menu_item_id = ? ORDER BY display_order, id"
    ))
    .bind(menu_item_id)
    .fetch_all(ex)
    .await?;
    Ok(variants)
}

/// Create a variant and flag its menu item as having variants
pub async fn create(pool: &SqlitePool, data: ProductVariantCreate) -> RepoResult<ProductVariant> {
    if data.name.is_blank() {
        return Err(RepoError::Validation("Variant name must not be empty".into()));
    }

    let variant = ProductVariant {
        id: shared::util::snowflake_id(),
        menu_item_id: data.menu_item_id,
        name: data.name,
        variant_type: data.variant_type,
        display_order: data.display_order.unwrap_or(0),
        is_available: data.is_available.unwrap_or(true),
    };

    let mut tx = pool.begin().await?;
    let updated = sqlx::query(
        "UPDATE menu_item SET has_variants = 1, variant_type = COALESCE(variant_type, ?) WHERE id = ?",
    )
    .bind(variant.variant_type)
    .bind(variant.menu_item_id)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Menu item {} not found",
            variant.menu_item_id
        )));
    }
    upsert(&mut *tx, &variant).await?;
    tx.commit().await?;

    Ok(variant)
}

/// Insert or overwrite a row keeping its id
pub async fn upsert<'e>(ex: impl SqliteExecutor<'e>, v: &ProductVariant) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO product_variant ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET menu_item_id = excluded.menu_item_id, \
         name = excluded.name, variant_type = excluded.variant_type, \
         display_order = excluded.display_order, is_available = excluded.is_available"
    ))
    .bind(v.id)
    .bind(v.menu_item_id)
    .bind(Json(&v.name))
    .bind(v.variant_type)
    .bind(v.display_order)
    .bind(v.is_available)
    .execute(ex)
    .await?;
    Ok(())
}

/// Delete every row whose id is not in `keep`
pub async fn delete_except<'e>(ex: impl SqliteExecutor<'e>, keep: &[i64]) -> RepoResult<u64> {
    let rows =
        sqlx::query("DELETE FROM product_variant WHERE id NOT IN (SELECT value FROM json_each(?))")
            .bind(id_list(keep.iter().copied()))
            .execute(ex)
            .await?;
    Ok(rows.rows_affected())
}
