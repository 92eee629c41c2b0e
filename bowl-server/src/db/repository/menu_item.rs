//! Menu Item Repository

use super::{RepoError, RepoResult, id_list};
use shared::models::{MenuItem, MenuItemCreate};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, category_id, name, description, price, price_small, image, \
    is_available, is_popular, has_size_options, is_custom_bowl, has_variants, variant_type, \
    ingredients, toppings, allergens, display_order";

pub async fn find_all<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item ORDER BY id"
    ))
    .fetch_all(ex)
    .await?;
    Ok(items)
}

/// Items shown on the public menu
pub async fn find_available<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE is_available = 1 \
         ORDER BY category_id, display_order, id"
    ))
    .fetch_all(ex)
    .await?;
    Ok(items)
}

pub async fn find_by_id<'e>(ex: impl SqliteExecutor<'e>, id: i64) -> RepoResult<Option<MenuItem>> {
    let item =
        sqlx::query_as::<_, MenuItem>(&format!("SELECT {COLUMNS} FROM menu_item WHERE id = ?"))
            .bind(id)
            .fetch_optional(ex)
            .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    if data.name.is_blank() {
        return Err(RepoError::Validation("Menu item name must not be empty".into()));
    }
    if !data.price.is_finite() || data.price < 0.0 {
        return Err(RepoError::Validation("Price must be a non-negative number".into()));
    }

    let category_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM category WHERE id = ?")
        .bind(data.category_id)
        .fetch_optional(pool)
        .await?;
    if category_exists.is_none() {
        return Err(RepoError::NotFound(format!(
            "Category {} not found",
            data.category_id
        )));
    }

    let item = MenuItem {
        id: shared::util::snowflake_id(),
        category_id: data.category_id,
        name: data.name,
        description: data.description,
        price: data.price,
        price_small: data.price_small,
        image: data.image,
        is_available: data.is_available.unwrap_or(true),
        is_popular: data.is_popular.unwrap_or(false),
        has_size_options: data.has_size_options.unwrap_or(false),
        is_custom_bowl: data.is_custom_bowl.unwrap_or(false),
        has_variants: data.variant_type.is_some(),
        variant_type: data.variant_type,
        ingredients: data.ingredients,
        toppings: data.toppings,
        allergens: data.allergens,
        display_order: data.display_order.unwrap_or(0),
    };
    upsert(pool, &item).await?;
    Ok(item)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Insert or overwrite a row keeping its id
pub async fn upsert<'e>(ex: impl SqliteExecutor<'e>, m: &MenuItem) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO menu_item ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET category_id = excluded.category_id, name = excluded.name, \
         description = excluded.description, price = excluded.price, \
         price_small = excluded.price_small, image = excluded.image, \
         is_available = excluded.is_available, is_popular = excluded.is_popular, \
         has_size_options = excluded.has_size_options, is_custom_bowl = excluded.is_custom_bowl, \
         has_variants = excluded.has_variants, variant_type = excluded.variant_type, \
         ingredients = excluded.ingredients, toppings = excluded.toppings, \
         allergens = excluded.allergens, display_order = excluded.display_order"
    ))
    .bind(m.id)
    .bind(m.category_id)
    .bind(Json(&m.name))
    .bind(Json(&m.description))
    .bind(m.price)
    .bind(m.price_small)
    .bind(&m.image)
    .bind(m.is_available)
    .bind(m.is_popular)
    .bind(m.has_size_options)
    .bind(m.is_custom_bowl)
    .bind(m.has_variants)
    .bind(m.variant_type)
    .bind(Json(&m.ingredients))
    .bind(Json(&m.toppings))
    .bind(Json(&m.allergens))
    .bind(m.display_order)
    .execute(ex)
    .await?;
    Ok(())
}

/// Delete every row whose id is not in `keep`
pub async fn delete_except<'e>(ex: impl SqliteExecutor<'e>, keep: &[i64]) -> RepoResult<u64> {
    let rows =
        sqlx::query("DELETE FROM menu_item WHERE id NOT IN (SELECT value FROM json_each(?))")
            .bind(id_list(keep.iter().copied()))
            .execute(ex)
            .await?;
    Ok(rows.rows_affected())
}
