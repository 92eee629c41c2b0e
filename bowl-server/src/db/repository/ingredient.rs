//! Ingredient Repository

use super::{RepoError, RepoResult, id_list};
use shared::models::{Ingredient, IngredientCreate};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str =
    "id, name, kind, price, price_small, price_standard, is_available, display_order";

pub async fn find_all<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<Vec<Ingredient>> {
    let ingredients = sqlx::query_as::<_, Ingredient>(&format!(
        "SELECT {COLUMNS} FROM ingredient ORDER BY id"
    ))
    .fetch_all(ex)
    .await?;
    Ok(ingredients)
}

/// Bowl builder catalogue, grouped by step
pub async fn find_available<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<Vec<Ingredient>> {
    let ingredients = sqlx::query_as::<_, Ingredient>(&format!(
        "SELECT {COLUMNS} FROM ingredient WHERE is_available = 1 ORDER BY kind, display_order, id"
    ))
    .fetch_all(ex)
    .await?;
    Ok(ingredients)
}

pub async fn find_by_id<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<Ingredient>> {
    let ingredient =
        sqlx::query_as::<_, Ingredient>(&format!("SELECT {COLUMNS} FROM ingredient WHERE id = ?"))
            .bind(id)
            .fetch_optional(ex)
            .await?;
    Ok(ingredient)
}

pub async fn create(pool: &SqlitePool, data: IngredientCreate) -> RepoResult<Ingredient> {
    if data.name.is_blank() {
        return Err(RepoError::Validation("Ingredient name must not be empty".into()));
    }
    let prices = [data.price, data.price_small, data.price_standard];
    if prices
        .into_iter()
        .flatten()
        .any(|p| !p.is_finite() || p < 0.0)
    {
        return Err(RepoError::Validation("Price must be a non-negative number".into()));
    }

    let ingredient = Ingredient {
        id: shared::util::snowflake_id(),
        name: data.name,
        kind: data.kind,
        price: data.price,
        price_small: data.price_small,
        price_standard: data.price_standard,
        is_available: data.is_available.unwrap_or(true),
        display_order: data.display_order.unwrap_or(0),
    };
    upsert(pool, &ingredient).await?;
    Ok(ingredient)
}

/// Insert or overwrite a row keeping its id
pub async fn upsert<'e>(ex: impl SqliteExecutor<'e>, i: &Ingredient) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO ingredient ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET name = excluded.name, kind = excluded.kind, \
         price = excluded.price, price_small = excluded.price_small, \
         price_standard = excluded.price_standard, is_available = excluded.is_available, \
         display_order = excluded.display_order"
    ))
    .bind(i.id)
    .bind(Json(&i.name))
    .bind(i.kind)
    .bind(i.price)
    .bind(i.price_small)
    .bind(i.price_standard)
    .bind(i.is_available)
    .bind(i.display_order)
    .execute(ex)
    .await?;
    Ok(())
}

/// Delete every row whose id is not in `keep`
pub async fn delete_except<'e>(ex: impl SqliteExecutor<'e>, keep: &[i64]) -> RepoResult<u64> {
    let rows =
        sqlx::query("DELETE FROM ingredient WHERE id NOT IN (SELECT value FROM json_each(?))")
            .bind(id_list(keep.iter().copied()))
            .execute(ex)
            .await?;
    Ok(rows.rows_affected())
}
