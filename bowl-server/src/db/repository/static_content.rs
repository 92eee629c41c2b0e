//! Static Content Repository

use super::{RepoError, RepoResult, id_list};
use shared::models::{StaticContent, StaticContentCreate};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, key, title, body, image_url";

pub async fn find_all<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<Vec<StaticContent>> {
    let rows = sqlx::query_as::<_, StaticContent>(&format!(
        "SELECT {COLUMNS} FROM static_content ORDER BY id"
    ))
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn find_by_key<'e>(
    ex: impl SqliteExecutor<'e>,
    key: &str,
) -> RepoResult<Option<StaticContent>> {
    let row = sqlx::query_as::<_, StaticContent>(&format!(
        "SELECT {COLUMNS} FROM static_content WHERE key = ? ORDER BY id LIMIT 1"
    ))
    .bind(key)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

/// Create a section. Keys stay unique among live rows.
pub async fn create(pool: &SqlitePool, data: StaticContentCreate) -> RepoResult<StaticContent> {
    let key = data.key.trim();
    if key.is_empty() {
        return Err(RepoError::Validation("Content key must not be empty".into()));
    }
    if find_by_key(pool, key).await?.is_some() {
        return Err(RepoError::Duplicate(format!("Content key '{key}' already exists")));
    }

    let content = StaticContent {
        id: shared::util::snowflake_id(),
        key: key.to_string(),
        title: data.title,
        body: data.body,
        image_url: data.image_url,
    };
    upsert(pool, &content).await?;
    Ok(content)
}

pub async fn upsert<'e>(ex: impl SqliteExecutor<'e>, s: &StaticContent) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO static_content ({COLUMNS}) VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET key = excluded.key, title = excluded.title, \
         body = excluded.body, image_url = excluded.image_url"
    ))
    .bind(s.id)
    .bind(&s.key)
    .bind(Json(&s.title))
    .bind(Json(&s.body))
    .bind(&s.image_url)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn delete_except<'e>(ex: impl SqliteExecutor<'e>, keep: &[i64]) -> RepoResult<u64> {
    let rows =
        sqlx::query("DELETE FROM static_content WHERE id NOT IN (SELECT value FROM json_each(?))")
            .bind(id_list(keep.iter().copied()))
            .execute(ex)
            .await?;
    Ok(rows.rows_affected())
}
