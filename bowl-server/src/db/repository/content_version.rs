//! Content version counter (singleton row)

use super::RepoResult;
use shared::models::ContentVersion;
use sqlx::SqliteExecutor;

pub async fn get<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<ContentVersion> {
    let version = sqlx::query_as::<_, ContentVersion>(
        "SELECT version, updated_at FROM content_version WHERE id = 1",
    )
    .fetch_one(ex)
    .await?;
    Ok(version)
}

/// Increment the version and return the new value
pub async fn bump<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<ContentVersion> {
    let version = sqlx::query_as::<_, ContentVersion>(
        "UPDATE content_version SET version = version + 1, updated_at = ? WHERE id = 1 \
         RETURNING version, updated_at",
    )
    .bind(shared::util::now_millis())
    .fetch_one(ex)
    .await?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    #[tokio::test]
    async fn starts_at_zero_and_bumps() {
        let pool = test_pool().await;
        assert_eq!(get(&pool).await.unwrap().version, 0);

        let bumped = bump(&pool).await.unwrap();
        assert_eq!(bumped.version, 1);
        assert!(bumped.updated_at > 0);
        assert_eq!(get(&pool).await.unwrap(), bumped);
    }
}
