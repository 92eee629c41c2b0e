//! Admin User Repository

use super::{RepoError, RepoResult};
use crate::auth::password;
use sqlx::SqlitePool;

/// Admin account row. The hash never leaves the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub hash_pass: String,
    pub created_at: i64,
}

impl AdminUser {
    pub fn verify_password(&self, password: &str) -> RepoResult<bool> {
        password::verify_password(password, &self.hash_pass)
            .map_err(|e| RepoError::Database(format!("Stored password hash is invalid: {e}")))
    }
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<AdminUser>> {
    let user = sqlx::query_as::<_, AdminUser>(
        "SELECT id, username, hash_pass, created_at FROM admin_user WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn create(pool: &SqlitePool, username: &str, password: &str) -> RepoResult<AdminUser> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(RepoError::Validation(
            "Username and password must not be empty".into(),
        ));
    }
    let hash_pass = password::hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

    let user = AdminUser {
        id: shared::util::snowflake_id(),
        username: username.to_string(),
        hash_pass,
        created_at: shared::util::now_millis(),
    };
    sqlx::query("INSERT INTO admin_user (id, username, hash_pass, created_at) VALUES (?, ?, ?, ?)")
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.hash_pass)
        .bind(user.created_at)
        .execute(pool)
        .await?;
    Ok(user)
}

/// Create the configured admin on first start. Existing accounts are left alone.
pub async fn ensure_bootstrap(pool: &SqlitePool, username: &str, password: &str) -> RepoResult<bool> {
    if find_by_username(pool, username.trim()).await?.is_some() {
        return Ok(false);
    }
    create(pool, username, password).await?;
    tracing::info!(username = %username.trim(), "Bootstrap admin account created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    #[tokio::test]
    async fn create_and_verify() {
        let pool = test_pool().await;
        let user = create(&pool, "admin", "hunter22").await.unwrap();
        assert_ne!(user.hash_pass, "hunter22");

        let loaded = find_by_username(&pool, "admin").await.unwrap().unwrap();
        assert_eq!(loaded.id, user.id);
        assert!(loaded.verify_password("hunter22").unwrap());
        assert!(!loaded.verify_password("hunter23").unwrap());
    }

    #[tokio::test]
    async fn duplicate_username() {
        let pool = test_pool().await;
        create(&pool, "admin", "a").await.unwrap();
        assert!(matches!(
            create(&pool, "admin", "b").await,
            Err(RepoError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let pool = test_pool().await;
        assert!(ensure_bootstrap(&pool, "admin", "first").await.unwrap());
        assert!(!ensure_bootstrap(&pool, "admin", "second").await.unwrap());

        let user = find_by_username(&pool, "admin").await.unwrap().unwrap();
        assert!(user.verify_password("first").unwrap());
    }
}
