//! Category Repository

use super::{RepoError, RepoResult, id_list};
use shared::models::{Category, CategoryCreate};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, name, icon, display_order";

pub async fn find_all<'e>(ex: impl SqliteExecutor<'e>) -> RepoResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM category ORDER BY id"
    ))
    .fetch_all(ex)
    .await?;
    Ok(categories)
}

pub async fn find_by_id<'e>(ex: impl SqliteExecutor<'e>, id: i64) -> RepoResult<Option<Category>> {
    let category =
        sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM category WHERE id = ?"))
            .bind(id)
            .fetch_optional(ex)
            .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    if data.name.is_blank() {
        return Err(RepoError::Validation("Category name must not be empty".into()));
    }
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO category (id, name, icon, display_order) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(Json(&data.name))
        .bind(&data.icon)
        .bind(data.display_order.unwrap_or(0))
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

/// Delete a category. Refused while menu items still reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::Validation(format!(
            "Cannot delete category with {count} menu items"
        )));
    }
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Insert or overwrite a row keeping its id
pub async fn upsert<'e>(ex: impl SqliteExecutor<'e>, c: &Category) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO category (id, name, icon, display_order) VALUES (?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET name = excluded.name, icon = excluded.icon, \
         display_order = excluded.display_order",
    )
    .bind(c.id)
    .bind(Json(&c.name))
    .bind(&c.icon)
    .bind(c.display_order)
    .execute(ex)
    .await?;
    Ok(())
}

/// Delete every row whose id is not in `keep`
pub async fn delete_except<'e>(ex: impl SqliteExecutor<'e>, keep: &[i64]) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM category WHERE id NOT IN (SELECT value FROM json_each(?))")
        .bind(id_list(keep.iter().copied()))
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{menu_item, test_support::test_pool};
    use shared::models::LocalizedText;

    fn payload(name: &str) -> CategoryCreate {
        CategoryCreate {
            name: LocalizedText::new(name, name),
            icon: "🥗".into(),
            display_order: Some(1),
        }
    }

    #[tokio::test]
    async fn create_and_find() {
        let pool = test_pool().await;
        let created = create(&pool, payload("Боулы")).await.unwrap();
        assert_eq!(created.name.ru, "Боулы");
        assert_eq!(created.icon, "🥗");

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let pool = test_pool().await;
        let err = create(&pool, payload(" ")).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_refused_while_items_reference_it() {
        let pool = test_pool().await;
        let cat = create(&pool, payload("Soups")).await.unwrap();
        let item = menu_item::create(&pool, menu_item::tests::payload(cat.id, "Tom Yum", 7.5))
            .await
            .unwrap();

        assert!(matches!(
            delete(&pool, cat.id).await,
            Err(RepoError::Validation(_))
        ));

        menu_item::delete(&pool, item.id).await.unwrap();
        assert!(delete(&pool, cat.id).await.unwrap());
        assert!(find_by_id(&pool, cat.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_keeps_id_and_delete_except() {
        let pool = test_pool().await;
        let a = create(&pool, payload("A")).await.unwrap();
        let b = create(&pool, payload("B")).await.unwrap();

        let mut renamed = a.clone();
        renamed.name = LocalizedText::both("A2");
        upsert(&pool, &renamed).await.unwrap();

        let restored = Category {
            id: 777,
            name: LocalizedText::both("C"),
            icon: String::new(),
            display_order: 3,
        };
        upsert(&pool, &restored).await.unwrap();

        let removed = delete_except(&pool, &[a.id, restored.id]).await.unwrap();
        assert_eq!(removed, 1);

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|c| c.id != b.id));
        assert_eq!(find_by_id(&pool, a.id).await.unwrap().unwrap().name.en, "A2");
        assert!(find_by_id(&pool, 777).await.unwrap().is_some());
    }
}
