//! Order Repository
//!
//! Orders and their lines are written together and never touched by publish.

use super::{RepoError, RepoResult};
use shared::bowl::ItemCustomization;
use shared::models::{ItemSize, Order, OrderDetail, OrderItem, OrderStatus};
use sqlx::SqlitePool;
use sqlx::types::Json;

const ORDER_COLUMNS: &str = "id, customer_name, customer_phone, customer_email, service_type, \
    table_number, comment, total, status, created_at, updated_at";

/// Newest orders shown in the back office
pub const RECENT_LIMIT: i64 = 100;

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    menu_item_id: Option<i64>,
    name: String,
    customization: Option<String>,
    size: Option<ItemSize>,
    quantity: i32,
    price: f64,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepoError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let customization = row
            .customization
            .as_deref()
            .map(serde_json::from_str::<ItemCustomization>)
            .transpose()?;
        Ok(OrderItem {
            id: row.id,
            order_id: row.order_id,
            menu_item_id: row.menu_item_id,
            name: row.name,
            customization,
            size: row.size,
            quantity: row.quantity,
            price: row.price,
        })
    }
}

/// Insert an order and all of its lines in one transaction
pub async fn create(pool: &SqlitePool, order: &Order, items: &[OrderItem]) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(&format!(
        "INSERT INTO orders ({ORDER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(order.id)
    .bind(&order.customer_name)
    .bind(&order.customer_phone)
    .bind(&order.customer_email)
    .bind(order.service_type)
    .bind(&order.table_number)
    .bind(&order.comment)
    .bind(order.total)
    .bind(order.status)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut *tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO order_item (id, order_id, menu_item_id, name, customization, size, quantity, price) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.id)
        .bind(item.order_id)
        .bind(item.menu_item_id)
        .bind(&item.name)
        .bind(item.customization.as_ref().map(Json))
        .bind(item.size)
        .bind(item.quantity)
        .bind(item.price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(order)
}

pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItemRow>(
        "SELECT id, order_id, menu_item_id, name, customization, size, quantity, price \
         FROM order_item WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(OrderItem::try_from).collect()
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let items = find_items(pool, id).await?;
    Ok(Some(OrderDetail { order, items }))
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use shared::bowl::BowlSelection;
    use shared::models::ServiceType;

    fn order(id: i64, created_at: i64) -> Order {
        Order {
            id,
            customer_name: "Anna".into(),
            customer_phone: "+79990001122".into(),
            customer_email: None,
            service_type: ServiceType::Pickup,
            table_number: None,
            comment: Some("no onions".into()),
            total: 12.5,
            status: OrderStatus::Pending,
            created_at,
            updated_at: created_at,
        }
    }

    fn line(id: i64, order_id: i64) -> OrderItem {
        OrderItem {
            id,
            order_id,
            menu_item_id: None,
            name: "Custom bowl".into(),
            customization: Some(ItemCustomization::Bowl(BowlSelection {
                protein: 1,
                base: 2,
                marinade: None,
                fresh: vec![3],
                sauce: vec![],
                topping: vec![],
                extras: vec![4],
            })),
            size: Some(ItemSize::Small),
            quantity: 1,
            price: 12.5,
        }
    }

    #[tokio::test]
    async fn create_and_load_detail() {
        let pool = test_pool().await;
        create(&pool, &order(1, 100), &[line(10, 1), line(11, 1)])
            .await
            .unwrap();

        let detail = find_detail(&pool, 1).await.unwrap().unwrap();
        assert_eq!(detail.order, order(1, 100));
        assert_eq!(detail.items, vec![line(10, 1), line(11, 1)]);
        assert!(find_detail(&pool, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_line_rolls_back_order() {
        let pool = test_pool().await;
        let mut bad = line(11, 1);
        bad.quantity = 0;

        assert!(create(&pool, &order(1, 100), &[line(10, 1), bad]).await.is_err());
        assert!(find_by_id(&pool, 1).await.unwrap().is_none());
        assert!(find_items(&pool, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_is_newest_first() {
        let pool = test_pool().await;
        create(&pool, &order(1, 100), &[line(10, 1)]).await.unwrap();
        create(&pool, &order(2, 200), &[line(20, 2)]).await.unwrap();

        let ids: Vec<_> = find_recent(&pool, RECENT_LIMIT)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn status_update() {
        let pool = test_pool().await;
        create(&pool, &order(1, 100), &[line(10, 1)]).await.unwrap();

        let updated = update_status(&pool, 1, OrderStatus::Ready).await.unwrap();
        assert_eq!(updated.status, OrderStatus::Ready);
        assert!(updated.updated_at >= 100);

        assert!(matches!(
            update_status(&pool, 99, OrderStatus::Ready).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
