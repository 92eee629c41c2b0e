//! Order ingestion
//!
//! Validate at the boundary, store the order with its lines in one
//! transaction, then notify. Notification never fails the request.

use shared::bowl::{BowlSelection, ItemCustomization};
use shared::models::{Order, OrderCreate, OrderDetail, OrderItem, OrderItemCreate, OrderStatus};
use sqlx::SqlitePool;
use validator::Validate;

use super::money::{self, money_eq};
use super::notifier::OrderNotifier;
use crate::db::repository::{RepoError, ingredient, menu_item, order, product_variant};
use crate::utils::validation::from_validation_errors;
use crate::utils::{AppError, AppResult, ErrorCode};

pub async fn create_order(
    pool: &SqlitePool,
    notifier: &dyn OrderNotifier,
    payload: OrderCreate,
) -> AppResult<OrderDetail> {
    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    payload.validate().map_err(from_validation_errors)?;

    let expected = money::line_total(payload.items.iter().map(|i| (i.price, i.quantity)));
    let total = money::to_decimal(payload.total);
    if !money_eq(expected, total) {
        return Err(AppError::with_message(
            ErrorCode::OrderTotalMismatch,
            format!("Order total {total} does not match items sum {expected}"),
        )
        .with_detail("total", payload.total)
        .with_detail("itemsTotal", money::to_f64(expected)));
    }

    for item in &payload.items {
        check_item(pool, item).await?;
    }

    let now = shared::util::now_millis();
    let order_id = shared::util::snowflake_id();
    let new_order = Order {
        id: order_id,
        customer_name: payload.customer_name.trim().to_string(),
        customer_phone: payload.customer_phone.trim().to_string(),
        customer_email: payload.customer_email.filter(|e| !e.trim().is_empty()),
        service_type: payload.service_type,
        table_number: payload.table_number.filter(|t| !t.trim().is_empty()),
        comment: payload.comment.filter(|c| !c.trim().is_empty()),
        total: money::to_f64(total),
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    };
    let items: Vec<OrderItem> = payload
        .items
        .into_iter()
        .map(|i| OrderItem {
            id: shared::util::snowflake_id(),
            order_id,
            menu_item_id: i.menu_item_id,
            name: i.name.trim().to_string(),
            customization: i.customization,
            size: i.size,
            quantity: i.quantity,
            price: money::to_f64(money::to_decimal(i.price)),
        })
        .collect();

    order::create(pool, &new_order, &items).await?;

    tracing::info!(
        order_id,
        items = items.len(),
        total = new_order.total,
        service_type = ?new_order.service_type,
        "Order created"
    );

    let detail = OrderDetail {
        order: new_order,
        items,
    };
    if let Err(e) = notifier.notify(&detail).await {
        tracing::warn!(order_id, error = %e, "Order notification failed");
    }

    Ok(detail)
}

/// Check every id an order line refers to against the live tables
async fn check_item(pool: &SqlitePool, item: &OrderItemCreate) -> AppResult<()> {
    let menu = match item.menu_item_id {
        Some(id) => Some(menu_item::find_by_id(pool, id).await?.ok_or_else(|| {
            AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
                .with_detail("menuItemId", id)
        })?),
        None => None,
    };

    match &item.customization {
        None => Ok(()),
        Some(ItemCustomization::Bowl(selection)) => {
            if let Some(m) = &menu
                && !m.is_custom_bowl
            {
                return Err(invalid_customization(format!(
                    "Menu item {} is not a custom bowl",
                    m.id
                )));
            }
            check_bowl(pool, selection).await
        }
        Some(ItemCustomization::Variant { variant_id }) => {
            let Some(m) = &menu else {
                return Err(invalid_customization(
                    "Variant selection requires a menu item".to_string(),
                ));
            };
            match product_variant::find_by_id(pool, *variant_id).await? {
                Some(v) if v.menu_item_id == m.id => Ok(()),
                _ => Err(AppError::with_message(
                    ErrorCode::VariantNotFound,
                    format!("Variant {variant_id} not found for menu item {}", m.id),
                )
                .with_detail("variantId", *variant_id)),
            }
        }
    }
}

/// Shape limits, then every ingredient must exist, be available and fit its step
pub(crate) async fn check_bowl(pool: &SqlitePool, selection: &BowlSelection) -> AppResult<()> {
    selection
        .validate_shape()
        .map_err(|e| invalid_customization(e.to_string()))?;

    for (slot, id) in selection.slots() {
        let ing = ingredient::find_by_id(pool, id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::IngredientNotFound,
                format!("Ingredient {id} not found"),
            )
            .with_detail("ingredientId", id)
        })?;
        if !ing.is_available {
            return Err(AppError::with_message(
                ErrorCode::IngredientUnavailable,
                format!("Ingredient {id} is not available"),
            )
            .with_detail("ingredientId", id));
        }
        if !slot.accepts(ing.kind) {
            return Err(invalid_customization(format!(
                "Ingredient {id} ({}) cannot be used as {}",
                ing.kind,
                slot.as_str()
            ))
            .with_detail("ingredientId", id));
        }
    }
    Ok(())
}

fn invalid_customization(message: String) -> AppError {
    AppError::with_message(ErrorCode::InvalidCustomization, message)
}

/// Back office status change
pub async fn update_status(pool: &SqlitePool, id: i64, status: &str) -> AppResult<Order> {
    let status: OrderStatus = status.parse().map_err(|e: String| {
        AppError::with_message(ErrorCode::InvalidOrderStatus, e).with_detail("status", status)
    })?;
    let updated = order::update_status(pool, id, status).await.map_err(|e| match e {
        RepoError::NotFound(msg) => {
            AppError::with_message(ErrorCode::OrderNotFound, msg)
        }
        other => other.into(),
    })?;
    tracing::info!(order_id = id, status = status.as_str(), "Order status updated");
    Ok(updated)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> AppResult<OrderDetail> {
    order::find_detail(pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })
}
