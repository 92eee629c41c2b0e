//! Custom bowl price quote
//!
//! unit price = base (menu item, by size) + protein (by size) + every extra.
//! The other steps are free.

use rust_decimal::Decimal;
use shared::bowl::{BowlQuote, BowlQuoteRequest, BowlSlot, ItemCustomization, QuoteLine};
use shared::models::{Ingredient, ItemSize, MenuItem};
use sqlx::SqlitePool;

use crate::db::repository::{ingredient, menu_item};
use crate::orders::money;
use crate::orders::service::check_bowl;
use crate::utils::{AppError, AppResult, ErrorCode};

pub async fn quote(pool: &SqlitePool, request: BowlQuoteRequest) -> AppResult<BowlQuote> {
    let ItemCustomization::Bowl(selection) = &request.customization else {
        return Err(AppError::with_message(
            ErrorCode::InvalidCustomization,
            "Quotes are only available for custom bowls",
        ));
    };

    let item = menu_item::find_by_id(pool, request.menu_item_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("Menu item {} not found", request.menu_item_id),
            )
        })?;
    if !item.is_custom_bowl {
        return Err(AppError::with_message(
            ErrorCode::InvalidCustomization,
            format!("Menu item {} is not a custom bowl", item.id),
        ));
    }

    check_bowl(pool, selection).await?;

    let size = request.size.unwrap_or(ItemSize::Standard);
    let mut breakdown = vec![QuoteLine {
        slot: "base".into(),
        ref_id: item.id,
        name: item.name.clone(),
        price: base_price(&item, size),
    }];

    for (slot, id) in selection.slots() {
        if !matches!(slot, BowlSlot::Protein | BowlSlot::Extra) {
            continue;
        }
        // existence was checked above
        let Some(ing) = ingredient::find_by_id(pool, id).await? else {
            continue;
        };
        breakdown.push(QuoteLine {
            slot: slot.as_str().into(),
            ref_id: ing.id,
            price: ingredient_price(&ing, slot, size),
            name: ing.name,
        });
    }

    let total: Decimal = breakdown.iter().map(|l| money::to_decimal(l.price)).sum();
    Ok(BowlQuote {
        unit_price: money::to_f64(total),
        breakdown,
    })
}

fn base_price(item: &MenuItem, size: ItemSize) -> f64 {
    match (size, item.price_small) {
        (ItemSize::Small, Some(small)) => small,
        _ => item.price,
    }
}

/// Protein is priced by size, extras are flat. Missing prices count as free.
fn ingredient_price(ing: &Ingredient, slot: BowlSlot, size: ItemSize) -> f64 {
    let price = match (slot, size) {
        (BowlSlot::Protein, ItemSize::Small) => ing.price_small.or(ing.price),
        (BowlSlot::Protein, ItemSize::Standard) => ing.price_standard.or(ing.price),
        _ => ing.price,
    };
    price.unwrap_or(0.0)
}
