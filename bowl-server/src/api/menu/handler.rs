//! Public read handlers

use std::collections::HashSet;

use axum::extract::State;
use serde::Serialize;
use shared::models::{Category, GalleryImage, Ingredient, MenuItem, ProductVariant, StaticContent};

use crate::core::ServerState;
use crate::db::repository::{category, gallery, ingredient, menu_item, product_variant, static_content};
use crate::utils::{AppResult, Json};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub categories: Vec<Category>,
    pub menu_items: Vec<MenuItem>,
    pub variants: Vec<ProductVariant>,
}

/// GET /api/menu - available items with their available variants
pub async fn menu(State(state): State<ServerState>) -> AppResult<Json<MenuResponse>> {
    let pool = state.pool();
    let categories = category::find_all(pool).await?;
    let menu_items = menu_item::find_available(pool).await?;

    let shown: HashSet<i64> = menu_items.iter().map(|m| m.id).collect();
    let variants = product_variant::find_all(pool)
        .await?
        .into_iter()
        .filter(|v| v.is_available && shown.contains(&v.menu_item_id))
        .collect();

    Ok(Json(MenuResponse {
        categories,
        menu_items,
        variants,
    }))
}

/// GET /api/ingredients
pub async fn ingredients(State(state): State<ServerState>) -> AppResult<Json<Vec<Ingredient>>> {
    Ok(Json(ingredient::find_available(state.pool()).await?))
}

/// GET /api/content/static
pub async fn static_content(State(state): State<ServerState>) -> AppResult<Json<Vec<StaticContent>>> {
    Ok(Json(static_content::find_all(state.pool()).await?))
}

/// GET /api/content/gallery
pub async fn gallery(State(state): State<ServerState>) -> AppResult<Json<Vec<GalleryImage>>> {
    Ok(Json(gallery::find_all(state.pool()).await?))
}
