//! Order API Handlers

use axum::extract::{Path, State};
use http::StatusCode;
use shared::models::{Order, OrderCreate, OrderDetail, OrderStatusUpdate};

use crate::core::ServerState;
use crate::db::repository::order::{self, RECENT_LIMIT};
use crate::orders::service;
use crate::utils::{AppResult, Json};

/// POST /api/orders - 201 once stored, whatever the notifier does
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderDetail>)> {
    let detail = service::create_order(state.pool(), state.notifier.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/admin/orders - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(order::find_recent(state.pool(), RECENT_LIMIT).await?))
}

/// GET /api/admin/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    Ok(Json(service::find_detail(state.pool(), id).await?))
}

/// PUT /api/admin/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    Ok(Json(service::update_status(state.pool(), id, &payload.status).await?))
}
