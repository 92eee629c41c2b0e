//! Order API

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Public checkout
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders", post(handler::create))
}

/// Back office, behind `require_admin`
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/orders", get(handler::list))
        .route("/api/admin/orders/{id}", get(handler::get_by_id))
        .route("/api/admin/orders/{id}/status", put(handler::update_status))
}
