//! Admin session routes

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Public: login only
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/login", post(handler::login))
}

/// Behind `require_admin`
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/logout", post(handler::logout))
        .route("/api/admin/me", get(handler::me))
}
