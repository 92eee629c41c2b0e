//! API routes
//!
//! - [`health`] - liveness
//! - [`auth`] - admin login, logout, session info
//! - [`menu`] - public menu and site content
//! - [`orders`] - checkout and back office order views
//! - [`bowl`] - custom bowl price quote
//! - [`snapshots`] - content snapshots and the live content version

pub mod auth;
pub mod bowl;
pub mod health;
pub mod menu;
pub mod orders;
pub mod snapshots;

use axum::{Router, middleware};

use crate::auth::require_admin;
use crate::core::ServerState;

/// All routes; everything under `/api/admin` except login sits behind [`require_admin`]
pub fn router(state: ServerState) -> Router<ServerState> {
    let admin_routes = Router::new()
        .merge(auth::admin_router())
        .merge(snapshots::router())
        .merge(orders::admin_router())
        .layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(bowl::router())
        .merge(admin_routes)
}
