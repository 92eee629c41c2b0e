//! Snapshot API
//!
//! | Path | Method |
//! |------|--------|
//! | /api/admin/snapshots | GET, POST |
//! | /api/admin/snapshots/{id} | GET, DELETE |
//! | /api/admin/snapshots/{id}/restore | POST |
//! | /api/admin/snapshots/{id}/download | GET |
//! | /api/admin/content/version | GET |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/admin/snapshots", routes())
        .route("/api/admin/content/version", get(handler::content_version))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/restore", post(handler::restore))
        .route("/{id}/download", get(handler::download))
}
