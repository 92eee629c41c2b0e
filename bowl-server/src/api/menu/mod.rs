//! Public menu and site content

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/menu", get(handler::menu))
        .route("/api/ingredients", get(handler::ingredients))
        .route("/api/content/static", get(handler::static_content))
        .route("/api/content/gallery", get(handler::gallery))
}
