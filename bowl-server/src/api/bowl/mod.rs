//! Custom bowl price quote

use axum::{Router, extract::State, routing::post};
use shared::bowl::{BowlQuote, BowlQuoteRequest};

use crate::core::ServerState;
use crate::pricing;
use crate::utils::{AppResult, Json};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/bowl/quote", post(quote))
}

/// POST /api/bowl/quote
async fn quote(
    State(state): State<ServerState>,
    Json(request): Json<BowlQuoteRequest>,
) -> AppResult<Json<BowlQuote>> {
    Ok(Json(pricing::quote(state.pool(), request).await?))
}
