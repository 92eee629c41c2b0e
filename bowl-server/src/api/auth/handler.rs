//! Login, logout and current admin

use std::time::Duration;

use axum::{
    Extension,
    extract::State,
    response::{AppendHeaders, IntoResponse},
};
use http::header::SET_COOKIE;
use serde::Deserialize;

use crate::auth::AdminIdentity;
use crate::auth::middleware::{clear_session_cookie, session_cookie};
use crate::core::ServerState;
use crate::db::repository::admin_user;
use crate::security_log;
use crate::utils::{AppError, AppResult, Json};

/// Fixed delay applied to every login attempt
const AUTH_FIXED_DELAY_MS: u64 = 300;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let username = req.username.trim().to_string();
    let user = admin_user::find_by_username(state.pool(), &username).await?;

    // Before checking the result so unknown users take as long as bad passwords
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let Some(user) = user else {
        security_log!("WARN", "login_failed", username = username.as_str(), reason = "user_not_found");
        return Err(AppError::invalid_credentials());
    };

    if !user.verify_password(&req.password)? {
        security_log!("WARN", "login_failed", username = username.as_str(), reason = "invalid_password");
        return Err(AppError::invalid_credentials());
    }

    let admin = AdminIdentity {
        id: user.id,
        username: user.username,
    };
    let token = state
        .jwt_service
        .generate_token(&admin)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    security_log!("INFO", "login_success", admin_id = admin.id, username = admin.username.as_str());

    let cookie = session_cookie(&token, state.jwt_service.ttl_minutes(), state.secure_cookies());
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(admin)))
}

/// POST /api/admin/logout
pub async fn logout(Extension(admin): Extension<AdminIdentity>) -> impl IntoResponse {
    tracing::info!(admin_id = admin.id, username = %admin.username, "Admin logged out");
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(serde_json::json!({ "success": true })),
    )
}

/// GET /api/admin/me
pub async fn me(Extension(admin): Extension<AdminIdentity>) -> Json<AdminIdentity> {
    Json(admin)
}
