//! Admin authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{AdminIdentity, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Session cookie name
pub const SESSION_COOKIE: &str = "admin_session";

/// Require an authenticated admin.
///
/// Reads the `admin_session` cookie (falls back to `Authorization: Bearer`),
/// validates it and inserts [`AdminIdentity`] into the request extensions.
/// Any failure is a 401 with an `{error}` body.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let token = session_token(req.headers()).map(str::to_owned);

    let Some(token) = token else {
        security_log!("WARN", "admin_auth_missing", uri = req.uri().to_string());
        return Err(AppError::not_authenticated());
    };

    match state
        .jwt_service
        .validate_token(&token)
        .and_then(AdminIdentity::try_from)
    {
        Ok(admin) => {
            req.extensions_mut().insert(admin);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "admin_auth_failed",
                error = e.to_string(),
                uri = req.uri().to_string()
            );
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid session")),
            }
        }
    }
}

/// Session token from the cookie header, else from a bearer header
pub fn session_token(headers: &http::HeaderMap) -> Option<&str> {
    let from_cookie = headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|v| !v.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(JwtService::extract_from_header)
    })
}

/// `Set-Cookie` value carrying a fresh session
pub fn session_cookie(token: &str, ttl_minutes: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        ttl_minutes * 60
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that clears the session
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, HeaderValue, header};

    #[test]
    fn token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=abc.def; lang=ru"),
        );
        assert_eq!(session_token(&headers), Some("abc.def"));
    }

    #[test]
    fn token_from_bearer_when_no_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(session_token(&headers), Some("xyz"));
    }

    #[test]
    fn empty_cookie_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("admin_session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn cookie_attributes() {
        let c = session_cookie("t", 10, true);
        assert!(c.starts_with("admin_session=t;"));
        assert!(c.contains("HttpOnly"));
        assert!(c.contains("Max-Age=600"));
        assert!(c.ends_with("; Secure"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
