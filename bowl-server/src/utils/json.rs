//! JSON extractor that reports body errors as [`AppError`]
//!
//! axum's own `Json` answers a malformed or mistyped body with 422 and a
//! plain text message. This wrapper turns the rejection into a 400
//! `ValidationFailed` so every API error carries the same JSON body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "Rejected request body");
                Err(AppError::validation(rejection.body_text()))
            }
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Parse an optional JSON body: empty or whitespace means `T::default()`
///
/// Clients that set `Content-Type: application/json` on every call send an
/// empty body when there is nothing to say.
pub fn optional_body<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes)
        .map_err(|e| AppError::validation(format!("Failed to parse the request body as JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;
    use shared::error::ErrorCode;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Payload {
        expected_version: Option<i64>,
    }

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn wrong_shape_is_validation_error() {
        let err = Json::<Payload>::from_request(request(r#"{"expectedVersion":"x"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("expectedVersion"));
        assert_eq!(err.into_response().status(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_is_validation_error() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("{}"))
            .unwrap();
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn well_formed_body_extracts() {
        let Json(body) = Json::<Payload>::from_request(request(r#"{"expectedVersion":3}"#), &())
            .await
            .unwrap();
        assert_eq!(body.expected_version, Some(3));
    }

    #[test]
    fn optional_body_defaults_when_empty() {
        assert_eq!(optional_body::<Payload>(b"").unwrap(), Payload::default());
        assert_eq!(optional_body::<Payload>(b" \n").unwrap(), Payload::default());
        assert_eq!(
            optional_body::<Payload>(br#"{"expectedVersion":2}"#).unwrap().expected_version,
            Some(2)
        );
        let err = optional_body::<Payload>(b"{").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
