//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::MenuItemNotFound
            | Self::IngredientNotFound
            | Self::VariantNotFound
            | Self::SnapshotNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::ContentVersionConflict => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ArchiveError
            | Self::SnapshotChecksumMismatch => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/integrity errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
