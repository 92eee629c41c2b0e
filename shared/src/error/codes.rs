//! Unified error codes for the bowl ordering backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 6xxx: Menu / content errors
//! - 7xxx: Snapshot errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the admin UI and the
/// public site can switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Order total does not match its line items
    OrderTotalMismatch = 4003,
    /// Item customization is malformed or references unknown options
    InvalidCustomization = 4004,
    /// Unknown order status
    InvalidOrderStatus = 4005,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Ingredient not found
    IngredientNotFound = 6003,
    /// Ingredient is currently unavailable
    IngredientUnavailable = 6004,
    /// Product variant not found
    VariantNotFound = 6005,

    // ==================== 7xxx: Snapshot ====================
    /// Snapshot not found
    SnapshotNotFound = 7001,
    /// Snapshot holds no categories
    SnapshotEmptyCategories = 7002,
    /// Snapshot row references a parent the snapshot does not contain
    SnapshotDanglingReference = 7003,
    /// Live content changed since the caller last read its version
    ContentVersionConflict = 7004,
    /// Restored content does not match the snapshot checksum
    SnapshotChecksumMismatch = 7005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Archive could not be built
    ArchiveError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Session has expired",
            ErrorCode::TokenInvalid => "Session token is invalid",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderTotalMismatch => "Order total does not match its items",
            ErrorCode::InvalidCustomization => "Invalid item customization",
            ErrorCode::InvalidOrderStatus => "Invalid order status",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::IngredientNotFound => "Ingredient not found",
            ErrorCode::IngredientUnavailable => "Ingredient is unavailable",
            ErrorCode::VariantNotFound => "Product variant not found",

            // Snapshot
            ErrorCode::SnapshotNotFound => "Snapshot not found",
            ErrorCode::SnapshotEmptyCategories => "Snapshot contains no categories",
            ErrorCode::SnapshotDanglingReference => "Snapshot contains a dangling reference",
            ErrorCode::ContentVersionConflict => "Content was changed by another publish",
            ErrorCode::SnapshotChecksumMismatch => "Restored content does not match snapshot",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ArchiveError => "Failed to build archive",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::OrderTotalMismatch),
            4004 => Ok(ErrorCode::InvalidCustomization),
            4005 => Ok(ErrorCode::InvalidOrderStatus),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6003 => Ok(ErrorCode::IngredientNotFound),
            6004 => Ok(ErrorCode::IngredientUnavailable),
            6005 => Ok(ErrorCode::VariantNotFound),

            // Snapshot
            7001 => Ok(ErrorCode::SnapshotNotFound),
            7002 => Ok(ErrorCode::SnapshotEmptyCategories),
            7003 => Ok(ErrorCode::SnapshotDanglingReference),
            7004 => Ok(ErrorCode::ContentVersionConflict),
            7005 => Ok(ErrorCode::SnapshotChecksumMismatch),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ArchiveError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::MenuItemNotFound.code(), 6001);
        assert_eq!(ErrorCode::SnapshotNotFound.code(), 7001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_u16() {
        assert_eq!(ErrorCode::try_from(2), Ok(ErrorCode::ValidationFailed));
        assert_eq!(ErrorCode::try_from(7002), Ok(ErrorCode::SnapshotEmptyCategories));
        assert_eq!(ErrorCode::try_from(9005), Ok(ErrorCode::ArchiveError));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(9003), Err(InvalidErrorCode(9003)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "3");

        let json = serde_json::to_string(&ErrorCode::SnapshotDanglingReference).unwrap();
        assert_eq!(json, "7003");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("4003").unwrap();
        assert_eq!(code, ErrorCode::OrderTotalMismatch);

        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::ValidationFailed), "2");
        assert_eq!(format!("{}", ErrorCode::ContentVersionConflict), "7004");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(
            ErrorCode::SnapshotEmptyCategories.message(),
            "Snapshot contains no categories"
        );
    }
}
