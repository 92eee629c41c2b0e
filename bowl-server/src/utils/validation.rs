//! Input validation helpers
//!
//! Text length limits for hand-checked payloads. Checkout payloads use
//! `validator` derives in `shared::models::order` instead.

use crate::utils::AppError;

/// Snapshot names
pub const MAX_NAME_LEN: usize = 200;

/// Snapshot descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Admin usernames
pub const MAX_USERNAME_LEN: usize = 64;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({len} chars, max {max_len})"
            ))
            .with_detail("field", field));
        }
    }
    Ok(())
}

/// Turn `validator` errors into one validation error listing the bad fields
pub fn from_validation_errors(errors: validator::ValidationErrors) -> AppError {
    let mut fields: Vec<String> = errors
        .errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort();
    AppError::validation(format!("Invalid fields: {}", fields.join(", ")))
        .with_detail("fields", fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_long() {
        assert!(validate_required_text("Monday Menu", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());

        let long = "я".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
        // Limit counts characters, not bytes
        let exact = "я".repeat(MAX_NAME_LEN);
        assert!(validate_required_text(&exact, "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn optional_text() {
        assert!(validate_optional_text(&None, "description", MAX_NOTE_LEN).is_ok());
        let long = Some("x".repeat(MAX_NOTE_LEN + 1));
        let err = validate_optional_text(&long, "description", MAX_NOTE_LEN).unwrap_err();
        assert_eq!(err.code, crate::utils::ErrorCode::ValidationFailed);
    }
}
