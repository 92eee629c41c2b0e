//! Utilities: logging, input validation, JSON bodies, error re-exports

pub mod json;
pub mod logger;
pub mod validation;

pub use json::Json;
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
