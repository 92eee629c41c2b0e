//! Shared types for the bowl ordering backend
//!
//! Domain models, the typed bowl customization, the unified error system and
//! small utilities used by the server and its tests.

pub mod bowl;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
