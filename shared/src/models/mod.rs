//! Data models
//!
//! Shared between bowl-server and the web frontend (via API, camelCase JSON).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake for snapshots/orders).

pub mod category;
pub mod content;
pub mod gallery;
pub mod ingredient;
pub mod localized;
pub mod menu_item;
pub mod order;
pub mod product_variant;
pub mod snapshot;
pub mod static_content;

// Re-exports
pub use category::*;
pub use content::*;
pub use gallery::*;
pub use ingredient::*;
pub use localized::*;
pub use menu_item::*;
pub use order::*;
pub use product_variant::*;
pub use snapshot::*;
pub use static_content::*;
