//! Bowl Server - poke bowl restaurant backend
//!
//! Public menu and checkout, plus an admin back office that captures the
//! live menu into snapshots and publishes a snapshot back atomically.
//!
//! ```text
//! bowl-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # admin sessions (JWT cookie, argon2)
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── snapshots/     # capture, validate, publish, archive
//! ├── orders/        # checkout, notifier, money
//! ├── pricing/       # custom bowl quote
//! └── utils/         # logging, validation, errors
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod snapshots;
pub mod utils;

pub use auth::{AdminIdentity, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{cleanup_old_logs, init_logger};

/// Security event on the `security` target, routed to its own log files
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
