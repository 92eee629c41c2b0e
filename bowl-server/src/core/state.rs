use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::admin_user;
use crate::orders::{NoopNotifier, OrderNotifier, TelegramNotifier};

/// Server state - shared handles for every request
///
/// Cloning is cheap: the pool and services are reference counted.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | pool | SqlitePool | live content, snapshots, orders |
/// | jwt_service | Arc<JwtService> | admin session tokens |
/// | notifier | Arc<dyn OrderNotifier> | new order notifications |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub notifier: Arc<dyn OrderNotifier>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    pub fn new(
        config: Config,
        pool: SqlitePool,
        jwt_service: Arc<JwtService>,
        notifier: Arc<dyn OrderNotifier>,
    ) -> Self {
        Self {
            config,
            pool,
            jwt_service,
            notifier,
        }
    }

    /// Initialize server state
    ///
    /// 1. Work directory structure
    /// 2. Database (migrations applied)
    /// 3. Bootstrap admin when `ADMIN_USERNAME` / `ADMIN_PASSWORD` are set
    /// 4. Session and notification services
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        for dir in [&config.work_dir, &config.images_dir, &config.media_dir] {
            std::fs::create_dir_all(dir)?;
        }

        let db = DbService::new(&config.database_path).await?;

        if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
            if admin_user::ensure_bootstrap(&db.pool, username, password).await? {
                tracing::info!(username = %username, "Bootstrap admin created");
            }
        } else {
            tracing::debug!("ADMIN_USERNAME / ADMIN_PASSWORD not set, skipping admin bootstrap");
        }

        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.session_ttl_minutes));
        let notifier = Self::build_notifier(config)?;

        Ok(Self::new(config.clone(), db.pool, jwt_service, notifier))
    }

    /// Telegram when both token and chat are configured, otherwise no-op
    fn build_notifier(config: &Config) -> anyhow::Result<Arc<dyn OrderNotifier>> {
        match (&config.telegram_bot_token, &config.telegram_chat_id) {
            (Some(token), Some(chat)) => {
                tracing::info!(chat_id = %chat, "Order notifications via Telegram");
                Ok(Arc::new(TelegramNotifier::new(token.clone(), chat.clone())?))
            }
            _ => {
                tracing::warn!("Telegram not configured, order notifications disabled");
                Ok(Arc::new(NoopNotifier))
            }
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Whether session cookies get the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        !self.config.is_development()
    }
}
