//! Server configuration

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./work_dir | database, logs, media root |
/// | DATABASE_PATH | `<WORK_DIR>/bowl.db` | SQLite file |
/// | HTTP_PORT | 3000 | listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | tracing filter when `RUST_LOG` is unset |
/// | LOG_JSON | false | JSON console output |
/// | JWT_SECRET | dev fallback | admin session signing key |
/// | SESSION_TTL_MINUTES | 720 | admin session lifetime |
/// | ADMIN_USERNAME / ADMIN_PASSWORD | unset | bootstrap admin account |
/// | TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID | unset | order notifications |
/// | IMAGES_DIR / MEDIA_DIR | `<WORK_DIR>/images`, `<WORK_DIR>/media` | bundled into snapshot downloads |
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: PathBuf,
    pub database_path: PathBuf,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub jwt_secret: String,
    pub session_ttl_minutes: i64,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub images_dir: PathBuf,
    pub media_dir: PathBuf,
}

/// Minimum session secret length outside development
const MIN_JWT_SECRET_LEN: usize = 32;

impl Config {
    /// Require a secret env var: must be set and long enough in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                tracing::warn!("{name} not set, using development fallback");
                format!("dev-{name}-not-for-production-use-only")
            }
        };
        if val.len() < MIN_JWT_SECRET_LEN && environment != "development" {
            return Err(format!(
                "{name} must be at least {MIN_JWT_SECRET_LEN} characters in {environment} environment"
            )
            .into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let work_dir = PathBuf::from(std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()));

        Ok(Self {
            database_path: env_path("DATABASE_PATH").unwrap_or_else(|| work_dir.join("bowl.db")),
            http_port: env_parse("HTTP_PORT", 3000)?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON", false)?,
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            session_ttl_minutes: env_parse("SESSION_TTL_MINUTES", 720)?,
            admin_username: env_opt("ADMIN_USERNAME"),
            admin_password: env_opt("ADMIN_PASSWORD"),
            telegram_bot_token: env_opt("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: env_opt("TELEGRAM_CHAT_ID"),
            images_dir: env_path("IMAGES_DIR").unwrap_or_else(|| work_dir.join("images")),
            media_dir: env_path("MEDIA_DIR").unwrap_or_else(|| work_dir.join("media")),
            environment,
            work_dir,
        })
    }

    /// Config rooted at `work_dir` with development defaults, for tests
    pub fn for_work_dir(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            database_path: work_dir.join("bowl.db"),
            http_port: 0,
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            jwt_secret: "test-secret-key-that-is-long-enough-0123".into(),
            session_ttl_minutes: 60,
            admin_username: None,
            admin_password: None,
            telegram_bot_token: None,
            telegram_chat_id: None,
            images_dir: work_dir.join("images"),
            media_dir: work_dir.join("media"),
            work_dir,
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.work_dir.join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_path(name: &str) -> Option<PathBuf> {
    env_opt(name).map(PathBuf::from)
}

/// Typed env var: unset means `default`, a value that does not parse is fatal
fn env_parse<T>(name: &str, default: T) -> Result<T, BoxError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_or(name, env_opt(name), default)
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> Result<T, BoxError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{name}={raw:?} is invalid: {e}").into()),
    }
}
