use std::str::FromStr;

use newsroom_core::guard::DEFAULT_LOGIN_URL;
use newsroom_core::policy::{ContentPolicy, DEFAULT_NEWS_COUNT_ON_HOME_PAGE};

use crate::auth::jwt::JwtConfig;

/// Which [`newsroom_db::Store`] implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown store '{other}' (expected postgres or memory)")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Storage backend (default: `postgres`).
    pub store: StoreKind,
    /// Required when `store` is [`StoreKind::Postgres`].
    pub database_url: Option<String>,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Where anonymous visitors of protected pages are sent.
    pub login_url: String,
    /// Denylist, page size and field limits.
    pub policy: ContentPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `HOST`                    | `0.0.0.0`                   |
    /// | `PORT`                    | `3000`                      |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                        |
    /// | `STORE`                   | `postgres`                  |
    /// | `DATABASE_URL`            | -- (required for postgres)  |
    /// | `LOGIN_URL`               | `/login`                    |
    /// | `NEWS_COUNT_ON_HOME_PAGE` | `10`                        |
    /// | `FORBIDDEN_WORDS`         | `редиска,негодяй`           |
    /// | `FORBIDDEN_WORDS_WARNING` | `Не ругайтесь!`             |
    ///
    /// See [`JwtConfig::from_env`] for the token settings.
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store: StoreKind = std::env::var("STORE")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .unwrap_or_else(|e| panic!("Invalid STORE: {e}"));

        let database_url = std::env::var("DATABASE_URL").ok();
        if store == StoreKind::Postgres {
            assert!(
                database_url.is_some(),
                "DATABASE_URL must be set when STORE=postgres"
            );
        }

        let login_url = std::env::var("LOGIN_URL").unwrap_or_else(|_| DEFAULT_LOGIN_URL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            database_url,
            jwt: JwtConfig::from_env(),
            login_url,
            policy: policy_from_env(),
        }
    }
}

/// Build the [`ContentPolicy`], overriding defaults from the environment.
fn policy_from_env() -> ContentPolicy {
    let mut policy = ContentPolicy::default();

    let news_count: usize = std::env::var("NEWS_COUNT_ON_HOME_PAGE")
        .unwrap_or_else(|_| DEFAULT_NEWS_COUNT_ON_HOME_PAGE.to_string())
        .parse()
        .expect("NEWS_COUNT_ON_HOME_PAGE must be a valid usize");
    policy = policy.with_news_count_on_home_page(news_count);

    if let Ok(words) = std::env::var("FORBIDDEN_WORDS") {
        policy = policy.with_forbidden_words(split_list(&words));
    }
    if let Ok(warning) = std::env::var("FORBIDDEN_WORDS_WARNING") {
        policy.forbidden_words_warning = warning;
    }

    policy
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
