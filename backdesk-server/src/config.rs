//! Runtime configuration loaded from the environment, with an optional
//! `.env` file for development.

use std::env;

use chrono::Duration;
use thiserror::Error;
use zeroize::Zeroizing;

/// Default token lifetime when `JWT_EXPIRY` is absent or unparsable.
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 12;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    MissingVar(&'static str),

    #[error("database configuration missing: provide DATABASE_URL or PG* variables")]
    MissingDatabase,
}

/// Server configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub http_host: String,
    pub http_port: u16,
    pub database_url: String,
    /// Symmetric token-signing secret. Wrapped so the plaintext is wiped
    /// once the codec has taken its copy.
    pub jwt_secret: Zeroizing<String>,
    pub jwt_issuer: String,
    pub jwt_expiry: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("http_host", &self.http_host)
            .field("http_port", &self.http_port)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_expiry", &self.jwt_expiry)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from the environment. A `.env` file in the working
    /// directory is applied first when present; a missing file is not an
    /// error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let http_port = first_non_empty(&["HTTP_PORT", "PORT"])
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(8080);

        let jwt_secret = non_empty_env("JWT_SECRET")
            .map(Zeroizing::new)
            .ok_or(ConfigError::MissingVar("JWT_SECRET"))?;

        Ok(Self {
            http_host: non_empty_env("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            http_port,
            database_url: resolve_database_url().ok_or(ConfigError::MissingDatabase)?,
            jwt_secret,
            jwt_issuer: non_empty_env("JWT_ISSUER").unwrap_or_else(|| "backdesk".to_string()),
            jwt_expiry: jwt_expiry_from_env(),
            cors_allowed_origins: split_csv(
                &non_empty_env("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()),
            ),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn first_non_empty(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| non_empty_env(key))
}

fn jwt_expiry_from_env() -> Duration {
    let Some(raw) = non_empty_env("JWT_EXPIRY") else {
        return Duration::hours(DEFAULT_JWT_EXPIRY_HOURS);
    };
    match humantime::parse_duration(&raw).map(Duration::from_std) {
        Ok(Ok(expiry)) => expiry,
        _ => {
            tracing::warn!(value = %raw, "unparsable JWT_EXPIRY, using default");
            Duration::hours(DEFAULT_JWT_EXPIRY_HOURS)
        }
    }
}

/// `DATABASE_URL` wins; otherwise the URL is composed from the conventional
/// `PG*` variables. Host and user are the minimum for composition.
fn resolve_database_url() -> Option<String> {
    if let Some(url) = non_empty_env("DATABASE_URL") {
        return Some(normalize_postgres_scheme(url));
    }

    let host = non_empty_env("PGHOST")?;
    let user = non_empty_env("PGUSER")?;
    let port = non_empty_env("PGPORT").unwrap_or_else(|| "5432".to_string());
    let database = non_empty_env("PGDATABASE").unwrap_or_else(|| user.clone());

    Some(compose_database_url(
        &host,
        &port,
        &user,
        non_empty_env("PGPASSWORD").as_deref(),
        &database,
    ))
}

fn compose_database_url(
    host: &str,
    port: &str,
    user: &str,
    password: Option<&str>,
    database: &str,
) -> String {
    match password {
        Some(password) => format!("postgres://{user}:{password}@{host}:{port}/{database}"),
        None => format!("postgres://{user}@{host}:{port}/{database}"),
    }
}

/// sqlx accepts both schemes, but keep a single canonical form in logs and
/// error messages.
fn normalize_postgres_scheme(url: String) -> String {
    match url.strip_prefix("postgresql://") {
        Some(rest) => format!("postgres://{rest}"),
        None => url,
    }
}

fn split_csv(value: &str) -> Vec<String> {
    let parts: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    if parts.is_empty() {
        vec!["*".to_string()]
    } else {
        parts
    }
}
