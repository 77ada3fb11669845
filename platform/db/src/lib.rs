//! Database primitives shared by the HR service surfaces.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing (set {0})")]
    MissingUrl(String),
    #[error("failed to connect to database: {0}")]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_url_key")]
    env_key: String,
    #[serde(default)]
    url: Option<String>,
    /// Left to the driver default when unset (sqlite memory needs one).
    #[serde(default)]
    pub max_connections: Option<u32>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub sql_logging: bool,
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            env_key: default_url_key(),
            url: None,
            max_connections: None,
            connect_timeout_secs: default_connect_timeout(),
            sql_logging: false,
        }
    }
}

impl DatabaseSettings {
    /// Settings with an explicit url, bypassing the environment.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(max) = env_parse::<u32>("DATABASE_MAX_CONNECTIONS") {
            settings.max_connections = Some(max.max(1));
        }
        if let Some(secs) = env_parse::<u64>("DATABASE_CONNECT_TIMEOUT_SECS") {
            settings.connect_timeout_secs = secs;
        }
        settings.sql_logging = std::env::var("DATABASE_SQL_LOGGING")
            .ok()
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        settings
    }

    pub fn database_url(&self) -> DbResult<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }

    fn connect_options(&self) -> DbResult<ConnectOptions> {
        let mut options = ConnectOptions::new(self.database_url()?);
        if let Some(max) = self.max_connections {
            options.max_connections(max);
        }
        options
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(self.sql_logging);
        Ok(options)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.trim().parse().ok())
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let options = settings.connect_options()?;
    let pool = Database::connect(options).await?;
    info!(backend = ?pool.get_database_backend(), "database connected");
    Ok(pool)
}

/// True when the error comes from a violated unique constraint.
pub fn is_unique_violation(err: &DbErr) -> bool {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return true;
    }
    // Some drivers only surface the constraint in the message text.
    let message = err.to_string();
    message.contains("UNIQUE constraint failed") || message.contains("duplicate key value")
}
