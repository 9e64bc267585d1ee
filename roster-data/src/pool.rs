//! SQLite pool configuration and connection.

use std::str::FromStr;
use std::time::Duration;

use roster_core::config::{ConfigError, ConfigProperties, RosterConfig};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::DataError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://roster.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// `database.*` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Whether the URL names an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl ConfigProperties for DatabaseConfig {
    fn prefix() -> &'static str {
        "database"
    }

    fn from_config(config: &RosterConfig) -> Result<Self, ConfigError> {
        let url: String = config.get_or(&Self::key("url"), DEFAULT_DATABASE_URL.to_string())?;
        let max_connections: u32 =
            config.get_or(&Self::key("max_connections"), DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: Self::key("max_connections"),
                message: "must be at least 1".into(),
            });
        }
        Ok(Self {
            url,
            max_connections,
        })
    }
}

/// Open a pool for `config`.
///
/// File databases are created when missing. Foreign keys are switched on for
/// every connection. An in-memory database lives only as long as its
/// connection, so it is served from exactly one connection that never expires.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DataError> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if config.is_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(
        url = %config.url,
        max_connections = pool.options().get_max_connections(),
        "database pool ready"
    );
    Ok(pool)
}
