use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Errors raised while reading database settings from the environment.
#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidVar {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("DATABASE_URL is not a valid connection string: {0}")]
    InvalidUrl(#[source] sqlx::Error),
}

/// Connection settings for the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Connection target, either parsed from `DATABASE_URL` or assembled from `PG_*` parts.
    pub connect_options: PgConnectOptions,
    /// Upper bound on pooled connections (default: `10`).
    pub max_connections: u32,
    /// How long a request waits for a free connection (default: `5`s).
    pub acquire_timeout: Duration,
}

impl DbConfig {
    /// Load database settings from environment variables.
    ///
    /// | Env Var                   | Default     |
    /// |---------------------------|-------------|
    /// | `DATABASE_URL`            | (unset)     |
    /// | `PG_HOST`                 | `localhost` |
    /// | `PG_PORT`                 | `5432`      |
    /// | `PG_USER`                 | `postgres`  |
    /// | `PG_PASSWORD`             | (unset)     |
    /// | `PG_DATABASE`             | `postgres`  |
    /// | `DB_MAX_CONNECTIONS`      | `10`        |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`         |
    ///
    /// When `DATABASE_URL` is set it wins over the `PG_*` parts.
    pub fn from_env() -> Result<Self, DbConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`] but reads through `lookup`, so tests
    /// need not mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connect_options = match lookup("DATABASE_URL") {
            Some(url) => url.parse().map_err(DbConfigError::InvalidUrl)?,
            None => {
                let port = parse_or(&lookup, "PG_PORT", 5432u16, "port number")?;
                let mut opts = PgConnectOptions::new()
                    .host(&lookup("PG_HOST").unwrap_or_else(|| "localhost".into()))
                    .port(port)
                    .username(&lookup("PG_USER").unwrap_or_else(|| "postgres".into()))
                    .database(&lookup("PG_DATABASE").unwrap_or_else(|| "postgres".into()));
                if let Some(password) = lookup("PG_PASSWORD") {
                    opts = opts.password(&password);
                }
                opts
            }
        };

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10u32, "u32")?;
        let acquire_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5u64, "u64")?;

        Ok(Self {
            connect_options,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_secs),
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, DbConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| DbConfigError::InvalidVar {
            var,
            expected,
            value,
        }),
    }
}

/// Create a connection pool from the given settings.
///
/// Each handler acquires a connection for the duration of its single
/// statement and returns it to the pool afterwards.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(config.connect_options.clone())
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = DbConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.connect_options.get_host(), "localhost");
        assert_eq!(config.connect_options.get_port(), 5432);
        assert_eq!(config.connect_options.get_username(), "postgres");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn pg_parts_are_used() {
        let config = DbConfig::from_lookup(lookup_from(&[
            ("PG_HOST", "db.internal"),
            ("PG_PORT", "6543"),
            ("PG_USER", "shop"),
            ("PG_DATABASE", "nadrah"),
        ]))
        .unwrap();
        assert_eq!(config.connect_options.get_host(), "db.internal");
        assert_eq!(config.connect_options.get_port(), 6543);
        assert_eq!(config.connect_options.get_username(), "shop");
        assert_eq!(config.connect_options.get_database(), Some("nadrah"));
    }

    #[test]
    fn database_url_overrides_parts() {
        let config = DbConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://app@urlhost:7000/store"),
            ("PG_HOST", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.connect_options.get_host(), "urlhost");
        assert_eq!(config.connect_options.get_port(), 7000);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = DbConfig::from_lookup(lookup_from(&[("PG_PORT", "abc")])).unwrap_err();
        assert_matches!(err, DbConfigError::InvalidVar { var: "PG_PORT", .. });
    }
}
