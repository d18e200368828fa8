//! Server configuration loaded from the environment.
//!
//! # Responsibility
//! - Resolve the database connection string, bind address and log settings.
//! - Fail fast when `DATABASE_URL` is missing or unusable.

use scoutbook_core::{default_log_level, DbResult, Store};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const BIND_ENV: &str = "SCOUTBOOK_BIND";
pub const LOG_LEVEL_ENV: &str = "SCOUTBOOK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SCOUTBOOK_LOG_DIR";

const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingDatabaseUrl,
    UnsupportedDatabaseUrl(String),
    InvalidBindAddress { value: String, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDatabaseUrl => {
                write!(f, "{DATABASE_URL_ENV} is not set; check your environment or .env file")
            }
            Self::UnsupportedDatabaseUrl(value) => write!(
                f,
                "unsupported {DATABASE_URL_ENV} `{value}`; expected sqlite::memory:, sqlite://<path> or a file path"
            ),
            Self::InvalidBindAddress { value, reason } => {
                write!(f, "invalid bind address `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Memory,
    File(PathBuf),
}

impl DatabaseTarget {
    /// Parses a connection string.
    ///
    /// Accepts `sqlite::memory:`, `:memory:`, `sqlite://<path>`,
    /// `sqlite:<path>` and bare file paths. Other schemes are rejected.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if trimmed == "sqlite::memory:" || trimmed == ":memory:" {
            return Ok(Self::Memory);
        }

        let path = if let Some(rest) = trimmed.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = trimmed.strip_prefix("sqlite:") {
            rest
        } else if trimmed.contains("://") {
            return Err(ConfigError::UnsupportedDatabaseUrl(trimmed.to_string()));
        } else {
            trimmed
        };

        if path.is_empty() {
            return Err(ConfigError::UnsupportedDatabaseUrl(trimmed.to_string()));
        }
        Ok(Self::File(PathBuf::from(path)))
    }

    /// Opens the store, creating and migrating the database file as needed.
    pub fn open(&self) -> DbResult<Store> {
        match self {
            Self::Memory => Store::open_in_memory(),
            Self::File(path) => Store::open(path),
        }
    }
}

impl Display for DatabaseTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "sqlite::memory:"),
            Self::File(path) => write!(f, "sqlite://{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database: DatabaseTarget,
    /// Raw listen address; parsed by `bind_addr` after CLI overrides.
    pub bind: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_ENV).ok_or(ConfigError::MissingDatabaseUrl)?;
        let database = DatabaseTarget::parse(&database_url)?;

        let bind = non_blank(lookup(BIND_ENV)).unwrap_or_else(|| DEFAULT_BIND.to_string());

        let log_level = non_blank(lookup(LOG_LEVEL_ENV))
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = non_blank(lookup(LOG_DIR_ENV));

        Ok(Self {
            database,
            bind,
            log_level,
            log_dir,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind(&self.bind)
    }
}

pub fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddress {
            value: value.to_string(),
            reason: err.to_string(),
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, DatabaseTarget, ServerConfig, BIND_ENV, DATABASE_URL_ENV, LOG_DIR_ENV,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_database_url_fails_fast() {
        let err = ServerConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingDatabaseUrl);

        let blank = ServerConfig::from_lookup(lookup_from(&[(DATABASE_URL_ENV, "  ")]));
        assert_eq!(blank.unwrap_err(), ConfigError::MissingDatabaseUrl);
    }

    #[test]
    fn parses_supported_connection_strings() {
        assert_eq!(
            DatabaseTarget::parse("sqlite::memory:").unwrap(),
            DatabaseTarget::Memory
        );
        assert_eq!(
            DatabaseTarget::parse("sqlite://data/scoutbook.db").unwrap(),
            DatabaseTarget::File(PathBuf::from("data/scoutbook.db"))
        );
        assert_eq!(
            DatabaseTarget::parse("sqlite:scoutbook.db").unwrap(),
            DatabaseTarget::File(PathBuf::from("scoutbook.db"))
        );
        assert_eq!(
            DatabaseTarget::parse("/var/lib/scoutbook.db").unwrap(),
            DatabaseTarget::File(PathBuf::from("/var/lib/scoutbook.db"))
        );
    }

    #[test]
    fn rejects_other_schemes() {
        let err = DatabaseTarget::parse("postgresql://user@localhost/db").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDatabaseUrl(_)));
    }

    #[test]
    fn applies_defaults_and_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_ENV, "sqlite::memory:"),
            (LOG_DIR_ENV, "/tmp/scoutbook-logs"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr().unwrap().port(), 8000);
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/scoutbook-logs"));
    }

    #[test]
    fn invalid_env_bind_is_reported_only_when_used() {
        let mut config = ServerConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_ENV, "sqlite::memory:"),
            (BIND_ENV, "not-an-address"),
        ]))
        .unwrap();
        assert!(matches!(
            config.bind_addr().unwrap_err(),
            ConfigError::InvalidBindAddress { .. }
        ));

        config.bind = "127.0.0.1:9000".to_string();
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
    }
}
