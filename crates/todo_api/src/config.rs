//! Server configuration from the environment.
//!
//! # Invariants
//! - Every value has a default except the log directory, which is optional.
//! - Malformed values fail startup instead of being silently replaced.

use axum::http::HeaderName;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ADDR_VAR: &str = "TODO_BIND_ADDR";
pub const DB_PATH_VAR: &str = "TODO_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "TODO_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "TODO_LOG_DIR";
pub const USER_HEADER_VAR: &str = "TODO_USER_HEADER";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DB_PATH: &str = "todo.sqlite3";
pub const DEFAULT_USER_HEADER: &str = "x-authenticated-user";

#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddr(String),
    InvalidUserHeader(String),
    EmptyDbPath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBindAddr(value) => {
                write!(f, "{BIND_ADDR_VAR} is not a socket address: `{value}`")
            }
            Self::InvalidUserHeader(value) => {
                write!(f, "{USER_HEADER_VAR} is not a valid header name: `{value}`")
            }
            Self::EmptyDbPath => write!(f, "{DB_PATH_VAR} must not be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    /// Passed to `todo_core::init_logging`, which validates it.
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<String>,
    /// Header carrying the principal verified by the upstream authenticator.
    pub user_header: HeaderName,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr_text = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_text
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr_text.clone()))?;

        let db_path = match lookup(DB_PATH_VAR) {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::EmptyDbPath),
            Some(value) => PathBuf::from(value.trim()),
            None => PathBuf::from(DEFAULT_DB_PATH),
        };

        let header_text = get(USER_HEADER_VAR).unwrap_or_else(|| DEFAULT_USER_HEADER.to_string());
        let user_header = HeaderName::from_bytes(header_text.to_ascii_lowercase().as_bytes())
            .map_err(|_| ConfigError::InvalidUserHeader(header_text.clone()))?;

        Ok(Self {
            bind_addr,
            db_path,
            log_level: get(LOG_LEVEL_VAR)
                .unwrap_or_else(|| todo_core::default_log_level().to_string()),
            log_dir: get(LOG_DIR_VAR),
            user_header,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[])).expect("config should load");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.db_path.to_str(), Some("todo.sqlite3"));
        assert_eq!(config.log_level, todo_core::default_log_level());
        assert!(config.log_dir.is_none());
        assert_eq!(config.user_header.as_str(), "x-authenticated-user");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TODO_BIND_ADDR", "0.0.0.0:8080"),
            ("TODO_DB_PATH", "/var/lib/todo/tasks.db"),
            ("TODO_LOG_LEVEL", "warn"),
            ("TODO_LOG_DIR", "/var/log/todo"),
            ("TODO_USER_HEADER", "X-Forwarded-User"),
        ]))
        .expect("config should load");

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db_path.to_str(), Some("/var/lib/todo/tasks.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/todo"));
        assert_eq!(config.user_header.as_str(), "x-forwarded-user");
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("TODO_BIND_ADDR", "localhost")]))
            .expect_err("bare host should be rejected");
        assert!(matches!(err, ConfigError::InvalidBindAddr(value) if value == "localhost"));

        let err = ServerConfig::from_lookup(lookup(&[("TODO_USER_HEADER", "bad header")]))
            .expect_err("invalid header name should be rejected");
        assert!(matches!(err, ConfigError::InvalidUserHeader(_)));

        let err = ServerConfig::from_lookup(lookup(&[("TODO_DB_PATH", "  ")]))
            .expect_err("blank db path should be rejected");
        assert!(matches!(err, ConfigError::EmptyDbPath));
    }
}
