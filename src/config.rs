//! Gateway settings from environment variables.

use crate::error::ConfigError;
use crate::store::DEFAULT_DB_PATH;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "SUPPORT_DB_PATH";
pub const BIND_ADDR_VAR: &str = "SUPPORT_BIND_ADDR";
pub const MAX_CONNECTIONS_VAR: &str = "SUPPORT_MAX_CONNECTIONS";
pub const BODY_LIMIT_VAR: &str = "SUPPORT_BODY_LIMIT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    /// SQLite file holding customers and tickets.
    pub database_path: PathBuf,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Maximum tool-call request body, in bytes.
    pub body_limit: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            bind_addr: "127.0.0.1:3000".into(),
            max_connections: 4,
            body_limit: 64 * 1024,
        }
    }
}

impl GatewayConfig {
    pub fn for_database(path: impl Into<PathBuf>) -> Self {
        GatewayConfig {
            database_path: path.into(),
            ..GatewayConfig::default()
        }
    }

    /// Read settings from the process environment; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GatewayConfig::default();
        if let Some(path) = get(DB_PATH_VAR).filter(|s| !s.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(addr) = get(BIND_ADDR_VAR).filter(|s| !s.trim().is_empty()) {
            config.bind_addr = addr;
        }
        if let Some(v) = get(MAX_CONNECTIONS_VAR) {
            config.max_connections = match v.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: MAX_CONNECTIONS_VAR,
                        value: v,
                    })
                }
            };
        }
        if let Some(v) = get(BODY_LIMIT_VAR) {
            config.body_limit = v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: BODY_LIMIT_VAR,
                value: v.clone(),
            })?;
        }
        Ok(config)
    }
}
