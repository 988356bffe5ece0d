//! Process configuration, read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `CONTACTBOOK_BIND` | `127.0.0.1:8000` | listen address |
//! | `CONTACTBOOK_STORE` | `memory` | `memory` or `postgres` |
//! | `DATABASE_URL` | none | required when the store is `postgres` |
//! | `CONTACTBOOK_STORE_TIMEOUT_SECS` | `10` | per-call store deadline, > 0 |
//! | `CONTACTBOOK_ID_POLICY` | `strict` | `strict` or `lenient` |
//! | `CONTACTBOOK_LOG_FORMAT` | `json` | `json` or `pretty` |

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use contactbook_observability::LogFormat;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is required: {reason}")]
    Missing { key: &'static str, reason: &'static str },

    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which document store backs the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres { database_url: String },
}

/// How a malformed path identifier is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Reject with `400 Bad Request`.
    #[default]
    Strict,
    /// Substitute the nil identifier and carry on.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub store_timeout: Duration,
    pub id_policy: IdPolicy,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup("CONTACTBOOK_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: "CONTACTBOOK_BIND",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let store = match lookup("CONTACTBOOK_STORE").as_deref().map(str::trim) {
            None | Some("memory") => StoreBackend::Memory,
            Some("postgres") => {
                let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing {
                    key: "DATABASE_URL",
                    reason: "CONTACTBOOK_STORE=postgres needs a connection string",
                })?;
                StoreBackend::Postgres { database_url }
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "CONTACTBOOK_STORE",
                    value: other.to_string(),
                    reason: "expected one of: memory, postgres".to_string(),
                });
            }
        };

        let store_timeout = match lookup("CONTACTBOOK_STORE_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "CONTACTBOOK_STORE_TIMEOUT_SECS",
                        value: raw,
                        reason: "expected a positive number of seconds".to_string(),
                    });
                }
            },
        };

        let id_policy = match lookup("CONTACTBOOK_ID_POLICY").as_deref().map(str::trim) {
            None | Some("strict") => IdPolicy::Strict,
            Some("lenient") => IdPolicy::Lenient,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "CONTACTBOOK_ID_POLICY",
                    value: other.to_string(),
                    reason: "expected one of: strict, lenient".to_string(),
                });
            }
        };

        let log_format = match lookup("CONTACTBOOK_LOG_FORMAT") {
            None => LogFormat::default(),
            Some(raw) => LogFormat::parse(&raw).ok_or_else(|| ConfigError::Invalid {
                key: "CONTACTBOOK_LOG_FORMAT",
                value: raw.clone(),
                reason: "expected one of: json, pretty".to_string(),
            })?,
        };

        Ok(Self {
            bind_addr,
            store,
            store_timeout,
            id_policy,
            log_format,
        })
    }
}
