use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const STORE_KEY_VAR: &str = "SUPABASE_KEY";
pub const PORT_VAR: &str = "PORT";
pub const ROOM_STORE_VAR: &str = "ROOM_STORE";

const DEFAULT_PORT: u16 = 8080;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Where room records live
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    /// PostgREST-style HTTP store (Supabase)
    Rest { base_url: String, api_key: String },
    /// Process-local map, for development without a database
    Memory,
}

/// Server configuration, read once at startup and passed down explicitly
///
/// `store` is `None` when the store variables are absent; the server still
/// starts and answers game requests with a configuration error.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub store: Option<StoreConfig>,
}

impl Config {
    /// Reads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration from an explicit variable map
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Empty values count as unset
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match get(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: PORT_VAR,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let store = match get(ROOM_STORE_VAR).as_deref() {
            Some("memory") => Some(StoreConfig::Memory),
            Some("rest") | None => match rest_store(&get) {
                Ok(store) => Some(store),
                Err(e) => {
                    warn!(error = %e, "Room store variables are not set");
                    None
                }
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: ROOM_STORE_VAR,
                    reason: format!("expected \"rest\" or \"memory\", got \"{}\"", other),
                })
            }
        };

        Ok(Self { port, store })
    }
}

fn rest_store(get: impl Fn(&str) -> Option<String>) -> Result<StoreConfig, ConfigError> {
    let base_url = get(STORE_URL_VAR).ok_or(ConfigError::Missing(STORE_URL_VAR))?;
    let api_key = get(STORE_KEY_VAR).ok_or(ConfigError::Missing(STORE_KEY_VAR))?;
    Ok(StoreConfig::Rest {
        base_url: base_url.trim_end_matches('/').to_string(),
        api_key,
    })
}
