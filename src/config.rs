//! Service settings from the environment.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    /// JSON catalog replacing the built-in price list
    pub catalog_path: Option<PathBuf>,
    pub cache_capacity: u64,
    pub cache_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: "0.0.0.0:8080".to_string(),
            catalog_path: None,
            cache_capacity: 10_000,
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl Settings {
    /// Read settings from the process environment. Call after `dotenvy`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Settings {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            catalog_path: non_empty("PRICING_CATALOG").map(PathBuf::from),
            cache_capacity: match non_empty("QUOTE_CACHE_CAPACITY") {
                Some(value) => parse_u64("QUOTE_CACHE_CAPACITY", value)?,
                None => defaults.cache_capacity,
            },
            cache_ttl: match non_empty("QUOTE_CACHE_TTL_SECS") {
                Some(value) => Duration::from_secs(parse_u64("QUOTE_CACHE_TTL_SECS", value)?),
                None => defaults.cache_ttl,
            },
        })
    }
}

fn parse_u64(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected: "a non-negative integer",
        value,
    })
}
