//! Service configuration
//!
//! Settings are read from the environment, falling back to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::db;

/// Configuration errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    pub db_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    /// Page size used when a listing request gives no limit
    pub list_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: db::default_db_path(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            list_limit: db::queries::DEFAULT_LIST_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Config {
            db_path: lookup("TRANSPORT_DB_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            host: parse_var(&lookup, "TRANSPORT_HOST")?.unwrap_or(defaults.host),
            port: parse_var(&lookup, "TRANSPORT_PORT")?.unwrap_or(defaults.port),
            list_limit: parse_var(&lookup, "TRANSPORT_LIST_LIMIT")?.unwrap_or(defaults.list_limit),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(None),
    }
}
