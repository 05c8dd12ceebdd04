//! Run configuration
//!
//! The store location comes from the environment: `SHELFDB_URI` names
//! the database instance and logical database, `memory://<database>`.
//! Collection names are fixed constants owned by the callers.

use std::env;

use thiserror::Error;

/// Environment variable naming the store
pub const URI_ENV_VAR: &str = "SHELFDB_URI";

/// Default store location when the environment is silent
pub const DEFAULT_URI: &str = "memory://bookstore";

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is set but empty")]
    EmptyUri(&'static str),

    #[error("{0} is not valid UTF-8")]
    NotUtf8(&'static str),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Store connection URI
    pub uri: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// A missing variable falls back to the default URI; a present but
    /// empty or non-UTF-8 value is a configuration error. URI scheme
    /// validation belongs to `Connection::open`, not here.
    pub fn from_env() -> ConfigResult<Self> {
        match env::var(URI_ENV_VAR) {
            Ok(uri) if uri.is_empty() => Err(ConfigError::EmptyUri(URI_ENV_VAR)),
            Ok(uri) => Ok(Self { uri }),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUtf8(URI_ENV_VAR)),
        }
    }

    /// Configuration with an explicit URI (CLI override)
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}
