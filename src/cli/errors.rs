//! CLI-specific error types
//!
//! CLI errors end the run; the store connection is released by scope
//! exit before the error reaches main.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration error (environment or arguments)
    ConfigError,
    /// Store operation failed
    StoreError,
    /// I/O error (stdout)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SHELF_CLI_CONFIG_ERROR",
            Self::StoreError => "SHELF_CLI_STORE_ERROR",
            Self::IoError => "SHELF_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::new(CliErrorCode::ConfigError, err.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::new(CliErrorCode::StoreError, err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::new(CliErrorCode::IoError, err.to_string())
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
