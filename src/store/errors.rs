//! Store error types
//!
//! Two kinds:
//! - SHELF_CONNECTION_FAILED (FATAL): the run cannot proceed
//! - SHELF_QUERY_REJECTED (ERROR): the offending operation fails, the
//!   connection stays usable

use std::fmt;

use crate::pipeline::PipelineError;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation failed but the connection is healthy
    Error,
    /// The run must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Store-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Cannot establish or keep the store connection
    ConnectionFailed,
    /// The store rejected a filter, update, pipeline, or index spec
    QueryRejected,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::ConnectionFailed => "SHELF_CONNECTION_FAILED",
            StoreErrorCode::QueryRejected => "SHELF_QUERY_REJECTED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::ConnectionFailed => Severity::Fatal,
            StoreErrorCode::QueryRejected => Severity::Error,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with full context
#[derive(Debug)]
pub struct StoreError {
    /// Error code
    code: StoreErrorCode,
    /// Human-readable message
    message: String,
}

impl StoreError {
    /// Create a connection failure (FATAL)
    pub fn connection_failed(reason: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::ConnectionFailed,
            message: reason.into(),
        }
    }

    /// Create a query rejection
    pub fn query_rejected(reason: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::QueryRejected,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this error ends the run
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for StoreError {}

impl From<PipelineError> for StoreError {
    fn from(err: PipelineError) -> Self {
        StoreError::query_rejected(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
