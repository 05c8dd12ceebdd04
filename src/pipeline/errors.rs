//! Pipeline error type
//!
//! A pipeline is rejected as a whole when any stage is malformed; the
//! document stream is never partially transformed.

use std::fmt;

/// Error raised when a pipeline stage is malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    /// Name of the offending stage
    stage: &'static str,
    /// Human-readable reason
    message: String,
}

impl PipelineError {
    /// Creates a stage rejection
    pub fn rejected(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }

    /// Name of the offending stage
    pub fn stage(&self) -> &'static str {
        self.stage
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stage rejected: {}", self.stage, self.message)
    }
}

impl std::error::Error for PipelineError {}

/// Result type for pipeline execution
pub type PipelineResult<T> = Result<T, PipelineError>;
