//! Observability for shelfdb
//!
//! Structured JSON logs on stderr so console results on stdout stay
//! machine-readable. Logs are synchronous and deterministic in key
//! order.

mod logger;

pub use logger::{Logger, Severity};
