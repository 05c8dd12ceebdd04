//! Explain output
//!
//! Execution statistics for a filter, produced by running the filter and
//! counting the work. Diagnostic output, not a caller-facing contract.

use std::fmt;

/// Execution statistics for one filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainReport {
    /// Collection the filter ran against
    pub collection: String,
    /// Index that served candidate selection, if any
    pub index_used: Option<String>,
    /// Number of index entries examined
    pub keys_examined: usize,
    /// Number of documents read and tested
    pub documents_scanned: usize,
    /// Number of documents the filter matched
    pub matched_count: usize,
}

impl ExplainReport {
    /// True when candidate selection went through an index
    pub fn used_index(&self) -> bool {
        self.index_used.is_some()
    }
}

impl fmt::Display for ExplainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN ===")?;
        writeln!(f, "Collection: {}", self.collection)?;
        match &self.index_used {
            Some(name) => writeln!(f, "Index: {}", name)?,
            None => writeln!(f, "Index: none (collection scan)")?,
        }
        writeln!(f, "Keys Examined: {}", self.keys_examined)?;
        writeln!(f, "Documents Scanned: {}", self.documents_scanned)?;
        writeln!(f, "Matched: {}", self.matched_count)?;
        Ok(())
    }
}
