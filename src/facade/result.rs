//! Outcome records for write operations

/// Result of an insert operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Number of documents inserted
    pub inserted_count: u64,
}

/// Result of an update operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Number of documents the filter matched
    pub matched_count: u64,
    /// Number of documents actually changed
    pub modified_count: u64,
}

impl UpdateOutcome {
    /// True when the filter matched nothing
    pub fn is_no_match(&self) -> bool {
        self.matched_count == 0
    }
}

/// Result of a delete operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of documents removed
    pub deleted_count: u64,
}
