//! Aggregation stage AST
//!
//! A pipeline is an ordered list of stages consumed by the executor.
//! The stage set is restricted: group, sort, limit.

use crate::query::SortSpec;

/// Grouping key for a group stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKey {
    /// Group on a field's value; documents missing the field group
    /// under a null key
    Field(String),
    /// Group on the publication decade computed from an integer year
    /// field: 1965 -> "1960s". Documents whose value is not a
    /// non-negative integer are excluded from the grouping.
    Decade(String),
}

impl GroupKey {
    /// Field name the key reads
    pub fn field(&self) -> &str {
        match self {
            GroupKey::Field(f) | GroupKey::Decade(f) => f,
        }
    }
}

/// Accumulator operators over a group's members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accumulator {
    /// Number of documents in the group
    Count,
    /// Sum of a numeric field (0 when no numeric values)
    Sum(String),
    /// Mean of a numeric field (null when no numeric values)
    Avg(String),
    /// Smallest value of a field (null when absent everywhere)
    Min(String),
    /// Largest value of a field (null when absent everywhere)
    Max(String),
}

impl Accumulator {
    /// Operator name for diagnostics
    pub fn op_name(&self) -> &'static str {
        match self {
            Accumulator::Count => "count",
            Accumulator::Sum(_) => "sum",
            Accumulator::Avg(_) => "avg",
            Accumulator::Min(_) => "min",
            Accumulator::Max(_) => "max",
        }
    }

    /// Field the accumulator reads, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Accumulator::Count => None,
            Accumulator::Sum(f) | Accumulator::Avg(f) | Accumulator::Min(f)
            | Accumulator::Max(f) => Some(f),
        }
    }
}

/// One pipeline stage
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineStage {
    /// Emit one document per distinct key: `_id` plus accumulator outputs
    Group {
        /// Grouping key
        key: GroupKey,
        /// Output field name -> accumulator, in declared order
        accumulators: Vec<(String, Accumulator)>,
    },
    /// Reorder the stream
    Sort(SortSpec),
    /// Truncate the stream to the first N documents
    Limit(usize),
}

impl PipelineStage {
    /// Stage name for diagnostics
    pub fn stage_name(&self) -> &'static str {
        match self {
            PipelineStage::Group { .. } => "group",
            PipelineStage::Sort(_) => "sort",
            PipelineStage::Limit(_) => "limit",
        }
    }

    /// Group stage shorthand
    pub fn group(key: GroupKey, accumulators: Vec<(String, Accumulator)>) -> Self {
        PipelineStage::Group { key, accumulators }
    }
}
