//! Query AST structures
//!
//! Defines the filter algebra, find options, and update spec accepted by
//! the facade. Filters are built as Rust values, never parsed from text.

use std::collections::BTreeSet;

use serde_json::Value;

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: field = value
    Eq(Value),
    /// Inequality: field != value
    Ne(Value),
    /// Greater than: field > value
    Gt(Value),
    /// Greater than or equal: field >= value
    Gte(Value),
    /// Less than: field < value
    Lt(Value),
    /// Less than or equal: field <= value
    Lte(Value),
}

impl FilterOp {
    /// Returns true if this is an equality operation
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOp::Eq(_))
    }

    /// Returns true if this is a range operation
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            FilterOp::Gt(_) | FilterOp::Gte(_) | FilterOp::Lt(_) | FilterOp::Lte(_)
        )
    }

    /// Returns the operation name for explain output
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::Ne(_) => "ne",
            FilterOp::Gt(_) => "gt",
            FilterOp::Gte(_) => "gte",
            FilterOp::Lt(_) => "lt",
            FilterOp::Lte(_) => "lte",
        }
    }

    /// Returns the operand value
    pub fn value(&self) -> &Value {
        match self {
            FilterOp::Eq(v)
            | FilterOp::Ne(v)
            | FilterOp::Gt(v)
            | FilterOp::Gte(v)
            | FilterOp::Lt(v)
            | FilterOp::Lte(v) => v,
        }
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq(value),
        }
    }

    /// Create an inequality predicate
    pub fn ne(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Ne(value),
        }
    }

    /// Create a range predicate (gt)
    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gt(value),
        }
    }

    /// Create a range predicate (gte)
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte(value),
        }
    }

    /// Create a range predicate (lt)
    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lt(value),
        }
    }

    /// Create a range predicate (lte)
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte(value),
        }
    }

    /// Returns true if this is an equality predicate
    pub fn is_equality(&self) -> bool {
        self.op.is_equality()
    }
}

/// A filter: a conjunction of predicates (AND semantics).
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Predicates, all of which must match
    pub predicates: Vec<Predicate>,
}

impl Filter {
    /// Creates an empty filter (matches everything)
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a filter from a list of predicates
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    /// Adds a predicate
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds an equality predicate
    pub fn field_eq(self, field: impl Into<String>, value: Value) -> Self {
        self.with(Predicate::eq(field, value))
    }

    /// Returns true if no predicates are present
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the first equality predicate for the given set of fields,
    /// if any. Used for index selection.
    pub fn equality_on<'a>(&'a self, fields: &BTreeSet<String>) -> Option<&'a Predicate> {
        self.predicates
            .iter()
            .find(|p| p.is_equality() && fields.contains(&p.field))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Store-native numeric form used in index names
    pub fn as_index_suffix(&self) -> &'static str {
        match self {
            SortDirection::Asc => "1",
            SortDirection::Desc => "-1",
        }
    }
}

/// Sort specification (single key; ties keep insertion order)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Field projection: include-list or exclude-list.
///
/// Include projections retain `_id`; excluding `_id` requires listing it
/// in an exclude projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Keep only the listed fields (plus `_id`)
    Include(BTreeSet<String>),
    /// Drop the listed fields
    Exclude(BTreeSet<String>),
}

impl Projection {
    /// Builds an include projection from field names
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Projection::Include(fields.into_iter().map(Into::into).collect())
    }

    /// Builds an exclude projection from field names
    pub fn exclude<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Projection::Exclude(fields.into_iter().map(Into::into).collect())
    }
}

/// Options for a find operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    /// Field projection (optional)
    pub projection: Option<Projection>,
    /// Sort specification (optional; default is insertion order)
    pub sort: Option<SortSpec>,
    /// Number of matching documents to skip
    pub skip: Option<usize>,
    /// Maximum number of documents to return
    pub limit: Option<usize>,
}

impl FindOptions {
    /// Creates default options (no projection, no sort, no paging)
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the projection
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Sets the sort order
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the skip count
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Pagination shorthand: pages are 1-based
    pub fn page(self, page_number: usize, page_size: usize) -> Self {
        self.with_skip(page_number.saturating_sub(1) * page_size)
            .with_limit(page_size)
    }
}

/// Partial update applied to the first matching document.
///
/// `set` assigns field values; `unset` removes fields. A field named in
/// both sections is assigned (set wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSpec {
    /// Field assignments
    pub set: Vec<(String, Value)>,
    /// Fields to remove
    pub unset: Vec<String>,
}

impl UpdateSpec {
    /// Creates an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field assignment
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.set.push((field.into(), value));
        self
    }

    /// Adds a field removal
    pub fn unset(mut self, field: impl Into<String>) -> Self {
        self.unset.push(field.into());
        self
    }

    /// Returns true if the update names no fields
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty()
    }
}
