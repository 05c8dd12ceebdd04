//! Query subsystem for shelfdb
//!
//! The filter algebra is a restricted structure: field comparison
//! predicates combined by conjunction. Evaluation is strict:
//!
//! - No type coercion
//! - Missing fields and null values never match
//! - Sort is stable; ties keep insertion order
//! - Projection runs last

mod ast;
mod filters;
mod project;
mod sorter;
mod update;

pub use ast::{
    Filter, FilterOp, FindOptions, Predicate, Projection, SortDirection, SortSpec, UpdateSpec,
};
pub use filters::PredicateFilter;
pub use project::Projector;
pub use sorter::DocumentSorter;
pub use update::UpdateApplier;
