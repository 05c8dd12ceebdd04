//! Aggregation subsystem for shelfdb
//!
//! Pipelines are ordered stage lists executed strictly in order:
//!
//! 1. Validate every stage (reject before touching documents)
//! 2. Apply stages to the stream one at a time
//! 3. Return the transformed stream
//!
//! Group output follows first-seen key order; callers wanting a
//! particular order add a sort stage.

mod errors;
mod executor;
mod stages;

pub use errors::{PipelineError, PipelineResult};
pub use executor::PipelineExecutor;
pub use stages::{Accumulator, GroupKey, PipelineStage};
