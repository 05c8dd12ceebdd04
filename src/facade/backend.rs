//! Backend seam for the collection facade
//!
//! The facade delegates every operation through this trait so it can be
//! retargeted to a different store without changing caller-facing
//! contracts. Filters and pipelines arrive as the crate's own algebra,
//! never as store-specific text.

use serde_json::Value;

use crate::index::IndexSpec;
use crate::pipeline::PipelineStage;
use crate::query::{Filter, FindOptions, UpdateSpec};
use crate::store::{ExplainReport, StoreResult};

use super::result::{DeleteOutcome, InsertOutcome, UpdateOutcome};

/// Operations a collection backend must provide
pub trait CollectionBackend {
    /// Insert documents, assigning identifiers where absent
    fn insert_many(&mut self, documents: Vec<Value>) -> StoreResult<InsertOutcome>;

    /// Find matching documents under the given options
    fn find(&mut self, filter: &Filter, options: &FindOptions) -> StoreResult<Vec<Value>>;

    /// Update the first matching document; zero counts when none match
    fn update_one(&mut self, filter: &Filter, update: &UpdateSpec) -> StoreResult<UpdateOutcome>;

    /// Delete the first matching document; zero count when none match
    fn delete_one(&mut self, filter: &Filter) -> StoreResult<DeleteOutcome>;

    /// Run an aggregation pipeline, stages in order
    fn aggregate(&mut self, stages: &[PipelineStage]) -> StoreResult<Vec<Value>>;

    /// Build an index, idempotently; returns the index name
    fn create_index(&mut self, spec: &IndexSpec) -> StoreResult<String>;

    /// Run a filter and report execution statistics
    fn explain(&mut self, filter: &Filter) -> StoreResult<ExplainReport>;
}
