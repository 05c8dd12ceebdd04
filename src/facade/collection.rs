//! Collection facade
//!
//! A narrow, typed surface over generic document-store operations, so
//! callers never touch raw engine state. Every call delegates to the
//! backend and blocks until it answers; the facade holds no copies of
//! documents beyond the transient result of the current call.

use serde_json::Value;

use crate::index::IndexSpec;
use crate::pipeline::PipelineStage;
use crate::query::{Filter, FindOptions, UpdateSpec};
use crate::store::{ExplainReport, StoreResult};

use super::backend::CollectionBackend;
use super::cursor::Cursor;
use super::result::{DeleteOutcome, InsertOutcome, UpdateOutcome};

/// Typed operations over one named collection.
///
/// Not safe for concurrent callers; serialize externally or use
/// independent facade instances.
pub struct CollectionFacade<'a, B: CollectionBackend> {
    backend: &'a mut B,
}

impl<'a, B: CollectionBackend> CollectionFacade<'a, B> {
    /// Wraps a backend handle
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Inserts documents; `_id` is assigned where absent.
    pub fn insert_many(&mut self, documents: Vec<Value>) -> StoreResult<InsertOutcome> {
        self.backend.insert_many(documents)
    }

    /// Finds matching documents.
    ///
    /// Results arrive in insertion order unless a sort is given; the
    /// cursor is finite and non-restartable. A filter with no matches
    /// yields an empty cursor, not an error.
    pub fn find_many(&mut self, filter: &Filter, options: &FindOptions) -> StoreResult<Cursor> {
        self.backend.find(filter, options).map(Cursor::new)
    }

    /// Updates the first matching document.
    ///
    /// No match is not an error: both counts come back zero.
    pub fn update_one(
        &mut self,
        filter: &Filter,
        update: &UpdateSpec,
    ) -> StoreResult<UpdateOutcome> {
        self.backend.update_one(filter, update)
    }

    /// Deletes the first matching document; zero count when none match.
    pub fn delete_one(&mut self, filter: &Filter) -> StoreResult<DeleteOutcome> {
        self.backend.delete_one(filter)
    }

    /// Runs an aggregation pipeline, stages in the given order.
    pub fn aggregate(&mut self, stages: &[PipelineStage]) -> StoreResult<Cursor> {
        self.backend.aggregate(stages).map(Cursor::new)
    }

    /// Requests an index. Idempotent: an identical existing spec returns
    /// the existing name without error.
    pub fn create_index(&mut self, spec: &IndexSpec) -> StoreResult<String> {
        self.backend.create_index(spec)
    }

    /// Returns execution statistics for a filter. Diagnostic output,
    /// not a contract.
    pub fn explain(&mut self, filter: &Filter) -> StoreResult<ExplainReport> {
        self.backend.explain(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCollection;
    use serde_json::json;

    #[test]
    fn test_facade_delegates_round_trip() {
        let mut coll = MemoryCollection::new("books");
        let mut facade = CollectionFacade::new(&mut coll);

        facade
            .insert_many(vec![json!({"title": "Dune", "genre": "Fiction"})])
            .unwrap();

        let cursor = facade
            .find_many(
                &Filter::all().field_eq("genre", json!("Fiction")),
                &FindOptions::new(),
            )
            .unwrap();
        let docs = cursor.collect_all();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["title"], "Dune");
    }

    #[test]
    fn test_zero_match_is_empty_not_error() {
        let mut coll = MemoryCollection::new("books");
        let mut facade = CollectionFacade::new(&mut coll);

        let cursor = facade
            .find_many(
                &Filter::all().field_eq("genre", json!("Poetry")),
                &FindOptions::new(),
            )
            .unwrap();
        assert_eq!(cursor.remaining(), 0);

        let deleted = facade
            .delete_one(&Filter::all().field_eq("genre", json!("Poetry")))
            .unwrap();
        assert_eq!(deleted.deleted_count, 0);
    }
}
