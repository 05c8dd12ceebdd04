//! In-memory collection engine
//!
//! Documents live in slots in insertion order; deletes tombstone the
//! slot so later slots keep their positions and indexes stay valid.
//!
//! Execution flow for a find (strict order):
//! 1. Select candidate slots (index equality hit, else every slot)
//! 2. Read live documents, testing each against the filter
//! 3. Apply sort (if specified; stable, ties keep insertion order)
//! 4. Apply skip, then limit
//! 5. Apply projection
//! 6. Return owned results

use serde_json::Value;
use uuid::Uuid;

use crate::facade::{CollectionBackend, DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::index::{IndexHit, IndexRegistry, IndexSpec, Slot};
use crate::pipeline::{PipelineExecutor, PipelineStage};
use crate::query::{DocumentSorter, Filter, FindOptions, PredicateFilter, Projector, UpdateApplier, UpdateSpec};

use super::errors::{StoreError, StoreResult};
use super::explain::ExplainReport;

/// One schemaless collection held in memory
#[derive(Debug)]
pub struct MemoryCollection {
    /// Collection name
    name: String,
    /// Document slots; None marks a tombstone
    slots: Vec<Option<Value>>,
    /// Built indexes
    indexes: IndexRegistry,
}

impl MemoryCollection {
    /// Creates an empty collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
            indexes: IndexRegistry::new(),
        }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of live documents
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns true if the collection holds no live documents
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live documents with their slots, in insertion order
    fn live(&self) -> impl Iterator<Item = (Slot, &Value)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, doc)| doc.as_ref().map(|d| (slot, d)))
    }

    /// Candidate slots for a filter: an index equality hit when one of
    /// the filter's equality predicates has an index, else every slot.
    fn candidates(&self, filter: &Filter) -> (Option<IndexHit>, Vec<Slot>) {
        let indexed = self.indexes.leading_fields();
        if let Some(pred) = filter.equality_on(&indexed) {
            if let Some(hit) = self.indexes.lookup_eq(&pred.field, pred.op.value()) {
                let slots = hit.slots.clone();
                return (Some(hit), slots);
            }
        }
        (None, (0..self.slots.len()).collect())
    }

    /// Inserts documents, assigning `_id` where absent.
    pub fn insert_many(&mut self, documents: Vec<Value>) -> StoreResult<InsertOutcome> {
        for doc in &documents {
            if !doc.is_object() {
                return Err(StoreError::query_rejected(
                    "documents must be JSON objects",
                ));
            }
        }

        let mut inserted_count = 0;
        for mut doc in documents {
            if let Some(fields) = doc.as_object_mut() {
                if !fields.contains_key("_id") {
                    fields.insert(
                        "_id".to_string(),
                        Value::String(Uuid::new_v4().to_string()),
                    );
                }
            }

            let slot = self.slots.len();
            self.indexes.apply_write(slot, &doc);
            self.slots.push(Some(doc));
            inserted_count += 1;
        }

        Ok(InsertOutcome { inserted_count })
    }

    /// Finds matching documents under the given options.
    pub fn find(&self, filter: &Filter, options: &FindOptions) -> StoreResult<Vec<Value>> {
        let (_, candidates) = self.candidates(filter);

        let mut matches: Vec<Value> = Vec::new();
        for slot in candidates {
            let doc = match self.slots.get(slot).and_then(Option::as_ref) {
                Some(d) => d,
                None => continue,
            };
            if PredicateFilter::matches(doc, filter) {
                matches.push(doc.clone());
            }
        }

        if let Some(sort_spec) = &options.sort {
            DocumentSorter::sort(&mut matches, sort_spec);
        }

        if let Some(skip) = options.skip {
            if skip > 0 {
                matches.drain(..skip.min(matches.len()));
            }
        }
        if let Some(limit) = options.limit {
            matches.truncate(limit);
        }

        if let Some(projection) = &options.projection {
            for doc in &mut matches {
                *doc = Projector::apply(doc, projection);
            }
        }

        Ok(matches)
    }

    /// Updates the first matching document in insertion order.
    pub fn update_one(
        &mut self,
        filter: &Filter,
        update: &UpdateSpec,
    ) -> StoreResult<UpdateOutcome> {
        if update.is_empty() {
            return Err(StoreError::query_rejected("update names no fields"));
        }

        let (_, candidates) = self.candidates(filter);
        for slot in candidates {
            let doc = match self.slots.get(slot).and_then(Option::as_ref) {
                Some(d) => d,
                None => continue,
            };
            if !PredicateFilter::matches(doc, filter) {
                continue;
            }

            let before = doc.clone();
            let mut after = before.clone();
            let changed = UpdateApplier::apply(&mut after, update);
            if changed {
                self.indexes.apply_update(slot, &before, &after);
                self.slots[slot] = Some(after);
            }

            return Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: u64::from(changed),
            });
        }

        Ok(UpdateOutcome {
            matched_count: 0,
            modified_count: 0,
        })
    }

    /// Deletes the first matching document in insertion order.
    pub fn delete_one(&mut self, filter: &Filter) -> StoreResult<DeleteOutcome> {
        let (_, candidates) = self.candidates(filter);
        for slot in candidates {
            let doc = match self.slots.get(slot).and_then(Option::as_ref) {
                Some(d) => d,
                None => continue,
            };
            if !PredicateFilter::matches(doc, filter) {
                continue;
            }

            if let Some(removed) = self.slots[slot].take() {
                self.indexes.apply_delete(slot, &removed);
            }
            return Ok(DeleteOutcome { deleted_count: 1 });
        }

        Ok(DeleteOutcome { deleted_count: 0 })
    }

    /// Runs an aggregation pipeline over the live documents.
    pub fn aggregate(&self, stages: &[PipelineStage]) -> StoreResult<Vec<Value>> {
        let stream: Vec<Value> = self.live().map(|(_, doc)| doc.clone()).collect();
        Ok(PipelineExecutor::run(stream, stages)?)
    }

    /// Builds an index, idempotently. Returns the index name.
    pub fn create_index(&mut self, spec: &IndexSpec) -> StoreResult<String> {
        if spec.fields.is_empty() {
            return Err(StoreError::query_rejected("index spec names no fields"));
        }
        if spec.fields.iter().any(|(field, _)| field.is_empty()) {
            return Err(StoreError::query_rejected(
                "index spec has an empty field name",
            ));
        }

        // Field borrows stay disjoint: slots feed the registry build
        let slots = &self.slots;
        let live = slots
            .iter()
            .enumerate()
            .filter_map(|(slot, doc)| doc.as_ref().map(|d| (slot, d)));
        Ok(self.indexes.create(spec, live))
    }

    /// Runs the filter and reports the work done.
    pub fn explain(&self, filter: &Filter) -> StoreResult<ExplainReport> {
        let (hit, candidates) = self.candidates(filter);

        let mut documents_scanned = 0;
        let mut matched_count = 0;
        for slot in candidates {
            let doc = match self.slots.get(slot).and_then(Option::as_ref) {
                Some(d) => d,
                None => continue,
            };
            documents_scanned += 1;
            if PredicateFilter::matches(doc, filter) {
                matched_count += 1;
            }
        }

        Ok(ExplainReport {
            collection: self.name.clone(),
            index_used: hit.as_ref().map(|h| h.index_name.clone()),
            keys_examined: hit.map(|h| h.keys_examined).unwrap_or(0),
            documents_scanned,
            matched_count,
        })
    }
}

impl CollectionBackend for MemoryCollection {
    fn insert_many(&mut self, documents: Vec<Value>) -> StoreResult<InsertOutcome> {
        MemoryCollection::insert_many(self, documents)
    }

    fn find(&mut self, filter: &Filter, options: &FindOptions) -> StoreResult<Vec<Value>> {
        MemoryCollection::find(self, filter, options)
    }

    fn update_one(&mut self, filter: &Filter, update: &UpdateSpec) -> StoreResult<UpdateOutcome> {
        MemoryCollection::update_one(self, filter, update)
    }

    fn delete_one(&mut self, filter: &Filter) -> StoreResult<DeleteOutcome> {
        MemoryCollection::delete_one(self, filter)
    }

    fn aggregate(&mut self, stages: &[PipelineStage]) -> StoreResult<Vec<Value>> {
        MemoryCollection::aggregate(self, stages)
    }

    fn create_index(&mut self, spec: &IndexSpec) -> StoreResult<String> {
        MemoryCollection::create_index(self, spec)
    }

    fn explain(&mut self, filter: &Filter) -> StoreResult<ExplainReport> {
        MemoryCollection::explain(self, filter)
    }
}
