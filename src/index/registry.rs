//! Index registry
//!
//! Named field indexes over document slots, rebuilt incrementally as the
//! collection changes. Creation is idempotent: an existing identical spec
//! returns the existing name without building a duplicate.
//!
//! Lookup acceleration covers equality on an index's leading field; the
//! engine falls back to a full scan for everything else.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::query::SortDirection;

use super::key::IndexKey;

/// Document slot number inside a collection
pub type Slot = usize;

/// Requested index shape: ordered (field, direction) pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    /// Indexed fields in order; the first field drives lookups
    pub fields: Vec<(String, SortDirection)>,
}

impl IndexSpec {
    /// Single ascending field
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), SortDirection::Asc)],
        }
    }

    /// Single descending field
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), SortDirection::Desc)],
        }
    }

    /// Appends another field
    pub fn then(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.fields.push((field.into(), direction));
        self
    }

    /// Store-native index name: fields joined as `{field}_{1|-1}`
    pub fn name(&self) -> String {
        let segments: Vec<String> = self
            .fields
            .iter()
            .map(|(field, direction)| format!("{}_{}", field, direction.as_index_suffix()))
            .collect();
        segments.join("_")
    }

    /// Leading field, if any
    pub fn leading_field(&self) -> Option<&str> {
        self.fields.first().map(|(field, _)| field.as_str())
    }
}

/// One built index: the spec plus a tree over the leading field
#[derive(Debug)]
struct NamedIndex {
    name: String,
    spec: IndexSpec,
    tree: BTreeMap<IndexKey, Vec<Slot>>,
}

impl NamedIndex {
    fn insert(&mut self, key: IndexKey, slot: Slot) {
        let slots = self.tree.entry(key).or_default();
        // Slots stay sorted ascending for deterministic candidate order
        match slots.binary_search(&slot) {
            Ok(_) => {}
            Err(pos) => slots.insert(pos, slot),
        }
    }

    fn remove(&mut self, key: &IndexKey, slot: Slot) {
        if let Some(slots) = self.tree.get_mut(key) {
            slots.retain(|s| *s != slot);
            if slots.is_empty() {
                self.tree.remove(key);
            }
        }
    }
}

/// A hit from an index lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHit {
    /// Name of the index that served the lookup
    pub index_name: String,
    /// Candidate slots, ascending
    pub slots: Vec<Slot>,
    /// Number of index entries examined
    pub keys_examined: usize,
}

/// Registry of built indexes for one collection
#[derive(Debug, Default)]
pub struct IndexRegistry {
    indexes: Vec<NamedIndex>,
}

impl IndexRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index over the live documents, idempotently.
    ///
    /// Returns the index name. An identical existing spec returns the
    /// existing name; no duplicate is built.
    pub fn create<'a, I>(&mut self, spec: &IndexSpec, live_documents: I) -> String
    where
        I: Iterator<Item = (Slot, &'a Value)>,
    {
        if let Some(existing) = self.indexes.iter().find(|idx| idx.spec == *spec) {
            return existing.name.clone();
        }

        let mut index = NamedIndex {
            name: spec.name(),
            spec: spec.clone(),
            tree: BTreeMap::new(),
        };

        if let Some(field) = index.spec.leading_field().map(str::to_owned) {
            for (slot, doc) in live_documents {
                if let Some(key) = doc.get(&field).and_then(IndexKey::from_json) {
                    index.insert(key, slot);
                }
            }
        }

        let name = index.name.clone();
        self.indexes.push(index);
        name
    }

    /// Number of built indexes
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns true if no indexes are built
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Names of all built indexes, in creation order
    pub fn names(&self) -> Vec<&str> {
        self.indexes.iter().map(|idx| idx.name.as_str()).collect()
    }

    /// Fields that have an index with that leading field
    pub fn leading_fields(&self) -> std::collections::BTreeSet<String> {
        self.indexes
            .iter()
            .filter_map(|idx| idx.spec.leading_field().map(str::to_owned))
            .collect()
    }

    /// Equality lookup on an index's leading field.
    ///
    /// Returns None when no index leads with the field or the value is
    /// not indexable.
    pub fn lookup_eq(&self, field: &str, value: &Value) -> Option<IndexHit> {
        let key = IndexKey::from_json(value)?;
        let index = self
            .indexes
            .iter()
            .find(|idx| idx.spec.leading_field() == Some(field))?;

        let slots = index.tree.get(&key).cloned().unwrap_or_default();
        Some(IndexHit {
            index_name: index.name.clone(),
            keys_examined: slots.len(),
            slots,
        })
    }

    /// Updates all indexes after a document lands in a slot
    pub fn apply_write(&mut self, slot: Slot, doc: &Value) {
        for index in &mut self.indexes {
            if let Some(field) = index.spec.leading_field().map(str::to_owned) {
                if let Some(key) = doc.get(&field).and_then(IndexKey::from_json) {
                    index.insert(key, slot);
                }
            }
        }
    }

    /// Updates all indexes after a document leaves a slot
    pub fn apply_delete(&mut self, slot: Slot, doc: &Value) {
        for index in &mut self.indexes {
            if let Some(field) = index.spec.leading_field().map(str::to_owned) {
                if let Some(key) = doc.get(&field).and_then(IndexKey::from_json) {
                    index.remove(&key, slot);
                }
            }
        }
    }

    /// Updates all indexes after a document in a slot changes
    pub fn apply_update(&mut self, slot: Slot, before: &Value, after: &Value) {
        self.apply_delete(slot, before);
        self.apply_write(slot, after);
    }
}
