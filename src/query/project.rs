//! Field projection applied to result documents
//!
//! Include-lists keep the named fields plus `_id`; exclude-lists drop the
//! named fields. Projection runs last, after filtering, sort, and paging.

use serde_json::{Map, Value};

use super::ast::Projection;

/// Applies projections to documents
pub struct Projector;

impl Projector {
    /// Returns a copy of the document with the projection applied.
    ///
    /// Non-object documents are returned unchanged.
    pub fn apply(document: &Value, projection: &Projection) -> Value {
        let fields = match document.as_object() {
            Some(f) => f,
            None => return document.clone(),
        };

        match projection {
            Projection::Include(keep) => {
                let mut out = Map::new();
                for (key, value) in fields {
                    if key == "_id" || keep.contains(key) {
                        out.insert(key.clone(), value.clone());
                    }
                }
                Value::Object(out)
            }
            Projection::Exclude(drop) => {
                let mut out = Map::new();
                for (key, value) in fields {
                    if !drop.contains(key) {
                        out.insert(key.clone(), value.clone());
                    }
                }
                Value::Object(out)
            }
        }
    }
}
