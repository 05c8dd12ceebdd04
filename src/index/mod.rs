//! Index subsystem for shelfdb
//!
//! Indexes are requested, not engineered: the registry keeps one
//! BTreeMap per built index over its leading field and answers equality
//! lookups with candidate slots in ascending order.
//!
//! # API
//!
//! - `create(spec, live_documents)` - Build an index (idempotent)
//! - `lookup_eq(field, value)` - Equality candidates via an index
//! - `apply_write / apply_update / apply_delete` - Keep indexes current

mod key;
mod registry;

pub use key::IndexKey;
pub use registry::{IndexHit, IndexRegistry, IndexSpec, Slot};
