//! Collection facade subsystem for shelfdb
//!
//! `CollectionFacade` exposes typed operations (find, insert, update,
//! delete, aggregate, create-index, explain) and delegates each one
//! synchronously to a `CollectionBackend`. No buffering, no retries, no
//! partial-failure recovery: a failure surfaces to the caller and the
//! remaining sequence of that run is the caller's to abort.

mod backend;
mod collection;
mod cursor;
mod result;

pub use backend::CollectionBackend;
pub use collection::CollectionFacade;
pub use cursor::Cursor;
pub use result::{DeleteOutcome, InsertOutcome, UpdateOutcome};
