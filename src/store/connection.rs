//! Scoped store connection
//!
//! A connection is acquired once per run from a URI and released
//! unconditionally when it goes out of scope, success or failure.
//! Collections are materialized lazily; the store is schemaless.

use std::collections::BTreeMap;

use crate::observability::{Logger, Severity};

use super::errors::{StoreError, StoreResult};
use super::memory::MemoryCollection;

/// URI scheme accepted by the in-memory store
const URI_SCHEME: &str = "memory://";

/// An open handle to one logical database
#[derive(Debug)]
pub struct Connection {
    /// Logical database name from the URI
    database: String,
    /// Collections, materialized on first touch
    collections: BTreeMap<String, MemoryCollection>,
}

impl Connection {
    /// Opens a connection from a URI of the form `memory://<database>`.
    ///
    /// Fails with a connection error before any operation can run when
    /// the scheme is unsupported or the database name is empty.
    pub fn open(uri: &str) -> StoreResult<Self> {
        let database = uri.strip_prefix(URI_SCHEME).ok_or_else(|| {
            StoreError::connection_failed(format!("unsupported connection URI: {}", uri))
        })?;

        if database.is_empty() {
            return Err(StoreError::connection_failed(
                "connection URI has no database name",
            ));
        }
        if database.contains('/') {
            return Err(StoreError::connection_failed(format!(
                "database name may not contain '/': {}",
                database
            )));
        }

        Logger::log(
            Severity::Info,
            "connection_opened",
            &[("database", database)],
        );

        Ok(Self {
            database: database.to_string(),
            collections: BTreeMap::new(),
        })
    }

    /// Logical database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Returns the named collection, creating it empty on first touch.
    pub fn collection(&mut self, name: &str) -> &mut MemoryCollection {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| MemoryCollection::new(name))
    }

    /// Names of materialized collections, sorted
    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Release runs on every exit path, including errors
        Logger::log(
            Severity::Info,
            "connection_released",
            &[("database", self.database.as_str())],
        );
    }
}
