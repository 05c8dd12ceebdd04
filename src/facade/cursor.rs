//! Result cursor
//!
//! A finite, non-restartable sequence of result documents. Consuming the
//! cursor consumes the results; callers wanting a second pass issue a
//! second find.

use serde_json::Value;

/// Iterator over one operation's result documents
#[derive(Debug)]
pub struct Cursor {
    documents: std::vec::IntoIter<Value>,
}

impl Cursor {
    /// Wraps a result set
    pub fn new(documents: Vec<Value>) -> Self {
        Self {
            documents: documents.into_iter(),
        }
    }

    /// Number of documents not yet consumed
    pub fn remaining(&self) -> usize {
        self.documents.len()
    }

    /// Drains the cursor into a vector
    pub fn collect_all(self) -> Vec<Value> {
        self.documents.collect()
    }
}

impl Iterator for Cursor {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.documents.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.documents.size_hint()
    }
}

impl ExactSizeIterator for Cursor {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cursor_drains_in_order() {
        let mut cursor = Cursor::new(vec![json!({"n": 1}), json!({"n": 2})]);

        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.next().unwrap()["n"], 1);
        assert_eq!(cursor.next().unwrap()["n"], 2);
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_empty_cursor() {
        let mut cursor = Cursor::new(Vec::new());
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_collect_all() {
        let cursor = Cursor::new(vec![json!({"n": 1})]);
        let docs = cursor.collect_all();
        assert_eq!(docs.len(), 1);
    }
}
