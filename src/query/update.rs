//! Partial-update application
//!
//! Applies an `UpdateSpec` to a document in place and reports whether the
//! document actually changed. Assigning a field its current value is a
//! match without a modification.

use serde_json::Value;

use super::ast::UpdateSpec;

/// Applies update specs to documents
pub struct UpdateApplier;

impl UpdateApplier {
    /// Applies the update to the document in place.
    ///
    /// Returns true if any field value changed. Non-object documents are
    /// left untouched.
    pub fn apply(document: &mut Value, update: &UpdateSpec) -> bool {
        let fields = match document.as_object_mut() {
            Some(f) => f,
            None => return false,
        };

        let mut changed = false;

        for field in &update.unset {
            if fields.remove(field).is_some() {
                changed = true;
            }
        }

        for (field, value) in &update.set {
            match fields.get(field) {
                Some(existing) if existing == value => {}
                _ => {
                    fields.insert(field.clone(), value.clone());
                    changed = true;
                }
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_changes_field() {
        let mut doc = json!({"title": "Dune", "price": 9.99});
        let update = UpdateSpec::new().set("price", json!(12.5));

        assert!(UpdateApplier::apply(&mut doc, &update));
        assert_eq!(doc["price"], 12.5);
    }

    #[test]
    fn test_set_same_value_is_not_a_change() {
        let mut doc = json!({"price": 12.5});
        let update = UpdateSpec::new().set("price", json!(12.5));

        assert!(!UpdateApplier::apply(&mut doc, &update));
        assert_eq!(doc["price"], 12.5);
    }

    #[test]
    fn test_set_adds_missing_field() {
        let mut doc = json!({"title": "Dune"});
        let update = UpdateSpec::new().set("in_stock", json!(false));

        assert!(UpdateApplier::apply(&mut doc, &update));
        assert_eq!(doc["in_stock"], false);
    }

    #[test]
    fn test_unset_removes_field() {
        let mut doc = json!({"title": "Dune", "price": 9.99});
        let update = UpdateSpec::new().unset("price");

        assert!(UpdateApplier::apply(&mut doc, &update));
        assert!(doc.get("price").is_none());
    }

    #[test]
    fn test_unset_missing_field_is_not_a_change() {
        let mut doc = json!({"title": "Dune"});
        let update = UpdateSpec::new().unset("price");

        assert!(!UpdateApplier::apply(&mut doc, &update));
    }

    #[test]
    fn test_set_wins_over_unset_for_same_field() {
        let mut doc = json!({"price": 9.99});
        let update = UpdateSpec::new().unset("price").set("price", json!(1.0));

        assert!(UpdateApplier::apply(&mut doc, &update));
        assert_eq!(doc["price"], 1.0);
    }
}
